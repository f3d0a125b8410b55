//! ログ初期化
//!
//! 標準出力はプローブ結果の表示に使うため、ログは標準エラーへ出す。

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ProbeError;
use exprobe_common::error::CommonError;

/// ログレベル文字列からフィルタを作る
///
/// `RUST_LOG` が設定されていればそちらを優先する。
pub fn build_filter(level: &str) -> Result<EnvFilter, ProbeError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| {
        ProbeError::Common(CommonError::Config(format!(
            "invalid log level '{}': {}",
            level, e
        )))
    })
}

/// tracingサブスクライバーを初期化する
pub fn init(level: &str) -> Result<(), ProbeError> {
    let filter = build_filter(level)?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| {
            ProbeError::Common(CommonError::Config(format!(
                "failed to initialize logging: {}",
                e
            )))
        })
}
