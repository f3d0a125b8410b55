//! 設定管理
//!
//! ProbeConfig と環境変数読み込みヘルパー

use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// ベースURLの環境変数名
pub const ENV_BASE_URL: &str = "EXPROBE_BASE_URL";
/// ログレベルの環境変数名
pub const ENV_LOG_LEVEL: &str = "EXPROBE_LOG_LEVEL";
/// リクエストタイムアウト（秒）の環境変数名
pub const ENV_TIMEOUT_SECS: &str = "EXPROBE_TIMEOUT_SECS";

/// 環境変数を取得し、未設定ならデフォルト値を返す
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// 環境変数を取得して型変換する（未設定・変換失敗時は None）
pub fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// プローブ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// 対象サーバーのベースURL (デフォルト: "http://localhost:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// ログレベル (デフォルト: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// リクエストタイムアウト（秒）。None の場合はトランスポートの既定値に従う
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: default_log_level(),
            timeout_secs: None,
        }
    }
}

impl ProbeConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            base_url: get_env_or(ENV_BASE_URL, &default_base_url()),
            log_level: get_env_or(ENV_LOG_LEVEL, &default_log_level()),
            timeout_secs: get_env_parse(ENV_TIMEOUT_SECS),
        }
    }

    /// 設定値を検証する
    ///
    /// ベースURLは `http://` か `https://` で始まり、ホスト部が空でないこと。
    pub fn validate(&self) -> Result<(), CommonError> {
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or_else(|| {
                CommonError::InvalidBaseUrl(format!(
                    "{} (scheme must be http or https)",
                    self.base_url
                ))
            })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.starts_with(':') {
            return Err(CommonError::InvalidBaseUrl(format!(
                "{} (missing host)",
                self.base_url
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(CommonError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// ベースURLとパスを連結したリクエストURL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
