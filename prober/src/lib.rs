//! Exception Probe
//!
//! 例外処理エンドポイントに固定順でGETリクエストを送り、
//! ステータスコード・JSONボディ・追跡IDを表示する手動スモークテスト

#![warn(missing_docs)]

/// 固定テストケース一覧
pub mod cases;

/// CLI定義
pub mod cli;

/// エラー型
pub mod error;

/// ログ初期化
pub mod logging;

/// コンソール出力の整形
pub mod report;

/// プローブ実行
pub mod runner;

pub use error::ProbeError;
pub use runner::{CaseOutcome, ProbeRunner, RunOutcome, RunReport};
