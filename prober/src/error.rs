//! エラー型定義

use exprobe_common::error::CommonError;
use thiserror::Error;

/// プローブ実行のエラー型
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// サーバーに接続できない
    #[error("Unable to connect to server {base_url}: {message}")]
    Connection {
        /// 接続先ベースURL
        base_url: String,
        /// トランスポートのエラーメッセージ
        message: String,
    },

    /// 接続以外のHTTPクライアントエラー
    #[error("HTTP client error: {0}")]
    Http(String),

    /// 標準出力への書き込み失敗
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// reqwestのエラーを分類する
    ///
    /// 接続確立に失敗した場合と、レスポンスを受け取る前に接続が切断された場合は
    /// [`ProbeError::Connection`] になる。タイムアウト・ボディ読み込み失敗は
    /// [`ProbeError::Http`] のまま。
    pub fn from_transport(base_url: &str, err: reqwest::Error) -> Self {
        let dropped_before_response = err.is_request()
            && err.status().is_none()
            && !err.is_timeout()
            && !err.is_body()
            && !err.is_decode();

        if err.is_connect() || dropped_before_response {
            ProbeError::Connection {
                base_url: base_url.to_string(),
                message: err.to_string(),
            }
        } else {
            ProbeError::Http(err.to_string())
        }
    }

    /// 接続失敗か
    pub fn is_connection(&self) -> bool {
        matches!(self, ProbeError::Connection { .. })
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Common(CommonError::Serialization(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display_names_base_url() {
        let err = ProbeError::Connection {
            base_url: "http://localhost:8080".to_string(),
            message: "connection refused".to_string(),
        };

        assert!(err.is_connection());
        assert_eq!(
            err.to_string(),
            "Unable to connect to server http://localhost:8080: connection refused"
        );
    }

    #[test]
    fn test_common_error_is_transparent() {
        let err: ProbeError = CommonError::InvalidBaseUrl("ftp://x".to_string()).into();

        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Invalid base URL: ftp://x");
    }
}
