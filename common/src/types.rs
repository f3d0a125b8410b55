//! 共通型定義
//!
//! TestCase, ProbeResult, ResponseEnvelope等のコアデータ型

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 追跡IDを格納するレスポンスのキー名
pub const TRACE_ID_KEY: &str = "traceId";

/// テストケース（エンドポイントパスと表示用の説明）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    /// リクエストパス（`/` 始まり、クエリ文字列を含んでよい）
    pub path: String,
    /// 表示用の説明
    pub description: String,
}

impl TestCase {
    /// 新しいテストケースを作成
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

/// 1回のプローブ結果
///
/// リクエストごとに生成され、表示後に破棄される。
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスボディ（生テキスト）
    pub body_text: String,
    /// JSONとして解析できた場合のボディ
    pub parsed_json: Option<Value>,
    /// ボディがオブジェクトで `traceId` を含む場合の値
    pub trace_id: Option<String>,
}

impl ProbeResult {
    /// ステータスコードとボディからプローブ結果を組み立てる
    ///
    /// JSONとして解析できないボディはエラーにせず、`parsed_json` を None にする。
    pub fn from_response(status_code: u16, body_text: impl Into<String>) -> Self {
        let body_text = body_text.into();
        let parsed_json = serde_json::from_str::<Value>(&body_text).ok();
        let trace_id = parsed_json.as_ref().and_then(extract_trace_id);

        Self {
            status_code,
            body_text,
            parsed_json,
            trace_id,
        }
    }

    /// ボディがJSONとして解析できたか
    pub fn is_json(&self) -> bool {
        self.parsed_json.is_some()
    }

    /// サーバーの統一レスポンス形式として解釈する
    pub fn envelope(&self) -> Option<ResponseEnvelope> {
        self.parsed_json
            .as_ref()
            .filter(|value| value.is_object())
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 自動チェック結果を算出する
    pub fn checks(&self) -> ProbeChecks {
        ProbeChecks {
            json_body: self.is_json(),
            consistent_shape: self
                .envelope()
                .map(|envelope| envelope.has_standard_shape())
                .unwrap_or(false),
            trace_id_present: self.has_usable_trace_id(),
        }
    }

    /// 相関に使える追跡IDを持つか
    ///
    /// `"traceId": null` はキーがあるので表示はするが、追跡IDとしては数えない。
    pub fn has_usable_trace_id(&self) -> bool {
        self.parsed_json
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|object| object.get(TRACE_ID_KEY))
            .map(|value| !value.is_null())
            .unwrap_or(false)
    }
}

/// オブジェクトの `traceId` を表示用文字列として取り出す
///
/// 文字列はそのまま、それ以外の値はJSON表記で返す。
fn extract_trace_id(value: &Value) -> Option<String> {
    match value.as_object()?.get(TRACE_ID_KEY)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// サーバーの統一レスポンス形式
///
/// `{code, message, data, timestamp, traceId}`。全フィールド任意。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseEnvelope {
    /// アプリケーションエラーコード
    #[serde(default)]
    pub code: Option<i64>,
    /// メッセージ
    #[serde(default)]
    pub message: Option<String>,
    /// 付随データ
    #[serde(default)]
    pub data: Option<Value>,
    /// サーバー側タイムスタンプ
    #[serde(default)]
    pub timestamp: Option<Value>,
    /// 追跡ID
    #[serde(default, rename = "traceId")]
    pub trace_id: Option<Value>,
}

impl ResponseEnvelope {
    /// `code` と `message` を両方持つか
    pub fn has_standard_shape(&self) -> bool {
        self.code.is_some() && self.message.is_some()
    }
}

/// プローブ結果に対する自動チェック
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeChecks {
    /// ボディがJSON
    pub json_body: bool,
    /// 統一レスポンス形式（code + message）
    pub consistent_shape: bool,
    /// 追跡IDあり
    pub trace_id_present: bool,
}

/// 接続確認の状態
///
/// 最初のケースのみ接続失敗を致命的として扱う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttemptPhase {
    /// 最初の試行（接続未確認）
    #[default]
    FirstAttempt,
    /// 接続確認済み
    SubsequentAttempt,
}

impl AttemptPhase {
    /// 成功後の状態に遷移する
    pub fn advance(self) -> Self {
        AttemptPhase::SubsequentAttempt
    }

    /// 最初の試行か
    pub fn is_first(self) -> bool {
        self == AttemptPhase::FirstAttempt
    }
}
