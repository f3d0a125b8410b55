//! コンソール出力の整形
//!
//! 表示はすべて標準出力向け。各関数は任意の `Write` に書き込む。

use std::io::Write;

use exprobe_common::types::{ProbeResult, TestCase};

use crate::cases::EXCEPTION_LOG_TABLE;
use crate::error::ProbeError;

/// 区切り線の長さ
const SEPARATOR_WIDTH: usize = 50;

/// 追跡IDの見出し
pub const TRACE_ID_LABEL: &str = "Trace ID:";

/// 非JSONボディの見出し
pub const NON_JSON_LABEL: &str = "Response body (non-JSON):";

/// 区切り線
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// 実行開始時のバナー
pub fn write_banner<W: Write>(out: &mut W, base_url: &str) -> Result<(), ProbeError> {
    writeln!(out, "Exception handling test script")?;
    writeln!(
        out,
        "Please make sure the application server is running at {}",
        base_url
    )?;
    Ok(())
}

/// ケースの見出し
pub fn write_case_header<W: Write>(out: &mut W, case: &TestCase) -> Result<(), ProbeError> {
    writeln!(out, "\n{}", separator())?;
    writeln!(out, "Test: {}", case.description)?;
    writeln!(out, "Endpoint: {}", case.path)?;
    writeln!(out, "{}", separator())?;
    Ok(())
}

/// レスポンス内容（ステータス・ボディ・追跡ID）
pub fn write_probe_result<W: Write>(out: &mut W, result: &ProbeResult) -> Result<(), ProbeError> {
    writeln!(out, "Status code: {}", result.status_code)?;

    match &result.parsed_json {
        Some(value) => {
            let pretty = serde_json::to_string_pretty(value)?;
            writeln!(out, "Response body:\n{}", pretty)?;

            if let Some(trace_id) = &result.trace_id {
                writeln!(out, "\n{} {}", TRACE_ID_LABEL, trace_id)?;
                writeln!(
                    out,
                    "Hint: you can look up the exception log for this traceId in the database"
                )?;
            }
        }
        None => {
            writeln!(out, "{} {}", NON_JSON_LABEL, result.body_text)?;
        }
    }

    Ok(())
}

/// 接続失敗メッセージ
pub fn write_connection_failure<W: Write>(out: &mut W, base_url: &str) -> Result<(), ProbeError> {
    writeln!(out, "Error: unable to connect to server {}", base_url)?;
    writeln!(out, "Please make sure the application server is running")?;
    Ok(())
}

/// 最初のケースで接続できなかった場合の中断メッセージ
pub fn write_abort<W: Write>(out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "\nUnable to connect to server, aborting tests")?;
    Ok(())
}

/// 完了メッセージと手動確認チェックリスト
pub fn write_summary<W: Write>(out: &mut W) -> Result<(), ProbeError> {
    writeln!(out, "\n{}", separator())?;
    writeln!(out, "All tests completed!")?;
    writeln!(out, "{}", separator())?;

    writeln!(out, "\nException handling test summary:")?;
    writeln!(
        out,
        "1. Check that every exception returned an appropriate HTTP status code"
    )?;
    writeln!(out, "2. Check that the response format is consistent")?;
    writeln!(out, "3. Check that a trace ID (traceId) is present")?;
    writeln!(
        out,
        "4. Check that exception logs were recorded in the database"
    )?;
    writeln!(
        out,
        "\nYou can inspect the {} table in the database to verify the exception log records",
        EXCEPTION_LOG_TABLE
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), ProbeError>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_case_header_layout() {
        let case = TestCase::new("/exception-test/auth", "Authentication exception");
        let text = render(|out| write_case_header(out, &case));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "Test: Authentication exception");
        assert_eq!(lines[3], "Endpoint: /exception-test/auth");
        assert_eq!(lines[4], "=".repeat(50));
    }

    #[test]
    fn test_json_body_is_pretty_printed_with_trace_id() {
        let result = ProbeResult::from_response(
            401,
            r#"{"code":401,"message":"测试认证异常","traceId":"abc-123"}"#,
        );
        let text = render(|out| write_probe_result(out, &result));

        assert!(text.starts_with("Status code: 401\nResponse body:\n{\n  \"code\": 401,\n"));
        // 非ASCII文字はエスケープしない
        assert!(text.contains("\"message\": \"测试认证异常\""));
        assert!(text.contains("\nTrace ID: abc-123\n"));
        assert!(text.contains("Hint:"));
    }

    #[test]
    fn test_json_body_keeps_server_key_order() {
        let result = ProbeResult::from_response(200, r#"{"zeta":1,"alpha":2}"#);
        let text = render(|out| write_probe_result(out, &result));

        let zeta = text.find("\"zeta\"").unwrap();
        let alpha = text.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_json_without_trace_id_has_no_hint() {
        let result = ProbeResult::from_response(200, r#"{"code":200,"message":"ok"}"#);
        let text = render(|out| write_probe_result(out, &result));

        assert!(!text.contains(TRACE_ID_LABEL));
        assert!(!text.contains("Hint:"));
    }

    #[test]
    fn test_non_json_body_printed_raw() {
        let result = ProbeResult::from_response(502, "not json {{{");
        let text = render(|out| write_probe_result(out, &result));

        assert_eq!(
            text,
            "Status code: 502\nResponse body (non-JSON): not json {{{\n"
        );
    }

    #[test]
    fn test_connection_failure_names_base_url() {
        let text = render(|out| write_connection_failure(out, "http://localhost:8080"));

        assert!(text.contains("http://localhost:8080"));
        assert!(text.contains("make sure the application server is running"));
    }

    #[test]
    fn test_summary_checklist() {
        let text = render(|out| write_summary(out));

        assert!(text.contains("All tests completed!"));
        for n in 1..=4 {
            assert!(text.contains(&format!("\n{}. Check", n)));
        }
        assert!(text.contains("sys_exception_log"));
    }
}
