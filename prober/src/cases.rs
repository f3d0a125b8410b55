//! 固定テストケース一覧
//!
//! 並び順がそのまま実行順・表示順になる。

use exprobe_common::types::TestCase;

/// 既定の対象サーバー
pub const BASE_URL: &str = "http://localhost:8080";

/// 例外ログが記録されるテーブル名
pub const EXCEPTION_LOG_TABLE: &str = "sys_exception_log";

/// (パス, 説明)
const EXCEPTION_TEST_ENDPOINTS: [(&str, &str); 11] = [
    (
        "/exception-test/business?withData=false",
        "Business exception (without data)",
    ),
    (
        "/exception-test/business?withData=true",
        "Business exception (with data)",
    ),
    ("/exception-test/auth", "Authentication exception"),
    ("/exception-test/system", "System exception"),
    ("/exception-test/nullpointer", "Null pointer exception"),
    ("/exception-test/array", "Array index out of bounds exception"),
    (
        "/exception-test/numberformat?number=abc",
        "Number format exception",
    ),
    ("/exception-test/arithmetic", "Arithmetic exception"),
    ("/exception-test/classcast", "Class cast exception"),
    (
        "/exception-test/illegal-argument?value=",
        "IllegalArgumentException (empty value)",
    ),
    (
        "/exception-test/illegal-argument?value=test",
        "IllegalArgumentException (valid value)",
    ),
];

/// 例外カテゴリごとの既定テストケース
pub fn default_test_cases() -> Vec<TestCase> {
    EXCEPTION_TEST_ENDPOINTS
        .iter()
        .map(|(path, description)| TestCase::new(*path, *description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_cases_count_and_order() {
        let cases = default_test_cases();

        assert_eq!(cases.len(), 11);
        assert_eq!(cases[0].path, "/exception-test/business?withData=false");
        assert_eq!(cases[9].path, "/exception-test/illegal-argument?value=");
        assert_eq!(cases[10].path, "/exception-test/illegal-argument?value=test");
    }

    #[test]
    fn test_default_cases_are_distinct_paths() {
        let cases = default_test_cases();
        let paths: HashSet<_> = cases.iter().map(|c| c.path.as_str()).collect();

        assert_eq!(paths.len(), cases.len());
        assert!(cases.iter().all(|c| c.path.starts_with('/')));
        assert!(cases.iter().all(|c| !c.description.is_empty()));
    }

    #[test]
    fn test_base_url_matches_config_default() {
        assert_eq!(
            BASE_URL,
            exprobe_common::config::ProbeConfig::default().base_url
        );
    }
}
