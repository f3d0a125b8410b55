//! プローブ実行
//!
//! テストケースを1件ずつ順番にGETし、結果を表示する。
//! 並列実行・リトライは行わない。

use std::io::Write;
use std::time::Duration;

use exprobe_common::config::ProbeConfig;
use exprobe_common::types::{AttemptPhase, ProbeChecks, ProbeResult, TestCase};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::ProbeError;
use crate::report;

/// 接続失敗時の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 実行全体を中断する
    Abort,
    /// 当該ケースを飛ばして続行する
    Skip,
}

/// 接続失敗をどう扱うか決める
///
/// 最初のケースだけが接続確認を兼ねる。接続確認後の失敗は
/// メッセージを表示して次のケースへ進む。
pub fn connection_failure_policy(phase: AttemptPhase) -> FailurePolicy {
    match phase {
        AttemptPhase::FirstAttempt => FailurePolicy::Abort,
        AttemptPhase::SubsequentAttempt => FailurePolicy::Skip,
    }
}

/// ケースごとの結果
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    /// レスポンスを受信した
    Responded {
        /// 対象ケース
        case: TestCase,
        /// プローブ結果
        result: ProbeResult,
    },
    /// 接続できなかった（接続確認後のみ）
    Unreachable {
        /// 対象ケース
        case: TestCase,
    },
}

impl CaseOutcome {
    /// 対象ケース
    pub fn case(&self) -> &TestCase {
        match self {
            CaseOutcome::Responded { case, .. } | CaseOutcome::Unreachable { case } => case,
        }
    }

    /// 自動チェック結果（接続できなかった場合は None）
    pub fn checks(&self) -> Option<ProbeChecks> {
        match self {
            CaseOutcome::Responded { result, .. } => Some(result.checks()),
            CaseOutcome::Unreachable { .. } => None,
        }
    }
}

/// 実行全体の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// 実行順のケース結果
    pub outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    /// レスポンスを受信したケース数
    pub fn responded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.checks().is_some()).count()
    }

    /// 接続できなかったケース数
    pub fn unreachable(&self) -> usize {
        self.outcomes.len() - self.responded()
    }

    /// 条件を満たすケース数
    fn count_checks(&self, pred: impl Fn(&ProbeChecks) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter_map(CaseOutcome::checks)
            .filter(|c| pred(c))
            .count()
    }

    /// JSONボディだったケース数
    pub fn json_bodies(&self) -> usize {
        self.count_checks(|c| c.json_body)
    }

    /// 統一レスポンス形式だったケース数
    pub fn consistent_shapes(&self) -> usize {
        self.count_checks(|c| c.consistent_shape)
    }

    /// 追跡IDを含んでいたケース数
    pub fn with_trace_id(&self) -> usize {
        self.count_checks(|c| c.trace_id_present)
    }
}

/// 実行結果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// 全ケースを実行した
    Completed(RunReport),
    /// 最初のケースで接続できず中断した
    Aborted,
}

impl RunOutcome {
    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed(_) => 0,
            RunOutcome::Aborted => 1,
        }
    }
}

/// プローブランナー
pub struct ProbeRunner {
    /// HTTPクライアント
    client: Client,
    /// 対象サーバー設定
    config: ProbeConfig,
}

impl ProbeRunner {
    /// 設定からランナーを作成する
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ProbeError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 対象サーバーのベースURL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// 単一ケースを実行する
    ///
    /// 接続できなかった場合はメッセージを表示して [`ProbeError::Connection`] を返す。
    /// HTTPステータスコードはどの値でもエラーにしない。
    pub async fn run_case<W: Write>(
        &self,
        case: &TestCase,
        out: &mut W,
    ) -> Result<ProbeResult, ProbeError> {
        report::write_case_header(out, case)?;

        let url = self.config.url_for(&case.path);
        debug!(url = %url, "Sending probe request");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ProbeError::from_transport(self.base_url(), e);
                if err.is_connection() {
                    warn!(path = %case.path, error = %err, "Server unreachable");
                    report::write_connection_failure(out, self.base_url())?;
                }
                return Err(err);
            }
        };

        let status_code = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| ProbeError::Http(format!("failed to read response body: {}", e)))?;

        let result = ProbeResult::from_response(status_code, body_text);
        report::write_probe_result(out, &result)?;

        let checks = result.checks();
        info!(
            path = %case.path,
            status = status_code,
            json_body = checks.json_body,
            consistent_shape = checks.consistent_shape,
            trace_id = ?result.trace_id,
            "Probe completed"
        );

        Ok(result)
    }

    /// 全ケースを順番に実行する
    ///
    /// 最初のケースで接続できなければ中断し、以降のリクエストは送らない。
    pub async fn run<W: Write>(
        &self,
        cases: &[TestCase],
        out: &mut W,
    ) -> Result<RunOutcome, ProbeError> {
        report::write_banner(out, self.base_url())?;

        let mut phase = AttemptPhase::default();
        let mut run_report = RunReport::default();

        for case in cases {
            match self.run_case(case, out).await {
                Ok(result) => {
                    phase = phase.advance();
                    run_report.outcomes.push(CaseOutcome::Responded {
                        case: case.clone(),
                        result,
                    });
                }
                Err(err) if err.is_connection() => match connection_failure_policy(phase) {
                    FailurePolicy::Abort => {
                        report::write_abort(out)?;
                        out.flush()?;
                        return Ok(RunOutcome::Aborted);
                    }
                    FailurePolicy::Skip => {
                        run_report
                            .outcomes
                            .push(CaseOutcome::Unreachable { case: case.clone() });
                    }
                },
                Err(err) => return Err(err),
            }
        }

        report::write_summary(out)?;
        out.flush()?;

        info!(
            total = run_report.outcomes.len(),
            responded = run_report.responded(),
            unreachable = run_report.unreachable(),
            json_bodies = run_report.json_bodies(),
            consistent_shapes = run_report.consistent_shapes(),
            with_trace_id = run_report.with_trace_id(),
            "Probe run finished"
        );

        Ok(RunOutcome::Completed(run_report))
    }
}
