use crate::check::{run_check, Check};
use crate::report::{ResultCollector, RunReport, RunSummary, TestResult};
use chrono::{DateTime, Utc};
use client::{ApiTransport, ClientError};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("API unreachable at {base_url}: {source}")]
    Unreachable {
        base_url: String,
        #[source]
        source: ClientError,
    },

    #[error("Invalid fixtures: {message}")]
    Fixtures { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report export failed: {message}")]
    Report { message: String },
}

pub type HarnessResult<T> = Result<T, HarnessError>;

/// Drives the declared checks against one deployment, strictly in order.
pub struct ConformanceRunner<T: ApiTransport> {
    transport: T,
    checks: Vec<Check>,
    collector: ResultCollector,
    quiet: bool,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    summary: Option<RunSummary>,
}

impl<T: ApiTransport> ConformanceRunner<T> {
    pub fn new(transport: T, checks: Vec<Check>) -> Self {
        Self {
            transport,
            checks,
            collector: ResultCollector::new(),
            quiet: false,
            started_at: None,
            finished_at: None,
            summary: None,
        }
    }

    /// Suppresses progress and summary output.
    pub fn quiet(mut self) -> Self {
        self.collector = ResultCollector::quiet();
        self.quiet = true;
        self
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Fails when the base URL does not answer at all. Any HTTP status counts
    /// as an answer.
    pub async fn preflight(&self) -> HarnessResult<()> {
        debug!("Probing {}", self.transport.base_url());
        self.transport.probe().await.map_err(|source| {
            error!("API unreachable at {}: {}", self.transport.base_url(), source);
            HarnessError::Unreachable {
                base_url: self.transport.base_url().to_string(),
                source,
            }
        })
    }

    /// Runs every check, prints the summary and returns whether all passed.
    pub async fn run_all(&mut self) -> bool {
        self.collector.clear();
        self.started_at = Some(Utc::now());

        if !self.quiet {
            println!("🚀 Starting VeloX Bike Agency API Tests");
            println!("{}", "=".repeat(60));
        }

        for check in &self.checks {
            run_check(&self.transport, &mut self.collector, check).await;
        }

        let summary = self.collector.summarize();
        self.finished_at = Some(Utc::now());

        if !self.quiet {
            println!("{}", summary.render());
        }
        info!(
            "Run finished against {}: {} passed, {} failed",
            self.transport.base_url(),
            summary.passed,
            summary.failed
        );

        let all_passed = summary.all_passed();
        self.summary = Some(summary);
        all_passed
    }

    pub fn results(&self) -> &[TestResult] {
        self.collector.results()
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Exportable record of the last run, if one completed.
    pub fn report(&self) -> Option<RunReport> {
        let summary = self.summary.clone()?;
        Some(RunReport {
            run_id: Uuid::new_v4(),
            base_url: self.transport.base_url().to_string(),
            started_at: self.started_at?,
            finished_at: self.finished_at?,
            results: self.collector.results().to_vec(),
            summary,
        })
    }
}
