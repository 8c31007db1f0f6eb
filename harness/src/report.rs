//! Check results, the run summary and the JSON run report.
//!
//! Every executed check lands in a [`ResultCollector`] as exactly one
//! [`TestResult`]. Once the run is over the collector is folded into a
//! [`RunSummary`], which is what decides the process exit code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Captured response payload, only kept for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    /// The progress line printed when the result is recorded.
    pub fn progress_line(&self) -> String {
        let mut line = match self.status {
            CheckStatus::Pass => format!("✅ {}: {}", self.name, self.message),
            CheckStatus::Fail => format!("❌ {}: {}", self.name, self.message),
        };
        if let Some(detail) = &self.detail {
            let rendered = match detail {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            line.push_str(&format!("\n   Response: {}", rendered));
        }
        line
    }
}

/// Append-only list of results for a single run.
#[derive(Debug, Default)]
pub struct ResultCollector {
    results: Vec<TestResult>,
    quiet: bool,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that records without printing progress lines.
    pub fn quiet() -> Self {
        Self {
            results: Vec::new(),
            quiet: true,
        }
    }

    pub fn record(
        &mut self,
        name: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
        detail: Option<Value>,
    ) {
        let result = TestResult {
            name: name.into(),
            status,
            message: message.into(),
            timestamp: Utc::now(),
            detail: match status {
                CheckStatus::Pass => None,
                CheckStatus::Fail => detail,
            },
        };

        debug!("{} [{}] {}", result.name, result.status, result.message);
        if !self.quiet {
            println!("{}", result.progress_line());
        }

        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    pub fn summarize(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    /// Ratio of passed checks in `0.0..=1.0`; zero when nothing ran.
    pub success_rate: f64,
    pub passed_checks: Vec<String>,
    pub failed_checks: Vec<String>,
}

impl RunSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let (passed_checks, failed_checks): (Vec<_>, Vec<_>) =
            results.iter().partition(|r| r.is_pass());
        let passed_checks: Vec<String> = passed_checks.iter().map(|r| r.name.clone()).collect();
        let failed_checks: Vec<String> = failed_checks.iter().map(|r| r.name.clone()).collect();

        let total = results.len();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed_checks.len() as f64 / total as f64
        };

        Self {
            passed: passed_checks.len(),
            failed: failed_checks.len(),
            success_rate,
            passed_checks,
            failed_checks,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed_checks.is_empty()
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        out.push_str(&format!("\n{}\n📊 TEST SUMMARY\n{}\n", rule, rule));
        out.push_str(&format!("✅ Passed: {}\n", self.passed));
        out.push_str(&format!("❌ Failed: {}\n", self.failed));
        out.push_str(&format!(
            "📈 Success Rate: {:.1}%\n",
            self.success_rate * 100.0
        ));

        if !self.failed_checks.is_empty() {
            out.push_str("\n❌ Failed Tests:\n");
            for name in &self.failed_checks {
                out.push_str(&format!("   - {}\n", name));
            }
        }

        out.push_str("\n✅ Passed Tests:\n");
        for name in &self.passed_checks {
            out.push_str(&format!("   - {}\n", name));
        }

        if self.all_passed() {
            out.push_str("\n🎉 All tests passed! VeloX API is working correctly.");
        } else {
            out.push_str(&format!(
                "\n⚠️  {} test(s) failed. Please check the issues above.",
                self.failed
            ));
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<TestResult>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to(&self, path: &Path) -> crate::HarnessResult<()> {
        let json = self.to_json().map_err(|e| crate::HarnessError::Report {
            message: e.to_string(),
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
