use crate::expect::{Expectation, Verdict};
use crate::report::{CheckStatus, ResultCollector};
use client::{ApiRequest, ApiTransport};
use serde_json::Value;
use tracing::warn;

/// One atomic request-and-assert unit.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub request: ApiRequest,
    pub expect: Expectation,
}

impl Check {
    pub fn new(name: impl Into<String>, request: ApiRequest, expect: Expectation) -> Self {
        Self {
            name: name.into(),
            request,
            expect,
        }
    }
}

/// Runs `check` and records exactly one result for it.
///
/// Transport and decoding faults become a FAIL carrying the error text as
/// detail; nothing is propagated to the caller.
pub async fn run_check(
    transport: &dyn ApiTransport,
    collector: &mut ResultCollector,
    check: &Check,
) -> CheckStatus {
    let verdict = match transport.send(&check.request).await {
        Ok(response) => check.expect.evaluate(&response),
        Err(e) => {
            warn!("{} ({}) failed to complete: {}", check.name, check.request, e);
            Verdict::fail(
                format!("Request failed: {}", e),
                Some(Value::String(e.to_string())),
            )
        }
    };

    match verdict {
        Verdict::Pass(message) => {
            collector.record(&check.name, CheckStatus::Pass, message, None);
            CheckStatus::Pass
        }
        Verdict::Fail { message, detail } => {
            collector.record(&check.name, CheckStatus::Fail, message, detail);
            CheckStatus::Fail
        }
    }
}
