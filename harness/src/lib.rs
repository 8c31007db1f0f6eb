pub mod check;
pub mod expect;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod suite;

pub use check::{run_check, Check};
pub use expect::{Expectation, Verdict};
pub use fixtures::Fixtures;
pub use report::{CheckStatus, ResultCollector, RunReport, RunSummary, TestResult};
pub use runner::{ConformanceRunner, HarnessError, HarnessResult};
pub use suite::bike_agency_checks;
