use clap::Parser;
use client::{ClientConfig, HttpTransport, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use harness::{bike_agency_checks, ConformanceRunner, Fixtures, HarnessResult};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "harness")]
#[command(about = "Run the VeloX bike agency API conformance checks")]
struct Cli {
    /// Base URL of the API under test
    #[arg(long, env = "VELOX_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds
    #[arg(long, env = "VELOX_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// TOML file overriding catalog size, bike ids and invalid routes
    #[arg(long, env = "VELOX_FIXTURES")]
    fixtures: Option<PathBuf>,
    /// Write a JSON report of the run to this path
    #[arg(long, env = "VELOX_REPORT")]
    report: Option<PathBuf>,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    fn load_fixtures(&self) -> HarnessResult<Fixtures> {
        match &self.fixtures {
            Some(path) => Fixtures::load(path),
            None => Ok(Fixtures::default()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("Setup failed: {}", e);
            eprintln!("✗ Setup failed: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: &Cli) -> HarnessResult<bool> {
    let fixtures = cli.load_fixtures()?;
    let transport = HttpTransport::new(cli.client_config())?;

    let checks = bike_agency_checks(&fixtures, chrono::Utc::now().timestamp());
    let mut runner = ConformanceRunner::new(transport, checks);
    runner.preflight().await?;

    let all_passed = runner.run_all().await;

    if let Some(path) = &cli.report {
        if let Some(report) = runner.report() {
            report.write_to(path)?;
            info!("Report written to {}", path.display());
        }
    }

    Ok(all_passed)
}
