use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use crate::args::{LoadArgs, OutputFormat};
use crate::config::{LoadTestConfig, load_config};
use crate::error::AppResult;
use crate::http::{HttpExecutor, run_speed_test};
use crate::metrics::{REPORT_RANKS, summarize};
use crate::report::{LoadTestReport, render_json};
use crate::scheduler::{BatchScheduler, ProgressLine};
use crate::system::EnvironmentDetails;
use crate::system::banner::print_cli_banner;
use crate::system::logger::init_logging;

/// Parses the command line, runs the load test and prints the report.
///
/// # Errors
///
/// Returns an error when the configuration is incomplete or invalid, when the
/// runtime cannot be built, or when the run itself fails.
pub fn run() -> AppResult<()> {
    let args = LoadArgs::parse();
    init_logging(args.verbose, args.no_color);

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            return Err(err);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args, &config))
}

fn resolve_config(args: &LoadArgs) -> AppResult<LoadTestConfig> {
    let file = load_config(args.config.as_deref())?;
    LoadTestConfig::resolve(args, file)
}

async fn run_async(args: &LoadArgs, config: &LoadTestConfig) -> AppResult<()> {
    if !args.no_banner && config.output_format == OutputFormat::Text {
        print_cli_banner(args.no_color);
    }
    let environment = EnvironmentDetails::collect();

    info!(
        "Running {} requests with a concurrency level of {} for {}.",
        config.requests.get(),
        config.concurrency.get(),
        config.url
    );

    let executor = Arc::new(HttpExecutor::new(config)?);
    let scheduler =
        BatchScheduler::new(executor).with_progress(ProgressLine::stderr(args.no_color));
    let run = match scheduler.run(config).await {
        Ok(run) => run,
        Err(err) => {
            error!("{}", err);
            return Err(err);
        }
    };
    info!("Load test completed successfully!");

    let latency = summarize(&run.outcomes, &REPORT_RANKS);
    if config.probe.enabled {
        info!("Measuring download speed from {}", config.probe.url);
    }
    let probe = run_speed_test(&config.probe).await;

    let report = LoadTestReport::build(config, &run, latency, probe, environment);
    match config.output_format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }
    Ok(())
}
