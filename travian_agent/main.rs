mod config;
mod error;
mod logging;

use std::{path::PathBuf, sync::Arc};

use chrono::Duration;
use clap::Parser;
use tracing::{info, warn};

use travian_game::{
    driver::FakeDriver, executor::Executor, scanner::FakeScanner, strategy::BalancedEconomicGrowth,
};

use crate::config::{Config, StrategyName};

/// A scan-plan-execute automation agent for a long-running browser strategy
/// game.
#[derive(Parser, Debug)]
#[command(name = "travian_agent", version, about)]
struct Cli {
    /// Path to config.yaml; overrides the discovery chain in §10.3.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Polling ceiling in seconds when no job is due sooner.
    #[arg(long, default_value_t = 60)]
    max_poll_interval_secs: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let _log_guard = logging::setup_logging(&config.log_dir);

    info!(server_url = %config.driver.server_url, "starting travian_agent");

    // A production `Driver` implementation that actually drives a browser
    // session is out of scope for this repository (§6.2); this binary runs
    // against the in-memory fakes so the executor loop, strategy, and
    // scheduler can be exercised end to end without a network.
    if config.logic.strategy == StrategyName::DefendArmy {
        warn!("defend_army strategy is not implemented yet, falling back to balanced_economic_growth");
    }

    let driver = Arc::new(FakeDriver::default());
    let scanner = Arc::new(FakeScanner::default());
    let strategy = Arc::new(BalancedEconomicGrowth);
    let strategy_config = config.to_strategy_config();

    let mut executor = Executor::new(
        driver,
        scanner,
        strategy,
        strategy_config,
        Duration::seconds(cli.max_poll_interval_secs),
    );

    run_loop(&mut executor).await
}

async fn run_loop(executor: &mut Executor) -> anyhow::Result<()> {
    loop {
        let now = chrono::Utc::now();
        let delay = executor.run_once(now).await;
        info!(pending = executor.pending_job_count(), "pass complete");
        let delay_std = delay.to_std().unwrap_or(std::time::Duration::from_secs(1));
        tokio::time::sleep(delay_std).await;
    }
}
