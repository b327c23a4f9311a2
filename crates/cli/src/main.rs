//! Command Line Interface for the concentrated-liquidity APR calculator.
mod output;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clapr_data::providers::LcdProvider;
use clapr_data::{PoolDataProvider, ProviderConfig, ProviderError};
use clapr_domain::entities::{PoolId, PositionId, PositionSnapshot};
use clapr_domain::enums::DenomPolicy;
use clapr_domain::error::YieldError;
use clapr_domain::metrics::liquidity_distribution::{LiquidityStats, filter_outliers};
use clapr_domain::report::YieldCalculator;
use clapr_domain::value_objects::MeasurementWindow;
use dotenv::dotenv;
use output::{BatchRow, LiquiditySummary};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

/// Positions resolved at once against the public endpoints.
const MAX_CONCURRENT_SNAPSHOTS: usize = 8;

#[derive(Parser)]
#[command(name = "clapr")]
#[command(about = "APR calculator for concentrated-liquidity positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the APR of a single position
    Apr {
        /// Position ID
        #[arg(short, long)]
        position_id: u64,

        /// Seconds over which the claimable rewards accrued
        #[arg(short, long, required_unless_present = "since", conflicts_with = "since")]
        duration: Option<Decimal>,

        /// Start of the measurement window (RFC 3339); the window ends now
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// Query the chain at this block height
        #[arg(long)]
        height: Option<u64>,

        /// Reject reward lists spanning several denominations
        #[arg(long)]
        strict_denoms: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute the APR of several positions over the same window
    Batch {
        /// Comma-separated position IDs
        #[arg(long, value_delimiter = ',', required = true)]
        position_ids: Vec<u64>,

        /// Seconds over which the claimable rewards accrued
        #[arg(short, long)]
        duration: Decimal,

        /// Query the chain at this block height
        #[arg(long)]
        height: Option<u64>,

        /// Reject reward lists spanning several denominations
        #[arg(long)]
        strict_denoms: bool,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize a pool's liquidity per tick range
    Liquidity {
        /// Pool ID
        #[arg(long)]
        pool_id: u64,

        /// Query the chain at this block height
        #[arg(long)]
        height: Option<u64>,

        /// Write the rows left after outlier filtering to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn measurement_window(
    duration: Option<Decimal>,
    since: Option<DateTime<Utc>>,
) -> Result<MeasurementWindow, YieldError> {
    match (duration, since) {
        (Some(duration), _) => MeasurementWindow::new(duration),
        (None, Some(start)) => MeasurementWindow::between(start, Utc::now()),
        (None, None) => Err(YieldError::InvalidDuration {
            duration_seconds: Decimal::ZERO,
        }),
    }
}

fn calculator(strict_denoms: bool) -> YieldCalculator {
    let policy = if strict_denoms {
        DenomPolicy::RequireUniform
    } else {
        DenomPolicy::Blind
    };
    YieldCalculator::new().with_denom_policy(policy)
}

/// Resolves snapshots with at most `max_concurrent` positions in flight.
async fn fetch_snapshots<P>(
    provider: &P,
    position_ids: Vec<u64>,
    max_concurrent: usize,
) -> Result<Vec<(PositionId, Result<PositionSnapshot, ProviderError>)>>
where
    P: PoolDataProvider + Clone + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();
    for id in position_ids {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Snapshot limiter closed")?;
        let provider = provider.clone();
        tasks.spawn(async move {
            let position_id = PositionId(id);
            let snapshot = provider.snapshot(position_id).await;
            drop(permit);
            (position_id, snapshot)
        });
    }

    let mut snapshots = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        snapshots.push(joined.context("Snapshot task failed")?);
    }
    Ok(snapshots)
}

fn yield_failure(position_id: PositionId, err: YieldError) -> anyhow::Error {
    anyhow!("{} for position {}: {}", err.kind(), position_id, err)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = ProviderConfig::from_env().context("Invalid provider configuration")?;
    let provider = LcdProvider::new(config).context("Failed to initialize LCD provider")?;

    match cli.command {
        Commands::Apr {
            position_id,
            duration,
            since,
            height,
            strict_denoms,
            json,
        } => {
            let position_id = PositionId(position_id);
            let window = measurement_window(duration, since)
                .map_err(|err| yield_failure(position_id, err))?;
            let provider = provider.at_height(height.or(provider.config().block_height));

            info!(position = %position_id, duration = %window.duration_seconds, "Resolving position");
            let snapshot = provider
                .snapshot(position_id)
                .await
                .map_err(|err| anyhow!("{} for position {}: {}", err.kind(), position_id, err))?;

            let report = calculator(strict_denoms)
                .compute_snapshot(&snapshot, &window)
                .map_err(|err| yield_failure(position_id, err))?;

            output::print_report(&report, json)?;
        }
        Commands::Batch {
            position_ids,
            duration,
            height,
            strict_denoms,
            json,
        } => {
            let window = MeasurementWindow::new(duration)
                .map_err(|err| anyhow!("{}: {}", err.kind(), err))?;
            let provider = provider.at_height(height.or(provider.config().block_height));

            info!(positions = position_ids.len(), "Resolving positions");
            let snapshots =
                fetch_snapshots(&provider, position_ids, MAX_CONCURRENT_SNAPSHOTS).await?;

            let mut rows = Vec::new();
            let mut jobs = Vec::new();
            for (position_id, snapshot) in snapshots {
                match snapshot {
                    Ok(snapshot) => jobs.push((snapshot, window)),
                    Err(err) => rows.push(BatchRow::failed(position_id, err.kind(), err.to_string())),
                }
            }

            let results = calculator(strict_denoms).compute_batch(&jobs);
            for ((snapshot, _), result) in jobs.iter().zip(results) {
                rows.push(match result {
                    Ok(report) => BatchRow::succeeded(report),
                    Err(err) => BatchRow::failed(snapshot.position.id, err.kind(), err.to_string()),
                });
            }
            rows.sort_by_key(|row| row.position_id);

            output::print_batch(&rows, json)?;
        }
        Commands::Liquidity {
            pool_id,
            height,
            csv,
            json,
        } => {
            let pool_id = PoolId(pool_id);
            let provider = provider.at_height(height.or(provider.config().block_height));

            info!(pool = %pool_id, "Fetching liquidity per tick range");
            let rows = provider
                .liquidity_per_tick_range(pool_id)
                .await
                .map_err(|err| anyhow!("{} for pool {}: {}", err.kind(), pool_id, err))?;

            let filtered = filter_outliers(&rows);
            let summary = LiquiditySummary {
                pool_id,
                block_height: provider.config().block_height,
                stats: LiquidityStats::compute(&rows),
                rows_after_filtering: filtered.len(),
            };
            output::print_liquidity(&summary, json)?;

            if let Some(path) = csv {
                output::write_csv(&path, &filtered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), rows = filtered.len(), "CSV written");
            }
        }
    }

    Ok(())
}
