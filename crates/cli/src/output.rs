//! Terminal, JSON and CSV rendering of results.

use anyhow::Result;
use clapr_domain::entities::{PoolId, PositionId};
use clapr_domain::metrics::liquidity_distribution::{LiquidityStats, TickLiquidity};
use clapr_domain::value_objects::YieldReport;
use prettytable::{Table, row};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outcome for one position of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub position_id: PositionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<YieldReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchRow {
    pub fn succeeded(report: YieldReport) -> Self {
        Self {
            position_id: report.position_id,
            report: Some(report),
            error_kind: None,
            error: None,
        }
    }

    pub fn failed(position_id: PositionId, kind: &'static str, error: String) -> Self {
        Self {
            position_id,
            report: None,
            error_kind: Some(kind),
            error: Some(error),
        }
    }
}

/// Liquidity distribution of one pool.
#[derive(Debug, Clone, Serialize)]
pub struct LiquiditySummary {
    pub pool_id: PoolId,
    pub block_height: Option<u64>,
    pub stats: LiquidityStats,
    pub rows_after_filtering: usize,
}

pub fn print_report(report: &YieldReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("The APR for position {} is: {:.2}%", report.position_id, report.apr);
    let mut table = Table::new();
    table.add_row(row!["Spread reward per unit liquidity", report.spread_reward_per_unit_liquidity]);
    table.add_row(row![
        "Incentive reward per unit liquidity",
        report.incentive_reward_per_unit_liquidity
    ]);
    table.add_row(row!["Unit liquidity", report.unit_liquidity]);
    table.add_row(row!["Base price", report.base_price]);
    table.add_row(row!["Window (s)", report.duration_seconds]);
    table.printstd();
    Ok(())
}

pub fn print_batch(rows: &[BatchRow], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_titles(row!["Position", "APR %", "Spread / unit", "Incentive / unit", "Error"]);
    for row in rows {
        match (&row.report, &row.error_kind) {
            (Some(report), _) => table.add_row(row![
                row.position_id,
                format!("{:.2}", report.apr),
                report.spread_reward_per_unit_liquidity,
                report.incentive_reward_per_unit_liquidity,
                ""
            ]),
            (None, kind) => table.add_row(row![
                row.position_id,
                "-",
                "-",
                "-",
                format!("{}: {}", kind.unwrap_or("Error"), row.error.as_deref().unwrap_or(""))
            ]),
        };
    }
    table.printstd();
    Ok(())
}

pub fn print_liquidity(summary: &LiquiditySummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    match summary.block_height {
        Some(height) => println!("Liquidity per tick range, pool {} at height {height}", summary.pool_id),
        None => println!("Liquidity per tick range, pool {}", summary.pool_id),
    }
    let mut table = Table::new();
    table.add_row(row!["Ranges", summary.stats.count]);
    table.add_row(row!["Mean", format!("{:.2}", summary.stats.mean)]);
    table.add_row(row!["Median", format!("{:.2}", summary.stats.median)]);
    table.add_row(row!["Std dev", format!("{:.2}", summary.stats.std_dev)]);
    table.add_row(row!["Ranges below 99th percentile", summary.rows_after_filtering]);
    table.printstd();
    Ok(())
}

/// Writes `lower_tick,upper_tick,liquidity_amount,tick_range` rows.
pub fn write_rows(mut out: impl Write, rows: &[TickLiquidity]) -> std::io::Result<()> {
    writeln!(out, "lower_tick,upper_tick,liquidity_amount,tick_range")?;
    for row in rows {
        writeln!(
            out,
            "{},{},{},{}",
            row.lower_tick,
            row.upper_tick,
            row.liquidity_amount,
            row.tick_range()
        )?;
    }
    out.flush()
}

pub fn write_csv(path: &Path, rows: &[TickLiquidity]) -> std::io::Result<()> {
    write_rows(BufWriter::new(File::create(path)?), rows)
}
