//! Statistics over a pool's liquidity-per-tick-range dataset.
//!
//! Liquidity amounts on chain routinely exceed the 28 significant digits a
//! `Decimal` holds, and these figures only feed charts and summaries, so the
//! module works in `f64`.

use serde::{Deserialize, Serialize};

/// Percentile above which rows are treated as outliers.
pub const OUTLIER_QUANTILE: f64 = 0.99;

/// Liquidity active over one tick range of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickLiquidity {
    pub lower_tick: i64,
    pub upper_tick: i64,
    pub liquidity_amount: f64,
}

impl TickLiquidity {
    pub fn new(lower_tick: i64, upper_tick: i64, liquidity_amount: f64) -> Self {
        Self {
            lower_tick,
            upper_tick,
            liquidity_amount,
        }
    }

    /// Width of the range in ticks, widened so that any pair of `i64`
    /// ticks fits.
    pub fn tick_range(&self) -> i128 {
        i128::from(self.upper_tick) - i128::from(self.lower_tick)
    }
}

/// Value at quantile `q` (0..=1) of an ascending slice, linearly
/// interpolated between neighbours. `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo]))
}

fn sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Keeps rows strictly below the 99th percentile of both liquidity amount
/// and tick range.
pub fn filter_outliers(rows: &[TickLiquidity]) -> Vec<TickLiquidity> {
    let liquidity = sorted(rows.iter().map(|r| r.liquidity_amount));
    let ranges = sorted(rows.iter().map(|r| r.tick_range() as f64));

    let (Some(liquidity_cap), Some(range_cap)) = (
        quantile(&liquidity, OUTLIER_QUANTILE),
        quantile(&ranges, OUTLIER_QUANTILE),
    ) else {
        return Vec::new();
    };

    rows.iter()
        .filter(|r| r.liquidity_amount < liquidity_cap && (r.tick_range() as f64) < range_cap)
        .copied()
        .collect()
}

/// Summary of the liquidity amounts in a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1).
    pub std_dev: f64,
    pub count: usize,
}

impl LiquidityStats {
    /// All zero for an empty dataset; a single row has zero deviation.
    pub fn compute(rows: &[TickLiquidity]) -> Self {
        let n = rows.len();
        if n == 0 {
            return Self::default();
        }

        let values = sorted(rows.iter().map(|r| r.liquidity_amount));
        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        };
        let std_dev = if n > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            median,
            std_dev,
            count: n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        // pos = 3 * 0.5 = 1.5 -> 2 + 0.5 * (3 - 2)
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_stats() {
        let rows: Vec<TickLiquidity> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &l)| TickLiquidity::new(i as i64, i as i64 + 10, l))
            .collect();

        let stats = LiquidityStats::compute(&rows);
        assert_eq!(stats.count, 8);
        assert!(close(stats.mean, 5.0));
        assert!(close(stats.median, 4.5));
        // sum of squared deviations = 32, / 7
        assert!(close(stats.std_dev, (32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn test_stats_edge_cases() {
        assert_eq!(LiquidityStats::compute(&[]), LiquidityStats::default());

        let single = LiquidityStats::compute(&[TickLiquidity::new(0, 5, 42.0)]);
        assert_eq!(single.count, 1);
        assert_eq!(single.median, 42.0);
        assert_eq!(single.std_dev, 0.0);
    }

    #[test]
    fn test_filter_outliers_drops_top_percentile() {
        let mut rows: Vec<TickLiquidity> = (0..100)
            .map(|i| TickLiquidity::new(i, 2 * i + 10, 1_000.0 + i as f64))
            .collect();
        rows.push(TickLiquidity::new(0, 5, 1.0e30));
        rows.push(TickLiquidity::new(0, 1_000_000, 500.0));

        let kept = filter_outliers(&rows);
        assert!(kept.iter().all(|r| r.liquidity_amount < 1.0e30));
        assert!(kept.iter().all(|r| r.tick_range() < 1_000_000));
        assert!(kept.len() < rows.len());
        assert_eq!(kept.len(), 99);
    }

    #[test]
    fn test_tick_range_spans_full_i64() {
        let row = TickLiquidity::new(i64::MIN, i64::MAX, 1.0);
        assert_eq!(row.tick_range(), i128::from(u64::MAX));
        assert_eq!(TickLiquidity::new(-10, 20, 1.0).tick_range(), 30);

        let rows = [row, TickLiquidity::new(0, 5, 2.0)];
        assert_eq!(filter_outliers(&rows).len(), 0);
    }

    #[test]
    fn test_filter_outliers_empty() {
        assert!(filter_outliers(&[]).is_empty());
    }
}
