use super::types::{Aggregation, LatencySummary, Percentiles, ResultsCollection};

/// Ranks shown in every report.
pub const REPORT_RANKS: [u64; 3] = [90, 95, 99];

const PERCENT_DIVISOR: u64 = 100;
const MICROS_PER_MILLI: u128 = 1_000;

/// Nearest-rank percentiles: index = ceil(rank * count / 100) - 1, clamped to
/// the sample range. No interpolation. Returns an empty map for empty input.
#[must_use]
pub fn percentiles(latencies: &[u64], ranks: &[u64]) -> Percentiles {
    let mut sorted = latencies.to_vec();
    sorted.sort();

    let mut result = Percentiles::new();
    let Some(last_index) = sorted.len().checked_sub(1) else {
        return result;
    };
    let count = u64::try_from(sorted.len()).unwrap_or(u64::MAX);

    for &rank in ranks {
        let index = nearest_rank_index(rank, count).min(last_index);
        if let Some(value) = sorted.get(index) {
            result.insert(rank, *value);
        }
    }
    result
}

fn nearest_rank_index(rank: u64, count: u64) -> usize {
    let scaled = u128::from(rank).saturating_mul(u128::from(count));
    let ceil = scaled
        .saturating_add(u128::from(PERCENT_DIVISOR).saturating_sub(1))
        .checked_div(u128::from(PERCENT_DIVISOR))
        .unwrap_or(0);
    let index = ceil.saturating_sub(1);
    usize::try_from(index).unwrap_or(usize::MAX)
}

/// Mean latency in microseconds, or `None` for an empty slice.
#[must_use]
pub fn mean_us(latencies: &[u64]) -> Option<u64> {
    let count = u128::try_from(latencies.len()).ok().filter(|count| *count > 0)?;
    let sum_ms = latencies
        .iter()
        .fold(0u128, |acc, value| acc.saturating_add(u128::from(*value)));
    let mean = sum_ms
        .saturating_mul(MICROS_PER_MILLI)
        .checked_div(count)?;
    Some(u64::try_from(mean).unwrap_or(u64::MAX))
}

/// Summarizes a sealed collection. Empty collections yield [`Aggregation::NoData`].
#[must_use]
pub fn summarize(results: &ResultsCollection, ranks: &[u64]) -> Aggregation {
    let latencies = results.latencies_ms();
    let Some(mean_us) = mean_us(&latencies) else {
        return Aggregation::NoData;
    };
    let count = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    let successful = results.successful();

    Aggregation::Summary(LatencySummary {
        count,
        successful,
        failed: count.saturating_sub(successful),
        mean_us,
        min_ms: latencies.iter().copied().min().unwrap_or(0),
        max_ms: latencies.iter().copied().max().unwrap_or(0),
        percentiles: percentiles(&latencies, ranks),
    })
}
