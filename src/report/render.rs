use std::fmt;

use crate::error::AppResult;
use crate::metrics::{Aggregation, REPORT_RANKS};

use super::types::LoadTestReport;

const LABEL_WIDTH: usize = 21;
const LABEL_RULE: &str = "───────────────────────";
const VALUE_RULE: &str = "──────────────────────────────────────────────────────";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NO_DATA: &str = "no data";

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &LoadTestReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Boxed two-column table.
impl fmt::Display for LoadTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rule(f, '┬')?;
        row(f, "Metric", "Value")?;
        rule(f, '┼')?;
        row(f, "URL", &self.url)?;
        row(f, "Method", self.method)?;
        row(f, "Number of Requests", &self.requests.to_string())?;
        row(f, "Concurrency Level", &self.concurrency.to_string())?;
        row(
            f,
            "Start Time",
            &self.started_at.format(TIME_FORMAT).to_string(),
        )?;
        row(
            f,
            "End Time",
            &self.finished_at.format(TIME_FORMAT).to_string(),
        )?;
        row(
            f,
            "Total Time",
            &format!("{} seconds", format_x100(round_div(self.elapsed_ms, 10))),
        )?;

        match &self.latency {
            Aggregation::Summary(summary) => {
                row(
                    f,
                    "Average Response Time",
                    &format!("{} seconds", format_x100(round_div(summary.mean_us, 10_000))),
                )?;
                for (rank, value) in &summary.percentiles {
                    row(f, &percentile_label(*rank), &format!("{} ms", value))?;
                }
                row(f, "Successful Requests", &summary.successful.to_string())?;
                row(f, "Failed Requests", &summary.failed.to_string())?;
            }
            Aggregation::NoData => {
                row(f, "Average Response Time", NO_DATA)?;
                for rank in REPORT_RANKS {
                    row(f, &percentile_label(rank), NO_DATA)?;
                }
                row(f, "Successful Requests", "0")?;
                row(f, "Failed Requests", "0")?;
            }
        }
        row(
            f,
            "Throughput",
            &format!("{} req/s", format_x100(self.throughput_rps_x100)),
        )?;

        rule(f, '┼')?;
        row(f, "Internet Speed", &self.internet_speed)?;
        rule(f, '┼')?;
        // One cell, continued on the following lines with a leading '|'.
        let mut continued = false;
        for (name, value) in self.environment.fields() {
            if continued {
                row(f, "", &format!("| {}: {}", name, value))?;
            } else {
                row(f, "System Details", &format!("{}: {}", name, value))?;
                continued = true;
            }
        }
        rule(f, '┴')
    }
}

fn rule(f: &mut fmt::Formatter<'_>, joint: char) -> fmt::Result {
    writeln!(f, "{}{}{}", LABEL_RULE, joint, VALUE_RULE)
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, " {:<width$} │ {}", label, value, width = LABEL_WIDTH)
}

pub(crate) fn format_x100(value: u64) -> String {
    format!(
        "{}.{:02}",
        value.checked_div(100).unwrap_or(0),
        value.checked_rem(100).unwrap_or(0)
    )
}

/// Integer division rounding half up.
fn round_div(value: u64, divisor: u64) -> u64 {
    let half = divisor.checked_div(2).unwrap_or(0);
    value
        .saturating_add(half)
        .checked_div(divisor)
        .unwrap_or(0)
}

pub(crate) fn percentile_label(rank: u64) -> String {
    let last_two = rank.checked_rem(100).unwrap_or(0);
    let last = rank.checked_rem(10).unwrap_or(0);
    let suffix = match (last_two, last) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        (_, _) => "th",
    };
    format!("{}{} Percentile", rank, suffix)
}
