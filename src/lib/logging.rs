//! Formatting helpers for log output and the end-of-run summary.

use std::time::{Duration, Instant};

use crate::pipeline::{OutputMode, PipelineSummary};

/// Formats a count with comma thousands separators.
///
/// # Examples
///
/// ```
/// use snps_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction as a percentage with `decimals` decimal places.
///
/// ```
/// use snps_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. `45s`, `2m 15s` or `1h 30m`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a throughput in queries per second, or per minute when below one per second.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} queries/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} queries/s", format_count(rate as u64))
    } else {
        let per_min = count as f64 / (secs / 60.0);
        format!("{per_min:.1} queries/min")
    }
}

/// Logs what a finished run read and wrote.
#[allow(clippy::cast_precision_loss)]
pub fn log_run_summary(summary: &PipelineSummary, mode: OutputMode) {
    log::info!("SNP Summary:");
    log::info!("  Alignment columns: {}", format_count(summary.reference_len as u64));
    log::info!("  Queries compared: {}", format_count(summary.output.queries));

    match mode {
        OutputMode::PerQuery => {
            log::info!("  Lines written: {}", format_count(summary.output.lines_written));
        }
        OutputMode::Aggregate => {
            let distinct = summary.output.distinct_changes as u64;
            log::info!("  Distinct changes: {}", format_count(distinct));
            log::info!("  Changes reported: {}", format_count(summary.output.lines_written));
            if distinct > 0 {
                let reported = summary.output.lines_written as f64 / distinct as f64;
                log::info!("  Reported fraction: {}", format_percent(reported, 2));
            }
        }
    }
}

/// Times an operation and logs its completion with a count and rate.
///
/// ```no_run
/// use snps_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Finding SNPs");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} queries in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
