//! Opt-in command timing, reported to stderr under `--timing` or
//! `DISPATCH_TIMING`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

/// Aggregated timing statistics across instrumented operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    pub operations: Vec<OpTiming>,
}

/// Timing statistics for a single named operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpTiming {
    pub name: String,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub count: usize,
}

thread_local! {
    static SAMPLES: RefCell<Vec<(String, Duration)>> = const { RefCell::new(Vec::new()) };
}

static TIMING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Returns true when `DISPATCH_TIMING` enables timing collection.
///
/// Truthy values: `1`, `true`, `yes`, `on` (case-insensitive).
#[must_use]
pub fn timing_enabled_from_env() -> bool {
    std::env::var("DISPATCH_TIMING").ok().is_some_and(|value| {
        ["1", "true", "yes", "on"]
            .iter()
            .any(|t| value.eq_ignore_ascii_case(t))
    })
}

/// Enable or disable timing collection.
pub fn set_timing_enabled(enabled: bool) {
    TIMING_ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        clear_timings();
    }
}

/// Clears all recorded timings for the current thread.
pub fn clear_timings() {
    SAMPLES.with(|samples| samples.borrow_mut().clear());
}

/// Execute a closure, recording its duration when timing is enabled.
pub fn timed<R>(name: &str, f: impl FnOnce() -> R) -> R {
    if !TIMING_ENABLED.load(Ordering::Relaxed) {
        return f();
    }

    let started = Instant::now();
    let result = f();
    let elapsed = started.elapsed();
    SAMPLES.with(|samples| samples.borrow_mut().push((name.to_string(), elapsed)));
    result
}

/// Drain this thread's samples into a grouped report.
#[must_use]
pub fn collect_report() -> TimingReport {
    let samples = SAMPLES.with(|samples| std::mem::take(&mut *samples.borrow_mut()));

    let mut grouped: BTreeMap<String, Vec<Duration>> = BTreeMap::new();
    for (name, elapsed) in samples {
        grouped.entry(name).or_default().push(elapsed);
    }

    let operations = grouped
        .into_iter()
        .map(|(name, mut values)| {
            values.sort_unstable();
            OpTiming {
                name,
                p50: percentile(&values, 50),
                p95: percentile(&values, 95),
                p99: percentile(&values, 99),
                count: values.len(),
            }
        })
        .collect();

    TimingReport { operations }
}

impl TimingReport {
    /// Returns true when no timing samples were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Render the timing report as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let operations = self
            .operations
            .iter()
            .map(|op| {
                json!({
                    "name": op.name,
                    "count": op.count,
                    "p50_us": op.p50.as_micros(),
                    "p95_us": op.p95.as_micros(),
                    "p99_us": op.p99.as_micros(),
                })
            })
            .collect::<Vec<_>>();

        json!({ "operations": operations })
    }

    /// Render the timing report as a simple table for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.operations.is_empty() {
            return "No timing samples recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("operation                    count      p50      p95      p99\n");
        out.push_str("--------------------------------------------------------------\n");
        for op in &self.operations {
            out.push_str(&format!(
                "{:<28} {:>6} {:>8} {:>8} {:>8}\n",
                op.name,
                op.count,
                format_duration(op.p50),
                format_duration(op.p95),
                format_duration(op.p99)
            ));
        }
        out
    }
}

fn percentile(sorted: &[Duration], pct: usize) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = pct.min(100).saturating_mul(sorted.len()).saturating_add(99) / 100;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros >= 1_000_000 {
        format!("{}.{:03}s", micros / 1_000_000, (micros % 1_000_000) / 1_000)
    } else if micros >= 1_000 {
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{micros}µs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn timed_does_not_record_when_disabled() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        set_timing_enabled(false);
        clear_timings();

        let value = timed("disabled", || 7_u8);
        assert_eq!(value, 7);
        assert!(collect_report().is_empty());
    }

    #[test]
    fn timed_records_when_enabled() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        set_timing_enabled(true);
        clear_timings();

        let value = timed("cmd.schedule", || 42_u8);
        assert_eq!(value, 42);

        let report = collect_report();
        assert_eq!(report.operations.len(), 1);
        assert_eq!(report.operations[0].name, "cmd.schedule");
        assert_eq!(report.operations[0].count, 1);

        set_timing_enabled(false);
    }

    #[test]
    fn percentile_picks_expected_sample() {
        let values = vec![
            Duration::from_micros(1),
            Duration::from_micros(2),
            Duration::from_micros(3),
            Duration::from_micros(4),
        ];
        assert_eq!(percentile(&values, 50), Duration::from_micros(2));
        assert_eq!(percentile(&values, 99), Duration::from_micros(4));
        assert_eq!(percentile(&[], 50), Duration::ZERO);
    }

    #[test]
    fn report_json_shape_is_stable() {
        let report = TimingReport {
            operations: vec![OpTiming {
                name: "cmd.list".to_string(),
                p50: Duration::from_micros(10),
                p95: Duration::from_micros(20),
                p99: Duration::from_micros(30),
                count: 3,
            }],
        };

        let json = report.to_json();
        assert_eq!(json["operations"][0]["name"], "cmd.list");
        assert_eq!(json["operations"][0]["count"], 3);
        assert_eq!(json["operations"][0]["p95_us"], 20);
    }
}
