use std::time::Duration;

use hdrhistogram::Histogram;
use log::info;

/// Tick duration statistics, in microseconds.
pub struct TickStats {
    histogram: Histogram<u64>,
    overruns: u64,
}

impl TickStats {
    pub fn new() -> Result<Self, hdrhistogram::CreationError> {
        // 1us to 60s with 3 significant figures.
        let histogram = Histogram::new_with_bounds(1, 60_000_000, 3)?;
        Ok(Self { histogram, overruns: 0 })
    }

    pub fn record(&mut self, elapsed: Duration, budget: Duration) {
        self.histogram.saturating_record(elapsed.as_micros() as u64);
        if elapsed > budget {
            self.overruns += 1;
        }
    }

    pub fn count(&self) -> u64 {
        self.histogram.len()
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn percentile_micros(&self, percentile: f64) -> u64 {
        self.histogram.value_at_percentile(percentile)
    }

    pub fn log_summary(&self, label: &str) {
        if self.histogram.is_empty() {
            info!("{}: no ticks recorded", label);
            return;
        }
        info!(
            "{}: {} ticks, p50 {}us, p99 {}us, max {}us, {} over budget",
            label,
            self.count(),
            self.percentile_micros(50.0),
            self.percentile_micros(99.0),
            self.histogram.max(),
            self.overruns
        );
    }
}
