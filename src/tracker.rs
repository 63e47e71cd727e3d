use crate::clock::Clock;
use crate::error::Result;
use crate::probe::ExpProbe;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::instrument;

pub const MAX_MEASUREMENTS: usize = 100;

#[derive(Debug, Clone, Copy)]
struct Measurement {
    exp: i64,
    percent: f64,
    created_at: DateTime<Utc>,
}

/// The per-tick sample record handed to the display layer. Rates are absent
/// until two distinct measurements exist and XP is actually climbing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub exp_per_second: Option<f64>,
    pub percent_per_second: Option<f64>,
    pub time_to_level_up_secs: Option<f64>,
    pub current_exp: i64,
    pub level_progress: f64,
}

pub struct ExpTracker {
    probe: Box<dyn ExpProbe>,
    clock: Box<dyn Clock>,
    measurements: VecDeque<Measurement>,
}

impl ExpTracker {
    pub fn new(probe: Box<dyn ExpProbe>, clock: Box<dyn Clock>) -> Self {
        Self {
            probe,
            clock,
            measurements: VecDeque::with_capacity(MAX_MEASUREMENTS),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.measurements.len()
    }

    /// Probes once and appends a measurement. Consecutive duplicates (same
    /// XP or same percent as the previous reading) are dropped so stalled
    /// readings do not zero out the rates.
    #[instrument(skip(self))]
    pub fn record(&mut self) -> Result<()> {
        let reading = self.probe.probe()?;

        if let Some(last) = self.measurements.back() {
            if last.exp == reading.exp || last.percent == reading.percent {
                tracing::debug!(exp = reading.exp, "Skipped duplicate measurement");
                return Ok(());
            }
        }

        self.measurements.push_back(Measurement {
            exp: reading.exp,
            percent: reading.percent,
            created_at: self.clock.now(),
        });

        if self.measurements.len() > MAX_MEASUREMENTS {
            self.measurements.pop_front();
        }

        tracing::debug!(
            exp = reading.exp,
            percent = reading.percent,
            measurements = self.measurements.len(),
            "Recorded measurement"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn stats(&self) -> Stats {
        let Some(latest) = self.measurements.back() else {
            return Stats::default();
        };

        let mut stats = Stats {
            current_exp: latest.exp,
            level_progress: latest.percent,
            ..Stats::default()
        };

        if let Some((exp_rate, percent_rate)) = self.rates() {
            stats.exp_per_second = Some(exp_rate);
            stats.percent_per_second = Some(percent_rate);
            stats.time_to_level_up_secs =
                estimate_time_to_level_up(latest.percent, percent_rate);
        }

        stats
    }

    fn rates(&self) -> Option<(f64, f64)> {
        if self.measurements.len() < 2 {
            return None;
        }

        let first = self.measurements[self.measurements.len() - 2];
        let last = self.measurements[self.measurements.len() - 1];

        let elapsed = (self.clock.now() - first.created_at).num_milliseconds() as f64 / 1_000.0;
        if elapsed <= 0.0 {
            return None;
        }

        let exp_rate = (last.exp - first.exp) as f64 / elapsed;
        if exp_rate <= 0.0 {
            return None;
        }

        Some((exp_rate, (last.percent - first.percent) / elapsed))
    }
}

fn estimate_time_to_level_up(current_percent: f64, percent_per_second: f64) -> Option<f64> {
    if percent_per_second <= 0.0 {
        return None;
    }
    Some((100.0 - current_percent) / percent_per_second)
}
