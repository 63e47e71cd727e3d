use crate::duration::{FormatOptions, UnitTable};
use crate::rate::{project, Window};
use crate::store::{DisplayStats, StatsStore};
use crate::tracker::{ExpTracker, Stats};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::instrument;

pub const MAX_HISTORY: usize = 100;

/// One charted point of projected rates.
#[derive(Debug, Clone, Copy)]
pub struct RatePoint {
    pub timestamp: DateTime<Utc>,
    pub exp_per_window: f64,
    pub percent_per_window: f64,
}

pub struct AppState {
    pub tracker: ExpTracker,
    pub store: StatsStore,
    pub display: watch::Receiver<DisplayStats>,
    pub window: Window,
    pub unit_table: UnitTable,
    pub format_options: FormatOptions,
    pub stats: Stats,
    pub history: VecDeque<RatePoint>,
    /// `None` until the first sample, and again after a forced refresh.
    pub last_update: Option<Instant>,
    pub refresh_interval: Duration,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
}

impl AppState {
    pub fn new(
        tracker: ExpTracker,
        window: Window,
        unit_table: UnitTable,
        format_options: FormatOptions,
        refresh_interval: Duration,
    ) -> Self {
        tracing::info!(?window, ?refresh_interval, "Initializing new AppState");
        let store = StatsStore::new();
        let display = store.subscribe();
        Self {
            tracker,
            store,
            display,
            window,
            unit_table,
            format_options,
            stats: Stats::default(),
            history: VecDeque::with_capacity(MAX_HISTORY),
            last_update: None,
            refresh_interval,
            error_message: None,
            error_timestamp: None,
        }
    }

    pub fn refresh_data(&mut self) -> Result<()> {
        if let Some(last) = self.last_update {
            if last.elapsed() < self.refresh_interval {
                return Ok(());
            }
        }

        tracing::debug!("Starting sample refresh");
        self.last_update = Some(Instant::now());

        if let Err(e) = self.tracker.record() {
            tracing::error!(error = %e, "Failed to record measurement");
            return Err(e);
        }

        self.publish_stats();
        Ok(())
    }

    /// Makes the next refresh fire regardless of the interval gate.
    pub fn force_refresh(&mut self) {
        self.last_update = None;
    }

    #[instrument(skip(self))]
    fn publish_stats(&mut self) {
        let stats = self.tracker.stats();
        self.stats = stats;

        self.store.publish(DisplayStats::project(
            &stats,
            self.window,
            &self.unit_table,
            &self.format_options,
        ));

        let point = RatePoint {
            timestamp: Utc::now(),
            exp_per_window: project(stats.exp_per_second, self.window.seconds()),
            percent_per_window: project(stats.percent_per_second, self.window.seconds()),
        };
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(point);

        tracing::debug!(
            exp = stats.current_exp,
            history = self.history.len(),
            "Published display stats"
        );
    }

    #[instrument(skip(self))]
    pub fn set_error(&mut self, message: String) {
        tracing::error!(error = %message);
        self.error_message = Some(message);
        self.error_timestamp = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::probe::SimulatedProbe;

    fn state_with_interval(refresh_interval: Duration) -> AppState {
        let tracker = ExpTracker::new(
            Box::new(SimulatedProbe::new(250, 100_000)),
            Box::new(SystemClock),
        );
        AppState::new(
            tracker,
            Window::Minute,
            UnitTable::short_english(),
            FormatOptions::default(),
            refresh_interval,
        )
    }

    #[test]
    fn refresh_publishes_to_store_and_history() {
        let mut state = state_with_interval(Duration::from_secs(0));
        state.refresh_data().unwrap();

        assert_eq!(state.tracker.sample_count(), 1);
        assert_eq!(state.history.len(), 1);
        // One sample is not enough for a rate, so the projection is zero.
        assert_eq!(state.display.borrow().exp_text, "0.00/min");
    }

    #[test]
    fn refresh_is_interval_gated() {
        let mut state = state_with_interval(Duration::from_secs(3600));
        state.refresh_data().unwrap();
        state.refresh_data().unwrap();

        assert_eq!(state.tracker.sample_count(), 1);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn set_error_records_timestamp() {
        let mut state = state_with_interval(Duration::from_secs(5));
        state.set_error("boom".to_string());
        assert_eq!(state.error_message.as_deref(), Some("boom"));
        assert!(state.error_timestamp.is_some());
    }
}
