use crate::duration::{format_duration, FormatOptions, UnitTable};
use crate::rate::{format_rate, project, Window};
use crate::tracker::Stats;
use tokio::sync::watch;

pub const PLACEHOLDER: &str = "-";

/// Display snapshot observed by the renderer. Starts as placeholders until
/// the first sample is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStats {
    pub exp_text: String,
    pub percent_text: String,
    pub time_to_level_up_text: String,
}

impl Default for DisplayStats {
    fn default() -> Self {
        Self {
            exp_text: PLACEHOLDER.to_string(),
            percent_text: PLACEHOLDER.to_string(),
            time_to_level_up_text: PLACEHOLDER.to_string(),
        }
    }
}

impl DisplayStats {
    /// Binds a sample record to its display strings: rates projected over
    /// the window with two decimals, time to level up as a compact duration.
    /// Absent rates project as zero; an absent time to level up keeps the
    /// placeholder rather than rendering a zero duration.
    pub fn project(
        stats: &Stats,
        window: Window,
        table: &UnitTable,
        options: &FormatOptions,
    ) -> Self {
        let exp_text = format_rate(
            project(stats.exp_per_second, window.seconds()),
            window.suffix(),
        );
        let percent_text = format_rate(
            project(stats.percent_per_second, window.seconds()),
            window.suffix(),
        );
        let time_to_level_up_text = match stats.time_to_level_up_secs {
            Some(secs) => format_duration((secs * 1_000.0).round(), table, options),
            None => PLACEHOLDER.to_string(),
        };

        Self {
            exp_text,
            percent_text,
            time_to_level_up_text,
        }
    }
}

/// Process-wide observable display state. The core writes, the renderer
/// subscribes; the store never calls back into either side.
pub struct StatsStore {
    tx: watch::Sender<DisplayStats>,
}

impl StatsStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplayStats::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayStats> {
        self.tx.subscribe()
    }

    pub fn publish(&self, stats: DisplayStats) {
        self.tx.send_replace(stats);
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new()
    }
}
