use clap::ValueEnum;

/// Time span a per-second rate is extrapolated over for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Window {
    Minute,
    Hour,
}

impl Window {
    pub fn seconds(self) -> f64 {
        match self {
            Window::Minute => 60.0,
            Window::Hour => 3600.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Window::Minute => "/min",
            Window::Hour => "/hour",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Window::Minute => "minute",
            Window::Hour => "hour",
        }
    }
}

/// Extrapolates a per-second rate over a window. Absent rates count as zero;
/// NaN and infinities pass through IEEE-754 arithmetic unchanged.
pub fn project(rate_per_second: Option<f64>, window_secs: f64) -> f64 {
    rate_per_second.unwrap_or(0.0) * window_secs
}

/// Two decimal places, display only; the projected value itself is never rounded.
pub fn format_rate(projected: f64, suffix: &str) -> String {
    format!("{:.2}{}", projected, suffix)
}
