use chrono::{DateTime, Utc};

/// Time source seam so rate calculations can be tested with a manual clock.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
