use crate::error::Result;

/// One raw observation of the tracked progress bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub exp: i64,
    pub percent: f64,
}

/// Source of progress readings, sampled once per tick.
pub trait ExpProbe: Send {
    fn probe(&mut self) -> Result<ProbeReading>;
}

/// Deterministic stand-in for a real acquisition layer: XP grows by a
/// configurable base gain per tick with a sine wobble so the charts have
/// visible shape. Two probes built with the same parameters produce the
/// same sequence.
pub struct SimulatedProbe {
    exp: i64,
    exp_per_level: i64,
    base_gain: i64,
    ticks: u64,
}

impl SimulatedProbe {
    pub fn new(base_gain: i64, exp_per_level: i64) -> Self {
        Self {
            exp: 0,
            exp_per_level: exp_per_level.max(1),
            base_gain: base_gain.max(0),
            ticks: 0,
        }
    }
}

impl ExpProbe for SimulatedProbe {
    fn probe(&mut self) -> Result<ProbeReading> {
        self.ticks += 1;
        let wobble = 1.0 + (self.ticks as f64 * 0.7).sin() * 0.25;
        self.exp += (self.base_gain as f64 * wobble).round() as i64;

        let percent = (self.exp % self.exp_per_level) as f64 / self.exp_per_level as f64 * 100.0;

        Ok(ProbeReading {
            exp: self.exp,
            percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_probe_is_deterministic() {
        let mut a = SimulatedProbe::new(250, 100_000);
        let mut b = SimulatedProbe::new(250, 100_000);
        for _ in 0..20 {
            assert_eq!(a.probe().unwrap(), b.probe().unwrap());
        }
    }

    #[test]
    fn simulated_exp_is_strictly_increasing() {
        let mut probe = SimulatedProbe::new(250, 100_000);
        let mut previous = 0;
        for _ in 0..50 {
            let reading = probe.probe().unwrap();
            assert!(reading.exp > previous);
            previous = reading.exp;
        }
    }

    #[test]
    fn percent_stays_within_level_bounds() {
        let mut probe = SimulatedProbe::new(250, 1_000);
        for _ in 0..100 {
            let reading = probe.probe().unwrap();
            assert!((0.0..100.0).contains(&reading.percent));
        }
    }
}
