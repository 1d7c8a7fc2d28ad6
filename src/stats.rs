//! Counters for how well the loop kept up with the display.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// The vblank wait call reported an error.
    WaitFailed,
    /// A scan-line query failed while waiting for blank to end.
    PollFailed,
}

#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    pub frames: u64,
    pub synced_frames: u64,
    pub failed_waits: u64,
    pub failed_polls: u64,
    pub polls: u64,
    pub present_failures: u64,
    min_interval: Option<Duration>,
    max_interval: Option<Duration>,
    total_interval: Duration,
    intervals: u64,
}

impl SyncStats {
    pub fn new() -> Self {
        Self { ..Default::default() }
    }

    /// Records a degraded sync and returns the new degraded total.
    pub fn record_degraded(&mut self, degradation: Degradation) -> u64 {
        match degradation {
            Degradation::WaitFailed => self.failed_waits += 1,
            Degradation::PollFailed => self.failed_polls += 1,
        }
        self.degraded()
    }

    pub fn degraded(&self) -> u64 {
        self.failed_waits + self.failed_polls
    }

    pub fn record_interval(&mut self, interval: Duration) {
        self.min_interval = Some(self.min_interval.map_or(interval, |m| m.min(interval)));
        self.max_interval = Some(self.max_interval.map_or(interval, |m| m.max(interval)));
        self.total_interval += interval;
        self.intervals += 1;
    }

    pub fn min_interval(&self) -> Option<Duration> {
        self.min_interval
    }

    pub fn max_interval(&self) -> Option<Duration> {
        self.max_interval
    }

    pub fn mean_interval(&self) -> Option<Duration> {
        match self.intervals {
            0 => None,
            n => {
                let nanos = self.total_interval.as_nanos() / n as u128;
                Some(Duration::from_nanos(nanos.min(u64::MAX as u128) as u64))
            },
        }
    }

    /// Refresh rate implied by the mean frame interval.
    pub fn refresh_hz(&self) -> Option<f64> {
        self.mean_interval()
            .filter(|d| !d.is_zero())
            .map(|d| 1.0 / d.as_secs_f64())
    }

    pub fn summary(&self) -> String {
        let mut s = format!(
            "frames={} synced={} degraded={} (waits={}, polls={}) polls={} present_failures={}",
            self.frames,
            self.synced_frames,
            self.degraded(),
            self.failed_waits,
            self.failed_polls,
            self.polls,
            self.present_failures,
        );
        if let (Some(mean), Some(min), Some(max)) =
            (self.mean_interval(), self.min_interval, self.max_interval)
        {
            s.push_str(&format!(
                " interval mean={:.3}ms min={:.3}ms max={:.3}ms",
                mean.as_secs_f64() * 1000.0,
                min.as_secs_f64() * 1000.0,
                max.as_secs_f64() * 1000.0,
            ));
        }
        if let Some(hz) = self.refresh_hz() {
            s.push_str(&format!(" (~{:.1}Hz)", hz));
        }
        s
    }
}

/// True for the first degraded event and every power of two after it,
/// so a persistently failing adapter does not flood the log.
pub fn should_report(degraded_total: u64) -> bool {
    degraded_total.is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_counts_both_kinds() {
        let mut stats = SyncStats::new();
        assert_eq!(stats.record_degraded(Degradation::WaitFailed), 1);
        assert_eq!(stats.record_degraded(Degradation::PollFailed), 2);
        assert_eq!(stats.record_degraded(Degradation::PollFailed), 3);
        assert_eq!(stats.failed_waits, 1);
        assert_eq!(stats.failed_polls, 2);
    }

    #[test]
    fn interval_extremes_and_rate() {
        let mut stats = SyncStats::new();
        assert_eq!(stats.mean_interval(), None);
        assert_eq!(stats.refresh_hz(), None);
        stats.record_interval(Duration::from_micros(16_000));
        stats.record_interval(Duration::from_micros(17_000));
        stats.record_interval(Duration::from_micros(18_000));
        assert_eq!(stats.min_interval(), Some(Duration::from_micros(16_000)));
        assert_eq!(stats.max_interval(), Some(Duration::from_micros(18_000)));
        assert_eq!(stats.mean_interval(), Some(Duration::from_micros(17_000)));
        let hz = stats.refresh_hz().unwrap();
        assert!((hz - 58.82).abs() < 0.01, "hz = {}", hz);
        assert!(stats.summary().contains("~58.8Hz"));
    }

    #[test]
    fn mean_survives_counts_past_u32() {
        let mut stats = SyncStats::new();
        stats.record_interval(Duration::from_millis(4));
        stats.intervals = 1u64 << 32;
        stats.total_interval = Duration::from_millis(4) * 1_000_000 * 4_295;
        let mean = stats.mean_interval().unwrap();
        assert!(mean > Duration::from_millis(3) && mean < Duration::from_millis(5), "{:?}", mean);
    }

    #[test]
    fn reports_thin_out() {
        let reported: Vec<u64> = (1..=20).filter(|n| should_report(*n)).collect();
        assert_eq!(reported, vec![1, 2, 4, 8, 16]);
        assert!(!should_report(0));
    }
}
