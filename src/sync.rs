//! Vertical blank synchronization.
//!
//! A frame is aligned in two phases: block until the display signals the
//! start of vertical blank, then poll the scan-line state until blank ends
//! and scan-out of the next frame begins. Polling busy-waits between queries
//! instead of sleeping; a yielding sleep would add scheduler latency that
//! shifts the band visibly. This costs CPU time on purpose.

use std::time::{Duration, Instant};
use crate::stats::{Degradation, SyncStats};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncError {
    /// Raw status reported by the platform call.
    pub status: i32,
}

impl std::error::Error for SyncError {}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vblank query failed with status {:#010x}", self.status)
    }
}

/// A display output that can report its vertical blank state.
pub trait VBlankSource {
    /// Blocks until the next vertical blank interval starts.
    fn wait_for_blank_start(&mut self) -> Result<(), SyncError>;

    /// Whether the output is currently inside vertical blank.
    fn is_in_blank(&mut self) -> Result<bool, SyncError>;
}

/// Result of one sync attempt. Either failure leaves the frame unaligned;
/// both can happen in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    pub wait_failed: bool,
    pub poll_failed: bool,
}

impl SyncOutcome {
    pub const ALIGNED: SyncOutcome = SyncOutcome { wait_failed: false, poll_failed: false };

    pub fn is_aligned(&self) -> bool {
        !self.wait_failed && !self.poll_failed
    }

    pub fn degradations(&self) -> impl Iterator<Item = Degradation> {
        [
            (self.wait_failed, Degradation::WaitFailed),
            (self.poll_failed, Degradation::PollFailed),
        ]
        .into_iter()
        .filter_map(|(failed, degradation)| failed.then_some(degradation))
    }
}

pub struct Synchronizer<S: VBlankSource> {
    source: S,
    poll_interval: Duration,
}

impl<S: VBlankSource> Synchronizer<S> {
    pub fn new(source: S, poll_interval: Duration) -> Self {
        Self { source, poll_interval }
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }

    /// Waits for blank start, then polls until blank ends.
    ///
    /// Failures are tolerated: a failed wait still polls, and a failed poll
    /// stops polling for this frame since its last answer can't be trusted.
    pub fn sync_to_scanout(&mut self, stats: &mut SyncStats) -> SyncOutcome {
        let mut outcome = SyncOutcome {
            wait_failed: self.source.wait_for_blank_start().is_err(),
            ..Default::default()
        };

        loop {
            busy_wait(self.poll_interval);
            stats.polls += 1;
            match self.source.is_in_blank() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(_) => {
                    outcome.poll_failed = true;
                    break;
                },
            }
        }
        outcome
    }
}

/// Spins until `duration` has elapsed without yielding the thread.
pub fn busy_wait(duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use super::*;

    #[derive(Default)]
    struct ScriptedSource {
        waits: VecDeque<Result<(), SyncError>>,
        polls: VecDeque<Result<bool, SyncError>>,
        wait_calls: u32,
        poll_calls: u32,
    }

    impl VBlankSource for ScriptedSource {
        fn wait_for_blank_start(&mut self) -> Result<(), SyncError> {
            self.wait_calls += 1;
            self.waits.pop_front().unwrap_or(Ok(()))
        }

        fn is_in_blank(&mut self) -> Result<bool, SyncError> {
            self.poll_calls += 1;
            self.polls.pop_front().unwrap_or(Ok(false))
        }
    }

    const FAIL: SyncError = SyncError { status: 0xC000_0001u32 as i32 };

    #[test]
    fn polls_until_blank_ends() {
        let source = ScriptedSource {
            polls: VecDeque::from(vec![Ok(true), Ok(true), Ok(true), Ok(false)]),
            ..Default::default()
        };
        let mut sync = Synchronizer::new(source, Duration::from_micros(1));
        let mut stats = SyncStats::new();
        assert_eq!(sync.sync_to_scanout(&mut stats), SyncOutcome::ALIGNED);
        assert_eq!(sync.source().wait_calls, 1);
        assert_eq!(sync.source().poll_calls, 4);
        assert_eq!(stats.polls, 4);
    }

    #[test]
    fn failed_wait_still_polls() {
        let source = ScriptedSource {
            waits: VecDeque::from(vec![Err(FAIL)]),
            polls: VecDeque::from(vec![Ok(true), Ok(false)]),
            ..Default::default()
        };
        let mut sync = Synchronizer::new(source, Duration::from_micros(1));
        let mut stats = SyncStats::new();
        let outcome = sync.sync_to_scanout(&mut stats);
        assert!(outcome.wait_failed && !outcome.poll_failed);
        assert_eq!(outcome.degradations().collect::<Vec<_>>(), vec![Degradation::WaitFailed]);
        assert_eq!(sync.source().poll_calls, 2);
    }

    #[test]
    fn failed_poll_stops_polling() {
        let source = ScriptedSource {
            polls: VecDeque::from(vec![Ok(true), Err(FAIL), Ok(true), Ok(true)]),
            ..Default::default()
        };
        let mut sync = Synchronizer::new(source, Duration::from_micros(1));
        let mut stats = SyncStats::new();
        let outcome = sync.sync_to_scanout(&mut stats);
        assert!(!outcome.wait_failed && outcome.poll_failed);
        assert_eq!(sync.source().poll_calls, 2);
    }

    #[test]
    fn failed_wait_and_poll_are_both_reported() {
        let source = ScriptedSource {
            waits: VecDeque::from(vec![Err(FAIL)]),
            polls: VecDeque::from(vec![Err(FAIL)]),
            ..Default::default()
        };
        let mut sync = Synchronizer::new(source, Duration::from_micros(1));
        let mut stats = SyncStats::new();
        let outcome = sync.sync_to_scanout(&mut stats);
        assert!(!outcome.is_aligned());
        assert_eq!(
            outcome.degradations().collect::<Vec<_>>(),
            vec![Degradation::WaitFailed, Degradation::PollFailed]
        );
        assert_eq!(sync.source().wait_calls, 1);
        assert_eq!(sync.source().poll_calls, 1);
    }

    #[test]
    fn busy_wait_spends_at_least_the_interval() {
        let start = Instant::now();
        busy_wait(Duration::from_micros(200));
        assert!(start.elapsed() >= Duration::from_micros(200));
    }

    #[test]
    fn error_display_shows_status() {
        assert_eq!(FAIL.to_string(), "vblank query failed with status 0xc0000001");
    }
}
