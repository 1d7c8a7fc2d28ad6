//! The per-refresh control loop.
//!
//! One iteration: sync to scan-out, advance the band, place the occluders,
//! then drain pending window events. A quit request seen while draining is
//! acted on at the top of the next iteration, so the surfaces are always left
//! in a complete placement.

use std::time::Instant;
use crate::{
    compositor::Compositor,
    layout::BandLayout,
    logger::RunLog,
    scan::ScanState,
    stats::{should_report, SyncStats},
    sync::{Synchronizer, VBlankSource},
};

/// Delivers pending window system events without blocking.
pub trait EventPump {
    /// Dispatches everything queued. Returns the exit code of a quit
    /// request if one was seen.
    fn drain(&mut self) -> Option<i32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Initializing,
    Running,
    ShuttingDown,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct LoopReport {
    pub exit_code: i32,
    pub stats: SyncStats,
    pub final_state: ScanState,
    pub phase: LoopPhase,
}

pub struct ControlLoop<S: VBlankSource, C: Compositor, P: EventPump> {
    sync: Synchronizer<S>,
    compositor: C,
    pump: P,
    state: ScanState,
    stats: SyncStats,
    log: RunLog,
    phase: LoopPhase,
    shutdown: Option<i32>,
    last_scanout: Option<Instant>,
}

impl<S: VBlankSource, C: Compositor, P: EventPump> ControlLoop<S, C, P> {
    pub fn new(
        sync: Synchronizer<S>,
        compositor: C,
        pump: P,
        state: ScanState,
        log: RunLog,
    ) -> Self {
        Self {
            sync,
            compositor,
            pump,
            state,
            stats: SyncStats::new(),
            log,
            phase: LoopPhase::Running,
            shutdown: None,
            last_scanout: None,
        }
    }

    #[cfg(test)]
    fn state(&self) -> &ScanState {
        &self.state
    }

    /// Runs one iteration, or moves to `ShuttingDown` if a quit is pending.
    pub fn step(&mut self) -> LoopPhase {
        if self.phase != LoopPhase::Running {
            return self.phase;
        }
        if self.shutdown.is_some() {
            self.phase = LoopPhase::ShuttingDown;
            return self.phase;
        }

        let outcome = self.sync.sync_to_scanout(&mut self.stats);
        if outcome.is_aligned() {
            self.stats.synced_frames += 1;
        }
        for degradation in outcome.degradations() {
            let total = self.stats.record_degraded(degradation);
            if should_report(total) {
                self.log.log(
                    &format!(
                        "degraded sync ({:?}), {} so far; continuing best-effort",
                        degradation, total
                    ),
                    true,
                );
            }
        }
        let now = Instant::now();
        if let Some(last) = self.last_scanout.replace(now) {
            self.stats.record_interval(now - last);
        }

        self.state = self.state.advance();
        let layout = BandLayout::for_state(&self.state);
        if let Err(e) = self.compositor.present(&layout) {
            self.stats.present_failures += 1;
            if should_report(self.stats.present_failures) {
                self.log.log(&format!("{}, {} so far", e, self.stats.present_failures), true);
            }
        }
        self.stats.frames += 1;

        if let Some(code) = self.pump.drain() {
            self.shutdown = Some(code);
        }
        self.phase
    }

    /// Runs until a quit request arrives, then releases the adapter and the
    /// surfaces exactly once.
    pub fn run(mut self) -> LoopReport {
        while self.step() == LoopPhase::Running {}
        self.terminate()
    }

    fn terminate(self) -> LoopReport {
        let Self { sync, compositor, state, stats, log, shutdown, .. } = self;
        // adapter first: it holds a DC of the main surface
        drop(sync);
        drop(compositor);
        log.log(&format!("stopped: {}", stats.summary()), true);
        LoopReport {
            exit_code: shutdown.unwrap_or(0),
            stats,
            final_state: state,
            phase: LoopPhase::Terminated,
        }
    }
}
