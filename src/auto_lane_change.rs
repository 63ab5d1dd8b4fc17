// src/auto_lane_change.rs
//
// Auto-lane-change scheduler: once the blinker has been held at speed in
// auto mode, synthesizes the steering-torque trigger a human would normally
// provide, after a configured delay and for a fixed assist window.

use tracing::debug;

/// Seconds of synthetic torque applied once the scheduled start passes.
pub const TORQUE_APPLY_DURATION: f64 = 1.5;

/// Timing state for one automatic lane-change attempt.
///
/// All times are absolute monotonic seconds from the caller's clock.
/// `start_at == 0.0` means no attempt is scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoLaneChange {
    /// Absolute time the automatic maneuver engages (0 = unset).
    pub start_at: f64,
    /// Countdown until engagement. Display only, never read by the core.
    pub start_in: f64,
    /// Absolute time the synthetic torque window closes.
    pub torque_end: f64,
    /// Whether synthetic assist torque should be applied this cycle.
    pub torque_apply: bool,
}

impl AutoLaneChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called every cycle the auto-lane-change conditions hold (blinker on,
    /// at speed, auto mode). First call arms the schedule; later calls track
    /// the countdown and drive the torque window.
    pub fn schedule(&mut self, now: f64, delay: f64) {
        if self.start_at == 0.0 {
            self.start_at = now + delay;
            self.torque_end = self.start_at + TORQUE_APPLY_DURATION;
            debug!(
                start_at = self.start_at,
                torque_end = self.torque_end,
                "auto lane change scheduled"
            );
        } else {
            self.start_in = self.start_at - now;
            self.torque_apply = self.start_at < now && now <= self.torque_end;
        }
    }

    /// Human torque took over: push the scheduled start out to the end of
    /// the torque window so no further automatic engagement is scheduled,
    /// without invalidating an in-flight window.
    pub fn defer_to_human(&mut self) {
        self.start_at = self.torque_end;
    }

    /// Drop the whole attempt. An automatic sequence never survives a
    /// blinker-off event or loss of lateral control.
    pub fn clear(&mut self) {
        self.start_at = 0.0;
        self.start_in = 0.0;
        self.torque_end = 0.0;
        self.torque_apply = false;
    }
}
