// src/types.rs

use serde::{Deserialize, Serialize};

/// Phase of an in-progress lane change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneChangeState {
    Off,
    PreLaneChange,
    LaneChangeStarting,
    LaneChangeFinishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneChangeDirection {
    None,
    Left,
    Right,
}

/// Discrete maneuver intent consumed by the downstream planner.
///
/// Never assigned directly; always derived from the direction × state
/// lookup in `desire.rs` (plus the keep-pulse override to `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Desire {
    None,
    LaneChangeLeft,
    LaneChangeRight,
    KeepLeft,
    KeepRight,
}

/// Per-cycle vehicle snapshot from the car interface.
///
/// Steering torque sign convention: positive = left.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarState {
    pub v_ego: f64,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub steering_pressed: bool,
    pub steering_torque: f64,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LateralMode {
    Manual,
    Assisted,
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub lateral: LateralConfig,
    pub control: ControlConfig,
    pub logging: LoggingConfig,
}

/// Lane-change arbitration settings. Re-read every cycle by the caller and
/// passed into `DesireHelper::update`; the core never caches these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateralConfig {
    pub mode: LateralMode,
    /// Minimum speed for any lane change, in mph.
    pub min_mph: f64,
    /// Minimum speed for an automatic lane change, in mph.
    pub auto_min_mph: f64,
    /// Delay between blinker engagement and automatic torque, in seconds.
    pub auto_delay: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Control cycle rate in Hz. `dt` is derived from this.
    pub rate_hz: f64,
    /// Pace the demo loop at the real cycle cadence instead of flat-out.
    pub real_time: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}
