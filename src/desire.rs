// src/desire.rs
//
// Lane-change desire state machine. Runs once per control cycle, owns all
// lane-change intent state, and emits the Desire the trajectory planner
// biases toward. Pure arithmetic and matches, no allocation, never fails;
// losing `active` or hitting the 10 s timeout is the designed recovery path.

use crate::auto_lane_change::AutoLaneChange;
use crate::types::{CarState, Desire, LaneChangeDirection, LaneChangeState, LateralConfig, LateralMode};
use tracing::debug;

pub const MPH_TO_MS: f64 = 0.44704;

/// Hard cap on time spent in starting/finishing before forcing a reset.
pub const LANE_CHANGE_TIME_MAX: f64 = 10.0;

// Commit thresholds: the maneuver is considered committed once the model is
// 98% sure the lane lines are gone and our own blend has fully decayed.
const LANE_CHANGE_PROB_COMMIT: f64 = 0.02;
const LL_PROB_DECAYED: f64 = 0.01;
const LL_PROB_RESTORED: f64 = 0.99;

const KEEP_PULSE_PERIOD: f64 = 1.0;

/// Direction × state lookup. Exhaustive so every new variant forces a
/// decision here; anything not listed is no desire at all.
fn desire_for(direction: LaneChangeDirection, state: LaneChangeState) -> Desire {
    match (direction, state) {
        (LaneChangeDirection::Left, LaneChangeState::LaneChangeStarting)
        | (LaneChangeDirection::Left, LaneChangeState::LaneChangeFinishing) => {
            Desire::LaneChangeLeft
        }
        (LaneChangeDirection::Right, LaneChangeState::LaneChangeStarting)
        | (LaneChangeDirection::Right, LaneChangeState::LaneChangeFinishing) => {
            Desire::LaneChangeRight
        }
        _ => Desire::None,
    }
}

/// Per-process lane-change arbitration state. One instance, constructed at
/// startup, mutated in place by `update` every cycle. Nothing else holds or
/// mutates it; the planner and telemetry only read the accessors.
pub struct DesireHelper {
    dt: f64,
    lane_change_state: LaneChangeState,
    lane_change_direction: LaneChangeDirection,
    lane_change_timer: f64,
    lane_change_ll_prob: f64,
    keep_pulse_timer: f64,
    prev_one_blinker: bool,
    desire: Desire,
    auto: AutoLaneChange,
}

impl DesireHelper {
    /// `dt` is the fixed cycle duration in seconds (nominal 20 Hz → 0.05).
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            lane_change_state: LaneChangeState::Off,
            lane_change_direction: LaneChangeDirection::None,
            lane_change_timer: 0.0,
            lane_change_ll_prob: 1.0,
            keep_pulse_timer: 0.0,
            prev_one_blinker: false,
            desire: Desire::None,
            auto: AutoLaneChange::new(),
        }
    }

    /// Advance one control cycle.
    ///
    /// # Arguments
    /// * `car` - vehicle snapshot for this cycle
    /// * `active` - whether lateral control is engaged
    /// * `lane_change_prob` - model confidence that the lane lines are no
    ///   longer tracked (low = safe to finish)
    /// * `lateral` - configuration, re-read by the caller every cycle
    /// * `now` - monotonic seconds
    pub fn update(
        &mut self,
        car: &CarState,
        active: bool,
        lane_change_prob: f64,
        lateral: &LateralConfig,
        now: f64,
    ) -> Desire {
        let one_blinker = car.left_blinker != car.right_blinker;
        let below_lane_change_speed = car.v_ego < lateral.min_mph * MPH_TO_MS;
        let prev_state = self.lane_change_state;

        if !active || self.lane_change_timer > LANE_CHANGE_TIME_MAX {
            self.lane_change_state = LaneChangeState::Off;
            self.lane_change_direction = LaneChangeDirection::None;
        } else {
            // Auto lane change: sustained blinker at speed in auto mode arms
            // a schedule that later synthesizes the torque trigger.
            if one_blinker
                && !below_lane_change_speed
                && lateral.mode == LateralMode::Auto
                && car.v_ego >= lateral.auto_min_mph * MPH_TO_MS
            {
                self.auto.schedule(now, lateral.auto_delay);
            }

            match self.lane_change_state {
                LaneChangeState::Off => {
                    // Rising edge only: a blinker that was already on when
                    // control engaged does not start a lane change.
                    if one_blinker && !self.prev_one_blinker && !below_lane_change_speed {
                        self.lane_change_state = LaneChangeState::PreLaneChange;
                        self.lane_change_ll_prob = 1.0;
                    }
                }

                LaneChangeState::PreLaneChange => {
                    self.lane_change_direction = if car.left_blinker {
                        LaneChangeDirection::Left
                    } else {
                        LaneChangeDirection::Right
                    };

                    // Positive torque = left. Counter-steering against the
                    // blinker does not confirm the change.
                    let human_torque = car.steering_pressed
                        && ((car.steering_torque > 0.0
                            && self.lane_change_direction == LaneChangeDirection::Left)
                            || (car.steering_torque < 0.0
                                && self.lane_change_direction == LaneChangeDirection::Right));

                    let blindspot_detected = (car.left_blindspot
                        && self.lane_change_direction == LaneChangeDirection::Left)
                        || (car.right_blindspot
                            && self.lane_change_direction == LaneChangeDirection::Right);

                    // Human took over before the automatic start: stop any
                    // further auto scheduling until the next blinker cycle.
                    if human_torque {
                        self.auto.defer_to_human();
                    }
                    let torque_applied = human_torque || self.auto.torque_apply;

                    if !one_blinker || below_lane_change_speed {
                        self.lane_change_state = LaneChangeState::Off;
                    } else if torque_applied && !blindspot_detected {
                        self.lane_change_state = LaneChangeState::LaneChangeStarting;
                    }
                }

                LaneChangeState::LaneChangeStarting => {
                    // Fade lane lines out over ~0.5 s.
                    self.lane_change_ll_prob = (self.lane_change_ll_prob - 2.0 * self.dt).max(0.0);

                    if lane_change_prob < LANE_CHANGE_PROB_COMMIT
                        && self.lane_change_ll_prob < LL_PROB_DECAYED
                    {
                        self.lane_change_state = LaneChangeState::LaneChangeFinishing;
                    }
                }

                LaneChangeState::LaneChangeFinishing => {
                    // Fade lane lines back in over ~1 s.
                    self.lane_change_ll_prob = (self.lane_change_ll_prob + self.dt).min(1.0);

                    if self.lane_change_ll_prob > LL_PROB_RESTORED {
                        self.lane_change_direction = LaneChangeDirection::None;
                        self.lane_change_state = if one_blinker {
                            LaneChangeState::PreLaneChange
                        } else {
                            LaneChangeState::Off
                        };
                    }
                }
            }
        }

        // An automatic sequence never survives a blinker-off event or loss
        // of lateral control.
        if !active || !one_blinker {
            self.auto.clear();
        }

        if matches!(
            self.lane_change_state,
            LaneChangeState::Off | LaneChangeState::PreLaneChange
        ) {
            self.lane_change_timer = 0.0;
        } else {
            self.lane_change_timer += self.dt;
        }

        self.prev_one_blinker = one_blinker;
        self.desire = desire_for(self.lane_change_direction, self.lane_change_state);
        self.shape_keep_pulse();

        if self.lane_change_state != prev_state {
            debug!(
                "lane change state {:?} → {:?} ({:?})",
                prev_state, self.lane_change_state, self.lane_change_direction
            );
        }

        self.desire
    }

    /// Pulse any keep desire at most once per second while waiting in
    /// PreLaneChange, instead of holding it continuously. The baseline
    /// lookup never emits keeps; the rule still shapes extended tables
    /// that do.
    fn shape_keep_pulse(&mut self) {
        match self.lane_change_state {
            LaneChangeState::Off | LaneChangeState::LaneChangeStarting => {
                self.keep_pulse_timer = 0.0;
            }
            LaneChangeState::PreLaneChange => {
                self.keep_pulse_timer += self.dt;
                if self.keep_pulse_timer > KEEP_PULSE_PERIOD {
                    self.keep_pulse_timer = 0.0;
                } else if matches!(self.desire, Desire::KeepLeft | Desire::KeepRight) {
                    self.desire = Desire::None;
                }
            }
            LaneChangeState::LaneChangeFinishing => {}
        }
    }

    pub fn state(&self) -> LaneChangeState {
        self.lane_change_state
    }

    pub fn direction(&self) -> LaneChangeDirection {
        self.lane_change_direction
    }

    pub fn desire(&self) -> Desire {
        self.desire
    }

    /// Lane-line confidence blend, always in [0, 1].
    pub fn ll_prob(&self) -> f64 {
        self.lane_change_ll_prob
    }

    /// Countdown until automatic engagement, for display.
    pub fn auto_start_in(&self) -> f64 {
        self.auto.start_in
    }

    /// Whether the actuator should apply assist torque this cycle.
    pub fn torque_apply(&self) -> bool {
        self.auto.torque_apply
    }
}
