// src/scenario.rs
//
// Scripted synthetic drives for the demo loop. Each scenario is a sequence
// of timed phases, each holding the vehicle snapshot and model probability
// the control loop would otherwise sample from hardware.

use crate::types::CarState;

#[derive(Debug, Clone)]
pub struct Phase {
    pub label: &'static str,
    pub duration: f64,
    pub car: CarState,
    pub active: bool,
    pub lane_change_prob: f64,
}

pub struct Scenario {
    phases: Vec<Phase>,
}

impl Scenario {
    /// Demo drive: a torque-confirmed left change, a right attempt blocked
    /// by the blind spot, and an automatic left change (fires only when the
    /// configured lateral mode is `auto`).
    pub fn demo_drive() -> Self {
        let cruise = CarState {
            v_ego: 25.0, // ~56 mph
            ..CarState::default()
        };

        let phases = vec![
            Phase {
                label: "engage and cruise",
                duration: 2.0,
                car: cruise,
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "signal left",
                duration: 1.0,
                car: CarState {
                    left_blinker: true,
                    ..cruise
                },
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "driver confirms with torque",
                duration: 0.3,
                car: CarState {
                    left_blinker: true,
                    steering_pressed: true,
                    steering_torque: 1.5,
                    ..cruise
                },
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "crossing lane lines",
                duration: 1.5,
                car: CarState {
                    left_blinker: true,
                    ..cruise
                },
                active: true,
                lane_change_prob: 0.0,
            },
            Phase {
                label: "settled in new lane",
                duration: 2.0,
                car: cruise,
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "signal right into occupied blind spot",
                duration: 2.0,
                car: CarState {
                    right_blinker: true,
                    right_blindspot: true,
                    steering_pressed: true,
                    steering_torque: -1.5,
                    ..cruise
                },
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "abort, blinker off",
                duration: 1.0,
                car: cruise,
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "signal left, hands off",
                duration: 4.0,
                car: CarState {
                    left_blinker: true,
                    ..cruise
                },
                active: true,
                lane_change_prob: 1.0,
            },
            Phase {
                label: "automatic crossing",
                duration: 1.5,
                car: CarState {
                    left_blinker: true,
                    ..cruise
                },
                active: true,
                lane_change_prob: 0.0,
            },
            Phase {
                label: "settle and disengage",
                duration: 1.5,
                car: cruise,
                active: false,
                lane_change_prob: 1.0,
            },
        ];

        Self { phases }
    }

    pub fn total_duration(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    /// Phase active at time `t` from scenario start, or None past the end.
    pub fn sample(&self, t: f64) -> Option<&Phase> {
        let mut start = 0.0;
        for phase in &self.phases {
            if t < start + phase.duration {
                return Some(phase);
            }
            start += phase.duration;
        }
        None
    }
}
