// src/main.rs

mod auto_lane_change;
mod config;
mod desire;
mod scenario;
mod types;

use anyhow::Result;
use desire::DesireHelper;
use scenario::Scenario;
use std::time::Duration;
use tracing::info;
use types::{Config, Desire, LaneChangeState};

#[derive(Default)]
struct RunStats {
    cycles: u64,
    left_desire_cycles: u64,
    right_desire_cycles: u64,
    assist_torque_cycles: u64,
    changes_started: usize,
    changes_completed: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, loaded) = match Config::load("config.yaml") {
        Ok(c) => (c, true),
        Err(_) => (Config::default(), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("desire_arbiter={}", config.logging.level))
        .init();

    info!("🚗 Lane-Change Desire Arbiter starting");
    if loaded {
        info!("✓ Configuration loaded from config.yaml");
    } else {
        info!("config.yaml not found, using defaults");
    }
    info!(
        "Lateral mode: {:?}, min {} mph, auto min {} mph, auto delay {:.1}s, {} Hz",
        config.lateral.mode,
        config.lateral.min_mph,
        config.lateral.auto_min_mph,
        config.lateral.auto_delay,
        config.control.rate_hz
    );

    let dt = config.cycle_dt();
    let mut helper = DesireHelper::new(dt);
    let scenario = Scenario::demo_drive();
    info!(
        "Running scripted drive: {} phases, {:.1}s",
        scenario.phase_count(),
        scenario.total_duration()
    );

    let mut interval = tokio::time::interval(Duration::from_secs_f64(dt));
    let mut stats = RunStats::default();
    let mut prev_state = helper.state();
    let mut prev_label = "";
    let mut now = 0.0;

    while let Some(phase) = scenario.sample(now) {
        if config.control.real_time {
            interval.tick().await;
        }

        if phase.label != prev_label {
            info!("— {}", phase.label);
            prev_label = phase.label;
        }

        // The configuration provider is re-read every cycle; a live system
        // would pick up parameter changes here.
        let desire = helper.update(
            &phase.car,
            phase.active,
            phase.lane_change_prob,
            &config.lateral,
            now,
        );

        let state = helper.state();
        if state != prev_state {
            info!("  state {:?} → {:?}", prev_state, state);
            if state == LaneChangeState::LaneChangeStarting {
                stats.changes_started += 1;
            }
            if prev_state == LaneChangeState::LaneChangeFinishing {
                stats.changes_completed += 1;
            }
            prev_state = state;
        }

        match desire {
            Desire::LaneChangeLeft => stats.left_desire_cycles += 1,
            Desire::LaneChangeRight => stats.right_desire_cycles += 1,
            _ => {}
        }
        if helper.torque_apply() {
            stats.assist_torque_cycles += 1;
        }

        stats.cycles += 1;
        now += dt;
    }

    info!("\n✓ Drive complete");
    info!("  Cycles: {} ({:.1}s)", stats.cycles, stats.cycles as f64 * dt);
    info!("  Lane changes started: {}", stats.changes_started);
    info!("  Lane changes completed: {}", stats.changes_completed);
    info!(
        "  Desire cycles: {} left, {} right",
        stats.left_desire_cycles, stats.right_desire_cycles
    );
    info!(
        "  Assist torque cycles: {} ({:.2}s)",
        stats.assist_torque_cycles,
        stats.assist_torque_cycles as f64 * dt
    );

    Ok(())
}
