//! Lagged Counter Demo
//!
//! A client predicts a 1D position from its own inputs while the server,
//! which also applies occasional gusts the client cannot see, reports back
//! a few ticks late. Each late report is reconciled and the render position
//! is blended toward the last correction.
//!
//! Run with `RUST_LOG=debug` to see every correction, and optionally pass
//! a RON file holding a `PredictorConfig`.

use std::collections::VecDeque;

use tickback_anticipation::Anticipator;
use tickback_core::Tick;
use tickback_netcode::{Predictor, PredictorConfig, SmoothPredictor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "(state_capacity: 32, input_capacity: 32, one_frame_delay: false)";

/// Ticks between the server simulating a tick and the client seeing it
const LATENCY: Tick = 4;
const TICKS: Tick = 60;

fn velocity(tick: Tick) -> f32 {
    if tick % 12 < 6 {
        1.0
    } else {
        -1.0
    }
}

fn gust(tick: Tick) -> f32 {
    if tick % 17 == 0 {
        0.5
    } else {
        0.0
    }
}

fn load_config() -> Result<PredictorConfig, Box<dyn std::error::Error>> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CONFIG.to_string(),
    };
    let config: PredictorConfig = ron::from_str(&text)?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    info!(?config, "starting lagged counter");

    let predictor = Predictor::with_config(
        config,
        0.0f32,
        |position: f32, velocity: f32| position + velocity,
        |local: f32, server: f32| (local - server).abs() < 0.01,
    )?;
    let mut client = SmoothPredictor::new(predictor, |from: f32, to: f32, t: f32| {
        from + (to - from) * t
    });
    let mut next_input = Anticipator::new(0.0f32);

    let mut server_position = 0.0f32;
    let mut in_flight: VecDeque<(Tick, f32)> = VecDeque::new();
    let mut corrections = 0;

    for tick in 1..=TICKS {
        let input = velocity(tick);
        client.apply_input(input, tick);
        next_input.set_value(input);

        server_position += input + gust(tick);
        in_flight.push_back((tick, server_position));

        while let Some(&(server_tick, state)) = in_flight.front() {
            if server_tick + LATENCY > tick {
                break;
            }
            in_flight.pop_front();
            match client.reconcile(state, server_tick) {
                Ok(true) => corrections += 1,
                Ok(false) => {}
                Err(err) => warn!(%err, server_tick, "dropped server state"),
            }
        }

        let (predicted, _) = client.predictor().current();
        info!(
            tick,
            predicted,
            rendered = client.smoothed_state(0.5),
            anticipated_input = next_input.predict(),
            "tick"
        );
    }

    info!(corrections, server_position, "done");
    Ok(())
}
