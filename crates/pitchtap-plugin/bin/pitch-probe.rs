//! Offline probe for the pitch processor.
//!
//! Usage: `pitch-probe [sample_rate] [block_size] [freq...]`
//!
//! Synthesizes each tone as interleaved stereo, runs one block through the
//! processor and logs the estimate. Set `RUST_LOG=debug` to see preparation.

use std::env;

use pitchtap_plugin::{AnalysisProcessor, PitchPlugin, Result};

const DEFAULT_TONES: [f32; 6] = [110.0, 220.0, 261.63, 440.0, 880.0, 1000.0];

fn stereo_tone(freq: f32, sample_rate: f64, frames: usize) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let phase = 2.0 * std::f64::consts::PI * freq as f64 * i as f64 / sample_rate;
            let s = (phase.sin() * 0.5) as f32;
            [s, s]
        })
        .collect()
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let sample_rate = args
        .first()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(44100.0);
    let block_size = args
        .get(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(2048);
    let mut tones: Vec<f32> = args
        .iter()
        .skip(2)
        .filter_map(|s| s.parse().ok())
        .collect();
    if tones.is_empty() {
        tones = DEFAULT_TONES.to_vec();
    }

    let mut plugin = PitchPlugin::new();
    plugin.prepare(sample_rate, 2, block_size)?;

    tracing::info!(
        "{} v{} at {} Hz, {} frames",
        plugin.metadata().name,
        plugin.metadata().version,
        sample_rate,
        block_size
    );

    let mut output = vec![0.0; block_size * 2];
    for freq in tones {
        let input = stereo_tone(freq, sample_rate, block_size);
        let result = plugin.process(&input, &mut output, block_size)?;

        match result.frequency_hz() {
            Some(hz) => tracing::info!(
                "{:>8.2} Hz -> {:>8.2} Hz ({}, lag {}, {:?}, error {:.2}%)",
                freq,
                hz,
                result.note_name().unwrap_or_default(),
                result.lag,
                result.selection,
                (hz - freq).abs() / freq * 100.0
            ),
            None => tracing::info!("{:>8.2} Hz -> no pitch", freq),
        }
    }

    Ok(())
}
