//! Host-side processor tests: lifecycle, pass-through, parameter protocol.

mod helpers;

use approx::assert_abs_diff_eq;
use helpers::tolerances::FLOAT_EPSILON;
use helpers::*;
use pitchtap::plugin::{parameter_table, ParameterFlags};
use pitchtap::prelude::*;

#[test]
fn test_metadata() {
    let plugin = test_plugin(2);
    let metadata = plugin.metadata();

    assert_eq!(metadata.name, "Pitch Estimator");
    assert_eq!(metadata.version, "1.0.0");
    assert_eq!(metadata.version_code, 0x0001_0000);
    assert_eq!(metadata.audio_io.inputs, 1);
    assert_eq!(metadata.audio_io.outputs, 1);
    assert!(!metadata.modifies_audio);

    let json = serde_json::to_value(metadata).unwrap();
    assert_eq!(json["name"], "Pitch Estimator");
    assert_eq!(json["audio_io"]["inputs"], 1);
}

#[test]
fn test_parameter_descriptors() {
    let plugin = test_plugin(2);
    let params = plugin.parameters();

    assert_eq!(params, parameter_table().as_slice());
    assert_eq!(params.len(), 3);

    assert_eq!(params[0].id, ParameterId::Threshold);
    assert_eq!(params[0].name, "Threshold");
    assert_eq!(
        (params[0].range.min, params[0].range.max, params[0].range.default),
        (0.01, 1.0, 0.1)
    );

    assert_eq!(params[1].id, ParameterId::MinBounds);
    assert_eq!(params[1].name, "Min Bounds");
    assert_eq!(
        (params[1].range.min, params[1].range.max, params[1].range.default),
        (1.0, 200.0, 20.0)
    );

    assert_eq!(params[2].id, ParameterId::Pitch);
    assert_eq!(
        params[2].flags,
        ParameterFlags {
            automatable: false,
            read_only: true
        }
    );
}

#[test]
fn test_stereo_block_reports_pitch_and_passes_audio() {
    let mut plugin = test_plugin(2);
    let left = generate_sine(220.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE);
    let right = generate_sine(220.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE);
    let input = interleave(&[&left, &right]);
    let mut output = vec![0.0; input.len()];

    let result = plugin
        .process(&input, &mut output, TEST_BLOCK_SIZE)
        .unwrap();

    assert_pitch_near(result.frequency, 220.0);
    assert_eq!(plugin.get_parameter(2).unwrap(), result.frequency);
    assert_eq!(output, input);
}

#[test]
fn test_surround_channels_untouched() {
    let mut plugin = PitchTapBuilder::new()
        .channels(6)
        .block_size(1024)
        .build()
        .unwrap();

    let tone = generate_sine(440.0, TEST_SAMPLE_RATE, 1024);
    let noise = generate_noise(1024, 42);
    let silence = generate_silence(1024);
    let input = interleave(&[&tone, &tone, &noise, &silence, &noise, &tone]);
    let mut output = vec![0.0; input.len()];

    let result = plugin.process(&input, &mut output, 1024).unwrap();

    // Only the first two channels feed the estimate
    assert_pitch_near(result.frequency, 440.0);
    for (o, i) in output.iter().zip(&input) {
        assert_abs_diff_eq!(*o, *i, epsilon = FLOAT_EPSILON);
    }
}

#[test]
fn test_partial_block() {
    let mut plugin = test_plugin(1);
    let input = generate_sine(880.0, TEST_SAMPLE_RATE, 1024);
    let mut output = vec![0.0; 1024];

    let result = plugin.process(&input, &mut output, 1024).unwrap();

    assert_pitch_near(result.frequency, 880.0);
}

#[test]
fn test_oversized_block_rejected() {
    let mut plugin = test_plugin(1);
    let input = generate_silence(TEST_BLOCK_SIZE * 2);
    let mut output = vec![0.0; TEST_BLOCK_SIZE * 2];

    let err = plugin
        .process(&input, &mut output, TEST_BLOCK_SIZE * 2)
        .unwrap_err();

    assert_eq!(
        err,
        pitchtap::core::Error::BlockTooLarge {
            frames: TEST_BLOCK_SIZE * 2,
            capacity: TEST_BLOCK_SIZE,
        }
    );
}

#[test]
fn test_pitch_follows_blocks() {
    let mut plugin = test_plugin(1);
    let mut output = vec![0.0; TEST_BLOCK_SIZE];

    let low = generate_sine(110.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE);
    let high = generate_sine(1000.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE);
    let silence = generate_silence(TEST_BLOCK_SIZE);

    plugin.process(&low, &mut output, TEST_BLOCK_SIZE).unwrap();
    assert_pitch_near(plugin.get_parameter(2).unwrap(), 110.0);

    plugin.process(&high, &mut output, TEST_BLOCK_SIZE).unwrap();
    assert_pitch_near(plugin.get_parameter(2).unwrap(), 1000.0);

    plugin
        .process(&silence, &mut output, TEST_BLOCK_SIZE)
        .unwrap();
    assert_eq!(plugin.get_parameter(2).unwrap(), NO_PITCH);
}

#[test]
fn test_host_values_clamped() {
    let mut plugin = test_plugin(2);

    plugin.set_parameter(0, -4.0).unwrap();
    assert_eq!(plugin.get_parameter(0).unwrap(), 0.01);

    plugin.set_parameter(1, 1000.0).unwrap();
    assert_eq!(plugin.get_parameter(1).unwrap(), 200.0);

    plugin.set_parameter(1, 63.6).unwrap();
    assert_eq!(plugin.get_parameter(1).unwrap(), 64.0);
}

#[test]
fn test_reprepare_clears_published_pitch() {
    let mut plugin = test_plugin(1);
    let input = generate_sine(330.0, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE);
    let mut output = vec![0.0; TEST_BLOCK_SIZE];
    plugin.process(&input, &mut output, TEST_BLOCK_SIZE).unwrap();
    assert!(plugin.current_pitch() > 0.0);

    plugin.prepare(48000.0, 2, 512).unwrap();

    assert_eq!(plugin.current_pitch(), NO_PITCH);
    assert_eq!(plugin.stream_config().unwrap().sample_rate, 48000.0);
}

#[test]
fn test_umbrella_error_from_core() {
    fn run() -> pitchtap::Result<PitchResult> {
        let mut plugin = PitchPlugin::new();
        let input = generate_silence(8);
        let mut output = vec![0.0; 8];
        Ok(plugin.process(&input, &mut output, 8)?)
    }

    assert_eq!(
        run(),
        Err(pitchtap::Error::Core(pitchtap::core::Error::NotPrepared))
    );
}
