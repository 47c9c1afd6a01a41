//! Property-based tests for the stimulus generators.
//!
//! Uses proptest to verify the length contract (total sample count within
//! one sample of `round((duration + silence) * sample_rate)`), bounded
//! output, and a dead-silent tail for every generator.

use proptest::prelude::*;
use ringdown_core::Stimulus;

const SR: f32 = 44_100.0;

/// Check the cross-generator contract on one stimulus.
fn check_contract(stim: &Stimulus, duration: f32, silence: f32) -> Result<(), TestCaseError> {
    let expected = ((duration + silence) * SR).round() as i64;
    let actual = stim.waveform.len() as i64;
    prop_assert!(
        (actual - expected).abs() <= 1,
        "length {actual} not within 1 of {expected}"
    );

    prop_assert!(stim.waveform.samples().iter().all(|s| s.is_finite()));
    prop_assert!(stim.waveform.peak() <= 1.0 + 1e-4);

    // Everything after the boundary must be literal zeros.
    let boundary_idx = (stim.silence_boundary.secs() * SR).round() as usize;
    prop_assert!(
        stim.waveform.samples()[boundary_idx.min(stim.waveform.len())..]
            .iter()
            .all(|&s| s == 0.0),
        "nonzero sample after silence boundary"
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn noise_burst_contract(
        duration in 0.2f32..2.0,
        silence in 0.5f32..3.0,
        seed in any::<u64>(),
    ) {
        let stim = ringdown_signal::noise_burst(duration, silence, SR, seed);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn tone_burst_contract(
        freq in 50.0f32..8000.0,
        duration in 0.2f32..2.0,
        silence in 0.5f32..3.0,
    ) {
        let stim = ringdown_signal::tone_burst(freq, duration, silence, SR);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn chord_burst_contract(
        duration in 0.2f32..1.5,
        silence in 0.5f32..3.0,
    ) {
        let stim = ringdown_signal::chord_burst(&[261.63, 329.63, 392.0], duration, silence, SR);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn sweep_contract(
        start in 50.0f32..500.0,
        end in 600.0f32..8000.0,
        duration in 0.3f32..2.0,
        silence in 0.5f32..3.0,
    ) {
        let stim = ringdown_signal::sweep(start, end, duration, silence, SR);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn harmonic_decay_contract(
        freq in 50.0f32..2000.0,
        duration in 0.2f32..2.0,
        silence in 0.5f32..3.0,
        rate in 0.5f32..10.0,
    ) {
        let stim = ringdown_signal::harmonic_decay(freq, duration, silence, SR, rate);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn sustained_then_stop_contract(
        freq in 50.0f32..2000.0,
        duration in 0.3f32..3.0,
        silence in 0.5f32..3.0,
    ) {
        let stim = ringdown_signal::sustained_then_stop(freq, duration, silence, SR);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn impulse_train_contract(
        count in 1usize..8,
        interval in 0.05f32..0.4,
        silence in 0.5f32..3.0,
    ) {
        let stim = ringdown_signal::impulse_train(count, interval, silence, SR);
        check_contract(&stim, count as f32 * interval, silence)?;
    }

    #[test]
    fn drum_hit_contract(
        silence in 0.5f32..3.0,
        seed in any::<u64>(),
    ) {
        // The drum's excitation length is fixed at 0.3 s.
        let stim = ringdown_signal::drum_hit(silence, SR, seed);
        check_contract(&stim, 0.3, silence)?;
    }

    #[test]
    fn pluck_contract(
        freq in 50.0f32..2000.0,
        duration in 0.3f32..2.0,
        silence in 0.5f32..3.0,
        seed in any::<u64>(),
    ) {
        let stim = ringdown_signal::pluck(freq, duration, silence, SR, seed);
        check_contract(&stim, duration, silence)?;
    }

    #[test]
    fn pad_swell_contract(
        duration in 0.5f32..3.0,
        silence in 0.5f32..3.0,
        seed in any::<u64>(),
    ) {
        let stim = ringdown_signal::pad_swell(duration, silence, SR, seed);
        check_contract(&stim, duration, silence)?;
    }
}
