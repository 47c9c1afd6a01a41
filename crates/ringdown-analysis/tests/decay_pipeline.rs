//! Integration tests for the analysis pipeline on realistic stimuli.
//!
//! Exercises the spectrogram, residual meter, and resonance detector
//! together, the way the sweep orchestrator uses them.

use ringdown_analysis::{StftParams, compute_spectrogram, residual, resonance};
use ringdown_core::SILENCE_FLOOR_DB;
use ringdown_signal::{noise_burst, sustained_then_stop, tone_burst};

const SR: f32 = 44_100.0;

#[test]
fn dry_noise_burst_tail_is_at_the_floor() {
    // The stimulus itself decays to literal zeros at t = 1.0 s, so the
    // window [1.5, 2.5] must measure the epsilon floor exactly.
    let stim = noise_burst(1.0, 2.0, SR, 0xA5A5);
    let spec = compute_spectrogram(&stim.waveform, &StftParams::default()).unwrap();

    let m = residual::measure(&spec, (1.5, 2.5), (20.0, 8000.0)).unwrap();
    assert!(
        (m.average_db - SILENCE_FLOOR_DB).abs() < 1.0,
        "tail average {} dB, expected ~{} dB",
        m.average_db,
        SILENCE_FLOOR_DB
    );
    assert!(m.max_db < -95.0);
}

#[test]
fn dry_noise_burst_has_no_resonances() {
    let stim = noise_burst(1.0, 2.0, SR, 0xA5A5);
    let spec = compute_spectrogram(&stim.waveform, &StftParams::default()).unwrap();
    let found = resonance::find_resonant_frequencies(
        &spec,
        stim.silence_boundary.secs() + 0.5,
        1.0,
        resonance::DEFAULT_THRESHOLD_DB,
    );
    assert!(found.is_empty(), "false positives: {found:?}");
}

#[test]
fn burst_region_is_loud_and_tail_is_quiet() {
    let stim = tone_burst(440.0, 1.0, 2.0, SR);
    let spec = compute_spectrogram(&stim.waveform, &StftParams::default()).unwrap();

    let during = residual::measure(&spec, (0.2, 0.8), (400.0, 480.0)).unwrap();
    let after = residual::measure(&spec, (1.5, 2.5), (400.0, 480.0)).unwrap();
    assert!(
        during.average_db > after.average_db + 60.0,
        "burst {} dB vs tail {} dB",
        during.average_db,
        after.average_db
    );
}

#[test]
fn abrupt_stop_stimulus_decays_cleanly_without_processing() {
    // The windowed transform smears the stop by one window (~46 ms), but
    // half a second later there must be nothing left.
    let stim = sustained_then_stop(440.0, 3.0, 2.0, SR);
    let spec = compute_spectrogram(&stim.waveform, &StftParams::default()).unwrap();

    let curve = residual::decay_curve(&spec, 440.0, stim.silence_boundary.secs());
    let settled: Vec<&(f32, f32)> = curve.iter().filter(|(dt, _)| *dt > 0.5).collect();
    assert!(!settled.is_empty());
    assert!(
        settled.iter().all(|(_, db)| *db < -90.0),
        "energy still present half a second after the stop"
    );
}

#[test]
fn spectrogram_frame_count_matches_formula_for_varied_params() {
    let stim = noise_burst(0.7, 1.3, SR, 7);
    let n = stim.waveform.len();

    for (window_size, overlap) in [(1024, 768), (2048, 1920), (4096, 2048), (512, 0)] {
        let params = StftParams {
            window_size,
            overlap,
            ..StftParams::default()
        };
        let spec = compute_spectrogram(&stim.waveform, &params).unwrap();
        assert_eq!(
            spec.num_frames(),
            (n - overlap) / (window_size - overlap),
            "W={window_size} O={overlap}"
        );
    }
}
