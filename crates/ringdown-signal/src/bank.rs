//! The standard stimulus set the diagnostic sweeps by default.

use crate::generators::{
    chord_burst, drum_hit, harmonic_decay, impulse, impulse_train, noise_burst, pad_swell, pluck,
    sustained_then_stop, sweep, tone_burst, vocal_formant,
};
use ringdown_core::Stimulus;

/// Build the named stimulus set used for a full diagnostic run.
///
/// Covers the scenarios that historically provoked the resonance bug:
/// broadband excitation, single transients, a drum hit, steady tones
/// (pure and harmonic-rich), a chord, a log sweep, decaying struck and
/// plucked tones, a vocal-like signal, and a slow pad. Every entry
/// leaves at least two seconds of silence for decay observation.
///
/// The returned order is stable; ids double as artifact filename stems.
pub fn standard_bank(sample_rate: f32, seed: u64) -> Vec<(String, Stimulus)> {
    let sr = sample_rate;
    vec![
        ("noise_burst".into(), noise_burst(1.0, 2.0, sr, seed)),
        ("impulse".into(), impulse(2.0, sr)),
        ("tone_440".into(), tone_burst(440.0, 1.0, 2.0, sr)),
        ("tone_1k".into(), tone_burst(1000.0, 1.0, 2.0, sr)),
        (
            "chord_c_major".into(),
            chord_burst(&[261.63, 329.63, 392.0], 1.0, 2.0, sr),
        ),
        ("impulse_train".into(), impulse_train(5, 0.2, 2.0, sr)),
        ("drum_hit".into(), drum_hit(2.5, sr, seed.wrapping_add(2))),
        ("sweep_log".into(), sweep(100.0, 2000.0, 1.0, 2.0, sr)),
        ("struck_440".into(), harmonic_decay(440.0, 1.0, 2.0, sr, 3.0)),
        ("struck_c4".into(), harmonic_decay(261.63, 1.0, 2.0, sr, 3.0)),
        ("pluck_330".into(), pluck(330.0, 0.8, 2.0, sr, seed.wrapping_add(3))),
        (
            "sustained_440".into(),
            sustained_then_stop(440.0, 3.0, 2.0, sr),
        ),
        ("vocal_300".into(), vocal_formant(300.0, 1.5, 2.0, sr)),
        ("pad_swell".into(), pad_swell(2.0, 2.0, sr, seed.wrapping_add(1))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_ids_are_unique_and_stable() {
        let bank = standard_bank(44_100.0, 0);
        let ids: Vec<&str> = bank.iter().map(|(id, _)| id.as_str()).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert_eq!(ids[0], "noise_burst");
        assert_eq!(ids.len(), 14);
        assert!(ids.contains(&"drum_hit"));
        assert!(ids.contains(&"pluck_330"));
    }

    #[test]
    fn every_entry_has_a_decay_window() {
        for (id, stim) in standard_bank(44_100.0, 0) {
            let tail = stim.waveform.duration_secs() - stim.silence_boundary.secs();
            assert!(tail >= 1.9, "{id} leaves only {tail}s of silence");
        }
    }
}
