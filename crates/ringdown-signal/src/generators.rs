//! Stimulus generators.
//!
//! Each generator builds an excitation, appends a silent tail, and records
//! the boundary between the two. Durations are converted to sample counts
//! by rounding, so the total length is always within one sample of
//! `round((duration + silence) * sample_rate)`.

use std::f32::consts::PI;

use crate::rng::XorShift32;
use ringdown_core::{Stimulus, Waveform};

/// Length of the fade applied to noise and sweep edges, in seconds.
const EDGE_FADE_SECS: f32 = 0.1;

/// Length of the fade applied to tonal bursts, in seconds.
const TONE_FADE_SECS: f32 = 0.05;

fn samples_for(duration: f32, sample_rate: f32) -> usize {
    (duration * sample_rate).round() as usize
}

/// Linear fade-in over the first `fade` samples.
fn fade_in(samples: &mut [f32], fade: usize) {
    let fade = fade.min(samples.len());
    for (i, s) in samples.iter_mut().take(fade).enumerate() {
        *s *= i as f32 / fade as f32;
    }
}

/// Linear fade-out over the last `fade` samples.
fn fade_out(samples: &mut [f32], fade: usize) {
    let len = samples.len();
    let fade = fade.min(len);
    for (i, s) in samples[len - fade..].iter_mut().enumerate() {
        *s *= 1.0 - i as f32 / fade as f32;
    }
}

/// Scale so the peak absolute value equals `target`. Silence is left alone.
fn normalize_peak(samples: &mut [f32], target: f32) {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    if peak > 0.0 {
        let gain = target / peak;
        for s in samples.iter_mut() {
            *s *= gain;
        }
    }
}

/// Append a zero tail and wrap up as a [`Stimulus`].
fn with_silence_tail(
    mut excitation: Vec<f32>,
    boundary_secs: f32,
    silence: f32,
    sample_rate: f32,
) -> Stimulus {
    excitation.resize(excitation.len() + samples_for(silence, sample_rate), 0.0);
    Stimulus::new(Waveform::new(excitation, sample_rate), boundary_secs)
}

/// White noise burst: seeded noise with 100 ms linear fades, normalized to
/// a 0.8 peak, followed by silence.
///
/// The broadband content excites every bin of the device at once, which
/// makes it the primary stimulus for finding resonances anywhere in the
/// spectrum.
pub fn noise_burst(duration: f32, silence: f32, sample_rate: f32, seed: u64) -> Stimulus {
    let mut rng = XorShift32::new(seed);
    let n = samples_for(duration, sample_rate);
    let mut noise: Vec<f32> = (0..n).map(|_| rng.next_bipolar()).collect();

    let fade = samples_for(EDGE_FADE_SECS, sample_rate);
    fade_in(&mut noise, fade);
    fade_out(&mut noise, fade);
    normalize_peak(&mut noise, 0.8);

    with_silence_tail(noise, duration, silence, sample_rate)
}

/// Two-sample transient (1.0, -0.5) in a 10 ms slot, followed by silence.
pub fn impulse(silence: f32, sample_rate: f32) -> Stimulus {
    let slot = 0.01;
    let mut click = vec![0.0f32; samples_for(slot, sample_rate)];
    if let [first, second, ..] = click.as_mut_slice() {
        *first = 1.0;
        *second = -0.5;
    }
    with_silence_tail(click, slot, silence, sample_rate)
}

/// Sine burst at `freq` with short fades, followed by silence.
pub fn tone_burst(freq: f32, duration: f32, silence: f32, sample_rate: f32) -> Stimulus {
    let n = samples_for(duration, sample_rate);
    let mut tone: Vec<f32> = (0..n)
        .map(|i| 0.8 * (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect();

    let fade = samples_for(TONE_FADE_SECS, sample_rate);
    fade_in(&mut tone, fade);
    fade_out(&mut tone, fade);

    with_silence_tail(tone, duration, silence, sample_rate)
}

/// Chord burst: the mean of a [`tone_burst`] at each frequency.
pub fn chord_burst(freqs: &[f32], duration: f32, silence: f32, sample_rate: f32) -> Stimulus {
    let total = samples_for(duration, sample_rate) + samples_for(silence, sample_rate);
    let mut mix = vec![0.0f32; total];
    for &freq in freqs {
        let voice = tone_burst(freq, duration, silence, sample_rate);
        for (acc, &s) in mix.iter_mut().zip(voice.waveform.samples()) {
            *acc += s / freqs.len() as f32;
        }
    }
    Stimulus::new(Waveform::new(mix, sample_rate), duration)
}

/// Train of `count` short sine clicks spaced `interval` seconds apart,
/// followed by silence. The boundary sits after the last click's slot.
pub fn impulse_train(count: usize, interval: f32, silence: f32, sample_rate: f32) -> Stimulus {
    let excitation_secs = count as f32 * interval;
    let mut train = vec![0.0f32; samples_for(excitation_secs, sample_rate)];

    // 100-sample click: five cycles of a sine, so the click has bandwidth
    // without a hard discontinuity at its end.
    let click_len = 100;
    for k in 0..count {
        let start = samples_for(k as f32 * interval, sample_rate);
        for i in 0..click_len {
            if let Some(s) = train.get_mut(start + i) {
                *s = 0.8 * (10.0 * PI * i as f32 / click_len as f32).sin();
            }
        }
    }

    with_silence_tail(train, excitation_secs, silence, sample_rate)
}

/// Logarithmic frequency sweep from `start_freq` to `end_freq` with a
/// 100 ms fade-out, followed by silence.
///
/// Equal start and end frequencies degenerate to a constant-frequency
/// tone rather than dividing by a zero sweep rate.
pub fn sweep(
    start_freq: f32,
    end_freq: f32,
    duration: f32,
    silence: f32,
    sample_rate: f32,
) -> Stimulus {
    let n = samples_for(duration, sample_rate);
    let k = (end_freq / start_freq).ln();
    let mut chirp: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let phase = if k.abs() < f32::EPSILON {
                2.0 * PI * start_freq * t
            } else {
                2.0 * PI * start_freq * duration / k * ((k * t / duration).exp() - 1.0)
            };
            0.8 * phase.sin()
        })
        .collect();

    fade_out(&mut chirp, samples_for(EDGE_FADE_SECS, sample_rate));

    with_silence_tail(chirp, duration, silence, sample_rate)
}

/// Struck-source approximation: six harmonics with halving amplitudes
/// under an exponential decay envelope, followed by silence.
pub fn harmonic_decay(
    freq: f32,
    duration: f32,
    silence: f32,
    sample_rate: f32,
    decay_rate: f32,
) -> Stimulus {
    const HARMONIC_AMPS: [f32; 6] = [1.0, 0.5, 0.25, 0.125, 0.0625, 0.03];

    let n = samples_for(duration, sample_rate);
    let tone: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let mut sum = 0.0;
            for (h, &amp) in HARMONIC_AMPS.iter().enumerate() {
                sum += amp * (2.0 * PI * freq * (h + 1) as f32 * t).sin();
            }
            0.6 * sum * (-decay_rate * t).exp()
        })
        .collect();

    with_silence_tail(tone, duration, silence, sample_rate)
}

/// Drum-like transient: a 60 Hz thump under a fast exponential decay plus
/// a 10 ms noise click, normalized to 0.8, followed by silence.
///
/// Percussive material exercises the device's transient handling at the
/// bottom of the spectrum, where smear settings linger longest.
pub fn drum_hit(silence: f32, sample_rate: f32, seed: u64) -> Stimulus {
    const DURATION: f32 = 0.3;

    let mut rng = XorShift32::new(seed);
    let n = samples_for(DURATION, sample_rate);
    let mut drum: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (2.0 * PI * 60.0 * t).sin() * (-20.0 * t).exp()
        })
        .collect();

    let click_len = samples_for(0.01, sample_rate).min(n);
    for (i, s) in drum.iter_mut().take(click_len).enumerate() {
        let t = i as f32 / sample_rate;
        *s += 0.5 * rng.next_bipolar() * (-50.0 * t).exp();
    }
    normalize_peak(&mut drum, 0.8);

    with_silence_tail(drum, DURATION, silence, sample_rate)
}

/// Plucked-string stimulus: fourteen harmonics whose decay rate grows
/// with harmonic number, plus a 5 ms noise transient for the initial
/// brightness, normalized to 0.7, followed by silence.
pub fn pluck(freq: f32, duration: f32, silence: f32, sample_rate: f32, seed: u64) -> Stimulus {
    let mut rng = XorShift32::new(seed);
    let n = samples_for(duration, sample_rate);
    let mut string: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (1..15)
                .map(|h| {
                    let decay_rate = 5.0 + 2.0 * h as f32;
                    (2.0 * PI * freq * h as f32 * t).sin() / h as f32 * (-decay_rate * t).exp()
                })
                .sum()
        })
        .collect();

    let transient = samples_for(0.005, sample_rate).min(n);
    for s in string.iter_mut().take(transient) {
        *s += 0.3 * rng.next_bipolar();
    }
    normalize_peak(&mut string, 0.7);

    with_silence_tail(string, duration, silence, sample_rate)
}

/// Constant-amplitude harmonic tone that stops abruptly (10 ms terminal
/// fade to avoid a click), followed by silence.
///
/// The abrupt stop is the hardest case for a frequency-domain effect's
/// decay logic: any internal state still holding energy shows up
/// immediately after the boundary.
pub fn sustained_then_stop(freq: f32, duration: f32, silence: f32, sample_rate: f32) -> Stimulus {
    let n = samples_for(duration, sample_rate);
    let mut tone: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (1..8).map(|h| (2.0 * PI * freq * h as f32 * t).sin() / h as f32).sum()
        })
        .collect();

    fade_out(&mut tone, samples_for(0.01, sample_rate));
    normalize_peak(&mut tone, 0.7);

    with_silence_tail(tone, duration, silence, sample_rate)
}

/// Vocal-like stimulus: fundamental plus decaying formants (700, 1200,
/// 2500 Hz) with a slow vibrato and a 300 ms release.
pub fn vocal_formant(freq: f32, duration: f32, silence: f32, sample_rate: f32) -> Stimulus {
    const FORMANTS: [f32; 3] = [700.0, 1200.0, 2500.0];

    let n = samples_for(duration, sample_rate);
    let mut voice: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let mut sum = (2.0 * PI * freq * t).sin();
            for &formant in &FORMANTS {
                sum += 0.3 * (2.0 * PI * formant * t).sin() * (-0.5 * t).exp();
            }
            // 5 Hz vibrato, +/-2% amplitude.
            sum * (1.0 + 0.02 * (2.0 * PI * 5.0 * t).sin())
        })
        .collect();

    fade_out(&mut voice, samples_for(0.3, sample_rate));
    normalize_peak(&mut voice, 0.7);

    with_silence_tail(voice, duration, silence, sample_rate)
}

/// Pad swell: five detuned oscillators with seeded random phases and slow
/// 500 ms attack/release ramps.
pub fn pad_swell(duration: f32, silence: f32, sample_rate: f32, seed: u64) -> Stimulus {
    const PAD_FREQS: [f32; 5] = [220.0, 220.5, 221.0, 329.6, 440.0];

    let mut rng = XorShift32::new(seed);
    let phases: Vec<f32> = PAD_FREQS.iter().map(|_| rng.next_unit() * 2.0 * PI).collect();

    let n = samples_for(duration, sample_rate);
    let mut pad: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate;
            PAD_FREQS
                .iter()
                .zip(&phases)
                .map(|(&f, &p)| (2.0 * PI * f * t + p).sin())
                .sum()
        })
        .collect();

    let ramp = samples_for(0.5, sample_rate);
    fade_in(&mut pad, ramp);
    fade_out(&mut pad, ramp);
    normalize_peak(&mut pad, 0.7);

    with_silence_tail(pad, duration, silence, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44_100.0;

    #[test]
    fn noise_burst_is_seed_deterministic() {
        let a = noise_burst(0.5, 0.5, SR, 99);
        let b = noise_burst(0.5, 0.5, SR, 99);
        assert_eq!(a.waveform.samples(), b.waveform.samples());

        let c = noise_burst(0.5, 0.5, SR, 100);
        assert_ne!(a.waveform.samples(), c.waveform.samples());
    }

    #[test]
    fn noise_burst_peak_is_normalized() {
        let stim = noise_burst(1.0, 1.0, SR, 1);
        assert!((stim.waveform.peak() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn silence_tail_is_exactly_zero() {
        let stim = noise_burst(1.0, 2.0, SR, 3);
        let boundary_idx = (stim.silence_boundary.secs() * SR) as usize;
        assert!(stim.waveform.samples()[boundary_idx..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn impulse_has_the_documented_transient() {
        let stim = impulse(2.0, SR);
        let s = stim.waveform.samples();
        assert_eq!(s[0], 1.0);
        assert_eq!(s[1], -0.5);
        assert!(s[2..].iter().all(|&v| v == 0.0));
        assert!((stim.silence_boundary.secs() - 0.01).abs() < f32::EPSILON);
    }

    #[test]
    fn fade_envelope_rises_then_falls_monotonically() {
        // On a constant buffer the fades expose the raw envelope: a
        // strictly rising ramp, a flat middle, a strictly falling ramp.
        let mut buf = vec![1.0f32; 1000];
        fade_in(&mut buf, 300);
        fade_out(&mut buf, 300);

        assert!(buf[..300].windows(2).all(|p| p[1] > p[0]), "fade-in not increasing");
        assert!(buf[300..700].iter().all(|&v| v == 1.0));
        assert!(buf[700..].windows(2).all(|p| p[1] < p[0]), "fade-out not decreasing");
    }

    #[test]
    fn tone_burst_fade_is_monotone() {
        let stim = tone_burst(440.0, 1.0, 0.5, SR);
        let fade = (TONE_FADE_SECS * SR) as usize;
        let n = (1.0 * SR) as usize;
        let s = stim.waveform.samples();

        // The envelope ramps linearly, so peaks within successive cycles
        // of the fade-in must not shrink, and peaks within the fade-out
        // must not grow. Compare per-cycle maxima.
        let cycle = (SR / 440.0).ceil() as usize;
        let per_cycle_peaks = |region: &[f32]| -> Vec<f32> {
            region
                .chunks(cycle)
                .map(|c| c.iter().fold(0.0f32, |m, &v| m.max(v.abs())))
                .collect()
        };

        for pair in per_cycle_peaks(&s[..fade]).windows(2) {
            assert!(pair[1] >= pair[0] - 1e-4, "fade-in not monotone: {pair:?}");
        }
        for pair in per_cycle_peaks(&s[n - fade..n]).windows(2) {
            assert!(pair[1] <= pair[0] + 1e-4, "fade-out not monotone: {pair:?}");
        }
    }

    #[test]
    fn flat_sweep_stays_finite() {
        // Equal endpoints would make the log sweep rate zero; the
        // generator must fall back to a plain tone, not emit NaN.
        let stim = sweep(440.0, 440.0, 0.5, 0.5, SR);
        let s = stim.waveform.samples();
        assert!(s.iter().all(|v| v.is_finite()));
        assert!(stim.waveform.peak() > 0.5, "degenerate sweep is silent");
    }

    #[test]
    fn drum_hit_thump_decays_within_its_slot() {
        let stim = drum_hit(2.0, SR, 11);
        let s = stim.waveform.samples();
        let early: f32 = s[..2205].iter().map(|v| v.abs()).fold(0.0, f32::max);
        let late: f32 = s[8820..13_230].iter().map(|v| v.abs()).fold(0.0, f32::max);
        assert!((stim.waveform.peak() - 0.8).abs() < 1e-5);
        assert!(late < early * 0.1, "late peak {late} vs early {early}");
        assert!((stim.silence_boundary.secs() - 0.3).abs() < 1e-6);

        let b = drum_hit(2.0, SR, 11);
        assert_eq!(stim.waveform.samples(), b.waveform.samples());
    }

    #[test]
    fn pluck_upper_harmonics_die_first() {
        let stim = pluck(330.0, 0.8, 2.0, SR, 11);
        let s = stim.waveform.samples();
        let early: f32 = s[..2205].iter().map(|v| v.abs()).fold(0.0, f32::max);
        let late: f32 = s[26_460..30_870].iter().map(|v| v.abs()).fold(0.0, f32::max);
        assert!(late < early * 0.1, "late peak {late} vs early {early}");

        // The noise transient only brightens the first 5 ms.
        let transient_end = (0.005 * SR) as usize;
        assert!(s[..transient_end].iter().any(|&v| v != 0.0));

        let b = pluck(330.0, 0.8, 2.0, SR, 11);
        assert_eq!(stim.waveform.samples(), b.waveform.samples());
    }

    #[test]
    fn chord_burst_matches_single_tone_length() {
        let chord = chord_burst(&[261.63, 329.63, 392.0], 1.0, 2.0, SR);
        let tone = tone_burst(261.63, 1.0, 2.0, SR);
        assert_eq!(chord.waveform.len(), tone.waveform.len());
    }

    #[test]
    fn impulse_train_places_count_clicks() {
        let stim = impulse_train(5, 0.2, 2.0, SR);
        let s = stim.waveform.samples();
        // Each click slot has nonzero energy; midpoints between clicks are silent.
        for k in 0..5 {
            let start = (k as f32 * 0.2 * SR) as usize;
            assert!(s[start..start + 100].iter().any(|&v| v != 0.0), "click {k} missing");
            let mid = start + (0.1 * SR) as usize;
            assert_eq!(s[mid], 0.0);
        }
        assert!((stim.silence_boundary.secs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sweep_ends_silent() {
        let stim = sweep(100.0, 2000.0, 1.0, 1.0, SR);
        let s = stim.waveform.samples();
        let boundary_idx = (1.0 * SR) as usize;
        // Faded out right at the boundary.
        assert!(s[boundary_idx - 1].abs() < 1e-3);
        assert!(s[boundary_idx..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn harmonic_decay_envelope_shrinks() {
        let stim = harmonic_decay(440.0, 1.0, 1.0, SR, 3.0);
        let s = stim.waveform.samples();
        let early: f32 = s[..4410].iter().map(|v| v.abs()).fold(0.0, f32::max);
        let late: f32 = s[39_690..44_100].iter().map(|v| v.abs()).fold(0.0, f32::max);
        assert!(late < early * 0.2, "late peak {late} vs early {early}");
    }

    #[test]
    fn sustained_then_stop_holds_level_until_fade() {
        let stim = sustained_then_stop(440.0, 1.0, 1.0, SR);
        let s = stim.waveform.samples();
        let mid: f32 = s[20_000..24_000].iter().map(|v| v.abs()).fold(0.0, f32::max);
        assert!(mid > 0.5);
        // Tail after boundary is dead silent.
        assert!(s[44_100..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn pad_swell_is_seed_deterministic() {
        let a = pad_swell(1.0, 1.0, SR, 5);
        let b = pad_swell(1.0, 1.0, SR, 5);
        assert_eq!(a.waveform.samples(), b.waveform.samples());
    }
}
