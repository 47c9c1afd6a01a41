//! FFT wrapper with windowing functions.

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Rectangular (no windowing).
    Rectangular,
    /// Hann window (raised cosine). The diagnostic's default.
    Hann,
    /// Hamming window.
    Hamming,
    /// Blackman window.
    Blackman,
}

impl Window {
    /// Apply the window to a buffer in place.
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
                    *sample *= w;
                }
            }
            Window::Hamming => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.54 - 0.46 * (2.0 * PI * i as f32 / n as f32).cos();
                    *sample *= w;
                }
            }
            Window::Blackman => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let x = 2.0 * PI * i as f32 / n as f32;
                    let w = 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos();
                    *sample *= w;
                }
            }
        }
    }

    /// Window coefficients for a given size.
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Forward FFT for real input, with the plan cached.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create an FFT processor for the given size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// FFT size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward FFT on real input.
    ///
    /// Returns the positive-frequency half of the spectrum
    /// (`size / 2 + 1` bins, DC through Nyquist). Input shorter than the
    /// FFT size is zero-padded; longer input is truncated.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_returns_positive_half() {
        let fft = Fft::new(1024);
        let spectrum = fft.forward(&vec![0.0; 1024]);
        assert_eq!(spectrum.len(), 513);
    }

    #[test]
    fn sine_peak_lands_in_expected_bin() {
        let size = 4096;
        let sample_rate = 44_100.0;
        let freq = 1000.0;
        let signal: Vec<f32> = (0..size)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect();

        let fft = Fft::new(size);
        let spectrum = fft.forward(&signal);

        let peak_bin = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().partial_cmp(&b.norm()).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let expected = (freq * size as f32 / sample_rate).round() as usize;
        assert!((peak_bin as i64 - expected as i64).abs() <= 1);
    }

    #[test]
    fn hann_window_is_zero_at_edges_and_unity_mid() {
        let coeffs = Window::Hann.coefficients(1024);
        assert!(coeffs[0].abs() < 1e-6);
        assert!((coeffs[512] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rectangular_window_is_identity() {
        let coeffs = Window::Rectangular.coefficients(64);
        assert!(coeffs.iter().all(|&c| c == 1.0));
    }
}
