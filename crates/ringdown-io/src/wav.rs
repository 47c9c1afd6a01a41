//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use ringdown_core::Waveform;
use std::path::Path;

/// Write a waveform as a mono 32-bit float WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, waveform: &Waveform) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate() as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(&path, spec)?;
    for &sample in waveform.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::debug!(path = %path.as_ref().display(), samples = waveform.len(), "wrote artifact");
    Ok(())
}

/// Read a WAV file into a waveform.
///
/// Integer formats are normalized to `[-1, 1]`; multi-channel files are
/// mixed down to mono by averaging, since the diagnostic analyzes a
/// single channel.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Waveform> {
    let reader = WavReader::open(&path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let shift = (spec.bits_per_sample.saturating_sub(1)).min(31);
            let max = (1i64 << shift) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mono: Vec<f32> = if channels <= 1 {
        samples
    } else {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(Waveform::new(mono, spec.sample_rate as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_wav_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.wav");

        let original = Waveform::new(vec![0.0, 0.5, -0.5, 0.25, -1.0, 1.0], 44_100.0);
        write_wav(&path, &original).unwrap();
        let loaded = read_wav(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_wav(dir.path().join("nope.wav")).is_err());
    }
}
