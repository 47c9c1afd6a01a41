//! Ringdown IO - WAV persistence for diagnostic artifacts.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for the dry and
//!   processed audio artifacts of a sweep
//! - **Deterministic naming**: [`dry_artifact_name`] and
//!   [`processed_artifact_name`], so a run's outputs can be located (or
//!   pre-rendered by hand) without consulting the report

mod wav;

pub use wav::{read_wav, write_wav};

/// Error types for artifact I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for artifact I/O.
pub type Result<T> = std::result::Result<T, Error>;

/// Filename for a signal's unprocessed (dry) artifact.
pub fn dry_artifact_name(signal_id: &str) -> String {
    format!("dry_{signal_id}.wav")
}

/// Filename for a signal's processed artifact under one configuration,
/// identified by the configuration's label.
pub fn processed_artifact_name(signal_id: &str, config_label: &str) -> String {
    format!("processed_{signal_id}_{config_label}.wav")
}
