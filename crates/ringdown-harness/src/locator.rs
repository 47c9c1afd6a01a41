//! Device discovery.
//!
//! The render tool's location differs per machine, so discovery is an
//! injected capability rather than a hardcoded path: alternate
//! environments supply their own locator without touching the analysis
//! core. A locator that finds nothing is an expected condition; the run
//! degrades to dry-signal-only analysis.

use std::path::PathBuf;

/// Resolves the device under test to a runnable path.
pub trait DeviceLocator {
    /// The device's path, or `None` if it is not present on this machine.
    fn locate(&self) -> Option<PathBuf>;
}

/// Locator for a known path; mostly useful for tests and CLI overrides.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl DeviceLocator for FixedLocator {
    fn locate(&self) -> Option<PathBuf> {
        self.0.exists().then(|| self.0.clone())
    }
}

/// Checks an environment variable first, then a list of fallback paths.
#[derive(Debug, Clone)]
pub struct EnvPathLocator {
    env_var: &'static str,
    fallbacks: Vec<PathBuf>,
}

impl EnvPathLocator {
    /// Locator reading `env_var` before trying `fallbacks` in order.
    pub fn new(env_var: &'static str, fallbacks: Vec<PathBuf>) -> Self {
        Self { env_var, fallbacks }
    }

    /// The diagnostic's default: `RINGDOWN_DEVICE`, then the conventional
    /// install location.
    pub fn default_device() -> Self {
        Self::new(
            "RINGDOWN_DEVICE",
            vec![PathBuf::from("/usr/local/lib/ringdown/render-device")],
        )
    }
}

impl DeviceLocator for EnvPathLocator {
    fn locate(&self) -> Option<PathBuf> {
        if let Ok(from_env) = std::env::var(self.env_var) {
            let path = PathBuf::from(from_env);
            if path.exists() {
                return Some(path);
            }
            tracing::warn!(var = self.env_var, path = %path.display(), "device path from environment does not exist");
        }
        self.fallbacks.iter().map(|p| p.to_path_buf()).find(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_locator_requires_existence() {
        assert!(FixedLocator(PathBuf::from("/definitely/not/here")).locate().is_none());
        assert!(FixedLocator(std::env::temp_dir()).locate().is_some());
    }

    #[test]
    fn env_locator_falls_back_to_paths() {
        let loc = EnvPathLocator::new("RINGDOWN_TEST_UNSET_VAR", vec![std::env::temp_dir()]);
        assert_eq!(loc.locate(), Some(std::env::temp_dir()));
    }

    #[test]
    fn env_locator_with_nothing_found_is_none() {
        let loc = EnvPathLocator::new(
            "RINGDOWN_TEST_UNSET_VAR",
            vec![PathBuf::from("/definitely/not/here")],
        );
        assert!(loc.locate().is_none());
    }
}
