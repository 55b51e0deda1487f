pub mod grid;
pub mod plot;
pub mod sweep;
pub mod version;

use std::path::PathBuf;

use unnu_core::{BenchError, SweepConfig};

/// Loads the sweep configuration, falling back to the compiled-in defaults.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<SweepConfig, BenchError> {
    match path {
        Some(path) => SweepConfig::load(path),
        None => {
            let config = SweepConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}
