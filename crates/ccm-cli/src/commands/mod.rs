//! CLI command implementations

pub mod info;
pub mod solve;

use anyhow::{Context, Result};
use ccm_spectral::SpectralTable;
use std::path::Path;

/// Load a spectral table from path
pub fn load_table(path: &Path) -> Result<SpectralTable> {
    SpectralTable::from_csv_path(path)
        .with_context(|| format!("Failed to load: {}", path.display()))
}
