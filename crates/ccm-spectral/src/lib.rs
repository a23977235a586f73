//! # ccm-spectral
//!
//! Spectral data pipeline for color-correction matrix derivation.
//!
//! This crate loads wavelength-indexed tables, brings them onto a common
//! uniform grid, and turns reflectance spectra into the per-sample
//! tristimulus rows consumed by the matrix search.
//!
//! # Types
//!
//! - [`SpectralTable`] - a wavelength-indexed table with load, resample,
//!   and normalize operations
//! - [`SensorBasis`] - a 3-channel table of reference response functions
//! - [`ReflectanceSet`] - measured reflectance spectra plus synthetic
//!   narrow-band additions
//! - [`SampleMatrix`] - reflectance projected through the basis
//! - [`ResponseBound`] - the per-wavelength response ceiling
//!
//! # Usage
//!
//! ```rust,ignore
//! use ccm_spectral::{ReflectanceSet, ResponseBound, SensorBasis, SpectralTable};
//!
//! let mut table = SpectralTable::from_csv_path("data/cie_xyz.csv")?;
//! table.resample(400.0, 700.0, 301)?.normalize()?;
//! let basis = SensorBasis::from_table(table)?;
//!
//! let bound = ResponseBound::linear_over(&basis.grid())?;
//! ```
//!
//! # Input format
//!
//! Comma-delimited text, one row per wavelength sample. The first field is
//! the wavelength (strictly increasing), the remaining fields are channel
//! values. No header row.
//!
//! # Dependencies
//!
//! - [`ccm-math`] - interpolation and tristimulus vectors
//! - [`thiserror`] - error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod basis;
mod bound;
mod error;
mod project;
mod reflectance;
mod table;

pub use basis::*;
pub use bound::*;
pub use error::*;
pub use project::*;
pub use reflectance::*;
pub use table::*;
