//! # ccm-solve
//!
//! Stochastic derivation of constrained color-correction matrices.
//!
//! Given a sensor basis, a set of projected reflectance samples, and a
//! per-wavelength response ceiling, [`search`] draws random 3x3 candidates,
//! rescales each onto the feasible boundary, and keeps the one with the
//! highest brightness objective. [`validate`] then re-checks the returned
//! matrix independently.
//!
//! # The feasibility rescaling
//!
//! A candidate's spectral sensitivity is compared against the ceiling at
//! every wavelength. Dividing the candidate by its worst-case ratio moves
//! the tightest wavelength exactly onto the ceiling and every other one
//! under it, so each retained candidate is feasible by construction and the
//! score used for comparison equals the brightness the rescaled matrix
//! actually achieves.
//!
//! # Usage
//!
//! ```rust
//! use ccm_math::Vec3;
//! use ccm_spectral::{ResponseBound, SampleMatrix, SensorBasis, SpectralTable};
//! use ccm_solve::{search, SearchOutcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let basis = SensorBasis::from_table(
//!     SpectralTable::from_channels(
//!         400.0,
//!         600.0,
//!         vec![
//!             vec![1.0, 0.0, 0.0],
//!             vec![0.0, 1.0, 0.0],
//!             vec![0.0, 0.0, 1.0],
//!         ],
//!     )
//!     .unwrap(),
//! )
//! .unwrap();
//! let samples = SampleMatrix::from_rows(vec![Vec3::ONE]);
//! let bound = ResponseBound::from_values(vec![1.0, 1.0, 1.0]);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! match search(&basis, &samples, &bound, 1000, &mut rng).unwrap() {
//!     SearchOutcome::Found(solution) => assert!(solution.score > 0.0),
//!     SearchOutcome::Exhausted => unreachable!("identity basis always converges"),
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`ccm-math`] / [`ccm-spectral`] - matrix types and spectral inputs
//! - [`rand`] - caller-seeded candidate draws
//! - [`rayon`] - optional sharded search
//! - [`serde`] - report serialization

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod search;
mod validate;

pub use error::*;
pub use search::*;
pub use validate::*;
