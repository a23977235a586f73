//! # ccm-math
//!
//! Math primitives for spectral color-correction work.
//!
//! This crate provides the double-precision building blocks used by the
//! spectral pipeline and the matrix search:
//!
//! - [`Mat3`] - 3x3 matrices for color transforms
//! - [`Vec3`] - 3-component vectors for tristimulus/RGB triplets
//! - Interpolation utilities ([`lerp`], [`sample_linear`], [`linspace`])
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! A row-vector product (`vector * matrix`) is also provided, which is the
//! natural orientation when projecting per-sample tristimulus rows through a
//! candidate transform.
//!
//! Everything here is `f64`. Candidate scoring accumulates sums over
//! thousands of samples and wavelengths, and retained results are compared
//! across runs at tight tolerances, so single precision is not enough.
//!
//! # Usage
//!
//! ```rust
//! use ccm_math::{Mat3, Vec3};
//!
//! let m = Mat3::IDENTITY;
//! let v = Vec3::new(0.2, 0.5, 0.3);
//! assert_eq!(m * v, v);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop with `DMat3`/`DVec3`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod mat3;
mod vec3;

pub use interp::*;
pub use mat3::*;
pub use vec3::*;
