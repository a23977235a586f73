//! Post-hoc validation of a derived transform.

use crate::{RANK_EPSILON, SolveError, SolveResult};
use ccm_math::{Mat3, Vec3};
use ccm_spectral::{ResponseBound, SensorBasis};
use serde::Serialize;

/// Default relative tolerance for the white-balance neutrality check.
pub const DEFAULT_NEUTRALITY_TOLERANCE: f64 = 1e-6;

// Slack for the response-bound comparison. The rescaled matrix sits exactly
// on the ceiling at its tightest wavelength, so the recomputed product may
// land a few ulps past it.
const BOUND_SLACK: f64 = 1e-9;

/// Independent constraint checks on a candidate matrix.
///
/// All three booleans are always computed; a failed check never suppresses
/// the others. The determinant and the recomputed white RGB triple ride
/// along for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Rank 3: the matrix defines an invertible transform.
    pub invertible: bool,
    /// No channel response exceeds the ceiling at any wavelength.
    pub within_bound: bool,
    /// A fully reflective sample produces approximately equal R, G, B.
    pub neutral: bool,
    /// Determinant of the checked matrix.
    pub determinant: f64,
    /// The white-sample RGB triple behind the neutrality verdict.
    pub white_rgb: [f64; 3],
}

impl ValidationReport {
    /// True when every check passed.
    pub fn all_passed(&self) -> bool {
        self.invertible && self.within_bound && self.neutral
    }
}

/// The per-wavelength sensitivity of the basis pushed through a transform.
///
/// Row `i` is the three output-channel responses at grid wavelength `i`.
pub fn spectral_sensitivity(basis: &SensorBasis, ccm: &Mat3) -> Vec<Vec3> {
    basis.rows().map(|row| row * *ccm).collect()
}

/// Checks a candidate matrix against the constraints it was derived under.
///
/// - **invertible**: determinant magnitude above the rank epsilon;
/// - **within_bound**: the recomputed sensitivity stays at or under the
///   ceiling in every channel at every wavelength (all three channels are
///   compared, not their maximum);
/// - **neutral**: the basis column sums pushed through the matrix give
///   three scalars equal within `rel_tolerance`.
///
/// # Errors
///
/// [`SolveError::BoundLength`] if the bound does not cover the basis grid.
pub fn validate(
    basis: &SensorBasis,
    bound: &ResponseBound,
    ccm: &Mat3,
    rel_tolerance: f64,
) -> SolveResult<ValidationReport> {
    if bound.len() != basis.len() {
        return Err(SolveError::BoundLength {
            expected: basis.len(),
            got: bound.len(),
        });
    }

    let determinant = ccm.determinant();
    let invertible = determinant.abs() > RANK_EPSILON;

    let mut within_bound = true;
    for (ssf, &limit) in spectral_sensitivity(basis, ccm)
        .iter()
        .zip(bound.values())
    {
        let slack = BOUND_SLACK * limit.abs().max(1.0);
        if ssf.max_element() > limit + slack {
            within_bound = false;
            break;
        }
    }

    let white = basis.column_sums() * *ccm;
    let neutral = relative_eq(white.x, white.y, rel_tolerance)
        && relative_eq(white.y, white.z, rel_tolerance);

    Ok(ValidationReport {
        invertible,
        within_bound,
        neutral,
        determinant,
        white_rgb: white.to_array(),
    })
}

fn relative_eq(a: f64, b: f64, rel: f64) -> bool {
    let diff = (a - b).abs();
    diff <= 1e-12 || diff <= rel * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_spectral::SpectralTable;

    fn identity_basis() -> SensorBasis {
        SensorBasis::from_table(
            SpectralTable::from_channels(
                400.0,
                600.0,
                vec![
                    vec![1.0, 0.0, 0.0],
                    vec![0.0, 1.0, 0.0],
                    vec![0.0, 0.0, 1.0],
                ],
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn unit_bound() -> ResponseBound {
        ResponseBound::from_values(vec![1.0, 1.0, 1.0])
    }

    #[test]
    fn test_identity_passes_everything() {
        let report = validate(
            &identity_basis(),
            &unit_bound(),
            &Mat3::IDENTITY,
            DEFAULT_NEUTRALITY_TOLERANCE,
        )
        .unwrap();
        assert!(report.invertible);
        assert!(report.within_bound);
        assert!(report.neutral);
        assert!(report.all_passed());
        assert_eq!(report.determinant, 1.0);
        assert_eq!(report.white_rgb, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scaled_up_fails_bound_only() {
        let scaled = Mat3::IDENTITY * 1.1;
        let report = validate(
            &identity_basis(),
            &unit_bound(),
            &scaled,
            DEFAULT_NEUTRALITY_TOLERANCE,
        )
        .unwrap();
        assert!(report.invertible);
        assert!(!report.within_bound);
        // Uniform scaling keeps the channels balanced
        assert!(report.neutral);
    }

    #[test]
    fn test_singular_fails_invertibility() {
        let singular = Mat3::from_rows([
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 0.5],
        ]);
        let report = validate(
            &identity_basis(),
            &unit_bound(),
            &singular,
            DEFAULT_NEUTRALITY_TOLERANCE,
        )
        .unwrap();
        assert!(!report.invertible);
        // The other checks still ran
        assert!(report.within_bound);
    }

    #[test]
    fn test_imbalanced_channels_fail_neutrality() {
        let tinted = Mat3::from_rows([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.5],
        ]);
        let report = validate(
            &identity_basis(),
            &unit_bound(),
            &tinted,
            DEFAULT_NEUTRALITY_TOLERANCE,
        )
        .unwrap();
        assert!(report.invertible);
        assert!(!report.neutral);
        assert_eq!(report.white_rgb, [1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_bound_checks_all_channels() {
        // Max channel stays under the ceiling except in the second output
        // channel at the last wavelength.
        let m = Mat3::from_rows([
            [0.5, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, 1.2, 0.0],
        ]);
        let report = validate(
            &identity_basis(),
            &unit_bound(),
            &m,
            DEFAULT_NEUTRALITY_TOLERANCE,
        )
        .unwrap();
        assert!(!report.within_bound);
    }

    #[test]
    fn test_spectral_sensitivity_rows() {
        let ssf = spectral_sensitivity(&identity_basis(), &Mat3::IDENTITY);
        assert_eq!(ssf.len(), 3);
        assert_eq!(ssf[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ssf[2], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_bound_length_mismatch() {
        let bound = ResponseBound::from_values(vec![1.0]);
        assert!(matches!(
            validate(&identity_basis(), &bound, &Mat3::IDENTITY, 1e-6),
            Err(SolveError::BoundLength {
                expected: 3,
                got: 1
            })
        ));
    }
}
