//! Projection of reflectance samples through the sensor basis.

use crate::{ReflectanceSet, SensorBasis, SpectralError, SpectralResult};
use ccm_math::Vec3;

/// Per-sample tristimulus coordinates.
///
/// Row `i` is reflectance channel `i` projected through the basis: the
/// wavelength-wise product of the sample's reflectance with each basis
/// channel, summed over the grid. This is the evaluation set the search
/// scores candidate transforms against.
#[derive(Debug, Clone)]
pub struct SampleMatrix {
    rows: Vec<Vec3>,
}

impl SampleMatrix {
    /// Builds a sample matrix from precomputed tristimulus rows.
    pub fn from_rows(rows: Vec<Vec3>) -> Self {
        Self { rows }
    }

    /// The tristimulus rows.
    #[inline]
    pub fn rows(&self) -> &[Vec3] {
        &self.rows
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ReflectanceSet {
    /// Projects every sample through the basis.
    ///
    /// The set and the basis must share a wavelength grid; the check is on
    /// sample count, spacing is the caller's responsibility (both sides are
    /// normally resampled onto the same target grid first).
    pub fn project_onto(&self, basis: &SensorBasis) -> SpectralResult<SampleMatrix> {
        if self.table().count() != basis.len() {
            return Err(SpectralError::GridMismatch {
                expected: basis.len(),
                got: self.table().count(),
            });
        }

        let mut rows = Vec::with_capacity(self.num_samples());
        for channel in self.table().channels() {
            let mut acc = Vec3::ZERO;
            for (i, &reflectance) in channel.iter().enumerate() {
                acc = acc + basis.row(i) * reflectance;
            }
            rows.push(acc);
        }
        Ok(SampleMatrix::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpectralTable;
    use approx::assert_relative_eq;

    fn basis() -> SensorBasis {
        // Identity-like basis on a 3-point grid
        SensorBasis::from_table(
            SpectralTable::from_channels(
                400.0,
                420.0,
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

    #[test]
    fn test_projection_hand_computed() {
        let table = SpectralTable::from_channels(
            400.0,
            420.0,
            vec![vec![1.0, 1.0, 1.0], vec![0.5, 0.0, 0.25]],
        )
        .unwrap();
        let set = ReflectanceSet::new(table);
        let samples = set.project_onto(&basis()).unwrap();

        assert_eq!(samples.len(), 2);
        // Flat reflector sees the basis column sums
        assert_eq!(samples.rows()[0], Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(samples.rows()[1], Vec3::new(0.5, 0.0, 0.25));
    }

    #[test]
    fn test_projection_weights_by_basis() {
        let b = SensorBasis::from_table(
            SpectralTable::from_channels(
                400.0,
                410.0,
                vec![vec![2.0, 1.0], vec![0.0, 3.0], vec![1.0, 1.0]],
            )
            .unwrap(),
        )
        .unwrap();
        let set = ReflectanceSet::new(
            SpectralTable::from_channels(400.0, 410.0, vec![vec![1.0, 2.0]]).unwrap(),
        );
        let samples = set.project_onto(&b).unwrap();
        let row = samples.rows()[0];
        assert_relative_eq!(row.x, 4.0);
        assert_relative_eq!(row.y, 6.0);
        assert_relative_eq!(row.z, 3.0);
    }

    #[test]
    fn test_projection_grid_mismatch() {
        let set = ReflectanceSet::new(
            SpectralTable::from_channels(400.0, 410.0, vec![vec![1.0, 2.0]]).unwrap(),
        );
        assert!(matches!(
            set.project_onto(&basis()),
            Err(SpectralError::GridMismatch {
                expected: 3,
                got: 2
            })
        ));
    }
}
