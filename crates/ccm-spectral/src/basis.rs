//! Sensor basis: the reference spectral response functions.

use crate::{SpectralError, SpectralResult, SpectralTable};
use ccm_math::Vec3;

/// A three-channel spectral table of reference response functions.
///
/// Wraps a [`SpectralTable`] that is known to carry exactly three channels
/// (X/Y/Z tristimulus curves, L/M/S cone fundamentals, or similar). Each
/// wavelength contributes one [`Vec3`] row; the search multiplies those rows
/// through candidate transforms.
///
/// # Example
///
/// ```rust
/// use ccm_spectral::{SensorBasis, SpectralTable};
///
/// let table = SpectralTable::from_channels(
///     400.0,
///     600.0,
///     vec![
///         vec![1.0, 0.0, 0.0],
///         vec![0.0, 1.0, 0.0],
///         vec![0.0, 0.0, 1.0],
///     ],
/// )
/// .unwrap();
/// let basis = SensorBasis::from_table(table).unwrap();
/// assert_eq!(basis.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SensorBasis {
    table: SpectralTable,
}

impl SensorBasis {
    /// Channel count a basis always carries.
    pub const CHANNELS: usize = 3;

    /// Wraps a table, requiring exactly three channels.
    pub fn from_table(table: SpectralTable) -> SpectralResult<Self> {
        if table.num_channels() != Self::CHANNELS {
            return Err(SpectralError::ChannelCount {
                expected: Self::CHANNELS,
                got: table.num_channels(),
            });
        }
        Ok(Self { table })
    }

    /// The underlying table.
    #[inline]
    pub fn table(&self) -> &SpectralTable {
        &self.table
    }

    /// Number of wavelength samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.count()
    }

    /// True if the basis has no wavelength samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The wavelength grid.
    #[inline]
    pub fn grid(&self) -> Vec<f64> {
        self.table.grid()
    }

    /// The three channel values at one wavelength.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.table.channel(0)[i],
            self.table.channel(1)[i],
            self.table.channel(2)[i],
        )
    }

    /// Iterates per-wavelength rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }

    /// Sums each channel over all wavelengths.
    ///
    /// This is the response of a fully reflective sample: the quantity a
    /// white-balance check pushes through a candidate transform.
    pub fn column_sums(&self) -> Vec3 {
        self.rows().fold(Vec3::ZERO, |acc, row| acc + row)
    }
}
