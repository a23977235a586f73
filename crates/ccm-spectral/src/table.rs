//! Wavelength-indexed spectral tables.

use crate::{SpectralError, SpectralResult};
use ccm_math::{linspace, sample_linear};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A wavelength-indexed table of one or more channels.
///
/// Channels are stored column-major: one `Vec<f64>` per channel, every
/// channel the same length as the wavelength grid. The grid itself is
/// implied by `range` and `count` and assumed uniform; `step` is derived
/// from the first interval of the input and is not verified further.
///
/// A table is built once from input, then reshaped in place:
///
/// ```rust
/// use ccm_spectral::SpectralTable;
/// use std::io::Cursor;
///
/// let csv = "400,0.1,0.0\n500,0.5,0.2\n600,0.3,0.4\n";
/// let mut table = SpectralTable::from_reader(Cursor::new(csv)).unwrap();
/// table.resample(400.0, 600.0, 201).unwrap().normalize().unwrap();
/// assert_eq!(table.count(), 201);
/// assert!(table.is_normalized());
/// ```
#[derive(Debug, Clone)]
pub struct SpectralTable {
    range: (f64, f64),
    step: f64,
    count: usize,
    channels: Vec<Vec<f64>>,
    normalized: bool,
}

impl SpectralTable {
    /// Loads a table from a comma-delimited file.
    ///
    /// See [`SpectralTable::from_reader`] for the format.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> SpectralResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a table from a reader.
    ///
    /// One row per wavelength sample: the first field is the wavelength,
    /// the remaining fields are channel values. Wavelengths must be strictly
    /// increasing. Blank lines are skipped; there is no header row.
    pub fn from_reader<R: BufRead>(reader: R) -> SpectralResult<Self> {
        let mut wavelengths: Vec<f64> = Vec::new();
        let mut channels: Vec<Vec<f64>> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let lineno = idx + 1;

            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                return Err(SpectralError::TooFewColumns { line: lineno });
            }

            if channels.is_empty() {
                channels = vec![Vec::new(); fields.len() - 1];
            } else if fields.len() - 1 != channels.len() {
                return Err(SpectralError::ColumnCountMismatch {
                    line: lineno,
                    expected: channels.len() + 1,
                    got: fields.len(),
                });
            }

            let wavelength: f64 = fields[0]
                .parse()
                .map_err(|_| SpectralError::InvalidNumber { line: lineno })?;
            if let Some(&prev) = wavelengths.last() {
                if wavelength <= prev {
                    return Err(SpectralError::NonMonotonicWavelength { line: lineno });
                }
            }
            wavelengths.push(wavelength);

            for (channel, field) in channels.iter_mut().zip(&fields[1..]) {
                let value: f64 = field
                    .parse()
                    .map_err(|_| SpectralError::InvalidNumber { line: lineno })?;
                channel.push(value);
            }
        }

        if wavelengths.is_empty() {
            return Err(SpectralError::EmptyTable);
        }

        let count = wavelengths.len();
        let step = if count > 1 {
            wavelengths[1] - wavelengths[0]
        } else {
            0.0
        };

        Ok(Self {
            range: (wavelengths[0], wavelengths[count - 1]),
            step,
            count,
            channels,
            normalized: false,
        })
    }

    /// Builds a table directly from channel vectors on a uniform grid.
    ///
    /// Every channel must have the same nonzero length.
    pub fn from_channels(
        start: f64,
        end: f64,
        channels: Vec<Vec<f64>>,
    ) -> SpectralResult<Self> {
        let count = channels.first().map_or(0, Vec::len);
        if count == 0 {
            return Err(SpectralError::EmptyTable);
        }
        for channel in &channels {
            if channel.len() != count {
                return Err(SpectralError::ChannelLength {
                    expected: count,
                    got: channel.len(),
                });
            }
        }
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };
        Ok(Self {
            range: (start, end),
            step,
            count,
            channels,
            normalized: false,
        })
    }

    /// Start and end wavelength.
    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Grid spacing.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of wavelength samples.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// All channels, column-major.
    #[inline]
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// One channel by index.
    #[inline]
    pub fn channel(&self, i: usize) -> &[f64] {
        &self.channels[i]
    }

    /// Whether [`SpectralTable::normalize`] has run on this table.
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// The wavelength grid, materialized.
    pub fn grid(&self) -> Vec<f64> {
        linspace(self.range.0, self.range.1, self.count)
    }

    /// Resamples every channel onto a new uniform grid.
    ///
    /// Values are piecewise-linearly interpolated against the original grid
    /// and linearly extrapolated outside it, so the target range may extend
    /// beyond the measured domain. The table's `range`, `step`, and `count`
    /// become the target values; calling again keeps reshaping from the
    /// current state.
    pub fn resample(
        &mut self,
        start: f64,
        end: f64,
        count: usize,
    ) -> SpectralResult<&mut Self> {
        if self.channels.is_empty() || self.count == 0 {
            return Err(SpectralError::EmptyTable);
        }
        if count < 2 || end <= start {
            return Err(SpectralError::InvalidGrid { start, end, count });
        }

        // Source positions follow the implied uniform grid, not the stored
        // first-interval step.
        let src_step = if self.count > 1 {
            (self.range.1 - self.range.0) / (self.count - 1) as f64
        } else {
            0.0
        };
        let grid = linspace(start, end, count);

        let mut resampled = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let mut values = Vec::with_capacity(count);
            for &w in &grid {
                values.push(sample_linear(self.range.0, src_step, channel, w));
            }
            resampled.push(values);
        }

        self.channels = resampled;
        self.range = (start, end);
        self.count = count;
        self.step = (end - start) / (count - 1) as f64;
        Ok(self)
    }

    /// Scales the whole table so its single largest value becomes 1.
    ///
    /// The maximum is global across all channels, not per channel. Fails if
    /// the table is empty or the maximum is not positive. Calling twice is
    /// harmless; the second call divides by 1.
    pub fn normalize(&mut self) -> SpectralResult<&mut Self> {
        let max = self
            .channels
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !(max > 0.0) {
            return Err(SpectralError::DegenerateData);
        }

        for channel in &mut self.channels {
            for value in channel.iter_mut() {
                *value /= max;
            }
        }
        self.normalized = true;
        Ok(self)
    }

    /// Appends a channel sharing this table's grid.
    pub fn push_channel(&mut self, values: Vec<f64>) -> SpectralResult<&mut Self> {
        if values.len() != self.count {
            return Err(SpectralError::ChannelLength {
                expected: self.count,
                got: values.len(),
            });
        }
        self.channels.push(values);
        Ok(self)
    }
}
