//! 3x3 matrix type for color transforms.
//!
//! [`Mat3`] carries color-correction candidates and sensor-to-RGB
//! transforms.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order. `matrix * vector` treats the
//! vector as a column; `vector * matrix` treats it as a row, which matches
//! projecting a per-sample tristimulus row through a transform:
//!
//! ```text
//! rgb_sample = sample_row * ccm
//! ```

use crate::Vec3;
use std::ops::{Div, Index, Mul};

/// A 3x3 `f64` matrix.
///
/// # Example
///
/// ```rust
/// use ccm_math::{Mat3, Vec3};
///
/// let m = Mat3::from_rows([
///     [1.0, 0.0, 0.0],
///     [0.0, 2.0, 0.0],
///     [0.0, 0.0, 3.0],
/// ]);
/// assert_eq!(m * Vec3::ONE, Vec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix by evaluating `f(row, col)` for every entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ccm_math::Mat3;
    ///
    /// let m = Mat3::from_fn(|i, j| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(m, Mat3::IDENTITY);
    /// ```
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = f(i, j);
            }
        }
        Self { m }
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows([
            [self.m[0][0], self.m[1][0], self.m[2][0]],
            [self.m[0][1], self.m[1][1], self.m[2][1]],
            [self.m[0][2], self.m[1][2], self.m[2][2]],
        ])
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-12 {
            return None;
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Adjugate scaled by 1/det
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Transforms a column vector by this matrix.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
        )
    }

    /// Multiplies two matrices.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::from_fn(|i, j| {
            self.m[i][0] * other.m[0][j]
                + self.m[i][1] * other.m[1][j]
                + self.m[i][2] * other.m[2][j]
        })
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam `DMat3` (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::DMat3 {
        glam::DMat3::from_cols(
            self.col(0).to_glam(),
            self.col(1).to_glam(),
            self.col(2).to_glam(),
        )
    }

    /// Creates from glam `DMat3`.
    #[inline]
    pub fn from_glam(m: glam::DMat3) -> Self {
        let t = m.transpose();
        Self::from_rows([
            t.x_axis.to_array(),
            t.y_axis.to_array(),
            t.z_axis.to_array(),
        ])
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Mat3 * Vec3 (column vector)
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

// Vec3 * Mat3 (row vector)
impl Mul<Mat3> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Vec3 {
        Vec3::new(
            self.dot(rhs.col(0)),
            self.dot(rhs.col(1)),
            self.dot(rhs.col(2)),
        )
    }
}

// Mat3 * Mat3
impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

// Mat3 * f64
impl Mul<f64> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::from_fn(|i, j| self.m[i][j] * rhs)
    }
}

// Mat3 / f64
impl Div<f64> for Mat3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::from_fn(|i, j| self.m[i][j] / rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f64; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f64; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
        assert_eq!(v * Mat3::IDENTITY, v);
    }

    #[test]
    fn test_mat3_row_vector_product() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let v = Vec3::new(1.0, 0.0, 0.0);
        // Row vector picks out the first row
        assert_eq!(v * m, Vec3::new(1.0, 2.0, 3.0));
        // Column vector picks out the first column
        assert_eq!(m * v, Vec3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn test_mat3_determinant() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ]);
        assert!((m.determinant() - 1.0).abs() < 1e-12);
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ]);
        let inv = m.inverse().unwrap();
        let result = m * inv;

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(result.m[i][j], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [1.0, 1.0, 1.0],
        ]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_mat3_scalar_ops() {
        let m = Mat3::IDENTITY * 4.0;
        assert_eq!(m.m[0][0], 4.0);
        let half = m / 8.0;
        assert_eq!(half.m[2][2], 0.5);
    }

    #[test]
    fn test_mat3_glam_roundtrip() {
        let m = Mat3::from_rows([
            [0.1, 0.2, 0.3],
            [0.4, 0.5, 0.6],
            [0.7, 0.8, 0.9],
        ]);
        let back = Mat3::from_glam(m.to_glam());
        for i in 0..3 {
            for j in 0..3 {
                assert!((m.m[i][j] - back.m[i][j]).abs() < 1e-15);
            }
        }
    }
}
