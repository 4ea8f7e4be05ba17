//! Fixed-arity vector and matrix primitives
//!
//! Every operation here is total. Summation order is fixed (index 0..5,
//! row-major for the quadratic form) so that results stay bit-identical
//! with the other language implementations of the engine.

use crate::models::Vector5D;
use serde::{Deserialize, Serialize};

/// Symmetric 5×5 interaction matrix.
///
/// `M[i][j]` is the compounding strength between dimensions `i` and `j`
/// in [`crate::models::Dimension`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix5x5(pub [[f64; 5]; 5]);

impl Matrix5x5 {
    pub const IDENTITY: Matrix5x5 = Matrix5x5([
        [1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 1.0],
    ]);

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row][col]
    }

    pub fn rows(&self) -> &[[f64; 5]; 5] {
        &self.0
    }

    pub fn diagonal(&self) -> [f64; 5] {
        [self.0[0][0], self.0[1][1], self.0[2][2], self.0[3][3], self.0[4][4]]
    }

    /// vᵗMv
    pub fn quadratic_form(&self, v: &Vector5D) -> f64 {
        quadratic_form(v, self)
    }

    /// First `(row, col)` pair where `M[i][j] != M[j][i]`, if any
    pub fn asymmetry(&self) -> Option<(usize, usize)> {
        for i in 0..5 {
            for j in (i + 1)..5 {
                if self.0[i][j] != self.0[j][i] {
                    return Some((i, j));
                }
            }
        }
        None
    }

    pub fn is_symmetric(&self) -> bool {
        self.asymmetry().is_none()
    }

    /// Row-wise diagonal dominance: `M[i][i] >= Σ_{j≠i} |M[i][j]|`.
    ///
    /// Sufficient (not necessary) for positive semi-definiteness when the
    /// diagonal is non-negative. Only meant as a sanity check on shipped or
    /// configured matrices, never on user data.
    pub fn is_diagonally_dominant(&self) -> bool {
        (0..5).all(|i| {
            let off_diagonal: f64 = (0..5)
                .filter(|&j| j != i)
                .map(|j| self.0[i][j].abs())
                .sum();
            self.0[i][i] >= off_diagonal
        })
    }
}

/// Σ aᵢbᵢ
pub fn dot(a: &Vector5D, b: &Vector5D) -> f64 {
    let a = a.to_array();
    let b = b.to_array();
    let mut sum = 0.0;
    for i in 0..5 {
        sum += a[i] * b[i];
    }
    sum
}

/// √Σ aᵢ²
pub fn norm(v: &Vector5D) -> f64 {
    let mut sum = 0.0;
    for x in v.to_array() {
        sum += x * x;
    }
    sum.sqrt()
}

pub fn euclidean_distance(a: &Vector5D, b: &Vector5D) -> f64 {
    let a = a.to_array();
    let b = b.to_array();
    let mut sum = 0.0;
    for i in 0..5 {
        let diff = a[i] - b[i];
        sum += diff * diff;
    }
    sum.sqrt()
}

/// ΣᵢΣⱼ vᵢ Mᵢⱼ vⱼ
pub fn quadratic_form(v: &Vector5D, m: &Matrix5x5) -> f64 {
    let arr = v.to_array();
    let mut result = 0.0;
    for i in 0..5 {
        for j in 0..5 {
            result += arr[i] * m.0[i][j] * arr[j];
        }
    }
    result
}

/// Interaction-weighted distance √|dᵗMd| with `d = v - target`.
///
/// The shipped matrices are only approximately PSD, so the quadratic form
/// can dip slightly below zero; the absolute value keeps the result real.
pub fn mahalanobis_distance(v: &Vector5D, target: &Vector5D, m: &Matrix5x5) -> f64 {
    let diff = v.sub(target);
    quadratic_form(&diff, m).abs().sqrt()
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let ratio = 10f64.powi(decimals);
    (value * ratio).round() / ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        let v = Vector5D::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let w = Vector5D::new(1.0, 1.5, 2.0, 2.5, 3.0);
        assert_eq!(dot(&v, &w), 1.0 + 3.0 + 6.0 + 10.0 + 15.0);
        assert_eq!(norm(&Vector5D::new(3.0, 4.0, 0.0, 0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = Vector5D::ZERO;
        let b = Vector5D::new(3.0, 4.0, 0.0, 0.0, 0.0);
        assert_eq!(euclidean_distance(&a, &b), 5.0);
        assert_eq!(euclidean_distance(&b, &b), 0.0);
    }

    #[test]
    fn test_quadratic_form_identity_is_norm_squared() {
        let v = Vector5D::new(1.0, 2.0, 0.0, 0.0, 2.0);
        assert_eq!(quadratic_form(&v, &Matrix5x5::IDENTITY), 9.0);
        assert_eq!(quadratic_form(&Vector5D::ZERO, &Matrix5x5::IDENTITY), 0.0);
    }

    #[test]
    fn test_mahalanobis_identity_matches_euclidean() {
        let a = Vector5D::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let b = Vector5D::new(0.0, 2.0, 1.0, 4.0, 3.0);
        let m = mahalanobis_distance(&a, &b, &Matrix5x5::IDENTITY);
        assert!((m - euclidean_distance(&a, &b)).abs() < 1e-12);
    }

    #[test]
    fn test_mahalanobis_guards_negative_form() {
        let mut rows = Matrix5x5::IDENTITY.0;
        rows[0][0] = -4.0;
        let m = Matrix5x5(rows);
        let d = mahalanobis_distance(&Vector5D::new(1.0, 0.0, 0.0, 0.0, 0.0), &Vector5D::ZERO, &m);
        assert_eq!(d, 2.0);
    }

    #[test]
    fn test_diagonal_dominance() {
        assert!(Matrix5x5::IDENTITY.is_diagonally_dominant());
        let dominant = Matrix5x5([
            [5.0, 1.0, 0.0, 0.0, 1.0],
            [1.0, 5.0, 1.0, 0.0, 0.0],
            [0.0, 1.0, 5.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 5.0, 1.0],
            [1.0, 0.0, 0.0, 1.0, 5.0],
        ]);
        assert!(dominant.is_diagonally_dominant());
        let mut rows = dominant.0;
        rows[2][4] = -4.5;
        assert!(!Matrix5x5(rows).is_diagonally_dominant());
    }

    #[test]
    fn test_asymmetry_reports_first_pair() {
        let mut rows = Matrix5x5::IDENTITY.0;
        rows[1][3] = 0.5;
        assert_eq!(Matrix5x5(rows).asymmetry(), Some((1, 3)));
        assert!(Matrix5x5::IDENTITY.is_symmetric());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.218181, 3), 0.218);
        assert_eq!(round_to(7.5249, 2), 7.52);
        assert_eq!(round_to(-1.005, 0), -1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
