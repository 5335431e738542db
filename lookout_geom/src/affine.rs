// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Six-coefficient 2D affine transform with pan, pivot scaling and inversion.

use core::fmt;

use kurbo::{Affine, Point, Vec2};

/// Error returned when a transform has no inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SingularMatrix;

impl fmt::Display for SingularMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("affine transform has a singular linear part")
    }
}

impl core::error::Error for SingularMatrix {}

/// A 2D affine transform `[a, b, c, d, e, f]`.
///
/// The coefficients describe the matrix
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// which is the same layout used by [`kurbo::Affine`] and by the SVG
/// `matrix(a b c d e f)` transform function, so values convert losslessly in
/// both directions.
///
/// The transform maps world coordinates into display coordinates. Pan and
/// zoom are expressed as compositions on this single matrix rather than as a
/// separately tracked offset and scale.
#[derive(Clone, Copy, PartialEq)]
pub struct AffineTransform {
    coeffs: [f64; 6],
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Creates a transform from its six coefficients.
    #[must_use]
    pub const fn new(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Creates a uniform scale followed by a translation.
    #[must_use]
    pub const fn scale_translate(scale: f64, translation: Vec2) -> Self {
        Self {
            coeffs: [scale, 0.0, 0.0, scale, translation.x, translation.y],
        }
    }

    /// Returns the six coefficients.
    #[must_use]
    pub const fn coeffs(&self) -> [f64; 6] {
        self.coeffs
    }

    /// Returns the translation terms `(e, f)`.
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        Vec2::new(self.coeffs[4], self.coeffs[5])
    }

    /// Returns the determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs;
        a * d - b * c
    }

    /// Composes a pan onto the transform.
    ///
    /// The delta is expressed in display space and only shifts the `e`/`f`
    /// terms; the linear part is untouched.
    pub fn compose_pan(&mut self, delta: Vec2) {
        self.coeffs[4] += delta.x;
        self.coeffs[5] += delta.y;
    }

    /// Scales the whole transform by `factor` about a display-space `pivot`.
    ///
    /// All six coefficients are multiplied by `factor`, then the translation
    /// is corrected so that the display point `pivot` maps to itself. Any
    /// world point shown at `pivot` before the call is still shown there
    /// afterwards.
    pub fn scale_about(&mut self, factor: f64, pivot: Point) {
        for coeff in &mut self.coeffs {
            *coeff *= factor;
        }
        self.coeffs[4] += (1.0 - factor) * pivot.x;
        self.coeffs[5] += (1.0 - factor) * pivot.y;
    }

    /// Maps a point through the transform.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * pt.x + c * pt.y + e, b * pt.x + d * pt.y + f)
    }

    /// Maps a point through the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrix`] if the transform cannot be inverted.
    pub fn apply_inverse(&self, pt: Point) -> Result<Point, SingularMatrix> {
        self.invert().map(|inv| inv.apply(pt)).ok_or(SingularMatrix)
    }

    /// Inverts the transform by Gauss–Jordan elimination on `[M | I]`.
    ///
    /// A zero pivot is replaced by swapping in a later row with a non-zero
    /// entry in the same column. Returns `None` if no such row exists, i.e.
    /// the linear part is singular.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let [a, b, c, d, e, f] = self.coeffs;
        let mut m = [[a, c, e], [b, d, f], [0.0, 0.0, 1.0]];
        let mut inv = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let tolerance = pivot_tolerance(&self.coeffs);

        for col in 0..3 {
            if m[col][col].abs() <= tolerance {
                let swap = (col + 1..3).find(|&row| m[row][col].abs() > tolerance)?;
                m.swap(col, swap);
                inv.swap(col, swap);
            }

            let pivot = m[col][col];
            for k in 0..3 {
                m[col][k] /= pivot;
                inv[col][k] /= pivot;
            }

            for row in 0..3 {
                if row == col {
                    continue;
                }
                let factor = m[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..3 {
                    m[row][k] -= factor * m[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }

        let out = Self::new([
            inv[0][0], inv[1][0], inv[0][1], inv[1][1], inv[0][2], inv[1][2],
        ]);
        out.is_finite().then_some(out)
    }

    /// Closed-form inverse of the affine matrix.
    ///
    /// Produces the same result as [`AffineTransform::invert`] for every
    /// invertible transform, with the same `None` on a singular linear part.
    #[must_use]
    pub fn invert_closed_form(&self) -> Option<Self> {
        let [a, b, c, d, e, f] = self.coeffs;
        let det = self.determinant();
        if det.abs() <= pivot_tolerance(&self.coeffs) || !det.is_finite() {
            return None;
        }
        let inv_det = det.recip();
        let out = Self::new([
            d * inv_det,
            -b * inv_det,
            -c * inv_det,
            a * inv_det,
            (c * f - d * e) * inv_det,
            (b * e - a * f) * inv_det,
        ]);
        out.is_finite().then_some(out)
    }

    /// Returns `true` if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }
}

fn pivot_tolerance(coeffs: &[f64; 6]) -> f64 {
    let magnitude = coeffs[..4].iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    magnitude * f64::EPSILON * 16.0
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AffineTransform").field(&self.coeffs).finish()
    }
}

/// Formats as an SVG `transform` attribute value.
impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.coeffs;
        write!(f, "matrix({a} {b} {c} {d} {e} {g})")
    }
}

impl From<Affine> for AffineTransform {
    fn from(affine: Affine) -> Self {
        Self::new(affine.as_coeffs())
    }
}

impl From<AffineTransform> for Affine {
    fn from(transform: AffineTransform) -> Self {
        Self::new(transform.coeffs)
    }
}
