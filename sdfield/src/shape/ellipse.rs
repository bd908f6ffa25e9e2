//! Ellipse obstacle with an iterative distance computation
use super::Shape;
use crate::Error;
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::FRAC_PI_2;

/// Iteration cap for the fixed-point distance solver
///
/// Frozen behavioral constant, not a convergence tolerance: reference
/// outputs depend on the loop running at most this many times.
const MAX_ITERATIONS: usize = 100;

/// 2D ellipse with semi-axes `a` (along x) and `b` (along y)
///
/// Invariant: `a > 0`, `b > 0`.  Only the distance itself has an
/// implementation; the closest point and analytic derivatives are
/// unsupported for this variant.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct Ellipse {
    pub origin: Vector2<f64>,
    pub a: f64,
    pub b: f64,
}

impl Ellipse {
    /// Builds an ellipse from its center and semi-axis lengths
    pub fn new(origin: Vector2<f64>, a: f64, b: f64) -> Self {
        Self { origin, a, b }
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new(Vector2::zeros(), 0.2, 0.2)
    }
}

impl Shape for Ellipse {
    fn closest_point(&self, _x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        Err(Error::Unsupported {
            shape: "Ellipse",
            op: "closest_point",
        })
    }

    /// Unsigned distance from `x` to the ellipse contour
    ///
    /// Fixed-point iteration on the parametric angle `phi`,
    /// `phi ← atan2((a² − b²)·sin(phi) + |y|·b, |x|·a)`, starting from
    /// `phi = 0` and exiting early once `phi > π/2`
    /// (<http://www.am.ub.edu/~robert/Documents/ellipse.pdf>).  No
    /// inside/outside sign is applied.
    fn dist_from_border(&self, x: &Vector2<f64>) -> f64 {
        let p = x - self.origin;
        let x_abs = p.x.abs();
        let y_abs = p.y.abs();
        let a_m_b = self.a * self.a - self.b * self.b;
        let mut phi = 0.0_f64;
        for _ in 0..MAX_ITERATIONS {
            phi = (a_m_b * phi.sin() + y_abs * self.b).atan2(x_abs * self.a);
            if phi > FRAC_PI_2 {
                break;
            }
        }
        ((x_abs - self.a * phi.cos()).powi(2)
            + (y_abs - self.b * phi.sin()).powi(2))
        .sqrt()
    }

    fn dist_hessian(&self, _x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        Err(Error::Unsupported {
            shape: "Ellipse",
            op: "dist_hessian",
        })
    }

    fn sampled_points(&self) -> Vec<Vector2<f64>> {
        let n = self.sample_count();
        (0..n)
            .map(|i| {
                let theta =
                    2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64;
                self.origin
                    + Vector2::new(self.a * theta.cos(), self.b * theta.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn distance_on_major_and_minor_axes() {
        let e = Ellipse::new(Vector2::zeros(), 0.1, 0.2);
        let d = e.dist_from_border(&Vector2::new(0.3, 0.0));
        assert!((d - 0.2).abs() < 1e-6, "d = {d}");
        let d = e.dist_from_border(&Vector2::new(0.0, 0.3));
        assert!((d - 0.1).abs() < 1e-6, "d = {d}");
    }

    #[test]
    fn distance_is_translation_invariant() {
        let e0 = Ellipse::new(Vector2::zeros(), 0.1, 0.2);
        let e1 = Ellipse::new(Vector2::new(0.5, -0.25), 0.1, 0.2);
        let x = Vector2::new(0.3, 0.1);
        let d0 = e0.dist_from_border(&x);
        let d1 = e1.dist_from_border(&(x + e1.origin));
        assert!((d0 - d1).abs() < 1e-12);
    }

    #[test]
    fn derivatives_are_unsupported() {
        let e = Ellipse::default();
        let x = Vector2::new(0.3, 0.0);
        assert_eq!(
            e.closest_point(&x),
            Err(Error::Unsupported {
                shape: "Ellipse",
                op: "closest_point",
            })
        );
        assert!(e.dist_gradient(&x).is_err());
        assert!(e.dist_hessian(&x).is_err());
    }
}
