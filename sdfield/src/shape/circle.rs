//! Circular obstacle with fully closed-form derivatives
use super::{point_distance_hessian, Shape};
use crate::Error;
use nalgebra::{Matrix2, Vector2};

/// 2D circle
///
/// Invariant: `radius > 0`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct Circle {
    pub origin: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    /// Builds a circle from its center and radius
    pub fn new(origin: Vector2<f64>, radius: f64) -> Self {
        Self { origin, radius }
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(Vector2::zeros(), 0.2)
    }
}

impl Shape for Circle {
    fn closest_point(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        let v = x - self.origin;
        Ok(self.origin + self.radius * v / v.norm())
    }

    fn dist_from_border(&self, x: &Vector2<f64>) -> f64 {
        (x - self.origin).norm() - self.radius
    }

    fn is_inside(&self, x: &Vector2<f64>) -> bool {
        (x - self.origin).norm() < self.radius
    }

    /// Closed-form gradient: the unit vector from the center to `x`
    ///
    /// Unlike the generic [`border_normal`](super::border_normal) formula
    /// this is not sign-flipped inside the circle; the two agree
    /// everywhere because the flip cancels against the reversed
    /// closest-point direction.  Kept separate on purpose.
    fn dist_gradient(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        let v = x - self.origin;
        Ok(v / v.norm())
    }

    fn dist_hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        Ok(point_distance_hessian(x, &self.origin))
    }

    fn sampled_points(&self) -> Vec<Vector2<f64>> {
        let n = self.sample_count();
        (0..n)
            .map(|i| {
                let theta =
                    2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64;
                self.origin
                    + self.radius * Vector2::new(theta.cos(), theta.sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shape::border_normal;
    use approx::assert_relative_eq;

    #[test]
    fn sign_matches_containment() {
        let c = Circle::new(Vector2::new(0.1, -0.2), 0.3);
        for x in [
            Vector2::new(0.1, -0.1),
            Vector2::new(0.5, 0.5),
            Vector2::new(0.0, -0.2),
        ] {
            let d = c.dist_from_border(&x);
            assert_eq!(d < 0.0, c.is_inside(&x));
        }
    }

    #[test]
    fn closed_form_gradient_matches_generic() {
        let x = Vector2::new(0.37, 0.92);

        // x outside
        let c = Circle::new(Vector2::zeros(), 0.2);
        assert!(!c.is_inside(&x));
        assert_relative_eq!(
            c.dist_gradient(&x).unwrap(),
            border_normal(&c, &x).unwrap(),
            epsilon = 1e-12
        );

        // x inside
        let c = Circle::new(Vector2::zeros(), 2.0);
        assert!(c.is_inside(&x));
        assert_relative_eq!(
            c.dist_gradient(&x).unwrap(),
            border_normal(&c, &x).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn closest_point_lies_on_border() {
        let c = Circle::new(Vector2::new(-0.5, 0.25), 0.4);
        let p = c.closest_point(&Vector2::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(c.dist_from_border(&p), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn contour_sampling() {
        let c = Circle::default();
        let pts = c.sampled_points();
        assert_eq!(pts.len(), c.sample_count());
        for p in &pts {
            assert_relative_eq!(
                (p - c.origin).norm(),
                c.radius,
                epsilon = 1e-12
            );
        }
    }
}
