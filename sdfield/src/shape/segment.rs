//! Line-segment obstacle
use super::Shape;
use crate::Error;
use nalgebra::{Matrix2, Vector2};

/// 2D line segment defined by its center, orientation and length
///
/// Endpoints sit at `origin ± 0.5·length·(cos θ, sin θ)`.  Invariant:
/// `length > 0`.  A segment has no interior, so its distance is unsigned
/// and `is_inside` keeps the default `false`.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct Segment {
    pub origin: Vector2<f64>,
    pub orientation: f64,
    pub length: f64,
}

impl Segment {
    /// Builds a segment from its center, orientation and length
    pub fn new(origin: Vector2<f64>, orientation: f64, length: f64) -> Self {
        Self {
            origin,
            orientation,
            length,
        }
    }

    /// Builds the segment joining `p1` to `p2`
    pub fn from_endpoints(p1: Vector2<f64>, p2: Vector2<f64>) -> Self {
        let p12 = p1 - p2;
        Self {
            origin: (p1 + p2) / 2.0,
            orientation: p12.y.atan2(p12.x),
            length: p12.norm(),
        }
    }

    /// Returns both endpoints, `(origin + h, origin - h)`
    pub fn endpoints(&self) -> (Vector2<f64>, Vector2<f64>) {
        let h = 0.5
            * self.length
            * Vector2::new(self.orientation.cos(), self.orientation.sin());
        (self.origin + h, self.origin - h)
    }

    /// Clamped projection of `x` onto the segment
    ///
    /// The projection parameter `d = (u·v)/(u·u)` selects one of three
    /// branches: before `p1` (`d < 0`), past `p2` (`d > 1`), or on the
    /// segment.  Points on an endpoint bisector take the endpoint branch.
    fn project(&self, x: &Vector2<f64>) -> Vector2<f64> {
        let (p1, p2) = self.endpoints();
        let u = p2 - p1;
        let v = x - p1;
        let d = u.dot(&v) / u.dot(&u);
        if d < 0.0 {
            p1
        } else if d > 1.0 {
            p2
        } else {
            p1 + d * u
        }
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(Vector2::zeros(), 0.0, 0.8)
    }
}

impl Shape for Segment {
    fn closest_point(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        Ok(self.project(x))
    }

    fn dist_from_border(&self, x: &Vector2<f64>) -> f64 {
        (x - self.project(x)).norm()
    }

    fn dist_hessian(&self, _x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        // Flat in the interior branch, point-like at the endpoints; no
        // consistent closed form across branches, so left unsupported.
        Err(Error::Unsupported {
            shape: "Segment",
            op: "dist_hessian",
        })
    }

    fn sampled_points(&self) -> Vec<Vector2<f64>> {
        let n = self.sample_count();
        let (p1, p2) = self.endpoints();
        (0..n)
            .map(|i| {
                let alpha = i as f64 / (n - 1) as f64;
                (1.0 - alpha) * p1 + alpha * p2
            })
            .collect()
    }
}
