//! Axis-aligned box obstacle, doubling as the workspace bounding region
use super::{Segment, Shape};
use crate::{
    grid::{linspace, Extent, Meshgrid},
    Error,
};
use nalgebra::{Matrix2, Vector2};
use rand::Rng;

/// Axis-aligned 2D box defined by its center and full extent per axis
///
/// Invariant: both components of `dim` are positive.  The contour is the
/// union of the four edge segments; distance, closest point and gradient
/// all reduce to the nearest edge, with the sign flipped inside.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct Rect {
    pub origin: Vector2<f64>,
    pub dim: Vector2<f64>,
}

impl Rect {
    /// Builds a box from its center and full width/height
    pub fn new(origin: Vector2<f64>, dim: Vector2<f64>) -> Self {
        Self { origin, dim }
    }

    /// Builds a box from axis-aligned limits
    pub fn from_limits(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, Error> {
        if x_max <= x_min {
            return Err(Error::EmptyInterval(x_min, x_max));
        }
        if y_max <= y_min {
            return Err(Error::EmptyInterval(y_min, y_max));
        }
        Ok(Self::new(
            Vector2::new((x_min + x_max) / 2.0, (y_min + y_max) / 2.0),
            Vector2::new(x_max - x_min, y_max - y_min),
        ))
    }

    /// Corner with the smallest coordinates
    pub fn lower_corner(&self) -> Vector2<f64> {
        self.origin - 0.5 * self.dim
    }

    /// Corner with the largest coordinates
    pub fn upper_corner(&self) -> Vector2<f64> {
        self.origin + 0.5 * self.dim
    }

    /// Length of the box diagonal
    pub fn diag(&self) -> f64 {
        self.dim.norm()
    }

    /// Corners in contour order: lower-left, lower-right, upper-right,
    /// upper-left
    pub fn vertices(&self) -> [Vector2<f64>; 4] {
        let l = self.lower_corner();
        let u = self.upper_corner();
        [
            l,
            Vector2::new(u.x, l.y),
            u,
            Vector2::new(l.x, u.y),
        ]
    }

    /// The four edge segments, joining consecutive corners
    pub fn edges(&self) -> [Segment; 4] {
        let v = self.vertices();
        [
            Segment::from_endpoints(v[0], v[1]),
            Segment::from_endpoints(v[1], v[2]),
            Segment::from_endpoints(v[2], v[3]),
            Segment::from_endpoints(v[3], v[0]),
        ]
    }

    /// Axis-aligned extent of the box
    pub fn extent(&self) -> Extent {
        let l = self.lower_corner();
        let u = self.upper_corner();
        Extent {
            x_min: l.x,
            x_max: u.x,
            y_min: l.y,
            y_max: u.y,
        }
    }

    /// Regular `n × n` grid of cell-center coordinates covering the box
    ///
    /// The grid matches the [`PixelMap`](crate::grid::PixelMap) cell
    /// layout: resolution is `dim / n` and the outermost samples are inset
    /// from the border by half a cell.  Square boxes only.
    pub fn meshgrid(&self, n: usize) -> Result<Meshgrid, Error> {
        if self.dim.x != self.dim.y {
            return Err(Error::NonSquareBox(self.dim.x, self.dim.y));
        }
        let resolution = self.dim.x / n as f64;
        let e = self.extent();
        Ok(Meshgrid::new(
            linspace(e.x_min + 0.5 * resolution, e.x_max - 0.5 * resolution, n),
            linspace(e.y_min + 0.5 * resolution, e.y_max - 0.5 * resolution, n),
        ))
    }

    /// Draws a point uniformly from the box
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        let p = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());
        self.dim.component_mul(&p) + self.lower_corner()
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(Vector2::zeros(), Vector2::new(1.0, 1.0))
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "origin : ({}, {}), dim : ({}, {})",
            self.origin.x, self.origin.y, self.dim.x, self.dim.y
        )
    }
}

impl Shape for Rect {
    fn closest_point(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        let mut min_dist = f64::INFINITY;
        let mut closest = *x;
        for edge in self.edges() {
            let p = edge.closest_point(x)?;
            let d = (x - p).norm();
            if d < min_dist {
                min_dist = d;
                closest = p;
            }
        }
        Ok(closest)
    }

    fn dist_from_border(&self, x: &Vector2<f64>) -> f64 {
        let d = self
            .edges()
            .iter()
            .map(|edge| edge.dist_from_border(x))
            .fold(f64::INFINITY, f64::min);
        if self.is_inside(x) {
            -d
        } else {
            d
        }
    }

    fn is_inside(&self, x: &Vector2<f64>) -> bool {
        let l = self.lower_corner();
        let u = self.upper_corner();
        x.x >= l.x && x.x <= u.x && x.y >= l.y && x.y <= u.y
    }

    fn dist_hessian(&self, _x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        // Same branch inconsistency as the segment Hessian
        Err(Error::Unsupported {
            shape: "Rect",
            op: "dist_hessian",
        })
    }

    fn sampled_points(&self) -> Vec<Vector2<f64>> {
        let per_edge = self.sample_count() / 4;
        let v = self.vertices();
        let mut points = Vec::with_capacity(4 * per_edge);
        for k in 0..4 {
            let (a, b) = (v[k], v[(k + 1) % 4]);
            for i in 0..per_edge {
                let alpha = i as f64 / (per_edge - 1) as f64;
                points.push((1.0 - alpha) * a + alpha * b);
            }
        }
        points
    }
}
