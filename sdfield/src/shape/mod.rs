//! Obstacle shapes and the signed-distance capability contract
//!
//! Every shape exposes a signed distance to its contour (negative inside,
//! positive outside) together with analytic first and second derivatives
//! where a closed form exists.  Operations with no closed form for a given
//! variant return [`Error::Unsupported`] instead of panicking.
use crate::{grid::Meshgrid, Error};
use nalgebra::{DMatrix, Matrix2, Vector2};

mod circle;
mod ellipse;
mod rect;
mod segment;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use rect::Rect;
pub use segment::Segment;

/// Number of contour points returned by [`Shape::sampled_points`]
pub const SAMPLE_COUNT: usize = 50;

/// Capability interface implemented by every obstacle shape
///
/// Derivatives are analytically ill-defined on zero-measure sets (shape
/// centers, segment-endpoint bisectors); implementations pick a
/// deterministic branch there rather than attempting continuity repair.
pub trait Shape {
    /// Number of points used when sampling the contour
    fn sample_count(&self) -> usize {
        SAMPLE_COUNT
    }

    /// Nearest point to `x` on the shape's contour
    fn closest_point(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error>;

    /// Signed distance from `x` to the contour
    ///
    /// Negative strictly inside, positive strictly outside, zero on the
    /// boundary.  Shapes without interior volume (segments, ellipses)
    /// return an unsigned distance.
    fn dist_from_border(&self, x: &Vector2<f64>) -> f64;

    /// Signed distance over every cell of a sampling grid
    ///
    /// Cells are independent; the result agrees with
    /// [`dist_from_border`](Shape::dist_from_border) cell by cell.
    fn dist_field(&self, grid: &Meshgrid) -> DMatrix<f64> {
        grid.map(|p| self.dist_from_border(&p))
    }

    /// Returns true if `x` is strictly inside the shape
    ///
    /// Shapes without interior volume keep this default.
    fn is_inside(&self, x: &Vector2<f64>) -> bool {
        let _ = x;
        false
    }

    /// Containment test over every cell of a sampling grid
    fn inside_field(&self, grid: &Meshgrid) -> DMatrix<bool> {
        grid.map(|p| self.is_inside(&p))
    }

    /// Gradient of the signed-distance field at `x`
    ///
    /// The default is the generic [`border_normal`] formula; shapes may
    /// override it with a closed form.  Undefined (NaN) when `x` lies
    /// exactly on the contour or at the shape's center.
    fn dist_gradient(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        border_normal(self, x)
    }

    /// Hessian of the signed-distance field at `x`
    fn dist_hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error>;

    /// Ordered points along the contour, for drawing and diagnostics
    fn sampled_points(&self) -> Vec<Vector2<f64>>;
}

/// Generic gradient of a shape's signed-distance field
///
/// Normalized vector from the closest contour point to `x`, flipped in
/// sign when `x` is inside the shape.  Kept as a free function so that it
/// stays testable against shape-specific overrides (notably
/// [`Circle::dist_gradient`], whose closed form skips the sign flip; the
/// two coincide on circles but are deliberately distinct code paths).
pub fn border_normal<S: Shape + ?Sized>(
    shape: &S,
    x: &Vector2<f64>,
) -> Result<Vector2<f64>, Error> {
    let sign = if shape.is_inside(x) { -1.0 } else { 1.0 };
    let v = x - shape.closest_point(x)?;
    Ok(sign * v / v.norm())
}

/// Hessian of the Euclidean distance to a single point
///
/// `(1/d)·I − (1/d³)·(x−o)(x−o)ᵀ`, balancing the Euclidean metric against
/// the outer product of the gradient.  Undefined (NaN) at `x == origin`.
pub fn point_distance_hessian(
    x: &Vector2<f64>,
    origin: &Vector2<f64>,
) -> Matrix2<f64> {
    let v = x - origin;
    let d_inv = 1.0 / v.norm();
    Matrix2::identity() * d_inv - v * v.transpose() * d_inv.powi(3)
}

////////////////////////////////////////////////////////////////////////////////

/// Closed set of obstacle shapes
///
/// Workspaces store obstacles by value behind this enum and identify them
/// by insertion index, so nearest-obstacle queries can hand back a plain
/// index instead of a reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Obstacle {
    Circle(Circle),
    Ellipse(Ellipse),
    Segment(Segment),
    Rect(Rect),
}

impl From<Circle> for Obstacle {
    fn from(v: Circle) -> Self {
        Obstacle::Circle(v)
    }
}

impl From<Ellipse> for Obstacle {
    fn from(v: Ellipse) -> Self {
        Obstacle::Ellipse(v)
    }
}

impl From<Segment> for Obstacle {
    fn from(v: Segment) -> Self {
        Obstacle::Segment(v)
    }
}

impl From<Rect> for Obstacle {
    fn from(v: Rect) -> Self {
        Obstacle::Rect(v)
    }
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            Obstacle::Circle($s) => $e,
            Obstacle::Ellipse($s) => $e,
            Obstacle::Segment($s) => $e,
            Obstacle::Rect($s) => $e,
        }
    };
}

impl Shape for Obstacle {
    fn sample_count(&self) -> usize {
        dispatch!(self, s => s.sample_count())
    }

    fn closest_point(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        dispatch!(self, s => s.closest_point(x))
    }

    fn dist_from_border(&self, x: &Vector2<f64>) -> f64 {
        dispatch!(self, s => s.dist_from_border(x))
    }

    fn is_inside(&self, x: &Vector2<f64>) -> bool {
        dispatch!(self, s => s.is_inside(x))
    }

    fn dist_gradient(&self, x: &Vector2<f64>) -> Result<Vector2<f64>, Error> {
        dispatch!(self, s => s.dist_gradient(x))
    }

    fn dist_hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        dispatch!(self, s => s.dist_hessian(x))
    }

    fn sampled_points(&self) -> Vec<Vector2<f64>> {
        dispatch!(self, s => s.sampled_points())
    }
}
