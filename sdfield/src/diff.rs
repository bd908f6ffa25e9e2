//! Differentiable-map adapters over shapes and workspaces
//!
//! Gradient-based consumers (trajectory optimizers, finite-difference
//! checkers) see a single contract: a scalar field over 2D points paired
//! with its exact Jacobian and Hessian.  Both adapters here borrow the
//! wrapped value and never mutate it.
use crate::{
    shape::Shape,
    workspace::Workspace,
    Error,
};
use nalgebra::{Matrix2, RowVector2, Vector2};

/// A scalar field over 2D points, paired with its exact derivatives
///
/// Implementations may fail on capability gaps (see
/// [`Error::Unsupported`]); values themselves are always available.
pub trait DifferentiableMap {
    /// Dimension of the output space (1 for scalar fields)
    fn output_dimension(&self) -> usize {
        1
    }

    /// Dimension of the input space
    fn input_dimension(&self) -> usize {
        2
    }

    /// Field value at `x`
    fn forward(&self, x: &Vector2<f64>) -> f64;

    /// First derivative at `x`, as a `1 × 2` matrix
    fn jacobian(&self, x: &Vector2<f64>) -> Result<RowVector2<f64>, Error>;

    /// Second derivative at `x`
    fn hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error>;

    /// Value and Jacobian in one call
    fn evaluate(
        &self,
        x: &Vector2<f64>,
    ) -> Result<(f64, RowVector2<f64>), Error> {
        Ok((self.forward(x), self.jacobian(x)?))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Exposes one shape's signed-distance function as a differentiable map
pub struct SignedDistanceMap<'a, S: Shape + ?Sized> {
    shape: &'a S,
}

impl<'a, S: Shape + ?Sized> SignedDistanceMap<'a, S> {
    /// Wraps a shape by reference
    pub fn new(shape: &'a S) -> Self {
        Self { shape }
    }
}

impl<S: Shape + ?Sized> DifferentiableMap for SignedDistanceMap<'_, S> {
    fn forward(&self, x: &Vector2<f64>) -> f64 {
        self.shape.dist_from_border(x)
    }

    fn jacobian(&self, x: &Vector2<f64>) -> Result<RowVector2<f64>, Error> {
        Ok(self.shape.dist_gradient(x)?.transpose())
    }

    fn hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        self.shape.dist_hessian(x)
    }
}

/// Exposes a workspace's nearest-obstacle distance as a differentiable map
///
/// The derivatives dispatch through the winning obstacle's index and are
/// ill-defined exactly where two obstacles are equidistant; the field has
/// a kink there and the first-wins tie-break picks one side of it.
pub struct WorkspaceDistanceMap<'a> {
    workspace: &'a Workspace,
}

impl<'a> WorkspaceDistanceMap<'a> {
    /// Wraps a workspace by reference
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }
}

impl DifferentiableMap for WorkspaceDistanceMap<'_> {
    fn forward(&self, x: &Vector2<f64>) -> f64 {
        self.workspace.min_dist(x).0
    }

    fn jacobian(&self, x: &Vector2<f64>) -> Result<RowVector2<f64>, Error> {
        Ok(self.workspace.min_dist_gradient(x)?.transpose())
    }

    fn hessian(&self, x: &Vector2<f64>) -> Result<Matrix2<f64>, Error> {
        let (_, i) = self.workspace.min_dist(x);
        let i = i.ok_or(Error::EmptyWorkspace)?;
        self.workspace.obstacles[i].dist_hessian(x)
    }

    fn evaluate(
        &self,
        x: &Vector2<f64>,
    ) -> Result<(f64, RowVector2<f64>), Error> {
        let (d, i) = self.workspace.min_dist(x);
        let i = i.ok_or(Error::EmptyWorkspace)?;
        let g = self.workspace.obstacles[i].dist_gradient(x)?;
        Ok((d, g.transpose()))
    }
}
