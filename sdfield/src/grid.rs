//! World ↔ grid coordinate mapping and rasterization utilities
//!
//! A [`PixelMap`] is a stateless transform between continuous world
//! coordinates and discrete grid indices; a [`Meshgrid`] is the matching
//! regular grid of cell-center sample coordinates.  [`occupancy_map`]
//! rasterizes a workspace's nearest-obstacle field into a binary grid.
use crate::{workspace::Workspace, Error};
use nalgebra::{DMatrix, DVector, Scalar, Vector2};

/// Axis-aligned extent `[x_min, x_max] × [y_min, y_max]`
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    /// Span along the x axis
    pub fn x(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Span along the y axis
    pub fn y(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// `n` evenly spaced values from `start` to `stop`, both inclusive
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> DVector<f64> {
    if n == 1 {
        return DVector::from_element(1, start);
    }
    let step = (stop - start) / (n - 1) as f64;
    DVector::from_fn(n, |i, _| start + step * i as f64)
}

////////////////////////////////////////////////////////////////////////////////

/// Regular grid of cell-center sample coordinates
///
/// Stores one coordinate vector per axis; cell `(i, j)` sits at
/// `(x[i], y[j])`, i.e. the first index runs along x.  This is the
/// stacked-coordinate layout that grid queries
/// ([`Shape::dist_field`](crate::shape::Shape::dist_field),
/// [`Workspace::min_dist_field`](crate::workspace::Workspace::min_dist_field))
/// evaluate over, cell by cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Meshgrid {
    x: DVector<f64>,
    y: DVector<f64>,
}

impl Meshgrid {
    pub(crate) fn new(x: DVector<f64>, y: DVector<f64>) -> Self {
        Self { x, y }
    }

    /// Number of cells along each axis
    pub fn shape(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    /// World coordinates of cell `(i, j)`
    pub fn point(&self, i: usize, j: usize) -> Vector2<f64> {
        Vector2::new(self.x[i], self.y[j])
    }

    /// Evaluates `f` at every cell center
    pub fn map<T, F>(&self, f: F) -> DMatrix<T>
    where
        T: Scalar,
        F: Fn(Vector2<f64>) -> T,
    {
        DMatrix::from_fn(self.x.len(), self.y.len(), |i, j| f(self.point(i, j)))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Bijective mapping between world coordinates and grid cell indices
///
/// Cell `(i, j)` covers the square of side `resolution` whose lower corner
/// is `(x_min + i·resolution, y_min + j·resolution)`;
/// [`grid_to_world`](PixelMap::grid_to_world) returns its center.  The two
/// mappings round-trip: `world_to_grid(grid_to_world(p)) == p` for any
/// cell index `p`, and `grid_to_world(world_to_grid(x))` lands within half
/// a cell of `x`.
///
/// ```
/// # use nalgebra::Vector2;
/// use sdfield::{Extent, PixelMap};
///
/// let extent = Extent { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
/// let m = PixelMap::new(0.1, extent);
/// assert_eq!(m.nb_cells_x, 10);
///
/// let p = m.grid_to_world(&Vector2::new(3, 7));
/// assert_eq!(m.world_to_grid(&p), Vector2::new(3, 7));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelMap {
    /// Side length of one grid cell, in world units
    pub resolution: f64,
    /// World-coordinate region covered by the grid
    pub extent: Extent,
    /// Number of cells along the x axis
    pub nb_cells_x: usize,
    /// Number of cells along the y axis
    pub nb_cells_y: usize,
    /// Center of cell `(0, 0)`
    origin: Vector2<f64>,
}

impl PixelMap {
    /// Builds the mapping for a given cell size and world extent
    pub fn new(resolution: f64, extent: Extent) -> Self {
        let origin = Vector2::new(extent.x_min, extent.y_min)
            + Vector2::repeat(0.5 * resolution);
        Self {
            resolution,
            extent,
            nb_cells_x: (extent.x() / resolution).round() as usize,
            nb_cells_y: (extent.y() / resolution).round() as usize,
            origin,
        }
    }

    /// Index of the grid cell containing the world point `x`
    ///
    /// Points outside the extent map to out-of-range (possibly negative)
    /// indices.
    pub fn world_to_grid(&self, x: &Vector2<f64>) -> Vector2<i64> {
        let lower = Vector2::new(self.extent.x_min, self.extent.y_min);
        ((x - lower) / self.resolution).map(|c| c.floor() as i64)
    }

    /// World coordinates of the center of grid cell `p`
    pub fn grid_to_world(&self, p: &Vector2<i64>) -> Vector2<f64> {
        self.resolution * p.cast::<f64>() + self.origin
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Rasterizes a workspace into an `n × n` binary occupancy grid
///
/// Cell `(i, j)` is `true` exactly when the signed distance to the nearest
/// obstacle at that cell's center is negative, i.e. when
/// `workspace.min_dist(&grid_to_world([i, j])).0 < 0`.
pub fn occupancy_map(
    n: usize,
    workspace: &Workspace,
) -> Result<DMatrix<bool>, Error> {
    let grid = workspace.bounds.meshgrid(n)?;
    let (dist, _) = workspace.min_dist_field(&grid);
    Ok(dist.map(|d| d < 0.0))
}
