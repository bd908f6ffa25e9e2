//! Bounded workspaces holding a collection of obstacle shapes
use crate::{
    grid::Meshgrid,
    shape::{Circle, Obstacle, Rect, Segment, Shape},
    Error,
};
use nalgebra::{DMatrix, Vector2};
use rand::Rng;
use rayon::prelude::*;

/// A bounded 2D region populated with obstacles
///
/// Obstacles are identified by their insertion index; nearest-obstacle
/// queries return that index so that callers can dispatch follow-up
/// gradient and Hessian lookups to the winning shape.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Workspace {
    /// Bounding box defining the valid query region and sampling domain
    pub bounds: Rect,
    /// Obstacles, in insertion order
    pub obstacles: Vec<Obstacle>,
}

impl Workspace {
    /// Builds an empty workspace with the given bounding box
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            obstacles: Vec::new(),
        }
    }

    /// Appends an obstacle, returning its index
    pub fn add_obstacle(&mut self, obstacle: impl Into<Obstacle>) -> usize {
        self.obstacles.push(obstacle.into());
        self.obstacles.len() - 1
    }

    /// Appends a circular obstacle
    pub fn add_circle(&mut self, origin: Vector2<f64>, radius: f64) -> usize {
        self.add_obstacle(Circle::new(origin, radius))
    }

    /// Appends a segment obstacle
    pub fn add_segment(
        &mut self,
        origin: Vector2<f64>,
        orientation: f64,
        length: f64,
    ) -> usize {
        self.add_obstacle(Segment::new(origin, orientation, length))
    }

    /// Returns true if `x` is strictly inside any obstacle
    pub fn in_collision(&self, x: &Vector2<f64>) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.dist_from_border(x) < 0.0)
    }

    /// Signed distance to the nearest obstacle, and that obstacle's index
    ///
    /// Obstacles are scanned in insertion order and replaced only on
    /// strict improvement, so ties keep the earliest index.  An empty
    /// workspace yields `(f64::INFINITY, None)`.
    pub fn min_dist(&self, x: &Vector2<f64>) -> (f64, Option<usize>) {
        let mut d_min = f64::INFINITY;
        let mut i_min = None;
        for (i, o) in self.obstacles.iter().enumerate() {
            let d = o.dist_from_border(x);
            if d < d_min {
                d_min = d;
                i_min = Some(i);
            }
        }
        (d_min, i_min)
    }

    /// Nearest-obstacle distance and index over every cell of a grid
    ///
    /// Cells are independent, so they are evaluated in parallel; each cell
    /// runs the same ordered scan as [`min_dist`](Workspace::min_dist) and
    /// the result is identical to the pointwise query.
    pub fn min_dist_field(
        &self,
        grid: &Meshgrid,
    ) -> (DMatrix<f64>, DMatrix<Option<usize>>) {
        let (nx, ny) = grid.shape();
        // Column-major cell order, matching DMatrix storage
        let cells: Vec<(f64, Option<usize>)> = (0..nx * ny)
            .into_par_iter()
            .map(|k| self.min_dist(&grid.point(k % nx, k / nx)))
            .collect();
        let dist = DMatrix::from_iterator(nx, ny, cells.iter().map(|c| c.0));
        let index = DMatrix::from_iterator(nx, ny, cells.iter().map(|c| c.1));
        (dist, index)
    }

    /// Gradient of the nearest-obstacle distance field at `x`
    ///
    /// Looks up the winning obstacle's own gradient, so the result is only
    /// locally valid: the field has a kink wherever two obstacles are
    /// equidistant.
    pub fn min_dist_gradient(
        &self,
        x: &Vector2<f64>,
    ) -> Result<Vector2<f64>, Error> {
        let (_, i) = self.min_dist(x);
        let i = i.ok_or(Error::EmptyWorkspace)?;
        self.obstacles[i].dist_gradient(x)
    }

    /// Contour samples of every obstacle, concatenated
    pub fn all_points(&self) -> Vec<Vector2<f64>> {
        self.obstacles
            .iter()
            .flat_map(|o| o.sampled_points())
            .collect()
    }

    /// World ↔ grid mapping with `n` cells across the bounding box
    pub fn pixel_map(&self, n: usize) -> Result<crate::grid::PixelMap, Error> {
        let extent = self.bounds.extent();
        if extent.x() != extent.y() {
            return Err(Error::NonSquareBox(extent.x(), extent.y()));
        }
        Ok(crate::grid::PixelMap::new(extent.x() / n as f64, extent))
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Samples `n` circles with centers in `[0, 1]²` and radii in `[0, 1)`
pub fn sample_circles<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Circle> {
    (0..n)
        .map(|_| {
            Circle::new(
                Vector2::new(rng.gen::<f64>(), rng.gen::<f64>()),
                rng.gen::<f64>(),
            )
        })
        .collect()
}

/// Samples a workspace populated with random circles
///
/// `radius_parameter` is the maximum circle radius as a fraction of the
/// bounding-box diagonal; radii are drawn uniformly between half that
/// bound and the bound itself.
pub fn sample_workspace<R: Rng + ?Sized>(
    rng: &mut R,
    nb_circles: usize,
    radius_parameter: f64,
) -> Workspace {
    let mut workspace = Workspace::default();
    let max_radius = radius_parameter * workspace.bounds.diag();
    let min_radius = 0.5 * max_radius;
    for _ in 0..nb_circles {
        let center = workspace.bounds.sample_uniform(rng);
        let radius = rng.gen_range(min_radius..max_radius);
        workspace.add_circle(center, radius);
    }
    workspace
}

/// Samples a point at least `margin` away from every obstacle
///
/// Rejection-samples the bounding box; does not terminate if no such
/// point exists.
pub fn sample_collision_free<R: Rng + ?Sized>(
    rng: &mut R,
    workspace: &Workspace,
    margin: f64,
) -> Vector2<f64> {
    loop {
        let p = workspace.bounds.sample_uniform(rng);
        if margin < workspace.min_dist(&p).0 {
            return p;
        }
    }
}
