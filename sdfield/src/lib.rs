//! `sdfield` is an analytic-geometry layer for 2D workspaces populated
//! with obstacles.
//!
//! Every obstacle shape exposes a **signed distance function** together
//! with its exact first and second derivatives.  By convention, if
//! `d(x) < 0` then `x` is **inside** the shape; if `d(x) > 0` it is
//! **outside**; otherwise it lies on the boundary.  Downstream consumers
//! (trajectory optimizers, path-search costmaps) rely on the derivatives
//! matching finite differences to numerical tolerance, so correctness of
//! the analytic formulas — including their branch selection — is the
//! main contract of this crate.
//!
//! # Shapes
//! The closed set of shapes lives in [`shape`]: [`Circle`], [`Ellipse`],
//! [`Segment`] and [`Rect`] (an axis-aligned box built from four edge
//! segments).  All of them implement the [`Shape`] capability trait;
//! operations without a closed form for a given variant return
//! [`Error::Unsupported`] rather than panicking.
//!
//! ```
//! use nalgebra::Vector2;
//! use sdfield::{Circle, Shape};
//!
//! let c = Circle::new(Vector2::new(0.0, 0.0), 0.2);
//! assert_eq!(c.dist_from_border(&Vector2::new(0.5, 0.0)), 0.3);
//! assert!(c.is_inside(&Vector2::new(0.1, 0.0)));
//! ```
//!
//! # Workspaces
//! A [`Workspace`] owns a bounding box and an ordered list of obstacles;
//! [`Workspace::min_dist`] returns the distance to the nearest obstacle
//! along with its index, pointwise or over a whole sampling grid.
//! [`occupancy_map`] rasterizes that field into a binary grid:
//!
//! ```
//! use nalgebra::Vector2;
//! use sdfield::{occupancy_map, Workspace};
//!
//! let mut w = Workspace::default();
//! w.add_circle(Vector2::new(0.0, 0.0), 0.3);
//!
//! let occ = occupancy_map(16, &w)?;
//! assert!(occ[(8, 8)]);   // cell near the circle's center
//! assert!(!occ[(0, 0)]);  // corner cell, outside
//! # Ok::<(), sdfield::Error>(())
//! ```
//!
//! # Differentiable maps
//! [`SignedDistanceMap`] and [`WorkspaceDistanceMap`] expose a shape or a
//! workspace through the uniform [`DifferentiableMap`] contract
//! (`forward` / `jacobian` / `hessian`) consumed by gradient-based
//! optimizers:
//!
//! ```
//! use nalgebra::Vector2;
//! use sdfield::{Circle, DifferentiableMap, SignedDistanceMap};
//!
//! let c = Circle::new(Vector2::zeros(), 0.2);
//! let f = SignedDistanceMap::new(&c);
//! let j = f.jacobian(&Vector2::new(0.5, 0.0))?;
//! assert_eq!(j, nalgebra::RowVector2::new(1.0, 0.0));
//! # Ok::<(), sdfield::Error>(())
//! ```
//!
//! The workspace field is non-smooth exactly where two obstacles are
//! equidistant; derivative queries there take the earliest-indexed
//! obstacle (a deterministic tie-break, not a continuity repair).
#![warn(missing_docs)]

pub mod diff;
mod error;
pub mod grid;
pub mod shape;
pub mod workspace;

pub use diff::{DifferentiableMap, SignedDistanceMap, WorkspaceDistanceMap};
pub use error::Error;
pub use grid::{occupancy_map, Extent, Meshgrid, PixelMap};
pub use shape::{Circle, Ellipse, Obstacle, Rect, Segment, Shape};
pub use workspace::{
    sample_collision_free, sample_workspace, Workspace,
};
