//! Universal error type for the crate
use thiserror::Error;

/// Universal error type for `sdfield`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operation is not implemented for this shape variant
    ///
    /// Capability gaps (e.g. the ellipse's missing analytic derivatives)
    /// are reported as values rather than panics so that callers can
    /// branch on them.
    #[error("`{op}` is not implemented for `{shape}`")]
    Unsupported {
        /// Name of the shape variant
        shape: &'static str,
        /// Name of the unsupported operation
        op: &'static str,
    },

    /// Workspace has no obstacles, so there is no nearest-obstacle field
    #[error("workspace has no obstacles")]
    EmptyWorkspace,

    /// Grid operations require a square bounding box
    #[error("bounding box is not square ({0} x {1})")]
    NonSquareBox(f64, f64),

    /// Interval limits are inverted or empty
    #[error("invalid interval: {0} is not below {1}")]
    EmptyInterval(f64, f64),
}
