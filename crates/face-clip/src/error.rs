//! Error types for polygon construction and intersection.

use thiserror::Error;

/// Errors raised while building a polygon or its BSP index.
///
/// Every variant indicates a data-quality defect in the upstream grid
/// geometry. The computation is deterministic and pure, so none of these are
/// transient: retrying the same input fails the same way. Callers should
/// treat them as defects to report, not conditions to recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A polygon needs at least three edges to bound an area.
    #[error("polygon needs at least 3 edges, got {0}")]
    TooFewEdges(usize),

    /// Two consecutive input vertices coincide, leaving an edge with no
    /// direction to derive a normal from.
    #[error("vertices {0} and {1} coincide, producing a zero-length edge")]
    ZeroLengthEdge(usize, usize),

    /// Consecutive edges of an ordered loop do not share an endpoint.
    #[error("edges must be ordered and connected: edge {0} does not end where edge {1} begins")]
    DisconnectedLoop(usize, usize),

    /// An unordered edge set could not be chained into a single closed loop.
    #[error("edge set does not form a closed polygon")]
    OpenLoop,

    /// Two boundary edges of the same polygon cross each other.
    #[error("polygon boundary edges intersect each other")]
    SelfIntersectingBoundary,

    /// The first two edges are collinear, so no polygon normal exists.
    #[error("cannot derive a polygon normal from collinear leading edges")]
    DegenerateNormal,
}
