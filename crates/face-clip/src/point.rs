//! Grid-face vertices with topology bookkeeping.

use nalgebra::Point3;

/// A vertex of a grid cell face.
///
/// Wraps a 3D position together with the bookkeeping the mesh generator
/// needs downstream:
///
/// - `global_id`: the grid's global node index, when the vertex came
///   straight from the corner-point grid;
/// - `source_edges`: for vertices produced by clipping, the topology indices
///   of the two edges whose crossing generated the point. Recorded only when
///   both generating edges carry an index.
///
/// Positions are immutable after creation; tolerance-based comparison goes
/// through [`FacePoint::coincident`], never `==`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePoint {
    position: Point3<f64>,
    global_id: Option<u32>,
    source_edges: Option<(u32, u32)>,
}

impl FacePoint {
    /// Creates a vertex with no topology information attached.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            global_id: None,
            source_edges: None,
        }
    }

    /// Creates a vertex carrying the grid's global node index.
    pub fn indexed(position: Point3<f64>, global_id: u32) -> Self {
        Self {
            position,
            global_id: Some(global_id),
            source_edges: None,
        }
    }

    /// Creates a vertex produced by splitting an edge against a partition
    /// plane.
    ///
    /// Provenance is recorded only when both generating edges carry a
    /// topology index; faces built without indices get index-free points.
    pub fn from_split(position: Point3<f64>, split: Option<u32>, splitter: Option<u32>) -> Self {
        Self {
            position,
            global_id: None,
            source_edges: split.zip(splitter),
        }
    }

    /// Returns the 3D position.
    #[inline]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Returns the grid's global node index, if this vertex has one.
    #[inline]
    pub fn global_id(&self) -> Option<u32> {
        self.global_id
    }

    /// Returns the indices of the two edges whose crossing generated this
    /// vertex, if it was produced by clipping.
    #[inline]
    pub fn source_edges(&self) -> Option<(u32, u32)> {
        self.source_edges
    }

    /// Returns `true` if the two vertices lie within `epsilon` of each other.
    #[inline]
    pub fn coincident(&self, other: &FacePoint, epsilon: f64) -> bool {
        (self.position - other.position).norm() <= epsilon
    }
}

impl From<Point3<f64>> for FacePoint {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for FacePoint {
    fn from(coords: [f64; 3]) -> Self {
        Self::new(Point3::new(coords[0], coords[1], coords[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vertex_has_no_topology() {
        let p = FacePoint::new(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p.position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p.global_id(), None);
        assert_eq!(p.source_edges(), None);
    }

    #[test]
    fn indexed_vertex_keeps_global_id() {
        let p = FacePoint::indexed(Point3::origin(), 42);
        assert_eq!(p.global_id(), Some(42));
    }

    #[test]
    fn split_provenance_needs_both_indices() {
        let at = Point3::new(0.5, 0.0, 0.0);

        let full = FacePoint::from_split(at, Some(3), Some(7));
        assert_eq!(full.source_edges(), Some((3, 7)));

        let partial = FacePoint::from_split(at, Some(3), None);
        assert_eq!(partial.source_edges(), None);
    }

    #[test]
    fn coincident_respects_epsilon() {
        let a = FacePoint::new(Point3::new(0.0, 0.0, 0.0));
        let b = FacePoint::new(Point3::new(0.0, 0.0, 1e-10));
        let c = FacePoint::new(Point3::new(0.0, 0.0, 1e-3));

        assert!(a.coincident(&b, 1e-9));
        assert!(!a.coincident(&c, 1e-9));
        assert!(a.coincident(&c, 1e-2));
    }
}
