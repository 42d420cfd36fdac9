//! Oriented face edges and their classification against partition planes.

use nalgebra::Vector3;

use crate::{FacePoint, Plane};

/// Where an edge lies relative to a partition plane.
///
/// "Inside" is the non-positive side of the plane normal. The convention is
/// deliberately asymmetric: polygon edge normals point outward, so the
/// interior of the owning polygon is the intersection of the non-positive
/// half-planes of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    /// Both endpoints are on the non-positive side (on-plane endpoints
    /// count as inside when the other endpoint is strictly inside).
    Inside,
    /// Both endpoints are on the strictly positive side, or the edge only
    /// touches the plane at its begin point.
    Outside,
    /// Both endpoints lie on the plane (within epsilon).
    Coincident,
    /// The endpoints lie strictly on opposite sides.
    Spanning,
}

/// An oriented segment between two face vertices.
///
/// Every edge carries a unit in-plane outward normal, required at
/// construction, and an optional topology index assigned by the mesh
/// generator. Edges are immutable; clipping produces new edges that inherit
/// the original normal and index.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    begin: FacePoint,
    end: FacePoint,
    normal: Vector3<f64>,
    index: Option<u32>,
}

impl Edge {
    /// Creates a new edge. The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(begin: FacePoint, end: FacePoint, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Edge normal cannot be zero");
        Self {
            begin,
            end,
            normal: normal / norm,
            index: None,
        }
    }

    /// Creates a new edge carrying a topology index.
    pub fn indexed(begin: FacePoint, end: FacePoint, normal: Vector3<f64>, index: u32) -> Self {
        Self {
            index: Some(index),
            ..Self::new(begin, end, normal)
        }
    }

    /// Returns a copy of this edge with different endpoints, keeping the
    /// normal and topology index. Used when clipping.
    pub(crate) fn with_endpoints(&self, begin: FacePoint, end: FacePoint) -> Self {
        Self {
            begin,
            end,
            normal: self.normal,
            index: self.index,
        }
    }

    /// Returns a copy of this edge with a different normal, keeping the
    /// endpoints and topology index.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub(crate) fn with_normal(&self, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Edge normal cannot be zero");
        Self {
            begin: self.begin,
            end: self.end,
            normal: normal / norm,
            index: self.index,
        }
    }

    /// Returns the begin vertex.
    #[inline]
    pub fn begin(&self) -> &FacePoint {
        &self.begin
    }

    /// Returns the end vertex.
    #[inline]
    pub fn end(&self) -> &FacePoint {
        &self.end
    }

    /// Returns the unit in-plane outward normal.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the topology index assigned by the mesh generator, if any.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Returns the direction vector from begin to end (not normalized).
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.end.position() - self.begin.position()
    }

    /// Returns the length of the edge.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Returns the partition plane through the begin point, oriented by
    /// this edge's normal.
    pub fn partition_plane(&self) -> Plane {
        Plane::from_point_and_normal(self.begin.position(), self.normal)
    }

    /// Classifies this edge against a partition plane.
    ///
    /// Signed distances of the two endpoints are banded by `epsilon`; an
    /// edge that merely touches the plane at one endpoint never classifies
    /// as [`EdgeSide::Spanning`], so clipping cannot produce a zero-length
    /// inside part.
    pub fn classify(&self, plane: &Plane, epsilon: f64) -> EdgeSide {
        let d_begin = plane.signed_distance(self.begin.position());
        let d_end = plane.signed_distance(self.end.position());

        if d_end > epsilon {
            if d_begin < -epsilon {
                EdgeSide::Spanning
            } else {
                // End outside; begin outside or only touching the plane.
                EdgeSide::Outside
            }
        } else if d_end < -epsilon {
            if d_begin > epsilon {
                EdgeSide::Spanning
            } else {
                EdgeSide::Inside
            }
        } else if d_begin < -epsilon {
            EdgeSide::Inside
        } else if d_begin > epsilon {
            EdgeSide::Outside
        } else {
            EdgeSide::Coincident
        }
    }

    /// Returns `true` if the two edges connect the same pair of endpoints
    /// within `epsilon`, regardless of direction: `(a, b)` equals `(b, a)`.
    pub fn coincides_with(&self, other: &Edge, epsilon: f64) -> bool {
        (self.begin.coincident(&other.begin, epsilon) && self.end.coincident(&other.end, epsilon))
            || (self.begin.coincident(&other.end, epsilon)
                && self.end.coincident(&other.begin, epsilon))
    }
}
