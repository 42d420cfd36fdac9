//! BSP node: one edge, its half-plane, and the subtrees it induces.

use crate::{Edge, EdgeSide, FacePoint, GeometryError, Plane};

/// A node in the edge-set BSP tree.
///
/// Each node owns one boundary edge and the partition plane derived from it.
/// Edges on the non-positive side of that plane (or coincident with it) live
/// in the `inside` subtree, edges on the strictly positive side in the
/// `outside` subtree. Either subtree exists only if its edge list was
/// non-empty during construction.
#[derive(Debug, Clone)]
pub struct BspNode {
    edge: Edge,
    plane: Plane,
    inside: Option<Box<BspNode>>,
    outside: Option<Box<BspNode>>,
}

impl BspNode {
    /// Recursively builds a node from an owned, non-empty edge list.
    ///
    /// Taking the list by value makes the one-shot nature of construction
    /// explicit: the edges are claimed by nodes and cannot be reused.
    ///
    /// # Errors
    ///
    /// [`GeometryError::SelfIntersectingBoundary`] if any remaining edge
    /// spans a sibling's partition plane. The boundary of a simple,
    /// consistently oriented polygon never produces this; it indicates a
    /// defect in the upstream grid geometry.
    pub fn build(mut edges: Vec<Edge>, epsilon: f64) -> Result<Self, GeometryError> {
        debug_assert!(!edges.is_empty(), "BspNode needs at least one edge");

        let edge = edges.swap_remove(0);
        let plane = edge.partition_plane();

        let mut inside_list = Vec::new();
        let mut outside_list = Vec::new();

        for e in edges {
            match e.classify(&plane, epsilon) {
                EdgeSide::Inside | EdgeSide::Coincident => inside_list.push(e),
                EdgeSide::Outside => outside_list.push(e),
                EdgeSide::Spanning => return Err(GeometryError::SelfIntersectingBoundary),
            }
        }

        let inside = if inside_list.is_empty() {
            None
        } else {
            Some(Box::new(Self::build(inside_list, epsilon)?))
        };
        let outside = if outside_list.is_empty() {
            None
        } else {
            Some(Box::new(Self::build(outside_list, epsilon)?))
        };

        Ok(Self {
            edge,
            plane,
            inside,
            outside,
        })
    }

    /// Returns the boundary edge this node partitions by.
    #[inline]
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    /// Returns the partition plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the inside child subtree, if any.
    #[inline]
    pub fn inside(&self) -> Option<&BspNode> {
        self.inside.as_deref()
    }

    /// Returns the outside child subtree, if any.
    #[inline]
    pub fn outside(&self) -> Option<&BspNode> {
        self.outside.as_deref()
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.inside.is_none() && self.outside.is_none()
    }

    /// Returns the number of edges in this subtree.
    pub fn edge_count(&self) -> usize {
        let mut count = 1;
        if let Some(ref inside) = self.inside {
            count += inside.edge_count();
        }
        if let Some(ref outside) = self.outside {
            count += outside.edge_count();
        }
        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let inside_depth = self.inside.as_ref().map_or(0, |n| n.depth());
        let outside_depth = self.outside.as_ref().map_or(0, |n| n.depth());
        1 + inside_depth.max(outside_depth)
    }

    /// Returns the portion of `edge` that lies inside every half-plane of
    /// this subtree, or `None` if nothing does.
    pub fn inside_segment(&self, edge: &Edge, epsilon: f64) -> Option<Edge> {
        match edge.classify(&self.plane, epsilon) {
            EdgeSide::Inside | EdgeSide::Coincident => match self.inside {
                Some(ref child) => child.inside_segment(edge, epsilon),
                None => Some(edge.clone()),
            },
            EdgeSide::Outside => None,
            EdgeSide::Spanning => {
                let clipped = self.clip_to_inside(edge, epsilon)?;
                match self.inside {
                    Some(ref child) => child.inside_segment(&clipped, epsilon),
                    None => Some(clipped),
                }
            }
        }
    }

    /// Clips a spanning edge to the inside half of this node's plane.
    ///
    /// The split vertex is interpolated at `s = -d_begin / (normal · v)` and
    /// records which two edges generated it. Returns `None` when the split
    /// lands on the already-inside endpoint, so a grazing edge never yields
    /// a zero-length segment.
    fn clip_to_inside(&self, edge: &Edge, epsilon: f64) -> Option<Edge> {
        let a = edge.begin();
        let b = edge.end();
        let d_begin = self.plane.signed_distance(a.position());
        let v = edge.direction();

        let denom = self.plane.normal().dot(&v);
        // A spanning edge always has |denom| > 2*epsilon, since the signed
        // distances differ by denom and sit beyond epsilon on opposite
        // sides. Guard anyway rather than divide toward infinity.
        if denom.abs() <= epsilon {
            return Some(edge.clone());
        }

        let s = -d_begin / denom;
        let split = FacePoint::from_split(
            a.position() + v * s,
            edge.index(),
            self.edge.index(),
        );

        if d_begin < 0.0 {
            // Begin inside, end outside: keep [begin, split].
            if split.coincident(a, epsilon) {
                return None;
            }
            Some(edge.with_endpoints(*a, split))
        } else {
            // Begin outside, end inside: keep [split, end].
            if split.coincident(b, epsilon) {
                return None;
            }
            Some(edge.with_endpoints(split, *b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    const EPS: f64 = 1e-9;

    /// The edges of the unit square in the z=0 plane, counterclockwise,
    /// with outward in-plane normals and topology indices 0..4.
    fn unit_square_edges() -> Vec<Edge> {
        vec![
            Edge::indexed(
                FacePoint::from([0.0, 0.0, 0.0]),
                FacePoint::from([1.0, 0.0, 0.0]),
                Vector3::new(0.0, -1.0, 0.0),
                0,
            ),
            Edge::indexed(
                FacePoint::from([1.0, 0.0, 0.0]),
                FacePoint::from([1.0, 1.0, 0.0]),
                Vector3::new(1.0, 0.0, 0.0),
                1,
            ),
            Edge::indexed(
                FacePoint::from([1.0, 1.0, 0.0]),
                FacePoint::from([0.0, 1.0, 0.0]),
                Vector3::new(0.0, 1.0, 0.0),
                2,
            ),
            Edge::indexed(
                FacePoint::from([0.0, 1.0, 0.0]),
                FacePoint::from([0.0, 0.0, 0.0]),
                Vector3::new(-1.0, 0.0, 0.0),
                3,
            ),
        ]
    }

    fn query(a: [f64; 3], b: [f64; 3]) -> Edge {
        Edge::new(FacePoint::from(a), FacePoint::from(b), Vector3::z())
    }

    #[test]
    fn convex_loop_builds_an_inside_chain() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();

        // Every other edge of a convex CCW loop is inside each half-plane,
        // so the tree is a chain of inside children.
        assert_eq!(node.edge_count(), 4);
        assert_eq!(node.depth(), 4);

        let mut current = Some(&node);
        while let Some(n) = current {
            assert!(n.outside().is_none());
            current = n.inside();
        }
    }

    #[test]
    fn fully_inside_edge_returned_unchanged() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        let e = query([0.2, 0.5, 0.0], [0.8, 0.5, 0.0]);

        let seg = node.inside_segment(&e, EPS).unwrap();
        assert!(seg.coincides_with(&e, EPS));
    }

    #[test]
    fn fully_outside_edge_yields_nothing() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        let e = query([2.0, 0.5, 0.0], [3.0, 0.5, 0.0]);

        assert!(node.inside_segment(&e, EPS).is_none());
    }

    #[test]
    fn crossing_edge_is_clipped_to_the_boundary() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        // Enters through x=1 at y=0.5.
        let e = query([2.0, 0.5, 0.0], [0.5, 0.5, 0.0]);

        let seg = node.inside_segment(&e, EPS).unwrap();
        assert_abs_diff_eq!(seg.begin().position().x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.begin().position().y, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.end().position().x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.length(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn edge_crossing_the_whole_polygon_is_clipped_on_both_sides() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        let e = query([-1.0, 0.5, 0.0], [2.0, 0.5, 0.0]);

        let seg = node.inside_segment(&e, EPS).unwrap();
        assert_abs_diff_eq!(seg.begin().position().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seg.end().position().x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn split_vertex_records_generating_edges() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        // Indexed query edge crossing the x=1 boundary (edge index 1).
        let e = Edge::indexed(
            FacePoint::from([2.0, 0.5, 0.0]),
            FacePoint::from([0.5, 0.5, 0.0]),
            Vector3::z(),
            7,
        );

        let seg = node.inside_segment(&e, EPS).unwrap();
        assert_eq!(seg.begin().source_edges(), Some((7, 1)));
        assert_eq!(seg.index(), Some(7));
    }

    #[test]
    fn grazing_edge_never_yields_a_zero_length_segment() {
        let node = BspNode::build(unit_square_edges(), EPS).unwrap();
        // Touches the square only at the corner (1, 0).
        let e = query([1.0, 0.0, 0.0], [2.0, 1.0, 0.0]);

        assert!(node.inside_segment(&e, EPS).is_none());
    }

    #[test]
    fn crossing_boundary_edges_fail_construction() {
        // Two edges crossing at the origin, normals chosen so each spans
        // the other's partition plane.
        let edges = vec![
            Edge::new(
                FacePoint::from([-1.0, 0.0, 0.0]),
                FacePoint::from([1.0, 0.0, 0.0]),
                Vector3::new(0.0, -1.0, 0.0),
            ),
            Edge::new(
                FacePoint::from([0.0, -1.0, 0.0]),
                FacePoint::from([0.0, 1.0, 0.0]),
                Vector3::new(1.0, 0.0, 0.0),
            ),
        ];

        let err = BspNode::build(edges, EPS).unwrap_err();
        assert_eq!(err, GeometryError::SelfIntersectingBoundary);
    }
}
