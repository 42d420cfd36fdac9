//! BSP tree container and construction.

use crate::{Edge, GeometryError};

use super::node::BspNode;

/// A BSP tree over one polygon's edge set.
///
/// The tree is a private index owned by its polygon: it is built once from a
/// copy of the polygon's edges and answers [`inside_segment`] queries in
/// O(depth) thereafter. It is never updated incrementally; a polygon
/// produced as an intersection result builds a fresh tree.
///
/// [`inside_segment`]: BspTree::inside_segment
#[derive(Debug, Clone)]
pub struct BspTree {
    root: BspNode,
}

impl BspTree {
    /// Builds a tree from an owned, non-empty edge list.
    ///
    /// # Errors
    ///
    /// [`GeometryError::TooFewEdges`] if the list is empty, and
    /// [`GeometryError::SelfIntersectingBoundary`] if the edges mutually
    /// cross (see [`BspNode::build`]).
    pub fn build(edges: Vec<Edge>, epsilon: f64) -> Result<Self, GeometryError> {
        if edges.is_empty() {
            return Err(GeometryError::TooFewEdges(0));
        }
        Ok(Self {
            root: BspNode::build(edges, epsilon)?,
        })
    }

    /// Returns a reference to the root node.
    #[inline]
    pub fn root(&self) -> &BspNode {
        &self.root
    }

    /// Returns the number of edges in the tree.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.root.edge_count()
    }

    /// Returns the maximum depth of the tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the portion of `edge` inside every half-plane of the tree,
    /// i.e. inside the convex region bounded by the owning polygon.
    pub fn inside_segment(&self, edge: &Edge, epsilon: f64) -> Option<Edge> {
        self.root.inside_segment(edge, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FacePoint;
    use nalgebra::Vector3;

    const EPS: f64 = 1e-9;

    fn triangle_edges() -> Vec<Edge> {
        // CCW right triangle in z=0: (0,0) (2,0) (0,2).
        let a = FacePoint::from([0.0, 0.0, 0.0]);
        let b = FacePoint::from([2.0, 0.0, 0.0]);
        let c = FacePoint::from([0.0, 2.0, 0.0]);
        let diag = Vector3::new(1.0, 1.0, 0.0).normalize();
        vec![
            Edge::new(a, b, Vector3::new(0.0, -1.0, 0.0)),
            Edge::new(b, c, diag),
            Edge::new(c, a, Vector3::new(-1.0, 0.0, 0.0)),
        ]
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = BspTree::build(Vec::new(), EPS).unwrap_err();
        assert_eq!(err, GeometryError::TooFewEdges(0));
    }

    #[test]
    fn counts_and_depth() {
        let tree = BspTree::build(triangle_edges(), EPS).unwrap();
        assert_eq!(tree.edge_count(), 3);
        // Convex loop: pure inside chain.
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn delegates_queries_to_the_root() {
        let tree = BspTree::build(triangle_edges(), EPS).unwrap();

        let inside = Edge::new(
            FacePoint::from([0.2, 0.2, 0.0]),
            FacePoint::from([0.5, 0.5, 0.0]),
            Vector3::z(),
        );
        let outside = Edge::new(
            FacePoint::from([3.0, 3.0, 0.0]),
            FacePoint::from([4.0, 3.0, 0.0]),
            Vector3::z(),
        );

        assert!(tree.inside_segment(&inside, EPS).is_some());
        assert!(tree.inside_segment(&outside, EPS).is_none());
    }
}
