//! Closed face polygons and polygon-polygon overlap.

use nalgebra::{Point3, Vector3};

use crate::{BspTree, Edge, FacePoint, GeometryError, GEOMETRY_EPSILON, Plane};

/// A grid cell face: a closed, counterclockwise loop of at least three
/// connected edges in a common plane.
///
/// On construction the polygon derives its unit normal (cross product of the
/// first two edge directions), assigns every edge an in-plane outward
/// normal, computes its area by fan triangulation, and builds a private
/// [`BspTree`] over a copy of its edges. Construction either yields a fully
/// built polygon or an error; no partial object escapes.
///
/// # Limitations
///
/// Vertices are not verified for coplanarity; visibly non-planar input
/// produces inconsistent per-edge normals. The edge-set BSP is exact only
/// for convex loops (a convex polygon equals the intersection of the
/// half-planes through its edges). Grid cell faces are near-convex
/// quadrilaterals in practice; convexity is checked in debug builds only.
#[derive(Debug, Clone)]
pub struct Polygon {
    edges: Vec<Edge>,
    normal: Vector3<f64>,
    area: f64,
    tree: BspTree,
    epsilon: f64,
}

impl Polygon {
    /// Builds a polygon from an ordered counterclockwise vertex loop, using
    /// [`GEOMETRY_EPSILON`].
    pub fn new(vertices: Vec<FacePoint>) -> Result<Self, GeometryError> {
        Self::with_epsilon(vertices, GEOMETRY_EPSILON)
    }

    /// Builds a polygon from an ordered counterclockwise vertex loop,
    /// synthesizing one edge per consecutive vertex pair (wrapping at the
    /// end). The given tolerance is captured and used for all of this
    /// polygon's classifications and queries.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::TooFewEdges`] for fewer than three vertices;
    /// - [`GeometryError::ZeroLengthEdge`] when consecutive vertices
    ///   coincide within `epsilon`;
    /// - [`GeometryError::DegenerateNormal`] when the first two edges are
    ///   collinear.
    pub fn with_epsilon(vertices: Vec<FacePoint>, epsilon: f64) -> Result<Self, GeometryError> {
        let n = vertices.len();
        if n < 3 {
            return Err(GeometryError::TooFewEdges(n));
        }
        for i in 0..n {
            let j = (i + 1) % n;
            if vertices[i].coincident(&vertices[j], epsilon) {
                return Err(GeometryError::ZeroLengthEdge(i, j));
            }
        }

        let d0 = vertices[1].position() - vertices[0].position();
        let d1 = vertices[2].position() - vertices[1].position();
        let normal = loop_normal(d0, d1, epsilon)?;

        let edges = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let direction = vertices[j].position() - vertices[i].position();
                Edge::new(vertices[i], vertices[j], direction.cross(&normal))
            })
            .collect();

        Self::assemble(edges, normal, epsilon)
    }

    /// Builds a polygon from an ordered, connected edge loop.
    ///
    /// The polygon normal, per-edge outward normals, area, and BSP tree are
    /// all recomputed; only the edges' endpoints and topology indices are
    /// taken as given.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::TooFewEdges`] for fewer than three edges;
    /// - [`GeometryError::ZeroLengthEdge`] when an edge's endpoints
    ///   coincide within `epsilon`;
    /// - [`GeometryError::DisconnectedLoop`] when an edge does not end
    ///   where its successor begins (within `epsilon`);
    /// - [`GeometryError::DegenerateNormal`] when the first two edges are
    ///   collinear.
    pub fn from_edges(edges: Vec<Edge>, epsilon: f64) -> Result<Self, GeometryError> {
        let n = edges.len();
        if n < 3 {
            return Err(GeometryError::TooFewEdges(n));
        }
        // A zero-length edge would pass the closure check (its endpoints
        // coincide with both neighbours) but has no direction to derive an
        // outward normal from.
        for (i, e) in edges.iter().enumerate() {
            if e.length() <= epsilon {
                return Err(GeometryError::ZeroLengthEdge(i, (i + 1) % n));
            }
        }
        for i in 0..n {
            let j = (i + 1) % n;
            if !edges[i].end().coincident(edges[j].begin(), epsilon) {
                return Err(GeometryError::DisconnectedLoop(i, j));
            }
        }

        let normal = loop_normal(edges[0].direction(), edges[1].direction(), epsilon)?;
        let edges = edges
            .into_iter()
            .map(|e| {
                let outward = e.direction().cross(&normal);
                e.with_normal(outward)
            })
            .collect();

        Self::assemble(edges, normal, epsilon)
    }

    /// Finishes construction: area, convexity check, BSP tree over a copy
    /// of the edges.
    fn assemble(edges: Vec<Edge>, normal: Vector3<f64>, epsilon: f64) -> Result<Self, GeometryError> {
        debug_assert!(
            is_convex(&edges, epsilon),
            "Polygon must be convex for edge-set BSP containment"
        );

        let area = fan_area(&edges);
        let tree = BspTree::build(edges.clone(), epsilon)?;

        Ok(Self {
            edges,
            normal,
            area,
            tree,
            epsilon,
        })
    }

    /// Returns the enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Returns the unit polygon normal (right-hand rule over the
    /// counterclockwise loop).
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the edge loop.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the vertices of the loop, one per edge.
    pub fn vertices(&self) -> impl Iterator<Item = &FacePoint> {
        self.edges.iter().map(|e| e.begin())
    }

    /// Returns the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Computes the centroid of the vertex loop. The mesh generator uses
    /// this as the connection midpoint between reconciled faces.
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices().map(|p| p.position().coords).sum();
        Point3::from(sum / self.edges.len() as f64)
    }

    /// Returns the tolerance this polygon was built with.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the plane this polygon lies on (through the first vertex).
    pub fn plane(&self) -> Plane {
        Plane::from_point_and_normal(self.edges[0].begin().position(), self.normal)
    }

    /// Returns the portion of `edge` that lies inside this polygon, or
    /// `None` if nothing does.
    pub fn inside_segment(&self, edge: &Edge) -> Option<Edge> {
        self.tree.inside_segment(edge, self.epsilon)
    }

    /// Computes the overlap between two coplanar polygons.
    ///
    /// Every edge of each polygon is clipped to the inside of the other;
    /// the surviving unique pieces are chained into a closed loop and built
    /// into a fresh polygon. The receiving polygon's tolerance is used
    /// throughout.
    ///
    /// Returns `Ok(None)` when the overlap is empty or degenerate (fewer
    /// than three distinct boundary pieces) — shared corners and shared
    /// edges without shared interior are not material overlap.
    ///
    /// # Errors
    ///
    /// [`GeometryError::OpenLoop`] when the collected pieces do not form a
    /// single closed loop, which indicates defective upstream geometry
    /// (e.g. non-coplanar or non-convex faces). Errors propagate; there is
    /// no local recovery.
    pub fn intersect(&self, other: &Polygon) -> Result<Option<Polygon>, GeometryError> {
        let epsilon = self.epsilon;
        let mut pieces: Vec<Edge> = Vec::new();

        for e in &self.edges {
            if let Some(seg) = other.tree.inside_segment(e, epsilon) {
                push_unique(&mut pieces, seg, epsilon);
            }
        }
        for e in &other.edges {
            if let Some(seg) = self.tree.inside_segment(e, epsilon) {
                push_unique(&mut pieces, seg, epsilon);
            }
        }

        if pieces.len() < 3 {
            return Ok(None);
        }

        let sorted = chain_loop(pieces, epsilon)?;
        Self::from_edges(sorted, epsilon).map(Some)
    }
}

/// Derives the unit loop normal from the first two edge directions.
fn loop_normal(d0: Vector3<f64>, d1: Vector3<f64>, epsilon: f64) -> Result<Vector3<f64>, GeometryError> {
    // Normalize first so the collinearity test is scale independent.
    let n0 = d0.norm();
    let n1 = d1.norm();
    if n0 <= epsilon || n1 <= epsilon {
        return Err(GeometryError::DegenerateNormal);
    }
    let cross = (d0 / n0).cross(&(d1 / n1));
    if cross.norm() <= epsilon {
        return Err(GeometryError::DegenerateNormal);
    }
    Ok(cross.normalize())
}

/// Area by fan triangulation from the first vertex.
fn fan_area(edges: &[Edge]) -> f64 {
    let origin = edges[0].begin().position();
    edges[1..edges.len() - 1]
        .iter()
        .map(|e| {
            let v1 = e.begin().position() - origin;
            let v2 = e.end().position() - origin;
            v1.cross(&v2).norm() / 2.0
        })
        .sum()
}

/// Every vertex must lie on the non-positive side of every edge's
/// partition plane. Quadratic, debug builds only.
fn is_convex(edges: &[Edge], epsilon: f64) -> bool {
    edges.iter().all(|e| {
        let plane = e.partition_plane();
        edges
            .iter()
            .all(|other| plane.signed_distance(other.begin().position()) <= epsilon)
    })
}

/// Appends a piece unless it is degenerate or already collected
/// (direction-independent tolerance equality).
fn push_unique(pieces: &mut Vec<Edge>, piece: Edge, epsilon: f64) {
    if piece.length() <= epsilon {
        return;
    }
    if pieces.iter().any(|p| p.coincides_with(&piece, epsilon)) {
        return;
    }
    pieces.push(piece);
}

/// Chains an unordered edge set into one closed loop: starting from an
/// arbitrary edge, repeatedly appends the unvisited edge whose begin point
/// coincides with the current end point.
fn chain_loop(mut pieces: Vec<Edge>, epsilon: f64) -> Result<Vec<Edge>, GeometryError> {
    let mut sorted = Vec::with_capacity(pieces.len());
    let first = pieces.swap_remove(0);
    let start = *first.begin();
    let mut tail = *first.end();
    sorted.push(first);

    while !pieces.is_empty() {
        let Some(i) = pieces
            .iter()
            .position(|e| e.begin().coincident(&tail, epsilon))
        else {
            return Err(GeometryError::OpenLoop);
        };
        let next = pieces.swap_remove(i);
        tail = *next.end();
        sorted.push(next);
    }

    if !tail.coincident(&start, epsilon) {
        return Err(GeometryError::OpenLoop);
    }
    Ok(sorted)
}
