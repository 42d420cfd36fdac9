//! Exact overlap computation between reservoir grid cell faces.
//!
//! Adjacent, independently specified corner-point grid blocks leave faulted
//! or non-matching faces that do not align node for node. To build the
//! non-neighbour connections of an unstructured simulation mesh, the mesh
//! generator needs the exact overlap between two such faces, each given as
//! a closed counterclockwise loop of 3D points.
//!
//! Each [`Polygon`] indexes its own edge set with a binary space partition
//! ([`BspTree`]): every edge contributes a half-plane through its begin
//! point, oriented by its outward normal, and the polygon interior is the
//! intersection of those half-planes. "Which part of this edge lies inside
//! me?" is then a single descent of the tree, and polygon∩polygon overlap
//! is two batched queries plus loop reconstruction:
//!
//! ```
//! use face_clip::{FacePoint, Polygon};
//!
//! let a = Polygon::new(vec![
//!     FacePoint::from([0.0, 0.0, 0.0]),
//!     FacePoint::from([1.0, 0.0, 0.0]),
//!     FacePoint::from([1.0, 1.0, 0.0]),
//!     FacePoint::from([0.0, 1.0, 0.0]),
//! ])?;
//! let b = Polygon::new(vec![
//!     FacePoint::from([0.5, 0.0, 0.0]),
//!     FacePoint::from([1.5, 0.0, 0.0]),
//!     FacePoint::from([1.5, 1.0, 0.0]),
//!     FacePoint::from([0.5, 1.0, 0.0]),
//! ])?;
//!
//! let overlap = a.intersect(&b)?.expect("faces overlap");
//! assert!((overlap.area() - 0.5).abs() < 1e-9);
//! # Ok::<(), face_clip::GeometryError>(())
//! ```
//!
//! `Ok(None)` from [`Polygon::intersect`] is the defined "no material
//! overlap" outcome; errors indicate data-quality defects in the upstream
//! grid. Everything here is pure and single-threaded — callers may batch
//! independent face pairs across threads freely, since no polygon shares
//! state with another.
//!
//! Out of scope, by design: grid file parsing, corner-point index
//! arithmetic, cell volumes, and the flow solver. This crate only reconciles
//! face geometry.

mod bsp;
mod edge;
mod error;
mod plane;
mod point;
mod polygon;

pub use bsp::{BspNode, BspTree};
pub use edge::{Edge, EdgeSide};
pub use error::GeometryError;
pub use plane::{GEOMETRY_EPSILON, Plane};
pub use point::FacePoint;
pub use polygon::Polygon;
