//! Plane representation and signed-distance queries.

use nalgebra::{Point3, Vector3};

/// Default tolerance for classification and point coincidence.
///
/// Grid coordinates routinely sit within machine precision of a partition
/// plane, so classification bands every comparison by this epsilon rather
/// than testing against zero. The `*_with_epsilon` variants throughout the
/// crate accept a custom value.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// An oriented plane in 3D space, represented as `normal · point = offset`.
///
/// Equivalently the coefficient form `a·x + b·y + c·z + d = 0` with
/// `(a, b, c) = normal` and `d = -offset`; both construction forms produce
/// the same signed distances.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length. A zero normal is a
    /// malformed plane and a programming error, not a recoverable input.
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Creates a plane from the coefficients of `a·x + b·y + c·z + d = 0`.
    ///
    /// # Panics
    /// Panics if `(a, b, c)` has zero length.
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(Vector3::new(a, b, c), -d)
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the
    /// normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is on the side the normal points to
    /// - Negative: point is on the opposite side
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Projects a point onto the plane (the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: Point3<f64>) -> Point3<f64> {
        point - self.normal * self.signed_distance(point)
    }
}
