//! Fundamental geometric types for lifting-surface modelling.
//!
//! The body axes follow the solver convention: x aft, y towards the right
//! wing tip, z up. All lengths are in inches.

use nalgebra::Vector3;
use serde::Serialize;

/// Position in three dimensional space measured in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    /// Distance along the body X axis (aft positive).
    pub x: f64,
    /// Distance along the body Y axis (right positive).
    pub y: f64,
    /// Distance along the body Z axis (up positive).
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Reflect the point through the aircraft plane of symmetry.
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::from(self.to_vector().component_mul(&Vector3::new(1.0, -1.0, 1.0)))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// A leading-edge point of a surface with the local chord and incidence.
///
/// Resolved points are produced once by the station chain and shared by the
/// two panels that meet at them; they are never modified afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedPoint {
    /// Leading-edge position.
    pub position: Point,
    /// Local chord in inches.
    pub chord: f64,
    /// Local incidence in degrees, positive trailing edge up.
    pub incidence_deg: f64,
}

impl ResolvedPoint {
    /// Create a [`ResolvedPoint`] from its parts.
    #[must_use]
    pub const fn new(position: Point, chord: f64, incidence_deg: f64) -> Self {
        Self {
            position,
            chord,
            incidence_deg,
        }
    }

    /// Tangent of the local incidence, as consumed by the solver.
    #[must_use]
    pub fn incidence_tangent(&self) -> f64 {
        crate::planform::radians(self.incidence_deg).tan()
    }

    /// Reflect the point to the left half of the aircraft with a new incidence.
    #[must_use]
    pub fn mirrored_with_incidence(self, incidence_deg: f64) -> Self {
        Self::new(self.position.mirrored(), self.chord, incidence_deg)
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use vlmdeck::point;
///
/// let apex = point(550.0, 0.0, 0.0);
/// assert_eq!(apex.x, 550.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_to_vector_roundtrip() {
        let origin = Point::new(1.0, 2.0, 3.0);
        let vector: Vector3<f64> = origin.into();
        assert_eq!(vector, Vector3::new(1.0, 2.0, 3.0));
        let point = Point::from(vector);
        assert_eq!(point, origin);
    }

    #[test]
    fn mirroring_flips_only_the_span_coordinate() {
        let right = point(1381.8, 74.0, 12.5);
        assert_eq!(right.mirrored(), point(1381.8, -74.0, 12.5));
    }

    #[test]
    fn mirrored_resolved_point_keeps_chord() {
        let right = ResolvedPoint::new(point(10.0, 20.0, 1.0), 40.0, 2.0);
        let left = right.mirrored_with_incidence(-2.0);
        assert_eq!(left.position.y, -20.0);
        assert_eq!(left.chord, 40.0);
        assert_eq!(left.incidence_deg, -2.0);
    }
}
