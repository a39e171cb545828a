use std::ops::{
    Add,
    Sub,
    Mul,
};
use std::f64::consts::TAU;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Angle type (alias for f64), in radians.
pub type Angle = f64;

/// A point or direction in the coil plane.
/// Used for polygon vertices, trace vertices and miter extension vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[derive(Serialize, Deserialize)]
pub struct PlanarVector {
    pub x: f64,
    pub y: f64,
}
impl PlanarVector {
    /// Create a new vector.
    pub fn new(x: f64, y: f64) -> Self {
        PlanarVector{x, y}
    }

    /// Create a new zero vector.
    pub fn zero() -> Self {
        PlanarVector{x: 0.0, y: 0.0}
    }

    /// Get the dot product of two vectors.
    pub fn dot(&self, other: &PlanarVector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Get the z component of the cross product (sine of the turn between unit vectors).
    pub fn cross(&self, other: &PlanarVector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Get the magnitude of the vector.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Get the distance between two points.
    pub fn distance(&self, other: &PlanarVector) -> f64 {
        (*self - *other).norm()
    }

    /// Normalize and return a new vector.
    /// A zero-length vector has no direction, so `None` is returned.
    pub fn normalize(&self) -> Option<Self> {
        let mag = self.norm();
        if mag == 0.0 || !mag.is_finite() {
            return None;
        }
        Some(PlanarVector{x: self.x / mag, y: self.y / mag})
    }

    /// Left-hand normal: `(dx, dy) -> (-dy, dx)`.
    pub fn left_normal(&self) -> Self {
        PlanarVector{x: -self.y, y: self.x}
    }

    /// Polar angle of the vector, normalized into `[0, 2pi)`.
    pub fn polar_angle(&self) -> Angle {
        wrap_angle(self.y.atan2(self.x))
    }

    /// Scale each coordinate by a sign pair (used for quadrant mirroring).
    pub fn mirror(&self, sign_x: f64, sign_y: f64) -> Self {
        PlanarVector{x: self.x * sign_x, y: self.y * sign_y}
    }

    /// Check if any of the components are not finite.
    pub fn has_non_finite(&self) -> bool {
        !self.x.is_finite() || !self.y.is_finite()
    }
}

/// Wrap an angle into `[0, 2pi)`.
/// `rem_euclid` can round up to exactly `2pi` for tiny negative inputs, which is folded back to zero.
pub fn wrap_angle(angle: Angle) -> Angle {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

impl Add for PlanarVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        PlanarVector{x: self.x + other.x, y: self.y + other.y}
    }
}
impl Sub for PlanarVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        PlanarVector{x: self.x - other.x, y: self.y - other.y}
    }
}
impl Mul<PlanarVector> for f64 {
    type Output = PlanarVector;

    fn mul(self, other: PlanarVector) -> PlanarVector {
        PlanarVector{x: self * other.x, y: self * other.y}
    }
}
impl Mul<f64> for PlanarVector {
    type Output = PlanarVector;

    fn mul(self, other: f64) -> PlanarVector {
        PlanarVector{x: self.x * other, y: self.y * other}
    }
}
impl fmt::Display for PlanarVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(f, "({:.*}, {:.*})", precision, self.x, precision, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(PlanarVector::zero().normalize().is_none());
        let unit = PlanarVector::new(3.0, 4.0).normalize().unwrap();
        assert!((unit.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn polar_angle_is_non_negative() {
        assert_eq!(PlanarVector::new(1.0, 0.0).polar_angle(), 0.0);
        assert!((PlanarVector::new(0.0, -1.0).polar_angle() - 1.5 * PI).abs() < 1e-12);
        assert!((PlanarVector::new(-1.0, 0.0).polar_angle() - PI).abs() < 1e-12);
    }

    #[test]
    fn wrap_never_returns_full_turn() {
        assert_eq!(wrap_angle(-1e-18), 0.0);
        assert!((wrap_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn cross_is_signed() {
        let x = PlanarVector::new(1.0, 0.0);
        let y = PlanarVector::new(0.0, 1.0);
        assert_eq!(x.cross(&y), 1.0);
        assert_eq!(y.cross(&x), -1.0);
        assert_eq!(x.cross(&(x * 2.0)), 0.0);
    }

    #[test]
    fn left_normal_rotates_counterclockwise() {
        assert_eq!(PlanarVector::new(1.0, 0.0).left_normal(), PlanarVector::new(-0.0, 1.0));
    }
}
