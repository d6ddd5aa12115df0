//! Math types.
//!
//! Small, deterministic f64 vector algebra used by the projection engine.
//! Points and vectors share a layout but are kept as separate types so a
//! position is never accidentally used as a direction.

use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Free 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn sum(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    /// Multiplies every component by `k`.
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A zero-length vector has no direction and yields
    /// [`GeometryError::ZeroLength`] instead of NaN components.
    pub fn normalize(self) -> Result<Self, GeometryError> {
        let n = self.norm();
        if n == 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        Ok(Self::new(self.x / n, self.y / n, self.z / n))
    }

    /// Determinant cross product `self × rhs`.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// The position reached by walking this vector from the origin.
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.sum(rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

/// Position in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Moves the point along `v`.
    pub fn offset(self, v: Vector3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    /// Displacement from the origin to this point.
    pub fn to_vector(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Plane `a·x + b·y + c·z = d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The plane through the origin with normal `v`; callers fill in `d`.
    pub fn from_normal(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    pub fn normal(self) -> Vector3 {
        Vector3::new(self.a, self.b, self.c)
    }

    /// A zero normal describes no plane at all and must not be drawn.
    pub fn is_degenerate(self) -> bool {
        self.normal().is_zero()
    }
}

/// Spherical coordinates: radius, polar angle from +z, azimuth from +x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PolarVector {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

impl PolarVector {
    pub const fn new(r: f64, theta: f64, phi: f64) -> Self {
        Self { r, theta, phi }
    }

    pub fn to_cartesian(self) -> Vector3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        Vector3::new(self.r * sin_t * cos_p, self.r * sin_t * sin_p, self.r * cos_t)
    }

    /// Converts back from Cartesian form.
    ///
    /// The azimuth goes through [`polar_atan`], not `atan2`, so vectors on
    /// the `x == 0` half-planes always come back with `phi == π/2`.
    pub fn from_cartesian(v: Vector3) -> Result<Self, GeometryError> {
        let r = v.norm();
        if r == 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        Ok(Self::new(r, (v.z / r).acos(), polar_atan(v.y, v.x)))
    }
}

/// Two-argument arctangent of `a / b` used by the camera's polar model.
///
/// Returns `π/2` whenever `b == 0`, whatever the sign of `a`; `atan(a/b)`
/// for `b > 0`; `π + atan(a/b)` for `b < 0`. This is deliberately not
/// `f64::atan2`: the orientation of the screen basis depends on it.
pub fn polar_atan(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        FRAC_PI_2
    } else if b > 0.0 {
        (a / b).atan()
    } else {
        PI + (a / b).atan()
    }
}

/// A drawable 3D segment from `origin` to `origin + direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Line3 {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Line3 {
    pub const fn new(origin: Point3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    pub fn end(self) -> Point3 {
        self.origin.offset(self.direction)
    }
}

/// Screen-space point in pixels, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Screen2 {
    pub x: f64,
    pub y: f64,
}

impl Screen2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space segment handed to the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Segment2 {
    pub from: Screen2,
    pub to: Screen2,
}

impl Segment2 {
    pub const fn new(from: Screen2, to: Screen2) -> Self {
        Self { from, to }
    }
}
