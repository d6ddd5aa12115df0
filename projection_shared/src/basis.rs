//! Orthonormal basis of a plane.
//!
//! The basis is not arbitrary: `u` is the normal's polar direction tilted
//! back by 90° at the same azimuth, so it stays in the vertical plane that
//! contains the normal. As the camera orbits continuously the screen axes
//! derived from it move continuously too.

use std::f64::consts::FRAC_PI_2;

use crate::{
    error::GeometryError,
    math::{Plane, PolarVector, Vector3},
};

/// Two unit vectors spanning a plane, orthogonal to each other and to its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthonormals {
    /// In-plane axis sharing the normal's azimuth ("up-ish" on screen).
    pub u: Vector3,
    /// `normalize(u × normal)`.
    pub w: Vector3,
}

/// Computes the deterministic orthonormal pair for `plane`.
///
/// Only the normal `(a, b, c)` matters; the constant term is ignored.
pub fn orthonormals(plane: &Plane) -> Result<Orthonormals, GeometryError> {
    if plane.is_degenerate() {
        return Err(GeometryError::DegeneratePlane);
    }
    let normal = plane.normal();
    let polar = PolarVector::from_cartesian(normal)?;

    let u = PolarVector::new(1.0, polar.theta - FRAC_PI_2, polar.phi).to_cartesian();
    let w = u.cross(normal).normalize()?;

    Ok(Orthonormals { u, w })
}
