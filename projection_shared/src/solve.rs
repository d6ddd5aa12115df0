//! Change-of-basis solver.
//!
//! Expresses a world point `p` as `a·v + b·u + c·w` by Gauss-Jordan
//! elimination with partial pivoting on the augmented 3×4 matrix
//! `[v | u | w | p]`. Only an exactly-zero pivot is treated as singular;
//! near-singular bases still produce (possibly unstable) coefficients.

use serde::{Deserialize, Serialize};

use crate::{
    error::GeometryError,
    math::{Point3, Vector3},
};

/// Coefficients of a point in the basis `{v, u, w}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coefficients {
    /// Along the view direction (depth).
    pub a: f64,
    /// Along `u`.
    pub b: f64,
    /// Along `w`.
    pub c: f64,
}

impl Coefficients {
    /// Rebuilds the point `a·v + b·u + c·w`.
    pub fn reconstruct(self, v: Vector3, u: Vector3, w: Vector3) -> Point3 {
        (v * self.a + u * self.b + w * self.c).to_point()
    }
}

/// Solves `[v | u | w] · (a, b, c)ᵗ = p`.
pub fn solve_coefficients(
    v: Vector3,
    u: Vector3,
    w: Vector3,
    p: Point3,
) -> Result<Coefficients, GeometryError> {
    let mut m = [
        [v.x, u.x, w.x, p.x],
        [v.y, u.y, w.y, p.y],
        [v.z, u.z, w.z, p.z],
    ];

    for col in 0..3 {
        let mut pivot_row = col;
        let mut pivot_mag = 0.0_f64;
        for (row, values) in m.iter().enumerate().skip(col) {
            if values[col].abs() > pivot_mag {
                pivot_mag = values[col].abs();
                pivot_row = row;
            }
        }
        if pivot_mag == 0.0 {
            return Err(GeometryError::SingularSystem);
        }
        m.swap(col, pivot_row);

        let pivot = m[col][col];
        for value in m[col].iter_mut() {
            *value /= pivot;
        }

        let pivot_values = m[col];
        for (row, values) in m.iter_mut().enumerate() {
            if row == col {
                continue;
            }
            let factor = values[col];
            if factor != 0.0 {
                for (value, pv) in values.iter_mut().zip(pivot_values.iter()).skip(col) {
                    *value -= factor * pv;
                }
            }
        }
    }

    Ok(Coefficients {
        a: m[0][3],
        b: m[1][3],
        c: m[2][3],
    })
}
