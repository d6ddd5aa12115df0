//! World-to-screen projection.
//!
//! Per frame the camera's Cartesian position `v` defines the view plane
//! (normal `v`, constant `r`). Its orthonormal pair `(u, w)` gives the
//! screen axes, and each world point is resolved in `{v, u, w}`. Depth `a`
//! is dropped, `c` becomes screen x and `-b` screen y, both scaled by
//! `1/r` and centered in the viewport.

use crate::{
    basis::{orthonormals, Orthonormals},
    camera::OrbitCamera,
    error::GeometryError,
    math::{Line3, Plane, Point3, Screen2, Segment2, Vector3},
    solve::solve_coefficients,
};

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Integer center, matching a `width >> 1` pixel grid.
    pub fn center(self) -> Screen2 {
        Screen2::new(f64::from(self.width >> 1), f64::from(self.height >> 1))
    }
}

/// Projection state for one camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    view: Vector3,
    basis: Orthonormals,
    zoom: f64,
    center: Screen2,
}

impl Projector {
    /// Builds the view basis for the camera's current pose.
    pub fn new(camera: &OrbitCamera, viewport: Viewport) -> Result<Self, GeometryError> {
        let pos = camera.position();
        let view = pos.to_cartesian();
        let mut view_plane = Plane::from_normal(view);
        view_plane.d = pos.r;
        let basis = orthonormals(&view_plane)?;
        Ok(Self {
            view,
            basis,
            zoom: 1.0 / pos.r,
            center: viewport.center(),
        })
    }

    pub fn view(&self) -> Vector3 {
        self.view
    }

    pub fn basis(&self) -> Orthonormals {
        self.basis
    }

    /// Unscaled, uncentered screen offset `(c, -b)` of `p`.
    pub fn screen_offset(&self, p: Point3) -> Result<Screen2, GeometryError> {
        let k = solve_coefficients(self.view, self.basis.u, self.basis.w, p)?;
        Ok(Screen2::new(k.c, -k.b))
    }

    /// Pixel position of `p`.
    pub fn project(&self, p: Point3) -> Result<Screen2, GeometryError> {
        let off = self.screen_offset(p)?;
        Ok(Screen2::new(
            self.center.x + off.x * self.zoom,
            self.center.y + off.y * self.zoom,
        ))
    }

    pub fn project_line(&self, line: Line3) -> Result<Segment2, GeometryError> {
        Ok(Segment2::new(
            self.project(line.origin)?,
            self.project(line.end())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraLimits;
    use crate::math::PolarVector;

    #[test]
    fn origin_projects_to_viewport_center() {
        let proj = Projector::new(&OrbitCamera::default(), Viewport::new(640, 480)).unwrap();
        let c = proj.project(Point3::ORIGIN).unwrap();
        assert!((c.x - 320.0).abs() < 1e-9);
        assert!((c.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn odd_viewport_center_is_truncated() {
        assert_eq!(Viewport::new(641, 481).center(), Screen2::new(320.0, 240.0));
    }

    #[test]
    fn points_along_the_view_direction_collapse_to_center() {
        let proj = Projector::new(&OrbitCamera::default(), Viewport::new(640, 480)).unwrap();
        let far = proj.view().scale(37.0).to_point();
        let c = proj.project(far).unwrap();
        assert!((c.x - 320.0).abs() < 1e-9);
        assert!((c.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn screen_offset_matches_basis_dot_products() {
        let cam = OrbitCamera::new(PolarVector::new(2.0, 1.1, -0.7), CameraLimits::default());
        let proj = Projector::new(&cam, Viewport::new(640, 480)).unwrap();
        let p = Point3::new(3.0, -5.0, 2.0);
        let off = proj.screen_offset(p).unwrap();
        let basis = proj.basis();
        assert!((off.x - p.to_vector().dot(basis.w)).abs() < 1e-9);
        assert!((off.y + p.to_vector().dot(basis.u)).abs() < 1e-9);
    }

    #[test]
    fn zoom_scales_offsets() {
        let near = OrbitCamera::new(PolarVector::new(0.5, 1.0, 0.3), CameraLimits::default());
        let far = OrbitCamera::new(PolarVector::new(1.0, 1.0, 0.3), CameraLimits::default());
        let vp = Viewport::new(640, 480);
        let p = Point3::new(10.0, 20.0, -5.0);
        let a = Projector::new(&near, vp).unwrap().project(p).unwrap();
        let b = Projector::new(&far, vp).unwrap().project(p).unwrap();
        assert!(((a.x - 320.0) - 2.0 * (b.x - 320.0)).abs() < 1e-9);
        assert!(((a.y - 240.0) - 2.0 * (b.y - 240.0)).abs() < 1e-9);
    }
}
