//! Orbital camera.
//!
//! The eye sits at a polar position around the scene origin. Drag gestures
//! rotate it (azimuth and polar angle), scroll gestures change the radius.
//! The polar angle is kept off the poles and the radius off the origin so
//! that the view basis is always defined.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::{config::ViewerConfig, math::PolarVector};

/// Azimuth magnitude beyond which wrapping folds with a remainder first.
const WRAP_FOLD_LIMIT: f64 = 4.0 * TAU;

/// Limits and gains applied to camera gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLimits {
    /// Radians per pixel of drag.
    pub drag_sensitivity: f64,
    /// Radius change per scroll unit.
    pub scroll_factor: f64,
    /// Minimum distance of the polar angle from either pole.
    pub theta_epsilon: f64,
    pub min_radius: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            drag_sensitivity: 1.0 / 200.0,
            scroll_factor: -0.01,
            theta_epsilon: 0.001,
            min_radius: 0.01,
        }
    }
}

/// Camera position plus the gesture limits it obeys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    position: PolarVector,
    limits: CameraLimits,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(
            PolarVector::new(0.5, PI / 4.0, PI / 4.0),
            CameraLimits::default(),
        )
    }
}

impl OrbitCamera {
    /// Creates a camera, clamping the initial position into the valid range.
    pub fn new(position: PolarVector, limits: CameraLimits) -> Self {
        let mut cam = Self { position, limits };
        cam.clamp_theta();
        cam.clamp_radius();
        cam
    }

    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self::new(cfg.initial_camera, cfg.camera_limits())
    }

    pub fn position(&self) -> PolarVector {
        self.position
    }

    pub fn limits(&self) -> CameraLimits {
        self.limits
    }

    /// Applies a drag delta (previous cursor minus current cursor).
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.position.phi += dx * self.limits.drag_sensitivity;
        self.position.theta += dy * self.limits.drag_sensitivity;
        self.clamp_theta();
    }

    /// Applies a scroll delta to the radius.
    pub fn zoom(&mut self, dy: f64) {
        self.position.r += dy * self.limits.scroll_factor;
        self.clamp_radius();
    }

    /// Brings the azimuth back into `[-2π, 2π]`.
    ///
    /// Runs once per tick. Ordinary drags move the azimuth by less than a
    /// few turns, which the subtraction loops absorb in a step or two.
    pub fn wrap_azimuth(&mut self) {
        // Past this, subtracting 2π may no longer change the value at all.
        if self.position.phi.abs() > WRAP_FOLD_LIMIT {
            self.position.phi %= TAU;
        }
        while self.position.phi > TAU {
            self.position.phi -= TAU;
        }
        while self.position.phi < -TAU {
            self.position.phi += TAU;
        }
    }

    fn clamp_theta(&mut self) {
        let eps = self.limits.theta_epsilon;
        self.position.theta = self.position.theta.max(eps).min(PI - eps);
    }

    fn clamp_radius(&mut self) {
        self.position.r = self.position.r.max(self.limits.min_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_startup_pose() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.position(), PolarVector::new(0.5, PI / 4.0, PI / 4.0));
    }

    #[test]
    fn drag_moves_both_angles() {
        let mut cam = OrbitCamera::default();
        cam.drag(200.0, -100.0);
        let p = cam.position();
        assert!((p.phi - (PI / 4.0 + 1.0)).abs() < 1e-12);
        assert!((p.theta - (PI / 4.0 - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn theta_never_reaches_the_poles() {
        let mut cam = OrbitCamera::default();
        let eps = cam.limits().theta_epsilon;
        for dy in [5000.0, -1.0, -20000.0, 3.0, 1e9, -1e9] {
            cam.drag(0.0, dy);
            let theta = cam.position().theta;
            assert!(theta >= eps && theta <= PI - eps, "theta {theta}");
        }
    }

    #[test]
    fn radius_never_drops_below_minimum() {
        let mut cam = OrbitCamera::default();
        for _ in 0..500 {
            cam.zoom(3.0);
        }
        assert_eq!(cam.position().r, cam.limits().min_radius);
        cam.zoom(-10.0);
        assert!((cam.position().r - (cam.limits().min_radius + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn azimuth_wraps_into_range() {
        let mut cam = OrbitCamera::default();
        cam.drag(200.0 * 3.0 * TAU, 0.0);
        cam.wrap_azimuth();
        let phi = cam.position().phi;
        assert!((-TAU..=TAU).contains(&phi));
        assert!((phi - PI / 4.0).abs() < 1e-9);

        cam.drag(-200.0 * 5.0 * TAU, 0.0);
        cam.wrap_azimuth();
        assert!((-TAU..=TAU).contains(&cam.position().phi));
    }

    #[test]
    fn huge_drag_wraps_in_one_tick() {
        let mut cam = OrbitCamera::default();
        cam.drag(1e20, 0.0);
        assert!(cam.position().phi > 1e17);
        cam.wrap_azimuth();
        assert!((-TAU..=TAU).contains(&cam.position().phi));

        cam.drag(-1e300, 0.0);
        cam.wrap_azimuth();
        assert!((-TAU..=TAU).contains(&cam.position().phi));
    }

    #[test]
    fn oversized_epsilon_does_not_panic() {
        let limits = CameraLimits {
            theta_epsilon: 2.0,
            ..Default::default()
        };
        let mut cam = OrbitCamera::new(PolarVector::new(1.0, 1.0, 0.0), limits);
        cam.drag(0.0, 50.0);
        assert!(cam.position().theta.is_finite());
    }

    #[test]
    fn initial_position_is_clamped() {
        let cam = OrbitCamera::new(PolarVector::new(0.0, 0.0, 0.0), CameraLimits::default());
        assert_eq!(cam.position().r, 0.01);
        assert_eq!(cam.position().theta, 0.001);
    }
}
