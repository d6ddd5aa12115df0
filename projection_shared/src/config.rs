//! Configuration system.
//!
//! Loads viewer configuration from JSON strings (file IO left to app).
//! Every field has a default, so `{}` is a valid configuration.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    camera::CameraLimits,
    error::ConfigError,
    math::PolarVector,
    projector::Viewport,
    scene::MAX_GRID_LINES,
};

/// Most record slots a viewer may be configured with.
pub const MAX_RECORD_SLOTS: usize = 1024;

/// Root viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Fixed update rate.
    pub tick_hz: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f64,
    /// Radius change per scroll unit.
    pub scroll_factor: f64,
    pub theta_epsilon: f64,
    pub min_radius: f64,
    /// Camera pose at startup.
    pub initial_camera: PolarVector,
    /// World length of each drawn axis.
    pub axis_length: f64,
    pub axis_arrow_size: f64,
    /// Extra distance past the axis tip at which labels are drawn.
    pub axis_label_offset: f64,
    /// Half-size of a drawn plane, as a multiple of `axis_length`.
    pub plane_scale: f64,
    pub plane_grid_spacing: f64,
    /// Half-size in pixels of point marks and axis labels.
    pub point_mark_size: f64,
    pub max_records: usize,
    /// Maximum bytes of text per record slot.
    pub max_record_len: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 50,
            window_width: 640,
            window_height: 480,
            drag_sensitivity: 1.0 / 200.0,
            scroll_factor: -0.01,
            theta_epsilon: 0.001,
            min_radius: 0.01,
            initial_camera: PolarVector::new(0.5, FRAC_PI_4, FRAC_PI_4),
            axis_length: 100.0,
            axis_arrow_size: 5.0,
            axis_label_offset: 20.0,
            plane_scale: 1.0,
            plane_grid_spacing: 10.0,
            point_mark_size: 5.0,
            max_records: 16,
            max_record_len: 511,
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Checks that every value is one the viewer can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = |field: &'static str, reason: String| Err(ConfigError { field, reason });

        if self.tick_hz == 0 {
            return bad("tick_hz", "must be at least 1".into());
        }
        if self.window_width == 0 || self.window_height == 0 {
            return bad("window_width/window_height", "must be non-zero".into());
        }
        for (field, v) in [
            ("drag_sensitivity", self.drag_sensitivity),
            ("scroll_factor", self.scroll_factor),
            ("initial_camera.r", self.initial_camera.r),
            ("initial_camera.theta", self.initial_camera.theta),
            ("initial_camera.phi", self.initial_camera.phi),
        ] {
            if !v.is_finite() {
                return bad(field, format!("must be finite, got {}", v));
            }
        }
        if !(0.0..FRAC_PI_2).contains(&self.theta_epsilon) {
            return bad(
                "theta_epsilon",
                format!("must lie in [0, π/2), got {}", self.theta_epsilon),
            );
        }
        if !(self.min_radius.is_finite() && self.min_radius > 0.0) {
            return bad("min_radius", format!("must be positive, got {}", self.min_radius));
        }
        for (field, v) in [
            ("axis_length", self.axis_length),
            ("axis_arrow_size", self.axis_arrow_size),
            ("axis_label_offset", self.axis_label_offset),
            ("plane_scale", self.plane_scale),
            ("point_mark_size", self.point_mark_size),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return bad(field, format!("must be finite and non-negative, got {}", v));
            }
        }
        let spacing = self.plane_grid_spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return bad("plane_grid_spacing", format!("must be positive, got {}", spacing));
        }
        let lines = 2.0 * self.plane_scale * self.axis_length / spacing;
        if lines > MAX_GRID_LINES as f64 {
            return bad(
                "plane_grid_spacing",
                format!("{} gives {:.0} grid lines (max {})", spacing, lines, MAX_GRID_LINES),
            );
        }
        if self.max_records == 0 || self.max_records > MAX_RECORD_SLOTS {
            return bad(
                "max_records",
                format!("must lie in 1..={}, got {}", MAX_RECORD_SLOTS, self.max_records),
            );
        }
        Ok(())
    }

    /// Duration of one fixed update step.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window_width, self.window_height)
    }

    pub fn camera_limits(&self) -> CameraLimits {
        CameraLimits {
            drag_sensitivity: self.drag_sensitivity,
            scroll_factor: self.scroll_factor,
            theta_epsilon: self.theta_epsilon,
            min_radius: self.min_radius,
        }
    }
}
