//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! A surface only has to draw 2D line segments in a current color.

use serde::{Deserialize, Serialize};

use crate::math::Segment2;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BACKGROUND: Self = Self::new(40, 40, 40, 255);
    pub const AXIS_POSITIVE: Self = Self::new(255, 255, 255, 255);
    pub const AXIS_NEGATIVE: Self = Self::new(120, 120, 120, 255);

    /// Distinct color for record slot `index`.
    pub const fn for_slot(index: usize) -> Self {
        Self::new(
            120 + 120 * (index & 0x1) as u8,
            160 + 80 * ((index >> 1) & 0x1) as u8,
            200 + 40 * ((index >> 2) & 0x1) as u8,
            255,
        )
    }
}

/// A minimal line-drawing surface.
pub trait RenderSurface {
    /// Fills the whole surface with the current color.
    fn clear(&mut self);
    fn set_color(&mut self, color: Rgba);
    fn draw_segment(&mut self, segment: Segment2);
    /// Shows the finished frame.
    fn present(&mut self);
}

/// A no-op surface useful for headless runs.
#[derive(Debug, Default)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear(&mut self) {}
    fn set_color(&mut self, _color: Rgba) {}
    fn draw_segment(&mut self, _segment: Segment2) {}
    fn present(&mut self) {}
}

/// A presented frame: its background and every colored segment in draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub background: Rgba,
    pub segments: Vec<(Rgba, Segment2)>,
}

/// Surface that keeps the segments it is asked to draw.
#[derive(Debug)]
pub struct RecordingSurface {
    color: Rgba,
    pending: Frame,
    last: Option<Frame>,
    presented: u64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            color: Rgba::BACKGROUND,
            pending: Frame {
                background: Rgba::BACKGROUND,
                segments: Vec::new(),
            },
            last: None,
            presented: 0,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    /// Segments drawn since the last clear or present.
    pub fn pending_segments(&self) -> &[(Rgba, Segment2)] {
        &self.pending.segments
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.pending.background = self.color;
        self.pending.segments.clear();
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn draw_segment(&mut self, segment: Segment2) {
        self.pending.segments.push((self.color, segment));
    }

    fn present(&mut self) {
        let frame = Frame {
            background: self.pending.background,
            segments: std::mem::take(&mut self.pending.segments),
        };
        self.last = Some(frame);
        self.presented += 1;
    }
}
