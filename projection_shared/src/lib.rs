//! `projection_shared`
//!
//! The projection engine used by the viewer.
//!
//! Design goals:
//! - Deterministic f64 math with explicit failure values, never NaN output.
//! - Clear separation of concerns (algebra, basis, solver, camera, scene).
//! - The render surface is a trait; no graphics backend dependency.
//! - No `unsafe`.

pub mod basis;
pub mod camera;
pub mod config;
pub mod error;
pub mod math;
pub mod projector;
pub mod record;
pub mod render;
pub mod scene;
pub mod solve;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::basis::*;
    pub use crate::camera::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::math::*;
    pub use crate::projector::*;
    pub use crate::record::*;
    pub use crate::render::*;
    pub use crate::scene::*;
    pub use crate::solve::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn prelude_draws_a_frame() {
        let projector = Projector::new(&OrbitCamera::default(), Viewport::new(640, 480)).unwrap();
        let mut slots = RecordSlots::new(2, 64);
        slots.set(0, "point 0 0 0").unwrap();
        let mut surface = RecordingSurface::new();
        let stats = draw_frame(&mut surface, &projector, &SceneStyle::default(), &slots);
        assert_eq!(stats.records_drawn, 1);
        assert_eq!(surface.presented(), 1);
    }
}
