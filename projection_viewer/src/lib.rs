//! `projection_viewer`
//!
//! Viewer-side systems:
//! - Pointer gesture handling for the orbital camera
//! - Fixed-timestep update clock with catch-up
//! - `ViewerState`, the single owner of camera, records and dirty flags
//! - Console commands standing in for the text-input surface
//! - Built-in self-test

pub mod clock;
pub mod input;
pub mod selftest;
pub mod viewer;

pub use viewer::ViewerState;
