//! Input handling.
//!
//! Pointer events arrive from whatever owns the window. This module turns
//! them into camera gestures: a drag is active between a button press over
//! the scene and the matching release (or the pointer leaving the window),
//! and each motion while active rotates the camera by the cursor delta.

use projection_shared::camera::OrbitCamera;

/// A pointer event as delivered by the event source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Drag button pressed at a cursor position.
    Pressed { x: f64, y: f64 },
    /// Cursor moved to a position.
    Moved { x: f64, y: f64 },
    /// Drag button released.
    Released,
    /// Pointer left the scene window.
    Left,
    /// Scroll wheel moved.
    Scrolled { dy: f64 },
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragController {
    /// Last examined cursor position while the button is held.
    anchor: Option<(f64, f64)>,
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Feeds one event through the gesture state machine.
    ///
    /// Returns true when the camera changed.
    pub fn handle(&mut self, event: PointerEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            PointerEvent::Pressed { x, y } => {
                self.anchor = Some((x, y));
                false
            }
            PointerEvent::Moved { x, y } => match self.anchor {
                Some((ax, ay)) => {
                    camera.drag(ax - x, ay - y);
                    self.anchor = Some((x, y));
                    true
                }
                None => false,
            },
            PointerEvent::Released | PointerEvent::Left => {
                self.anchor = None;
                false
            }
            PointerEvent::Scrolled { dy } => {
                camera.zoom(dy);
                true
            }
        }
    }
}

/// The events of a complete drag by `(dx, dy)`, expressed as
/// previous-minus-current cursor deltas.
pub fn drag_gesture(dx: f64, dy: f64) -> [PointerEvent; 3] {
    [
        PointerEvent::Pressed { x: 0.0, y: 0.0 },
        PointerEvent::Moved { x: -dx, y: -dy },
        PointerEvent::Released,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_without_press_is_ignored() {
        let mut drag = DragController::default();
        let mut cam = OrbitCamera::default();
        let before = cam;
        assert!(!drag.handle(PointerEvent::Moved { x: 50.0, y: 50.0 }, &mut cam));
        assert_eq!(cam, before);
    }

    #[test]
    fn drag_uses_previous_minus_current() {
        let mut drag = DragController::default();
        let mut cam = OrbitCamera::default();
        let phi0 = cam.position().phi;
        drag.handle(PointerEvent::Pressed { x: 300.0, y: 200.0 }, &mut cam);
        assert!(drag.handle(PointerEvent::Moved { x: 100.0, y: 200.0 }, &mut cam));
        // Moving left by 200px gives dx = +200.
        assert!((cam.position().phi - (phi0 + 1.0)).abs() < 1e-12);
        // Subsequent motion is relative to the last position, not the press.
        assert!(drag.handle(PointerEvent::Moved { x: 300.0, y: 200.0 }, &mut cam));
        assert!((cam.position().phi - phi0).abs() < 1e-12);
    }

    #[test]
    fn leaving_the_window_ends_the_drag() {
        let mut drag = DragController::default();
        let mut cam = OrbitCamera::default();
        drag.handle(PointerEvent::Pressed { x: 0.0, y: 0.0 }, &mut cam);
        assert!(drag.is_dragging());
        drag.handle(PointerEvent::Left, &mut cam);
        assert!(!drag.is_dragging());
        let before = cam;
        drag.handle(PointerEvent::Moved { x: 10.0, y: 10.0 }, &mut cam);
        assert_eq!(cam, before);
    }

    #[test]
    fn scroll_zooms_even_without_drag() {
        let mut drag = DragController::default();
        let mut cam = OrbitCamera::default();
        assert!(drag.handle(PointerEvent::Scrolled { dy: -10.0 }, &mut cam));
        assert!((cam.position().r - 0.6).abs() < 1e-12);
    }

    #[test]
    fn drag_gesture_reproduces_deltas() {
        let mut drag = DragController::default();
        let mut cam = OrbitCamera::default();
        let p0 = cam.position();
        for e in drag_gesture(400.0, -20.0) {
            drag.handle(e, &mut cam);
        }
        assert!((cam.position().phi - (p0.phi + 2.0)).abs() < 1e-12);
        assert!((cam.position().theta - (p0.theta - 0.1)).abs() < 1e-12);
        assert!(!drag.is_dragging());
    }
}
