//! Viewer state.
//!
//! `ViewerState` owns everything the frame loop mutates:
//! - The orbital camera and the drag gesture state
//! - The record text slots
//! - Dirty flags deciding whether the next frame must be drawn
//! - The running flag cleared by `quit`
//!
//! It is driven by one control loop: events and console lines are applied
//! as they arrive, `update` runs once per fixed step, and `render` draws
//! at most once per poll cycle.

use anyhow::Context;
use projection_shared::{
    camera::OrbitCamera,
    config::ViewerConfig,
    error::RecordError,
    projector::Projector,
    record::{RecordSlots, SceneRecord},
    render::{Frame, RenderSurface},
    scene::{draw_frame, DrawStats, SceneStyle},
};
use tracing::{debug, info, warn};

use crate::input::{drag_gesture, DragController, PointerEvent};

bitflags::bitflags! {
    /// What changed since the last drawn frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Dirty: u8 {
        const CAMERA = 1 << 0;
        const RECORDS = 1 << 1;
    }
}

/// Single-owner viewer state.
pub struct ViewerState {
    pub cfg: ViewerConfig,
    camera: OrbitCamera,
    drag: DragController,
    records: RecordSlots,
    style: SceneStyle,
    dirty: Dirty,
    tick: u64,
    running: bool,
    last_stats: Option<DrawStats>,
}

impl ViewerState {
    pub fn new(cfg: ViewerConfig) -> Self {
        Self {
            camera: OrbitCamera::from_config(&cfg),
            drag: DragController::default(),
            records: RecordSlots::new(cfg.max_records, cfg.max_record_len),
            style: SceneStyle::from_config(&cfg),
            // The first frame is always drawn.
            dirty: Dirty::all(),
            tick: 0,
            running: true,
            last_stats: None,
            cfg,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn records(&self) -> &RecordSlots {
        &self.records
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stops the loop before its next step.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    pub fn last_stats(&self) -> Option<DrawStats> {
        self.last_stats
    }

    /// Applies a pointer event to the camera.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.drag.handle(event, &mut self.camera) {
            self.dirty |= Dirty::CAMERA;
            debug!(?event, camera = ?self.camera.position(), "Camera moved");
        }
    }

    /// Replaces the text of a record slot. Only a real change marks the
    /// records dirty.
    pub fn set_record(&mut self, index: usize, text: &str) -> Result<(), RecordError> {
        let revision = self.records.revision();
        self.records.set(index, text)?;
        if self.records.revision() != revision {
            self.dirty |= Dirty::RECORDS;
            info!(slot = index, text = %text, "Record updated");
        }
        Ok(())
    }

    pub fn clear_record(&mut self, index: usize) -> Result<(), RecordError> {
        self.set_record(index, "")
    }

    /// Executes one fixed update step.
    pub fn update(&mut self) {
        self.camera.wrap_azimuth();
        self.tick += 1;
    }

    /// Draws a frame if anything changed since the last one.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> Option<DrawStats> {
        if self.dirty.is_empty() {
            return None;
        }
        self.dirty = Dirty::empty();

        let projector = match Projector::new(&self.camera, self.cfg.viewport()) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, camera = ?self.camera.position(), "View basis undefined");
                return None;
            }
        };
        let stats = draw_frame(surface, &projector, &self.style, &self.records);
        self.last_stats = Some(stats);
        Some(stats)
    }

    /// Runs `steps` updates, then renders once if any step ran.
    pub fn advance(&mut self, steps: u32, surface: &mut dyn RenderSurface) -> Option<DrawStats> {
        if steps == 0 {
            return None;
        }
        for _ in 0..steps {
            self.update();
        }
        self.render(surface)
    }

    /// Executes a console command.
    pub fn exec_console(&mut self, line: &str) -> anyhow::Result<Vec<String>> {
        let (cmd, rest) = split_first(line.trim());
        match cmd {
            "" => Ok(Vec::new()),
            "set" => {
                let (slot, text) = split_first(rest);
                if slot.is_empty() {
                    return Ok(vec!["Usage: set <slot> <record>".to_string()]);
                }
                let index = parse_slot(slot)?;
                self.set_record(index, text)?;
                Ok(vec![format!("[{}] {}", index, describe_record(text))])
            }
            "clear" => {
                let (slot, _) = split_first(rest);
                if slot.is_empty() {
                    return Ok(vec!["Usage: clear <slot>".to_string()]);
                }
                let index = parse_slot(slot)?;
                self.clear_record(index)?;
                Ok(vec![format!("[{}] cleared", index)])
            }
            "list" => {
                let out: Vec<String> = self
                    .records
                    .iter_filled()
                    .map(|(i, text)| format!("  [{}] {}  ({})", i, text, describe_record(text)))
                    .collect();
                if out.is_empty() {
                    Ok(vec!["No records".to_string()])
                } else {
                    Ok(out)
                }
            }
            "drag" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                if args.len() < 2 {
                    return Ok(vec!["Usage: drag <dx> <dy>".to_string()]);
                }
                let dx = parse_number(args[0])?;
                let dy = parse_number(args[1])?;
                for event in drag_gesture(dx, dy) {
                    self.handle_pointer(event);
                }
                Ok(vec![self.describe_camera()])
            }
            "scroll" => {
                let (arg, _) = split_first(rest);
                if arg.is_empty() {
                    return Ok(vec!["Usage: scroll <dy>".to_string()]);
                }
                let dy = parse_number(arg)?;
                self.handle_pointer(PointerEvent::Scrolled { dy });
                Ok(vec![self.describe_camera()])
            }
            "camera" => Ok(vec![self.describe_camera()]),
            "status" => {
                let mut out = Vec::new();
                out.push(format!("Tick: {}", self.tick));
                out.push(self.describe_camera());
                out.push(format!(
                    "Records: {} filled / {} (revision {})",
                    self.records.iter_filled().count(),
                    self.records.capacity(),
                    self.records.revision()
                ));
                out.push(format!("Dirty: {:?}", self.dirty));
                if let Some(stats) = self.last_stats {
                    out.push(format!(
                        "Last frame: {} segments, {} drawn, {} skipped",
                        stats.segments, stats.records_drawn, stats.records_skipped
                    ));
                }
                Ok(out)
            }
            "help" => Ok(vec![
                "Commands: set <slot> <record>, clear <slot>, list, drag <dx> <dy>, \
                 scroll <dy>, camera, frame, status, quit"
                    .to_string(),
                "Records: plane <a> <b> <c> <d> | point <x> <y> <z>".to_string(),
            ]),
            "quit" | "exit" => {
                info!("Viewer shutting down");
                self.request_quit();
                Ok(vec!["Bye".to_string()])
            }
            other => Ok(vec![format!("Unknown command: {}", other)]),
        }
    }

    fn describe_camera(&self) -> String {
        let p = self.camera.position();
        format!("Camera: r={:.4} theta={:.4} phi={:.4}", p.r, p.theta, p.phi)
    }
}

/// Lists the segments of a presented frame.
pub fn describe_frame(frame: &Frame) -> Vec<String> {
    let mut out = vec![format!("Frame: {} segments", frame.segments.len())];
    for (color, s) in &frame.segments {
        out.push(format!(
            "  #{:02x}{:02x}{:02x} ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            color.r, color.g, color.b, s.from.x, s.from.y, s.to.x, s.to.y
        ));
    }
    out
}

fn describe_record(text: &str) -> &'static str {
    match SceneRecord::parse(text) {
        Some(SceneRecord::Plane(p)) if p.is_degenerate() => "degenerate plane",
        Some(SceneRecord::Plane(_)) => "plane",
        Some(SceneRecord::Point(_)) => "point",
        None if text.trim().is_empty() => "empty",
        None => "not drawn",
    }
}

/// Splits off the first whitespace-delimited token.
fn split_first(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(at) => (&s[..at], s[at..].trim_start()),
        None => (s, ""),
    }
}

fn parse_slot(s: &str) -> anyhow::Result<usize> {
    s.parse()
        .with_context(|| format!("invalid slot index {:?}", s))
}

fn parse_number(s: &str) -> anyhow::Result<f64> {
    let v: f64 = s.parse().with_context(|| format!("invalid number {:?}", s))?;
    anyhow::ensure!(v.is_finite(), "number must be finite, got {}", s);
    Ok(v)
}
