//! Draw assembly.
//!
//! Turns the axes and the decoded records into 2D segments for one frame.
//! Each primitive is assembled completely before anything is drawn: if any
//! of its segments cannot be projected the primitive contributes nothing.

use tracing::{debug, trace};

use crate::{
    basis::orthonormals,
    config::ViewerConfig,
    error::GeometryError,
    math::{Line3, Plane, Point3, Screen2, Segment2, Vector3},
    projector::Projector,
    record::{RecordSlots, SceneRecord},
    render::{RenderSurface, Rgba},
};

/// Geometry sizes used when assembling primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub axis_length: f64,
    pub axis_arrow_size: f64,
    pub axis_label_offset: f64,
    pub plane_scale: f64,
    pub plane_grid_spacing: f64,
    pub point_mark_size: f64,
}

impl SceneStyle {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self {
            axis_length: cfg.axis_length,
            axis_arrow_size: cfg.axis_arrow_size,
            axis_label_offset: cfg.axis_label_offset,
            plane_scale: cfg.plane_scale,
            plane_grid_spacing: cfg.plane_grid_spacing,
            point_mark_size: cfg.point_mark_size,
        }
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

/// Upper bound on interior grid lines per direction of one plane.
pub const MAX_GRID_LINES: usize = 1000;

/// The six axis directions: positives first.
pub const AXES: [(i8, i8, i8); 6] = [
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, -1),
];

/// Segments of one axis: shaft, two arrowhead strokes and, for positive
/// axes, a stroked X/Y/Z label past the tip.
pub fn axis_segments(
    projector: &Projector,
    style: &SceneStyle,
    axis: (i8, i8, i8),
) -> Result<Vec<Segment2>, GeometryError> {
    let (x, y, z) = axis;
    let dir = Vector3::new(f64::from(x), f64::from(y), f64::from(z));
    let tip = dir * style.axis_length;

    // First unit axis orthogonal to this one.
    let side = if x == 0 {
        Vector3::new(1.0, 0.0, 0.0)
    } else if y == 0 {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(0.0, 0.0, 1.0)
    };

    let tip_point = tip.to_point();
    let mut out = vec![
        projector.project_line(Line3::new(Point3::ORIGIN, tip))?,
        projector.project_line(Line3::new(tip_point, (side - dir) * style.axis_arrow_size))?,
        projector.project_line(Line3::new(tip_point, (-side - dir) * style.axis_arrow_size))?,
    ];

    let label_at = (dir * (style.axis_length + style.axis_label_offset)).to_point();
    let c = projector.project(label_at)?;
    let s = style.point_mark_size;
    let seg = |x0: f64, y0: f64, x1: f64, y1: f64| {
        Segment2::new(Screen2::new(c.x + x0, c.y + y0), Screen2::new(c.x + x1, c.y + y1))
    };
    match axis {
        (1, 0, 0) => {
            out.push(seg(-s, -s, s, s));
            out.push(seg(s, -s, -s, s));
        }
        (0, 1, 0) => {
            out.push(seg(-s, -s, 0.0, 0.0));
            out.push(seg(s, -s, -s, s));
        }
        (0, 0, 1) => {
            out.push(seg(-s, -s, s, -s));
            out.push(seg(s, -s, -s, s));
            out.push(seg(-s, s, s, s));
        }
        _ => {}
    }
    Ok(out)
}

/// Segments of a plane: the offset outline quad plus interior grid lines.
pub fn plane_segments(
    projector: &Projector,
    style: &SceneStyle,
    plane: &Plane,
) -> Result<Vec<Segment2>, GeometryError> {
    if plane.is_degenerate() {
        return Err(GeometryError::DegeneratePlane);
    }
    // Foot of the perpendicular from the origin: n̂ · d / |n|.
    let normal = plane.normal();
    let offset = normal.normalize()? * (plane.d / normal.norm());
    let basis = orthonormals(plane)?;

    let half = style.plane_scale * style.axis_length;
    let v1 = basis.u * half;
    let v2 = basis.w * half;
    let corners = [v1 + v2, v1 - v2, -v1 - v2, -v1 + v2].map(|e| (e + offset).to_point());

    let mut lines = Vec::new();
    for i in 0..4 {
        let from = corners[i];
        let to = corners[(i + 1) % 4];
        lines.push(Line3::new(from, to.to_vector() - from.to_vector()));
    }

    // Grid: walk from corner 3 along u drawing lines across w, and along -w
    // drawing lines across u.
    let step_u = basis.u * style.plane_grid_spacing;
    let step_w = basis.w * style.plane_grid_spacing;
    let across_w = corners[2].to_vector() - corners[3].to_vector();
    let across_u = corners[0].to_vector() - corners[3].to_vector();
    let count = grid_line_count(2.0 * half, style.plane_grid_spacing);
    let mut p1 = corners[3];
    let mut p2 = corners[3];
    for _ in 0..count {
        p1 = p1.offset(step_u);
        p2 = p2.offset(-step_w);
        lines.push(Line3::new(p1, across_w));
        lines.push(Line3::new(p2, across_u));
    }

    lines
        .into_iter()
        .map(|l| projector.project_line(l))
        .collect()
}

/// Interior grid lines per direction for a span of `extent` at `spacing`,
/// capped at [`MAX_GRID_LINES`].
fn grid_line_count(extent: f64, spacing: f64) -> usize {
    if spacing.is_nan() || spacing <= 0.0 || !extent.is_finite() {
        return 0;
    }
    // Lines strictly inside the span, i.e. i·spacing < extent for i ≥ 1.
    let n = (extent / spacing).ceil();
    if n <= 1.0 {
        0
    } else if n > MAX_GRID_LINES as f64 {
        MAX_GRID_LINES
    } else {
        n as usize - 1
    }
}

/// Segments of a point: an "×" centered on its projection.
pub fn point_segments(
    projector: &Projector,
    style: &SceneStyle,
    point: Point3,
) -> Result<Vec<Segment2>, GeometryError> {
    let c = projector.project(point)?;
    let s = style.point_mark_size;
    Ok(vec![
        Segment2::new(Screen2::new(c.x - s, c.y - s), Screen2::new(c.x + s, c.y + s)),
        Segment2::new(Screen2::new(c.x + s, c.y - s), Screen2::new(c.x - s, c.y + s)),
    ])
}

pub fn record_segments(
    projector: &Projector,
    style: &SceneStyle,
    record: &SceneRecord,
) -> Result<Vec<Segment2>, GeometryError> {
    match record {
        SceneRecord::Plane(p) => plane_segments(projector, style, p),
        SceneRecord::Point(p) => point_segments(projector, style, *p),
    }
}

/// Per-frame outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub segments: usize,
    pub records_drawn: usize,
    pub records_skipped: usize,
}

/// Draws the records only, each in its slot color.
pub fn draw_records(
    surface: &mut dyn RenderSurface,
    projector: &Projector,
    style: &SceneStyle,
    slots: &RecordSlots,
) -> DrawStats {
    let mut stats = DrawStats::default();
    for (index, record) in slots.records() {
        match record_segments(projector, style, &record) {
            Ok(segments) => {
                surface.set_color(Rgba::for_slot(index));
                stats.segments += segments.len();
                stats.records_drawn += 1;
                for s in segments {
                    surface.draw_segment(s);
                }
            }
            Err(e) => {
                stats.records_skipped += 1;
                debug!(slot = index, ?record, error = %e, "Skipping record");
            }
        }
    }
    stats
}

/// Draws a whole frame: background, axes, records, present.
pub fn draw_frame(
    surface: &mut dyn RenderSurface,
    projector: &Projector,
    style: &SceneStyle,
    slots: &RecordSlots,
) -> DrawStats {
    surface.set_color(Rgba::BACKGROUND);
    surface.clear();

    let mut axis_segs = 0;
    for (i, axis) in AXES.iter().enumerate() {
        surface.set_color(if i < 3 {
            Rgba::AXIS_POSITIVE
        } else {
            Rgba::AXIS_NEGATIVE
        });
        match axis_segments(projector, style, *axis) {
            Ok(segments) => {
                axis_segs += segments.len();
                for s in segments {
                    surface.draw_segment(s);
                }
            }
            Err(e) => debug!(?axis, error = %e, "Skipping axis"),
        }
    }

    let mut stats = draw_records(surface, projector, style, slots);
    stats.segments += axis_segs;
    surface.present();
    trace!(
        segments = stats.segments,
        drawn = stats.records_drawn,
        skipped = stats.records_skipped,
        "Frame drawn"
    );
    stats
}
