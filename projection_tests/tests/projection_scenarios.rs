//! End-to-end projection scenarios through `ViewerState` and a recording surface.

use std::f64::consts::FRAC_PI_2;

use projection_shared::{
    basis::orthonormals,
    config::ViewerConfig,
    math::{Plane, Point3, PolarVector, Vector3},
    projector::{Projector, Viewport},
    render::RecordingSurface,
    solve::solve_coefficients,
};
use projection_tests::{assert_close, init_tracing, slot_segments};
use projection_viewer::{input::drag_gesture, ViewerState};

/// Axis segments per frame: labelled positive axes (5 + 5 + 6) plus three bare negative axes.
const AXIS_SEGMENTS: usize = 16 + 9;

fn render_once(viewer: &mut ViewerState) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    viewer.render(&mut surface);
    surface
}

#[test]
fn point_on_x_axis_with_default_camera() -> anyhow::Result<()> {
    init_tracing();
    let mut viewer = ViewerState::new(ViewerConfig::default());
    viewer.set_record(0, "point 10 0 0")?;
    let surface = render_once(&mut viewer);
    let frame = surface.last_frame().expect("frame presented");

    let mark = slot_segments(frame, 0);
    assert_eq!(mark.len(), 2);
    let cx = (mark[0].from.x + mark[0].to.x) / 2.0;
    let cy = (mark[0].from.y + mark[0].to.y) / 2.0;

    // Recompute the view basis from the documented formulas.
    let (r, theta, phi) = (0.5_f64, std::f64::consts::FRAC_PI_4, std::f64::consts::FRAC_PI_4);
    let view = [
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    ];
    let t = theta - FRAC_PI_2;
    let u = [t.sin() * phi.cos(), t.sin() * phi.sin(), t.cos()];
    let cross = [
        u[1] * view[2] - u[2] * view[1],
        u[2] * view[0] - u[0] * view[2],
        u[0] * view[1] - u[1] * view[0],
    ];
    let len = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
    let w = [cross[0] / len, cross[1] / len, cross[2] / len];

    let p = [10.0, 0.0, 0.0];
    let b = p[0] * u[0] + p[1] * u[1] + p[2] * u[2];
    let c = p[0] * w[0] + p[1] * w[1] + p[2] * w[2];
    let want_x = 320.0 + c / r;
    let want_y = 240.0 - b / r;

    assert_close(cx, want_x, 1e-9);
    assert_close(cy, want_y, 1e-9);
    // Closed form for this pose: x = 320 - 10/√2/0.5, y = 240 + 5/0.5.
    assert_close(cx, 320.0 - 20.0 / 2.0_f64.sqrt(), 1e-9);
    assert_close(cy, 250.0, 1e-9);
    Ok(())
}

#[test]
fn zero_plane_produces_no_draw_calls() -> anyhow::Result<()> {
    init_tracing();
    let mut viewer = ViewerState::new(ViewerConfig::default());
    viewer.set_record(0, "plane 0 0 0 0")?;
    let surface = render_once(&mut viewer);
    let frame = surface.last_frame().expect("frame presented");

    assert!(slot_segments(frame, 0).is_empty());
    assert_eq!(frame.segments.len(), AXIS_SEGMENTS);
    let stats = viewer.last_stats().expect("stats recorded");
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.records_drawn, 0);
    Ok(())
}

#[test]
fn bad_records_do_not_disturb_good_ones() -> anyhow::Result<()> {
    let mut viewer = ViewerState::new(ViewerConfig::default());
    viewer.set_record(0, "plane 0 0 0 0")?;
    viewer.set_record(1, "plane 0 0 1 10")?;
    viewer.set_record(2, "pointy 1 2 3 4")?;
    viewer.set_record(3, "point 1 2")?;
    viewer.set_record(4, "point -20 5 5 0")?;
    let surface = render_once(&mut viewer);
    let frame = surface.last_frame().expect("frame presented");

    assert_eq!(slot_segments(frame, 1).len(), 4 + 2 * 19);
    assert!(slot_segments(frame, 2).is_empty());
    assert!(slot_segments(frame, 3).is_empty());
    assert_eq!(slot_segments(frame, 4).len(), 2);
    assert_eq!(frame.segments.len(), AXIS_SEGMENTS + 42 + 2);
    Ok(())
}

#[test]
fn plane_outline_lies_on_the_plane() -> anyhow::Result<()> {
    // `2z = 10` is the horizontal plane z = 5, whatever the normal's length.
    let cfg = ViewerConfig::default();
    let mut viewer = ViewerState::new(cfg.clone());
    viewer.set_record(0, "plane 0 0 2 10")?;
    let surface = render_once(&mut viewer);
    let frame = surface.last_frame().expect("frame presented");
    let outline = &slot_segments(frame, 0)[..4];

    let plane = Plane::new(0.0, 0.0, 2.0, 10.0);
    let basis = orthonormals(&plane)?;
    let half = cfg.plane_scale * cfg.axis_length;
    let corner = (basis.u * half + basis.w * half + Vector3::new(0.0, 0.0, 5.0)).to_point();
    assert_close(2.0 * corner.z, 10.0, 1e-9);

    let projector = Projector::new(viewer.camera(), Viewport::new(640, 480))?;
    let want = projector.project(corner)?;
    assert_close(outline[0].from.x, want.x, 1e-9);
    assert_close(outline[0].from.y, want.y, 1e-9);
    Ok(())
}

#[test]
fn drag_there_and_back_restores_azimuth() {
    let mut viewer = ViewerState::new(ViewerConfig::default());
    let phi0 = viewer.camera().position().phi;
    for (dx, dy) in [(400.0, 0.0), (-400.0, 0.0)] {
        for e in drag_gesture(dx, dy) {
            viewer.handle_pointer(e);
        }
        viewer.update();
    }
    assert_close(viewer.camera().position().phi, phi0, 1e-12);
}

#[test]
fn long_drags_keep_camera_in_range() {
    let mut viewer = ViewerState::new(ViewerConfig::default());
    let eps = viewer.cfg.theta_epsilon;
    for i in 0..200 {
        let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
        for e in drag_gesture(sign * 977.0, sign * 613.0) {
            viewer.handle_pointer(e);
        }
        viewer.update();
        let p = viewer.camera().position();
        assert!(p.theta >= eps && p.theta <= std::f64::consts::PI - eps);
        assert!(p.phi.abs() <= std::f64::consts::TAU);
    }
}

#[test]
fn projection_solve_round_trips_for_orbiting_camera() -> anyhow::Result<()> {
    // Walk the camera around and check the solver's round-trip law on its basis.
    let points = [
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(-37.0, 12.0, 80.0),
        Point3::new(0.0, 0.0, -100.0),
    ];
    for step in 0..24 {
        let phi = -3.0 + 0.25 * f64::from(step);
        let theta = 0.05 + 0.13 * f64::from(step);
        let view = PolarVector::new(0.7, theta, phi).to_cartesian();
        let basis = orthonormals(&Plane::from_normal(view))?;
        for p in points {
            let k = solve_coefficients(view, basis.u, basis.w, p)?;
            let back = k.reconstruct(view, basis.u, basis.w);
            assert!((back.to_vector() - p.to_vector()).norm() < 1e-9, "{p:?} at step {step}");
        }
    }
    Ok(())
}
