//! Built-in self-test.
//!
//! Exercises the projection engine headlessly and reports each check.
//! Runs with `viewer --self-test`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::time::{Duration, Instant};

use projection_shared::{
    basis::orthonormals,
    camera::{CameraLimits, OrbitCamera},
    config::ViewerConfig,
    math::{Plane, Point3, PolarVector, Vector3},
    projector::{Projector, Viewport},
    render::{RecordingSurface, Rgba},
    solve::solve_coefficients,
};

use crate::{input::drag_gesture, viewer::ViewerState};

const TOL: f64 = 1e-9;

/// Outcome of one check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub id: &'static str,
    pub name: &'static str,
    pub duration: Duration,
    pub error: Option<String>,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs a check and captures its result.
fn run_check<F>(id: &'static str, name: &'static str, f: F) -> CheckResult
where
    F: FnOnce() -> Result<(), String>,
{
    let start = Instant::now();
    let error = f().err();
    CheckResult {
        id,
        name,
        duration: start.elapsed(),
        error,
    }
}

fn ensure(cond: bool, msg: impl FnOnce() -> String) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(msg())
    }
}

/// Runs every check in order.
pub fn run_all() -> Vec<CheckResult> {
    vec![
        run_check("ALG-001", "normalize yields unit vectors", || {
            for v in sample_vectors() {
                let n = v.normalize().map_err(|e| format!("{v:?}: {e}"))?;
                ensure((n.norm() - 1.0).abs() < TOL, || format!("|{n:?}| != 1"))?;
            }
            ensure(Vector3::ZERO.normalize().is_err(), || {
                "zero vector normalized".to_string()
            })
        }),
        run_check("ALG-002", "polar round trip", || {
            for &(r, theta, phi) in &[(1.0, 0.4, 0.3), (3.0, 2.0, 2.5), (0.5, FRAC_PI_4, -1.0)] {
                let pv = PolarVector::new(r, theta, phi);
                let back = PolarVector::from_cartesian(pv.to_cartesian())
                    .map_err(|e| e.to_string())?;
                ensure(
                    (back.r - r).abs() < TOL
                        && (back.theta - theta).abs() < TOL
                        && (back.phi - phi).abs() < TOL,
                    || format!("{pv:?} came back as {back:?}"),
                )?;
            }
            Ok(())
        }),
        run_check("BAS-001", "plane basis is orthonormal", || {
            for n in sample_vectors() {
                let b = orthonormals(&Plane::from_normal(n)).map_err(|e| e.to_string())?;
                let scale = n.norm();
                ensure(
                    b.u.dot(n).abs() < TOL * scale
                        && b.w.dot(n).abs() < TOL * scale
                        && b.u.dot(b.w).abs() < TOL
                        && (b.u.norm() - 1.0).abs() < TOL
                        && (b.w.norm() - 1.0).abs() < TOL,
                    || format!("basis {b:?} for normal {n:?}"),
                )?;
            }
            Ok(())
        }),
        run_check("SLV-001", "change of basis round trip", || {
            let v = Vector3::new(0.25, 0.25, 0.3);
            let b = orthonormals(&Plane::from_normal(v)).map_err(|e| e.to_string())?;
            for p in [
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(-4.0, 7.5, 2.0),
                Point3::new(100.0, 100.0, -100.0),
            ] {
                let k = solve_coefficients(v, b.u, b.w, p).map_err(|e| e.to_string())?;
                let back = k.reconstruct(v, b.u, b.w);
                ensure(
                    (back.to_vector() - p.to_vector()).norm() < 1e-7,
                    || format!("{p:?} reconstructed as {back:?}"),
                )?;
            }
            Ok(())
        }),
        run_check("CAM-001", "camera clamps hold", || {
            let mut cam = OrbitCamera::new(PolarVector::new(0.5, 1.0, 0.0), CameraLimits::default());
            let limits = cam.limits();
            for dy in [1e4, -3e4, 50.0, -1e6] {
                cam.drag(0.0, dy);
                let theta = cam.position().theta;
                ensure(
                    theta >= limits.theta_epsilon && theta <= PI - limits.theta_epsilon,
                    || format!("theta {theta} escaped"),
                )?;
            }
            for _ in 0..1000 {
                cam.zoom(10.0);
            }
            ensure(cam.position().r >= limits.min_radius, || {
                format!("radius {} below minimum", cam.position().r)
            })
        }),
        run_check("CAM-002", "drag there and back restores azimuth", || {
            let mut viewer = ViewerState::new(ViewerConfig::default());
            let phi0 = viewer.camera().position().phi;
            for (dx, dy) in [(400.0, 0.0), (-400.0, 0.0)] {
                for e in drag_gesture(dx, dy) {
                    viewer.handle_pointer(e);
                }
                viewer.update();
            }
            let phi = viewer.camera().position().phi;
            ensure((phi - phi0).abs() < TOL, || format!("phi {phi0} -> {phi}"))
        }),
        run_check("SCN-001", "degenerate plane draws nothing", || {
            let mut viewer = ViewerState::new(ViewerConfig::default());
            viewer.set_record(0, "plane 0 0 0 0").map_err(|e| e.to_string())?;
            let mut surface = RecordingSurface::new();
            viewer.render(&mut surface);
            let frame = surface.last_frame().ok_or("no frame presented")?;
            let drawn = frame
                .segments
                .iter()
                .filter(|(c, _)| *c == Rgba::for_slot(0))
                .count();
            ensure(drawn == 0, || format!("{drawn} segments drawn for zero plane"))
        }),
        run_check("SCN-002", "default camera point projection", || {
            let cfg = ViewerConfig::default();
            let cam = OrbitCamera::from_config(&cfg);
            let proj = Projector::new(&cam, Viewport::new(640, 480)).map_err(|e| e.to_string())?;
            let p = Point3::new(10.0, 0.0, 0.0);
            let got = proj.project(p).map_err(|e| e.to_string())?;

            // Screen axes straight from the polar formulas: u is the view
            // direction tilted up by π/2, w = u × view normalized. Both are
            // orthogonal to the view, so the solve reduces to dot products.
            let PolarVector { r, theta, phi } = cam.position();
            let view = Vector3::new(
                r * theta.sin() * phi.cos(),
                r * theta.sin() * phi.sin(),
                r * theta.cos(),
            );
            let t = theta - FRAC_PI_2;
            let u = Vector3::new(t.sin() * phi.cos(), t.sin() * phi.sin(), t.cos());
            let w = u.cross(view) * (1.0 / u.cross(view).norm());
            let want_x = 320.0 + p.to_vector().dot(w) / r;
            let want_y = 240.0 - p.to_vector().dot(u) / r;
            // Closed form for the default pose.
            let closed_x = 320.0 - 20.0 / 2.0_f64.sqrt();
            ensure(
                (got.x - want_x).abs() < 1e-9
                    && (got.y - want_y).abs() < 1e-9
                    && (got.x - closed_x).abs() < 1e-9
                    && (got.y - 250.0).abs() < 1e-9,
                || format!("got ({}, {}), want ({want_x}, {want_y})", got.x, got.y),
            )
        }),
    ]
}

fn sample_vectors() -> [Vector3; 5] {
    [
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, -2.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(-3.0, 0.5, -7.0),
        Vector3::new(1e-4, -2e-4, 3e-4),
    ]
}
