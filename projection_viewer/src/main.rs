//! Standalone viewer binary.
//!
//! Usage:
//!   cargo run -p projection_viewer
//!   cargo run -p projection_viewer -- --self-test
//!
//! The viewer runs a fixed timestep loop and redraws the scene into a
//! headless recording surface whenever the camera or the records change.
//! If `PROJECTIONS_CONFIG` names a JSON file it is used as configuration.
//!
//! Console commands:
//!   set <slot> <record>  - Set a record, e.g. `set 0 plane 0 0 1 10`
//!   clear <slot>         - Clear a record
//!   list                 - Show the filled records
//!   drag <dx> <dy>       - Orbit the camera as if dragged by (dx, dy) pixels
//!   scroll <dy>          - Zoom as if scrolled by dy
//!   camera / status      - Show camera / viewer status
//!   frame                - Print the segments of the last drawn frame
//!   quit                 - Exit viewer

use std::env;
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use projection_shared::{config::ViewerConfig, render::RecordingSurface};
use projection_viewer::{
    clock::FrameClock,
    selftest,
    viewer::{describe_frame, ViewerState},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

const CONFIG_ENV: &str = "PROJECTIONS_CONFIG";

fn load_config() -> anyhow::Result<ViewerConfig> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read config {}", path))?;
            let cfg = ViewerConfig::from_json_str(&text)
                .with_context(|| format!("parse config {}", path))?;
            cfg.validate()
                .with_context(|| format!("invalid config {}", path))?;
            Ok(cfg)
        }
        Err(_) => Ok(ViewerConfig::default()),
    }
}

fn wants_self_test() -> bool {
    env::args()
        .skip(1)
        .any(|a| a == "--self-test" || a.starts_with("-test"))
}

fn run_self_test() -> anyhow::Result<()> {
    println!("Running self-test...");
    let results = selftest::run_all();
    let failed = results.iter().filter(|r| !r.passed()).count();
    for r in &results {
        match &r.error {
            None => println!("  ok    {} {} ({:?})", r.id, r.name, r.duration),
            Some(e) => println!("  FAIL  {} {}: {}", r.id, r.name, e),
        }
    }
    println!();
    println!("{} passed, {} failed", results.len() - failed, failed);
    anyhow::ensure!(failed == 0, "{} self-test check(s) failed", failed);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = load_config().context("load config")?;
    if wants_self_test() {
        return run_self_test();
    }

    info!(
        tick_hz = cfg.tick_hz,
        width = cfg.window_width,
        height = cfg.window_height,
        slots = cfg.max_records,
        "Starting viewer"
    );

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("> ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Viewer ready. Type 'help' for commands, 'quit' to exit.");
    println!();

    let mut viewer = ViewerState::new(cfg);
    let mut surface = RecordingSurface::new();
    let mut clock = FrameClock::new(viewer.cfg.tick_interval(), Instant::now());

    while viewer.is_running() {
        let steps = clock.due_steps(Instant::now());
        if let Some(stats) = viewer.advance(steps, &mut surface) {
            debug!(
                tick = viewer.tick(),
                steps,
                segments = stats.segments,
                skipped = stats.records_skipped,
                "Frame presented"
            );
        }

        // Wait for the next tick or the next console line.
        let next_tick = tokio::time::Instant::from_std(clock.next_due());
        tokio::select! {
            line = console_rx.recv() => match line {
                Some(line) => {
                    let output = if line == "frame" {
                        Ok(surface
                            .last_frame()
                            .map(describe_frame)
                            .unwrap_or_else(|| vec!["No frame drawn yet".to_string()]))
                    } else {
                        viewer.exec_console(&line)
                    };
                    match output {
                        Ok(lines) => {
                            for line in lines {
                                println!("{}", line);
                            }
                        }
                        Err(e) => println!("Error: {:#}", e),
                    }
                }
                None => {
                    info!("Console closed");
                    viewer.request_quit();
                }
            },
            _ = tokio::time::sleep_until(next_tick) => {}
        }
    }

    info!(ticks = viewer.tick(), "Viewer stopped");
    Ok(())
}
