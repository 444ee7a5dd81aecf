//! Glide demo: Two sprites moving at the frame cadence.
//!
//! One sprite walks a square step by step, the other glides between random
//! points. Run with `RUST_LOG=cadence=trace` to watch every tick.

use cadence::prelude::*;
use cadence::GlideReplacement;
use std::time::Instant;

fn main() -> StageResult<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let runtime = Runtime::new(RuntimeConfig {
        fps: 30,
        seed: Some(42),
        ..RuntimeConfig::default()
    })?;

    let walker = runtime.sprite();
    let glider = runtime.sprite();
    glider.set_glide_replacement(GlideReplacement::Resolve);

    {
        let walker = walker.clone();
        runtime.spawn(async move {
            for _ in 0..4 {
                for _ in 0..10 {
                    walker.move_steps(5.0).await;
                }
                walker.turn_right(90.0).await;
            }
            println!("walker back at ({}, {})", walker.x(), walker.y());
        });
    }

    {
        let glider = glider.clone();
        runtime.spawn(async move {
            for leg in 1..=3 {
                match glider.glide_to(Target::Random, 0.5) {
                    Ok(glide) => glide.await,
                    Err(err) => {
                        eprintln!("glide failed: {err}");
                        return;
                    }
                }
                println!("glider leg {leg} ended at ({}, {})", glider.x(), glider.y());
            }
        });
    }

    let started = Instant::now();
    let report = runtime.run();
    println!();
    println!(
        "{} frames in {:.2?} (finished: {}, dropped ticks: {})",
        report.frames,
        started.elapsed(),
        report.finished,
        report.dropped_ticks
    );

    let frame_loop = runtime.render_loop();
    for sprite in [&walker, &glider] {
        if let Some(props) = frame_loop.drawn(sprite.id()) {
            println!(
                "sprite {} last drawn at ({}, {}) facing {}",
                sprite.id(),
                props.position.x,
                props.position.y,
                props.direction
            );
        }
    }
    Ok(())
}
