//! Stage demo: Backdrops, sounds and real-time waits.
//!
//! A script switches backdrops on a timer while another waits for the
//! sprite to reach the edge of the stage.

use cadence::prelude::*;
use cadence::CostumeKind;

fn main() -> StageResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let runtime = Runtime::new(RuntimeConfig::default())?;
    let stage = runtime.stage();
    let runner = runtime.sprite();

    {
        let stage = stage.clone();
        runtime.spawn(async move {
            for name in ["dawn", "noon", "dusk"] {
                let backdrop = Costume::new(name, format!("{name}.png"), CostumeKind::Bitmap);
                stage.set_backdrop(backdrop).await;
                println!("backdrop: {name}");
                stage.wait_seconds(0.3).await;
            }
        });
    }

    {
        let runner = runner.clone();
        runtime.spawn(async move {
            // Ten steps per frame.
            runner.set_screen_refresh(false).await;
            while runner.x() < 200.0 {
                for _ in 0..10 {
                    runner.move_steps(2.0).await;
                }
                runner.set_screen_refresh(true).await;
                runner.set_screen_refresh(false).await;
            }
            runner.set_screen_refresh(true).await;
        });
    }

    {
        let (stage, runner) = (stage.clone(), runner.clone());
        runtime.spawn(async move {
            let watched = runner.clone();
            stage.wait_until(move || watched.x() >= 200.0).await;
            stage.play_sound(SoundRequest::new("cheer.wav"));
            println!("runner reached x = {}", runner.x());
        });
    }

    let report = runtime.run();
    let sounds = runtime.render_loop().take_sounds();
    println!(
        "{} frames, finished: {}, sounds played: {}",
        report.frames,
        report.finished,
        sounds.len()
    );
    Ok(())
}
