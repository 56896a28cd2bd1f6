//! Windowless snapshots.
//!
//! Runs the preloader on a manual 60 Hz clock up to the end of the hold
//! phase, when the figure is fully formed, and rasterizes that frame.

use crate::accessibility::Preferences;
use crate::config::Config;
use crate::error::RunError;
use crate::palette::BACKGROUND;
use crate::phase::Phase;
use crate::preloader::Preloader;
use crate::render::{Canvas, HighContrast, RasterCanvas};
use crate::time::FRAME;
use std::path::Path;

/// Simulate to the last hold frame and draw it.
///
/// Under reduced motion the canvas only holds the background.
pub fn render_snapshot(config: &Config, prefs: Preferences) -> RasterCanvas {
    let (width, height) = (config.window.width, config.window.height);

    let mut builder = Preloader::builder()
        .with_config(config.preloader)
        .with_surface_size(width as f32, height as f32)
        .with_reduced_motion(prefs.reduced_motion);
    if let Some(seed) = config.seed {
        builder = builder.with_seed(seed);
    }
    let mut preloader = builder.activate();

    let stop = config
        .preloader
        .timeline
        .start_of(Phase::Explode)
        .saturating_sub(FRAME);
    let mut frames = 0u32;
    while preloader.is_running() && preloader.elapsed() + FRAME <= stop {
        preloader.tick(FRAME);
        frames += 1;
    }
    log::debug!(
        "snapshot after {} frames ({}ms, {})",
        frames,
        preloader.elapsed().as_millis(),
        preloader.phase()
    );

    let mut canvas = RasterCanvas::new(width, height);
    canvas.clear(BACKGROUND);
    if prefs.high_contrast {
        preloader.draw(&mut HighContrast(&mut canvas));
    } else {
        preloader.draw(&mut canvas);
    }
    preloader.teardown();
    canvas
}

/// Render a snapshot and write it as an image; the format follows the
/// file extension.
pub fn snapshot(config: &Config, prefs: Preferences, path: impl AsRef<Path>) -> Result<(), RunError> {
    let path = path.as_ref();
    render_snapshot(config, prefs).save(path)?;
    log::info!("wrote {}x{} snapshot to {}", config.window.width, config.window.height, path.display());
    Ok(())
}
