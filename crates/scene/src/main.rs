//! Headless driver: mounts the tree, plays a fixed number of frames and logs
//! what a renderer would upload.

use anyhow::{Context, Result};
use scene::greeting::Offline;
use scene::{greeting_or_fallback, SceneConfig, TreeScene};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load_from(&PathBuf::from(path)),
        None => SceneConfig::load(),
    };

    let greeting = greeting_or_fallback(&Offline, None);
    log::info!("{} - {} ({})", greeting.title, greeting.message, greeting.author);

    let frames = config.frames;
    let step = 1.0 / f64::from(config.frame_rate);
    let mut scene = TreeScene::mount(config).context("could not mount the tree")?;

    let camera = scene.camera();
    log::info!(
        "Camera at {:?}, fov {}, orbit {}..{}",
        camera.position,
        camera.fov_degrees,
        camera.min_distance,
        camera.max_distance
    );

    let mut uploads = 0u32;
    for frame in 1..=frames {
        scene.on_frame(f64::from(frame) * step);
        if scene.take_snow_dirty() {
            uploads += 1;
        }
        if frame % 120 == 0 {
            if let Some((min, max)) = scene.with_snow(|s| s.field().bounds()) {
                log::debug!("frame {}: snow y {:.2}..{:.2}", frame, min.y, max.y);
            }
        }
    }

    log::info!(
        "Played {} frames ({:.1} s), {} snow uploads, star yaw {:.2} rad",
        scene.time().frame_count(),
        scene.time().elapsed_seconds(),
        uploads,
        scene.star_yaw().unwrap_or_default()
    );
    if let Some((min, max)) = scene.with_snow(|s| s.field().bounds()) {
        log::info!("Snow extents {:?} .. {:?}", min, max);
    }
    scene.unmount();
    Ok(())
}
