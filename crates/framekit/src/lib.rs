pub mod demo;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use framekit_engine::{Context, EngineConfig};
use framekit_sdl2::SdlInitInfo;

pub use demo::HeroDemo;

pub struct LaunchOptions {
    /// Image to use for the hero instead of the generated sprite.
    pub sprite: Option<PathBuf>,
    pub fps: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            sprite: None,
            fps: 60,
        }
    }
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let config = EngineConfig::builder()
        .title("framekit demo")
        .target_hz(options.fps)
        .build();
    let platform = framekit_sdl2::init(SdlInitInfo::from_config(&config))
        .context("failed to create the display surface")?;
    let mut ctx = Context::new(config, platform);
    let mut game = HeroDemo::new(options.sprite);
    ctx.run(&mut game)?;
    log::info!("final score: {}", game.score());
    Ok(())
}
