use framekit_common::Color;
use typed_builder::TypedBuilder;

/// Resampling used when an image is loaded with an explicit size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFilter {
    #[default]
    Nearest,
    Linear,
}

/// What loading an asset under an existing name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Replace,
    Reject,
}

/// How the frame loop treats a draw error returned by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawErrorPolicy {
    /// Log it, count it and keep running.
    #[default]
    Skip,
    /// Stop the loop and return the error.
    Abort,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct EngineConfig {
    #[builder(default = 800)]
    pub width: u32,
    #[builder(default = 600)]
    pub height: u32,
    #[builder(default = "framekit".to_string(), setter(into))]
    pub title: String,
    #[builder(default = Color::BLACK)]
    pub background: Color,
    /// Frames per second; 0 runs unpaced.
    #[builder(default = 60)]
    pub target_hz: u32,
    /// Pixel scale of the built-in block font.
    #[builder(default = 2)]
    pub font_scale: u32,
    #[builder(default)]
    pub scale_filter: ScaleFilter,
    #[builder(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[builder(default)]
    pub draw_error_policy: DrawErrorPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
