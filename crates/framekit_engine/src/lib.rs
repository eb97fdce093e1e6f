pub mod cache;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod font;
pub mod geometry;
pub mod headless;
pub mod platform;

pub use framekit_common;
pub use framekit_common::{Color, Event, Key, MouseButton};

pub use cache::{ImageAsset, ImageCrateDecoder, ImageDecoder, ResourceCache};
pub use clock::FrameClock;
pub use compositor::{Backbuffer, DrawCommand, SceneCompositor};
pub use config::{DrawErrorPolicy, DuplicatePolicy, EngineConfig, ScaleFilter};
pub use context::{Context, Game};
pub use error::{DrawError, EngineError, InvalidArgument, LoadError, PlatformError};
pub use events::EventQueue;
pub use font::{BlockFont, FontRasterizer, GlyphBitmap};
pub use geometry::{compute_hitbox, Rect, DEFAULT_HITBOX_SHRINK};
pub use platform::{Clock, Display, EventSource, Platform, SystemClock};
