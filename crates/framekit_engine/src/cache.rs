//! Named image assets, decoded once and shared by every draw that uses them.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use framekit_common::Color;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::config::{DuplicatePolicy, ScaleFilter};
use crate::error::{InvalidArgument, LoadError};

/// Raw RGBA8 pixels handed back by an [`ImageDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Turns encoded image bytes into RGBA8 pixels.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, String>;
}

/// Decoder backed by the `image` crate (PNG, JPEG and BMP).
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, String> {
        let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

/// An immutable decoded image.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAsset {
    name: String,
    width: u32,
    height: u32,
    /// RGBA8, row-major.
    pixels: Vec<u8>,
}

impl ImageAsset {
    pub fn from_rgba(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, InvalidArgument> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(InvalidArgument::new(
                "pixels",
                format!(
                    "expected {expected} bytes for {width}x{height} RGBA, got {}",
                    pixels.len()
                ),
            ));
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
            pixels,
        })
    }

    /// A `width` x `height` image filled with one colour.
    pub fn solid(name: impl Into<String>, width: u32, height: u32, color: Color) -> Self {
        let (r, g, b, a) = color.rgba();
        let pixels = [r, g, b, a].repeat(width as usize * height as usize);
        Self {
            name: name.into(),
            width,
            height,
            pixels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Color::new_rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub struct ResourceCache {
    assets: HashMap<String, Arc<ImageAsset>>,
    decoder: Box<dyn ImageDecoder>,
    scale_filter: ScaleFilter,
    duplicate_policy: DuplicatePolicy,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(ScaleFilter::default(), DuplicatePolicy::default())
    }
}

impl ResourceCache {
    pub fn new(scale_filter: ScaleFilter, duplicate_policy: DuplicatePolicy) -> Self {
        Self::with_decoder(Box::new(ImageCrateDecoder), scale_filter, duplicate_policy)
    }

    pub fn with_decoder(
        decoder: Box<dyn ImageDecoder>,
        scale_filter: ScaleFilter,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        Self {
            assets: HashMap::new(),
            decoder,
            scale_filter,
            duplicate_policy,
        }
    }

    /// Decode `bytes`, optionally resize to `scale` (width, height) and store
    /// the result under `name`.
    pub fn load(
        &mut self,
        name: &str,
        bytes: &[u8],
        scale: Option<(u32, u32)>,
    ) -> Result<(), LoadError> {
        self.check_duplicate(name)?;
        if let Some((width, height)) = scale {
            if width == 0 || height == 0 {
                return Err(LoadError::InvalidScale {
                    name: name.to_string(),
                    width,
                    height,
                });
            }
        }

        let decoded = self
            .decoder
            .decode(bytes)
            .map_err(|reason| LoadError::DecodeFailed {
                name: name.to_string(),
                reason,
            })?;
        let DecodedImage {
            width,
            height,
            pixels,
        } = decoded;
        let decode_failed = |reason: String| LoadError::DecodeFailed {
            name: name.to_string(),
            reason,
        };
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            decode_failed(format!("pixel buffer does not match {width}x{height}"))
        })?;

        let image = match scale {
            Some((w, h)) if (w, h) != (width, height) => {
                imageops::resize(&image, w, h, map_filter(self.scale_filter))
            }
            _ => image,
        };

        let (width, height) = image.dimensions();
        let asset = ImageAsset::from_rgba(name, width, height, image.into_raw())
            .map_err(|e| decode_failed(e.to_string()))?;
        self.store(asset);
        Ok(())
    }

    /// Read an image file from disk and [`load`](Self::load) it.
    pub fn load_file(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
        scale: Option<(u32, u32)>,
    ) -> Result<(), LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        self.load(name, &bytes, scale)
    }

    /// Register an already decoded image under `name`.
    pub fn insert(&mut self, name: &str, asset: ImageAsset) -> Result<(), LoadError> {
        self.check_duplicate(name)?;
        let asset = if asset.name == name {
            asset
        } else {
            ImageAsset {
                name: name.to_string(),
                ..asset
            }
        };
        self.store(asset);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ImageAsset> {
        self.assets.get(name).map(Arc::as_ref)
    }

    /// Shared handle to an asset, kept alive by draw commands until present.
    pub fn handle(&self, name: &str) -> Option<Arc<ImageAsset>> {
        self.assets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        log::debug!("clearing {} cached image(s)", self.assets.len());
        self.assets.clear();
    }

    fn check_duplicate(&self, name: &str) -> Result<(), LoadError> {
        if self.duplicate_policy == DuplicatePolicy::Reject && self.assets.contains_key(name) {
            return Err(LoadError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn store(&mut self, asset: ImageAsset) {
        let (width, height) = (asset.width, asset.height);
        let name = asset.name.clone();
        if self.assets.insert(name.clone(), Arc::new(asset)).is_some() {
            log::debug!("replaced image '{}' ({}x{})", name, width, height);
        } else {
            log::debug!("loaded image '{}' ({}x{})", name, width, height);
        }
    }
}

fn map_filter(filter: ScaleFilter) -> FilterType {
    match filter {
        ScaleFilter::Nearest => FilterType::Nearest,
        ScaleFilter::Linear => FilterType::Triangle,
    }
}
