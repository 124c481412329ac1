//! Raster image loading and circular cropping.
//!
//! Sources are async because photos may live behind files or object storage,
//! but the engine awaits each load before the next draw call: the page op
//! stream is a single cursor and must stay in order.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::error::ImageError;

/// Async provider of raw image bytes for a product photo location.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ImageError>;
}

/// Reads photos from a base directory; the photo location is a relative path.
pub struct FileImageSource {
    base_dir: PathBuf,
}

impl FileImageSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ImageError> {
        let path = self.base_dir.join(location);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ImageError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Photos held in memory, keyed by location. Used by tests and by hosts
/// that cache uploads themselves.
#[derive(Default)]
pub struct InMemoryImageSource {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(location.into(), bytes);
    }
}

#[async_trait]
impl ImageSource for InMemoryImageSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ImageError> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| ImageError::NotFound(location.to_string()))
    }
}

/// Optional ring stroked on the circle edge, in raster pixels.
#[derive(Debug, Clone, Copy)]
pub struct PhotoStroke {
    pub width_px: u32,
    pub rgb: [u8; 3],
}

/// Crop decoded image bytes to a circle of `target_px` diameter.
///
/// The image is cover-fit: scaled so it fully fills the circle (never
/// letterboxed), center-cropped, then alpha-clipped to the circle with a
/// small inset left for the stroke ring when one is requested. Pixels
/// outside the circle become fully transparent.
pub fn crop_circular(
    bytes: &[u8],
    target_px: u32,
    stroke: Option<PhotoStroke>,
) -> Result<RgbaImage, ImageError> {
    let target_px = target_px.max(2);
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

    let mut raster = decoded
        .resize_to_fill(target_px, target_px, FilterType::Triangle)
        .into_rgba8();

    let stroke_w = stroke.map(|s| s.width_px).unwrap_or(0) as f32;
    let center = (target_px as f32 - 1.0) / 2.0;
    let outer_r = target_px as f32 / 2.0;
    let inner_r = (outer_r - stroke_w).max(1.0);

    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > outer_r {
            *pixel = Rgba([0, 0, 0, 0]);
        } else if dist > inner_r {
            match stroke {
                Some(s) => *pixel = Rgba([s.rgb[0], s.rgb[1], s.rgb[2], 255]),
                None => *pixel = Rgba([0, 0, 0, 0]),
            }
        }
    }

    Ok(raster)
}
