//! The rasterization backend.
//!
//! Parses serialized SVG with `usvg`, renders it into a `tiny-skia` pixmap
//! at the requested scale and encodes the result as PNG bytes. The backend
//! needs a font database; loading system fonts happens once, lazily, on
//! first export, the in-process analog of fetching a rasterization library
//! on demand. A machine with no usable fonts leaves the backend unavailable,
//! which strategies surface as [`RasterError::Unavailable`].

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use resvg::usvg::fontdb;

use crate::export::ImagePayload;

/// Failures of the rasterization backend.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The backend could not be brought up (no system fonts); strategies 2
    /// and 3 fail with this and the caller may fall back to strategy 1 or a
    /// manual choice.
    #[error("rasterization backend unavailable: {0}")]
    Unavailable(String),

    #[error("generated SVG could not be parsed: {0}")]
    InvalidSvg(String),

    #[error("could not allocate a {width}x{height} pixel surface")]
    Surface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// A loaded rasterizer holding the shared font database.
pub struct Rasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl Rasterizer {
    /// Loads system fonts and brings up the backend.
    ///
    /// # Errors
    ///
    /// [`RasterError::Unavailable`] when no fonts can be found: text could
    /// not be shaped, so the backend refuses to come up half-working.
    pub fn load() -> Result<Self, RasterError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if db.len() == 0 {
            return Err(RasterError::Unavailable(
                "no system fonts could be loaded".to_string(),
            ));
        }
        info!(faces = db.len(); "Rasterizer loaded system fonts");
        Ok(Self {
            fontdb: Arc::new(db),
        })
    }

    /// Rasterizes an SVG string at the given linear scale and returns the
    /// encoded PNG payload.
    pub fn rasterize(&self, svg: &str, scale: f32) -> Result<ImagePayload, RasterError> {
        let options = resvg::usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };

        let tree = resvg::usvg::Tree::from_str(svg, &options)
            .map_err(|err| RasterError::InvalidSvg(err.to_string()))?;
        let size = tree.size();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (size.width() * scale).ceil() as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or(RasterError::Surface { width, height })?;

        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let rgba = pixmap.data().to_vec();
        let buffer = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or(RasterError::Surface { width, height })?;

        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;

        debug!(width, height; "Rasterized scene to PNG");
        Ok(ImagePayload::new(bytes, width, height))
    }
}
