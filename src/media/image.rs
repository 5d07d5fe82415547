// SPDX-License-Identifier: MPL-2.0
//! Decoding fetched bytes into displayable image handles.

use super::source::fetch_bytes;
use crate::error::MediaError;
use iced::widget::image;
use image_rs::GenericImageView;

/// Longest edge of decoded grid thumbnails, in pixels.
pub const THUMBNAIL_MAX_EDGE: u32 = 640;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Wraps RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes encoded bytes (PNG, JPEG, ...) at full size.
///
/// # Errors
/// Returns [`MediaError::UnsupportedFormat`] for unknown formats and
/// [`MediaError::Decode`] for corrupt data.
pub fn decode(bytes: &[u8]) -> Result<ImageData, MediaError> {
    decode_bounded(bytes, None)
}

/// Decodes and downsizes so the longest edge fits [`THUMBNAIL_MAX_EDGE`].
///
/// # Errors
/// Same as [`decode`].
pub fn decode_thumbnail(bytes: &[u8]) -> Result<ImageData, MediaError> {
    decode_bounded(bytes, Some(THUMBNAIL_MAX_EDGE))
}

fn decode_bounded(bytes: &[u8], max_edge: Option<u32>) -> Result<ImageData, MediaError> {
    let decoded = image_rs::load_from_memory(bytes).map_err(|err| match err {
        image_rs::ImageError::Unsupported(e) => MediaError::UnsupportedFormat(e.to_string()),
        other => MediaError::Decode(other.to_string()),
    })?;

    let decoded = match max_edge {
        Some(edge) if decoded.width() > edge || decoded.height() > edge => {
            decoded.thumbnail(edge, edge)
        }
        _ => decoded,
    };

    let (width, height) = decoded.dimensions();
    Ok(ImageData::from_rgba(
        width,
        height,
        decoded.to_rgba8().into_vec(),
    ))
}

/// Fetches `location` and decodes it as a grid thumbnail.
pub async fn load_thumbnail(location: String) -> Result<ImageData, MediaError> {
    load(location, true).await
}

/// Fetches `location` and decodes it at full size.
pub async fn load_full(location: String) -> Result<ImageData, MediaError> {
    load(location, false).await
}

async fn load(location: String, thumbnail: bool) -> Result<ImageData, MediaError> {
    let bytes = fetch_bytes(location)
        .await
        .map_err(|err| MediaError::from(&err))?;
    tokio::task::spawn_blocking(move || {
        if thumbnail {
            decode_thumbnail(&bytes)
        } else {
            decode(&bytes)
        }
    })
    .await
    .map_err(|err| MediaError::Other(err.to_string()))?
}
