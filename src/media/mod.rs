// SPDX-License-Identifier: MPL-2.0
//! Media ingestion: classification, manifests, fetching and decoding.

pub mod classifier;
pub mod image;
pub mod manifest;
pub mod source;

pub use classifier::{classify, ContextHints, ThumbnailPreset};
pub use image::ImageData;
pub use manifest::Gallery;
pub use source::{fetch_bytes, probe, ManifestUrls, UrlProvider};

/// Supported media extensions
pub mod extensions {
    /// Image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp", "ico", "svg", "avif",
    ];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];

    /// Document file extensions
    pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

    /// Extensions offered in the manifest open dialog.
    pub const MANIFEST_EXTENSIONS: &[&str] = &["toml"];
}
