// SPDX-License-Identifier: MPL-2.0
//! Where asset bytes come from.
//!
//! The gallery never builds URLs itself: a [`UrlProvider`] turns manifest
//! references into ready-to-fetch locations, and [`fetch_bytes`] reads
//! whatever location it was given, local or remote.

use super::classifier::ThumbnailPreset;
use crate::domain::media::MediaItem;
use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the 1-based page number in page templates.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Builds fetchable locations for assets.
pub trait UrlProvider {
    /// Location of the full-size asset for a manifest reference.
    fn source_url(&self, reference: &str) -> String;

    /// Location of a thumbnail for a manifest reference, sized for `preset`.
    fn thumbnail_url(&self, reference: &str, preset: ThumbnailPreset) -> String;

    /// Location of a rasterized document page, when one is available.
    fn page_url(&self, item: &MediaItem, page: u32) -> Option<String>;
}

/// Resolves manifest references relative to the manifest's directory.
#[derive(Debug, Clone, Default)]
pub struct ManifestUrls {
    base_dir: PathBuf,
    page_templates: HashMap<String, String>,
}

impl ManifestUrls {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            page_templates: HashMap::new(),
        }
    }

    /// Registers the page image template of a document item.
    pub fn insert_page_template(&mut self, item_id: impl Into<String>, template: String) {
        self.page_templates.insert(item_id.into(), template);
    }

    fn resolve(&self, reference: &str) -> String {
        match Location::parse(reference) {
            Location::Remote(url) => url.to_string(),
            Location::Local(path) if path.is_absolute() => path.display().to_string(),
            Location::Local(path) => self.base_dir.join(path).display().to_string(),
        }
    }
}

impl UrlProvider for ManifestUrls {
    fn source_url(&self, reference: &str) -> String {
        self.resolve(reference)
    }

    fn thumbnail_url(&self, reference: &str, _preset: ThumbnailPreset) -> String {
        // Local and plain remote files cannot be resized on request.
        self.resolve(reference)
    }

    fn page_url(&self, item: &MediaItem, page: u32) -> Option<String> {
        let template = self.page_templates.get(item.id())?;
        let page_count = item.metadata().page_count?;
        if page == 0 || page > page_count {
            return None;
        }
        Some(self.resolve(&template.replace(PAGE_PLACEHOLDER, &page.to_string())))
    }
}

/// A parsed asset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location<'a> {
    /// `http://` or `https://` URL.
    Remote(&'a str),
    /// Filesystem path, from a plain path or a `file://` URL.
    Local(PathBuf),
}

impl<'a> Location<'a> {
    #[must_use]
    pub fn parse(location: &'a str) -> Self {
        let lowered = location.get(..8).map(str::to_ascii_lowercase);
        match lowered.as_deref() {
            Some(prefix) if prefix.starts_with("http://") || prefix == "https://" => {
                Location::Remote(location)
            }
            _ => match location.strip_prefix("file://") {
                Some(path) => Location::Local(PathBuf::from(path)),
                None => Location::Local(PathBuf::from(location)),
            },
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Local(path) => Some(path),
            Location::Remote(_) => None,
        }
    }
}

/// Reads the bytes at `location`.
///
/// No timeout is applied: a stalled transfer stays pending until the
/// transport gives up.
pub async fn fetch_bytes(location: String) -> Result<Vec<u8>> {
    match Location::parse(&location) {
        Location::Remote(url) => {
            let response = reqwest::get(url).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
        Location::Local(path) => Ok(tokio::fs::read(path).await?),
    }
}

/// Checks that `location` exists and returns its size in bytes when known.
///
/// Remote locations are probed with a `HEAD` request so the body is never
/// transferred.
pub async fn probe(location: String) -> Result<Option<u64>> {
    match Location::parse(&location) {
        Location::Remote(url) => {
            let response = reqwest::Client::new()
                .head(url)
                .send()
                .await?
                .error_for_status()?;
            Ok(response.content_length())
        }
        Location::Local(path) => Ok(Some(tokio::fs::metadata(path).await?.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaKind, MediaMetadata};
    use crate::error::{Error, MediaError};
    use tempfile::tempdir;

    #[test]
    fn locations_are_classified() {
        assert!(Location::parse("https://cdn.example.com/a.png").is_remote());
        assert!(Location::parse("HTTP://example.com/a.png").is_remote());
        assert_eq!(
            Location::parse("file:///tmp/a.png"),
            Location::Local(PathBuf::from("/tmp/a.png"))
        );
        assert_eq!(
            Location::parse("shots/a.png").as_path(),
            Some(Path::new("shots/a.png"))
        );
    }

    #[test]
    fn relative_references_resolve_against_manifest_dir() {
        let urls = ManifestUrls::new("/gallery");
        assert_eq!(
            urls.source_url("shots/home.png"),
            Path::new("/gallery").join("shots/home.png").display().to_string()
        );
        assert_eq!(
            urls.thumbnail_url("https://cdn.example.com/x.jpg", ThumbnailPreset::Original),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[test]
    fn page_urls_follow_template_and_bounds() {
        let mut urls = ManifestUrls::new("/docs");
        urls.insert_page_template("brief", "pages/brief-{page}.png".to_string());
        let item = MediaItem::new("brief", "/docs/brief.pdf", "/docs/brief.png", MediaKind::Pdf)
            .with_metadata(MediaMetadata {
                page_count: Some(3),
                ..MediaMetadata::default()
            });

        assert_eq!(
            urls.page_url(&item, 2),
            Some(Path::new("/docs").join("pages/brief-2.png").display().to_string())
        );
        assert_eq!(urls.page_url(&item, 0), None);
        assert_eq!(urls.page_url(&item, 4), None);
    }

    #[test]
    fn documents_without_template_have_no_pages() {
        let urls = ManifestUrls::new("/docs");
        let item = MediaItem::new("x", "x.pdf", "x.png", MediaKind::Pdf);
        assert_eq!(urls.page_url(&item, 1), None);
    }

    #[tokio::test]
    async fn fetch_reads_local_files() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bytes.bin");
        std::fs::write(&path, [1u8, 2, 3]).expect("write");

        let bytes = fetch_bytes(path.display().to_string())
            .await
            .expect("local fetch");
        assert_eq!(bytes, vec![1, 2, 3]);

        let via_url = fetch_bytes(format!("file://{}", path.display()))
            .await
            .expect("file url fetch");
        assert_eq!(via_url, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_local_file_maps_to_not_found() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("missing.png");
        let err = fetch_bytes(missing.display().to_string())
            .await
            .expect_err("should fail");
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(MediaError::from(&err), MediaError::NotFound);
    }

    #[tokio::test]
    async fn probe_reports_local_size() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, [0u8; 42]).expect("write");

        let size = probe(path.display().to_string()).await.expect("probe");
        assert_eq!(size, Some(42));
        assert!(probe(dir.path().join("nope.mp4").display().to_string())
            .await
            .is_err());
    }
}
