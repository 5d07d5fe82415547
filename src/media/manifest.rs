// SPDX-License-Identifier: MPL-2.0
//! Gallery manifest ingestion.
//!
//! A manifest is a TOML file listing the assets of one gallery. Loading it
//! resolves every reference through [`ManifestUrls`], measures missing
//! dimensions of local images from their headers, classifies each asset and
//! returns one immutable [`MediaCollection`].
//!
//! ```toml
//! title = "Banking app"
//! context = "ui-ux"
//! project_type = "mobile-app"
//!
//! [[media]]
//! id = "home"
//! source = "shots/home.png"
//! title = "Home screen"
//! ```

use super::classifier::{classify, family_of, ContextHints, Family, ThumbnailPreset};
use super::source::{Location, ManifestUrls, UrlProvider};
use crate::domain::media::{
    CollectionContext, Dimensions, MediaCollection, MediaItem, MediaMetadata, ProjectType,
};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    project_type: Option<String>,
    #[serde(default)]
    media: Vec<MediaEntry>,
}

#[derive(Debug, Deserialize)]
struct MediaEntry {
    id: String,
    source: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    duration_secs: Option<f64>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    byte_size: Option<u64>,
    #[serde(default)]
    page_images: Option<String>,
    #[serde(default)]
    page_count: Option<u32>,
}

/// A loaded gallery: the classified items and how to fetch them.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub title: Option<String>,
    pub context: CollectionContext,
    pub collection: MediaCollection,
    pub urls: ManifestUrls,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            title: None,
            context: CollectionContext::default(),
            collection: MediaCollection::empty(),
            urls: ManifestUrls::default(),
        }
    }
}

/// Loads a manifest file. References resolve against its directory.
pub fn load(path: &Path) -> Result<Gallery> {
    let content = fs::read_to_string(path)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse(&content, &base_dir)
}

/// [`load`] on the blocking thread pool.
pub async fn load_async(path: PathBuf) -> Result<Gallery> {
    tokio::task::spawn_blocking(move || load(&path))
        .await
        .map_err(|e| Error::Io(e.to_string()))?
}

/// Parses manifest text, resolving references against `base_dir`.
pub fn parse(content: &str, base_dir: &Path) -> Result<Gallery> {
    let file: ManifestFile =
        toml::from_str(content).map_err(|e| Error::Manifest(e.to_string()))?;

    let context = match file.context.as_deref() {
        Some(raw) => raw
            .parse::<CollectionContext>()
            .map_err(|e| Error::Manifest(e.to_string()))?,
        None => CollectionContext::default(),
    };
    // An unknown declared type is kept as "declared but unusable".
    let declared_type = file
        .project_type
        .as_deref()
        .map(|raw| raw.parse().unwrap_or(ProjectType::Other));
    let hints = ContextHints::new(context, declared_type);

    let mut urls = ManifestUrls::new(base_dir);
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(file.media.len());

    for entry in file.media {
        let id = entry.id.trim().to_string();
        if id.is_empty() {
            return Err(Error::Manifest(format!(
                "media entry for '{}' has an empty id",
                entry.source
            )));
        }
        if !seen.insert(id.clone()) {
            return Err(Error::Manifest(format!("duplicate media id '{id}'")));
        }

        let source_url = urls.source_url(&entry.source);
        let dimensions = match (entry.width, entry.height) {
            (Some(width), Some(height)) => Some(Dimensions::new(width, height)),
            _ => measure_local(&source_url),
        };
        let kind = classify(&entry.source, dimensions, hints);
        let preset = ThumbnailPreset::for_kind(kind);
        let thumbnail_url = match (&entry.thumbnail, family_of(&entry.source)) {
            (Some(thumb), _) => urls.thumbnail_url(thumb, preset),
            (None, Family::Image) => urls.thumbnail_url(&entry.source, preset),
            // Videos and documents have no decodable preview of their own.
            (None, Family::Video | Family::Document) => String::new(),
        };

        if let Some(template) = entry.page_images {
            urls.insert_page_template(id.clone(), template);
        }

        let item = MediaItem::new(id, source_url, thumbnail_url, kind)
            .with_dimensions(dimensions)
            .with_duration(entry.duration_secs)
            .with_text(entry.title, entry.description)
            .with_group(entry.group)
            .with_metadata(MediaMetadata {
                format: entry.format,
                byte_size: entry.byte_size,
                page_count: entry.page_count.filter(|count| *count > 0),
            });
        items.push(item);
    }

    Ok(Gallery {
        title: file.title,
        context,
        collection: MediaCollection::new(items),
        urls,
    })
}

/// Reads only the image header of a local raster file.
fn measure_local(location: &str) -> Option<Dimensions> {
    let parsed = Location::parse(location);
    let path = parsed.as_path()?;
    if family_of(location) != Family::Image || !path.is_file() {
        return None;
    }
    let (width, height) = image_rs::ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some(Dimensions::new(width, height))
}
