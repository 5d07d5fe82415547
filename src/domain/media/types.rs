// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.
//! A [`MediaItem`] carries its [`MediaKind`] from the moment it is built: the
//! classifier decides the kind once, and nothing downstream can change it.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Content category of a media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Photograph or other plain raster image.
    Image,
    /// Video clip.
    Video,
    /// Document (PDF).
    Pdf,
    /// Phone-sized UI screenshot.
    MobileMockup,
    /// Desktop or web UI screenshot.
    DesktopMockup,
    /// Illustration, poster or other graphic work.
    Graphic,
}

impl MediaKind {
    /// All kinds, in a stable order.
    pub const ALL: [MediaKind; 6] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Pdf,
        MediaKind::MobileMockup,
        MediaKind::DesktopMockup,
        MediaKind::Graphic,
    ];

    /// Whether zoom buttons, rotation and view modes apply to this kind.
    ///
    /// Videos and documents delegate to their own leaf viewers.
    #[must_use]
    pub fn supports_transform(self) -> bool {
        matches!(
            self,
            MediaKind::Image | MediaKind::MobileMockup | MediaKind::DesktopMockup | MediaKind::Graphic
        )
    }

    /// Whether grab-and-drag panning applies to this kind.
    #[must_use]
    pub fn supports_pan(self) -> bool {
        self.supports_transform()
    }

    /// Whether the mouse wheel zooms this kind.
    #[must_use]
    pub fn supports_wheel_zoom(self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::DesktopMockup)
    }

    /// Stable identifier used in i18n keys and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Pdf => "pdf",
            MediaKind::MobileMockup => "mobile-mockup",
            MediaKind::DesktopMockup => "desktop-mockup",
            MediaKind::Graphic => "graphic",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel dimensions of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Creates new dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` when either side is zero.
    #[must_use]
    pub fn aspect_ratio(self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    /// Returns true if the asset is taller than it is wide.
    #[must_use]
    pub fn is_portrait(self) -> bool {
        self.height > self.width
    }

    /// Returns true if the asset is wider than it is tall.
    #[must_use]
    pub fn is_landscape(self) -> bool {
        self.width > self.height
    }
}

/// Optional display metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaMetadata {
    /// Human readable format label (e.g. "PNG").
    pub format: Option<String>,
    /// Size of the source file in bytes.
    pub byte_size: Option<u64>,
    /// Number of pages, for documents.
    pub page_count: Option<u32>,
}

impl MediaMetadata {
    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format.is_none() && self.byte_size.is_none() && self.page_count.is_none()
    }
}

/// One visual asset of a gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    id: String,
    source_url: String,
    thumbnail_url: String,
    kind: MediaKind,
    dimensions: Option<Dimensions>,
    duration_secs: Option<f64>,
    title: Option<String>,
    description: Option<String>,
    metadata: MediaMetadata,
    group: Option<String>,
}

impl MediaItem {
    /// Creates a classified media item.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        source_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            source_url: source_url.into(),
            thumbnail_url: thumbnail_url.into(),
            kind,
            dimensions: None,
            duration_secs: None,
            title: None,
            description: None,
            metadata: MediaMetadata::default(),
            group: None,
        }
    }

    /// Sets the measured dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Option<Dimensions>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets the duration. Ignored for anything but videos.
    #[must_use]
    pub fn with_duration(mut self, duration_secs: Option<f64>) -> Self {
        if self.kind == MediaKind::Video {
            self.duration_secs = duration_secs.filter(|d| d.is_finite() && *d >= 0.0);
        }
        self
    }

    /// Sets title and description.
    #[must_use]
    pub fn with_text(mut self, title: Option<String>, description: Option<String>) -> Self {
        self.title = title;
        self.description = description;
        self
    }

    /// Sets display metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: MediaMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the display group label.
    #[must_use]
    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Aspect ratio (width / height) when dimensions are known.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.dimensions.and_then(Dimensions::aspect_ratio)
    }
}

/// Error returned when parsing a kebab-case keyword fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeywordError {
    /// What was being parsed ("project type", "collection context").
    pub what: &'static str,
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ParseKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.what, self.value)
    }
}

impl std::error::Error for ParseKeywordError {}

/// Project type declared by the author of a UI/UX collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    MobileApp,
    WebApp,
    Website,
    /// Declared but not one the classifier knows how to use.
    Other,
}

impl FromStr for ProjectType {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile-app" | "mobile" => Ok(ProjectType::MobileApp),
            "web-app" | "webapp" => Ok(ProjectType::WebApp),
            "website" => Ok(ProjectType::Website),
            "other" => Ok(ProjectType::Other),
            _ => Err(ParseKeywordError {
                what: "project type",
                value: s.to_string(),
            }),
        }
    }
}

/// What a collection is about; drives how image-family assets are refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionContext {
    /// UI/UX case study: screenshots become mobile or desktop mockups.
    UiUx,
    /// Photography: images stay plain images.
    Photography,
    /// Anything else: images are treated as graphics.
    #[default]
    Graphic,
}

impl FromStr for CollectionContext {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ui-ux" | "uiux" | "ui" | "ux" => Ok(CollectionContext::UiUx),
            "photography" | "photo" => Ok(CollectionContext::Photography),
            "graphic" | "graphics" | "design" => Ok(CollectionContext::Graphic),
            _ => Err(ParseKeywordError {
                what: "collection context",
                value: s.to_string(),
            }),
        }
    }
}

/// Identity of one immutable media list.
///
/// A new identity is minted every time a collection is built, so consumers can
/// tell "same items" from "replaced items" without comparing contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Immutable, cheaply clonable list of classified items.
///
/// The canonical arena the grid and the viewer index into.
#[derive(Debug, Clone)]
pub struct MediaCollection {
    id: CollectionId,
    items: Arc<[MediaItem]>,
}

impl MediaCollection {
    /// Wraps a list of classified items under a fresh identity.
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            id: CollectionId::next(),
            items: items.into(),
        }
    }

    /// An empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn id(&self) -> CollectionId {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    /// Kind of the item at `index`.
    #[must_use]
    pub fn kind_at(&self, index: usize) -> Option<MediaKind> {
        self.get(index).map(MediaItem::kind)
    }
}

impl Default for MediaCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for MediaCollection {
    /// Two collections are equal only if they are the same list.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
