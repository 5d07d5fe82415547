// SPDX-License-Identifier: MPL-2.0
//! Media kind classification.
//!
//! [`classify`] runs once per asset at ingestion. It is a pure function of
//! the file name, the measured dimensions and the collection hints: the same
//! inputs always give the same [`MediaKind`].

use super::extensions::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::domain::media::{CollectionContext, Dimensions, MediaKind, ProjectType};

/// Portrait aspect range typical of phone screenshots (width / height).
const MOBILE_RATIO: (f32, f32) = (0.4, 0.7);

/// Landscape aspect range typical of desktop and web screenshots.
const DESKTOP_RATIO: (f32, f32) = (1.3, 2.0);

const MOBILE_KEYWORDS: &[&str] = &["mobile", "phone", "ios", "android", "app"];
const DESKTOP_KEYWORDS: &[&str] = &["desktop", "web", "dashboard", "interface"];

/// Collection-level facts that steer classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextHints {
    pub context: CollectionContext,
    pub declared_type: Option<ProjectType>,
}

impl ContextHints {
    #[must_use]
    pub fn new(context: CollectionContext, declared_type: Option<ProjectType>) -> Self {
        Self {
            context,
            declared_type,
        }
    }
}

/// Broad family decided by the file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Video,
    Document,
    /// Known raster/vector image, or an extension we cannot tell (CDN URLs).
    Image,
}

/// Family of a file name or URL, from its extension.
#[must_use]
pub fn family_of(name: &str) -> Family {
    match extension_of(name).as_deref() {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => Family::Video,
        Some(ext) if DOCUMENT_EXTENSIONS.contains(&ext) => Family::Document,
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Family::Image,
        _ => Family::Image,
    }
}

/// Lower-cased extension of a path or URL, ignoring query and fragment.
fn extension_of(name: &str) -> Option<String> {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Assigns a kind to one asset.
///
/// UI/UX collections refine image-family assets into mockups. When neither
/// the declared project type, the proportions nor the name settle it, the
/// asset is treated as a mobile mockup.
#[must_use]
pub fn classify(name: &str, dimensions: Option<Dimensions>, hints: ContextHints) -> MediaKind {
    match family_of(name) {
        Family::Video => MediaKind::Video,
        Family::Document => MediaKind::Pdf,
        Family::Image => match hints.context {
            CollectionContext::UiUx => classify_mockup(name, dimensions, hints.declared_type),
            CollectionContext::Photography => MediaKind::Image,
            CollectionContext::Graphic => MediaKind::Graphic,
        },
    }
}

fn classify_mockup(
    name: &str,
    dimensions: Option<Dimensions>,
    declared_type: Option<ProjectType>,
) -> MediaKind {
    match declared_type {
        Some(ProjectType::MobileApp) => return MediaKind::MobileMockup,
        Some(ProjectType::WebApp | ProjectType::Website) => return MediaKind::DesktopMockup,
        Some(ProjectType::Other) | None => {}
    }

    let lowered = file_name(name).to_ascii_lowercase();
    let ratio = dimensions.and_then(Dimensions::aspect_ratio);
    let in_range = |(lo, hi): (f32, f32)| ratio.is_some_and(|r| (lo..=hi).contains(&r));
    let portrait = dimensions.is_some_and(Dimensions::is_portrait);
    let landscape = dimensions.is_some_and(Dimensions::is_landscape);

    if (portrait && in_range(MOBILE_RATIO)) || contains_any(&lowered, MOBILE_KEYWORDS) {
        MediaKind::MobileMockup
    } else if landscape || in_range(DESKTOP_RATIO) || contains_any(&lowered, DESKTOP_KEYWORDS) {
        MediaKind::DesktopMockup
    } else {
        MediaKind::MobileMockup
    }
}

fn file_name(name: &str) -> &str {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

// =============================================================================
// Thumbnail presets
// =============================================================================

/// Crop/aspect preset requested from the URL provider for a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailPreset {
    /// 9:16 phone frame.
    Portrait,
    /// 16:10 desktop frame.
    Landscape,
    /// 16:9 video frame.
    Widescreen,
    /// A4-like page.
    Page,
    /// Source proportions.
    Original,
}

impl ThumbnailPreset {
    /// Width in pixels requested for grid thumbnails.
    pub const TARGET_WIDTH: u32 = 640;

    /// Preset matching a kind.
    #[must_use]
    pub fn for_kind(kind: MediaKind) -> Self {
        match kind {
            MediaKind::MobileMockup => ThumbnailPreset::Portrait,
            MediaKind::DesktopMockup => ThumbnailPreset::Landscape,
            MediaKind::Video => ThumbnailPreset::Widescreen,
            MediaKind::Pdf => ThumbnailPreset::Page,
            MediaKind::Image | MediaKind::Graphic => ThumbnailPreset::Original,
        }
    }

    /// Width over height, `None` for [`ThumbnailPreset::Original`].
    #[must_use]
    pub fn aspect_ratio(self) -> Option<f32> {
        match self {
            ThumbnailPreset::Portrait => Some(9.0 / 16.0),
            ThumbnailPreset::Landscape => Some(16.0 / 10.0),
            ThumbnailPreset::Widescreen => Some(16.0 / 9.0),
            ThumbnailPreset::Page => Some(1.0 / 1.414),
            ThumbnailPreset::Original => None,
        }
    }

    /// Target height for [`Self::TARGET_WIDTH`], when the preset fixes one.
    #[must_use]
    pub fn target_height(self) -> Option<u32> {
        // Bounded by TARGET_WIDTH / smallest ratio, well inside u32.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        self.aspect_ratio()
            .map(|ratio| (Self::TARGET_WIDTH as f32 / ratio).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(declared: Option<ProjectType>) -> ContextHints {
        ContextHints::new(CollectionContext::UiUx, declared)
    }

    #[test]
    fn extension_decides_video_and_pdf_first() {
        let hints = ui(Some(ProjectType::MobileApp));
        assert_eq!(classify("demo.MP4", None, hints), MediaKind::Video);
        assert_eq!(classify("clip.webm?x=1", None, hints), MediaKind::Video);
        assert_eq!(classify("brief.pdf", None, hints), MediaKind::Pdf);
    }

    #[test]
    fn declared_type_wins_over_shape() {
        let wide = Some(Dimensions::new(1920, 1080));
        assert_eq!(
            classify("shot.png", wide, ui(Some(ProjectType::MobileApp))),
            MediaKind::MobileMockup
        );
        let tall = Some(Dimensions::new(1170, 2532));
        assert_eq!(
            classify("shot.png", tall, ui(Some(ProjectType::Website))),
            MediaKind::DesktopMockup
        );
        assert_eq!(
            classify("shot.png", tall, ui(Some(ProjectType::WebApp))),
            MediaKind::DesktopMockup
        );
    }

    #[test]
    fn phone_proportions_become_mobile_mockups() {
        let phone = Some(Dimensions::new(1170, 2532));
        assert_eq!(classify("screen.png", phone, ui(None)), MediaKind::MobileMockup);
    }

    #[test]
    fn landscape_becomes_desktop_mockup() {
        let desktop = Some(Dimensions::new(1440, 900));
        assert_eq!(
            classify("screen.png", desktop, ui(None)),
            MediaKind::DesktopMockup
        );
    }

    #[test]
    fn filename_keywords_refine_unmeasured_assets() {
        assert_eq!(
            classify("assets/android-login.jpg", None, ui(None)),
            MediaKind::MobileMockup
        );
        assert_eq!(
            classify("assets/dashboard.jpg", None, ui(None)),
            MediaKind::DesktopMockup
        );
    }

    #[test]
    fn mobile_keyword_is_checked_before_landscape() {
        let wide = Some(Dimensions::new(1600, 900));
        assert_eq!(
            classify("phone-frames.png", wide, ui(None)),
            MediaKind::MobileMockup
        );
    }

    #[test]
    fn ambiguous_assets_default_to_mobile() {
        assert_eq!(classify("shot.png", None, ui(None)), MediaKind::MobileMockup);
        let square = Some(Dimensions::new(1000, 1000));
        assert_eq!(classify("shot.png", square, ui(None)), MediaKind::MobileMockup);
        let tall_strip = Some(Dimensions::new(300, 1000));
        assert_eq!(
            classify("long.png", tall_strip, ui(None)),
            MediaKind::MobileMockup
        );
    }

    #[test]
    fn other_contexts_do_not_refine() {
        let photo = ContextHints::new(CollectionContext::Photography, None);
        let graphic = ContextHints::new(CollectionContext::Graphic, None);
        assert_eq!(classify("a.jpg", None, photo), MediaKind::Image);
        assert_eq!(classify("a.jpg", None, graphic), MediaKind::Graphic);
        assert_eq!(
            classify("https://cdn.example.com/asset/123", None, graphic),
            MediaKind::Graphic
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let dims = Some(Dimensions::new(1200, 1000));
        let hints = ui(None);
        let first = classify("mock.webp", dims, hints);
        for _ in 0..100 {
            assert_eq!(classify("mock.webp", dims, hints), first);
        }
    }

    #[test]
    fn hidden_files_have_no_extension() {
        assert_eq!(family_of(".mp4"), Family::Image);
        assert_eq!(family_of("dir.d/readme"), Family::Image);
    }

    #[test]
    fn presets_follow_kind() {
        assert_eq!(
            ThumbnailPreset::for_kind(MediaKind::MobileMockup),
            ThumbnailPreset::Portrait
        );
        assert_eq!(
            ThumbnailPreset::for_kind(MediaKind::Video).target_height(),
            Some(360)
        );
        assert_eq!(ThumbnailPreset::Original.target_height(), None);
    }
}
