// SPDX-License-Identifier: MPL-2.0
//! Grid layout presets and the content-aware layout heuristic.
//!
//! [`choose_layout`] looks at the kinds present in a classified collection
//! and picks one [`GridLayoutConfig`]. It never looks at the window: column
//! counts are per-breakpoint buckets, resolved at render time by
//! [`Columns::for_width`].

use crate::config::{DESKTOP_MIN_WIDTH, DOMINANT_KIND_SHARE, MAX_COLUMNS, TABLET_MIN_WIDTH};
use crate::domain::media::{MediaItem, MediaKind};
use crate::ui::design_tokens::spacing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Responsive width bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Bucket for a container width in logical pixels.
    #[must_use]
    pub fn from_width(width: f32) -> Self {
        if width < TABLET_MIN_WIDTH {
            Breakpoint::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }
}

/// Column counts per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub mobile: u16,
    pub tablet: u16,
    pub desktop: u16,
}

impl Columns {
    /// Creates column counts, clamping each to `1..=MAX_COLUMNS`.
    #[must_use]
    pub fn new(mobile: u16, tablet: u16, desktop: u16) -> Self {
        Self {
            mobile: mobile.clamp(1, MAX_COLUMNS),
            tablet: tablet.clamp(1, MAX_COLUMNS),
            desktop: desktop.clamp(1, MAX_COLUMNS),
        }
    }

    /// Returns a copy with every count clamped to the valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(self.mobile, self.tablet, self.desktop)
    }

    #[must_use]
    pub fn for_breakpoint(self, breakpoint: Breakpoint) -> u16 {
        match breakpoint {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Desktop => self.desktop,
        }
    }

    #[must_use]
    pub fn for_width(self, width: f32) -> u16 {
        self.for_breakpoint(Breakpoint::from_width(width)).max(1)
    }
}

impl Default for Columns {
    fn default() -> Self {
        GridLayoutConfig::MIXED.columns
    }
}

/// Cell aspect ratio, either fixed or taken from each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    /// Each cell follows its item's own proportions.
    #[default]
    Auto,
    /// Every cell uses `width / height`.
    Fixed { width: u16, height: u16 },
}

impl AspectRatio {
    /// Width divided by height for fixed ratios.
    #[must_use]
    pub fn value(self) -> Option<f32> {
        match self {
            AspectRatio::Auto => None,
            AspectRatio::Fixed { width, height } => Some(f32::from(width) / f32::from(height)),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(AspectRatio::Auto);
        }
        let (w, h) = trimmed
            .split_once('/')
            .or_else(|| trimmed.split_once(':'))
            .ok_or_else(|| format!("invalid aspect ratio '{trimmed}'"))?;
        let width: u16 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid aspect ratio '{trimmed}'"))?;
        let height: u16 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid aspect ratio '{trimmed}'"))?;
        if width == 0 || height == 0 {
            return Err(format!("invalid aspect ratio '{trimmed}'"));
        }
        Ok(AspectRatio::Fixed { width, height })
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Auto => f.write_str("auto"),
            AspectRatio::Fixed { width, height } => write!(f, "{width}/{height}"),
        }
    }
}

/// Gap between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Spacing {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Spacing {
    /// Gap in logical pixels.
    #[must_use]
    pub fn gap(self) -> f32 {
        match self {
            Spacing::Sm => spacing::XS,
            Spacing::Md => spacing::MD,
            Spacing::Lg => spacing::LG,
        }
    }
}

/// Name of the selected preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutName {
    MobileFocus,
    DesktopFocus,
    VideoFocus,
    Mixed,
}

impl LayoutName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutName::MobileFocus => "mobile-focus",
            LayoutName::DesktopFocus => "desktop-focus",
            LayoutName::VideoFocus => "video-focus",
            LayoutName::Mixed => "mixed",
        }
    }
}

impl fmt::Display for LayoutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grid configuration, active for a whole render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayoutConfig {
    pub columns: Columns,
    pub aspect_ratio: AspectRatio,
    pub spacing: Spacing,
    pub layout_name: LayoutName,
}

impl GridLayoutConfig {
    pub const MOBILE_FOCUS: Self = Self {
        columns: Columns {
            mobile: 2,
            tablet: 3,
            desktop: 4,
        },
        aspect_ratio: AspectRatio::Fixed {
            width: 9,
            height: 16,
        },
        spacing: Spacing::Md,
        layout_name: LayoutName::MobileFocus,
    };

    pub const DESKTOP_FOCUS: Self = Self {
        columns: Columns {
            mobile: 1,
            tablet: 2,
            desktop: 3,
        },
        aspect_ratio: AspectRatio::Fixed {
            width: 4,
            height: 3,
        },
        spacing: Spacing::Lg,
        layout_name: LayoutName::DesktopFocus,
    };

    pub const VIDEO_FOCUS: Self = Self {
        columns: Columns {
            mobile: 1,
            tablet: 1,
            desktop: 2,
        },
        aspect_ratio: AspectRatio::Fixed {
            width: 16,
            height: 9,
        },
        spacing: Spacing::Lg,
        layout_name: LayoutName::VideoFocus,
    };

    pub const MIXED: Self = Self {
        columns: Columns {
            mobile: 1,
            tablet: 2,
            desktop: 3,
        },
        aspect_ratio: AspectRatio::Auto,
        spacing: Spacing::Md,
        layout_name: LayoutName::Mixed,
    };

    /// A caller-supplied layout used when the heuristic is turned off.
    #[must_use]
    pub fn fixed(columns: Columns, aspect_ratio: AspectRatio, spacing: Spacing) -> Self {
        Self {
            columns: columns.sanitized(),
            aspect_ratio,
            spacing,
            layout_name: LayoutName::Mixed,
        }
    }
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self::MIXED
    }
}

/// Per-kind counts of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindShares {
    counts: [usize; MediaKind::ALL.len()],
    total: usize,
}

impl KindShares {
    #[must_use]
    pub fn of(items: &[MediaItem]) -> Self {
        let mut shares = Self::default();
        for item in items {
            shares.counts[slot(item.kind())] += 1;
            shares.total += 1;
        }
        shares
    }

    #[must_use]
    pub fn count(&self, kind: MediaKind) -> usize {
        self.counts[slot(kind)]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of the collection that is `kind`, 0 for empty collections.
    #[must_use]
    pub fn share(&self, kind: MediaKind) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.count(kind) as f32 / self.total as f32
        }
    }

    /// The kind whose share strictly exceeds the dominance threshold, if any.
    #[must_use]
    pub fn dominant(&self) -> Option<MediaKind> {
        MediaKind::ALL
            .into_iter()
            .find(|kind| self.share(*kind) > DOMINANT_KIND_SHARE)
    }
}

fn slot(kind: MediaKind) -> usize {
    match kind {
        MediaKind::Image => 0,
        MediaKind::Video => 1,
        MediaKind::Pdf => 2,
        MediaKind::MobileMockup => 3,
        MediaKind::DesktopMockup => 4,
        MediaKind::Graphic => 5,
    }
}

/// Picks the grid preset for a classified collection.
///
/// Pure function of the items: the same list always yields the same layout.
#[must_use]
pub fn choose_layout(items: &[MediaItem]) -> GridLayoutConfig {
    match KindShares::of(items).dominant() {
        Some(MediaKind::MobileMockup) => GridLayoutConfig::MOBILE_FOCUS,
        Some(MediaKind::DesktopMockup) => GridLayoutConfig::DESKTOP_FOCUS,
        Some(MediaKind::Video) => GridLayoutConfig::VIDEO_FOCUS,
        _ => GridLayoutConfig::MIXED,
    }
}

/// Layout for a gallery: the heuristic when `adaptive`, else `fixed`.
#[must_use]
pub fn resolve_layout(
    adaptive: bool,
    fixed: GridLayoutConfig,
    items: &[MediaItem],
) -> GridLayoutConfig {
    if adaptive {
        choose_layout(items)
    } else {
        fixed
    }
}
