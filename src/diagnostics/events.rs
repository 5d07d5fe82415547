// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.

use std::fmt;
use std::time::Instant;

/// User-initiated actions worth correlating with later warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    // ==========================================================================
    // Gallery
    // ==========================================================================
    /// Collection replaced (manifest opened or reloaded).
    LoadCollection { items: usize },

    /// Thumbnail activated; opens the lightbox.
    OpenLightbox { index: usize },

    /// Retry a failed thumbnail or asset.
    RetryLoad { index: usize },

    // ==========================================================================
    // Lightbox
    // ==========================================================================
    NavigateNext,
    NavigatePrevious,
    CloseLightbox,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    RotateClockwise,
    SetViewMode,
    ToggleFullscreen,
    /// Previous or next document page.
    ChangePage { page: u32 },

    // ==========================================================================
    // Handoff
    // ==========================================================================
    OpenExternally,
    Download,
}

/// Categories of non-fatal issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningType {
    /// Fullscreen is not available on this platform.
    FullscreenUnavailable,
    /// A fullscreen request was refused.
    FullscreenFailed,
    /// Viewport observation unavailable; everything loads eagerly.
    ObserverUnsupported,
    ThumbnailLoadFailed,
    AssetLoadFailed,
    /// A completion arrived for an item no longer on screen.
    StaleLoadDiscarded,
    /// Configuration could not be read or written.
    Config,
    Other,
}

impl WarningType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WarningType::FullscreenUnavailable => "fullscreen_unavailable",
            WarningType::FullscreenFailed => "fullscreen_failed",
            WarningType::ObserverUnsupported => "observer_unsupported",
            WarningType::ThumbnailLoadFailed => "thumbnail_load_failed",
            WarningType::AssetLoadFailed => "asset_load_failed",
            WarningType::StaleLoadDiscarded => "stale_load_discarded",
            WarningType::Config => "config",
            WarningType::Other => "other",
        }
    }
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning with its category and a human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEventKind {
    UserAction(UserAction),
    Warning(WarningEvent),
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}
