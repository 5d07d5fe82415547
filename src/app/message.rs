// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::Gallery;
use crate::ui::gallery;
use crate::ui::lightbox;
use crate::ui::notifications;
use iced::{window, Size};
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded; the rest are results of platform tasks.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Lightbox(lightbox::Message),
    Notification(notifications::NotificationMessage),
    /// Input event while the lightbox is open.
    RawEvent {
        window: window::Id,
        event: iced::Event,
    },
    WindowResized {
        window: window::Id,
        size: Size,
    },
    /// Reopen the lightbox where it was last closed.
    ResumeViewing,
    /// Ask for a manifest to open.
    OpenManifestDialog,
    ManifestPicked(Option<PathBuf>),
    ManifestLoaded(Result<Gallery, Error>),
    /// The user chose where to save `source`, or cancelled.
    DownloadTargetPicked {
        source: String,
        target: Option<PathBuf>,
    },
    DownloadFinished(Result<PathBuf, Error>),
    OpenedExternally(Result<(), Error>),
    /// Periodic tick for toast auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Manifest to open on startup.
    pub manifest_path: Option<PathBuf>,
    /// Load every thumbnail immediately.
    pub no_lazy: bool,
    /// Use the configured grid instead of the content heuristic.
    pub fixed_layout: bool,
    /// Config directory override (for settings.toml).
    /// Takes precedence over `ICED_FOLIO_CONFIG_DIR`.
    pub config_dir: Option<PathBuf>,
}
