// SPDX-License-Identifier: MPL-2.0
//! Kind-specific viewers for items the image surface cannot show.
//!
//! Videos get a poster with their duration and a hand-off to the system
//! player. Documents are paged through pre-rendered page images when the
//! manifest provides them.

/// Formats a duration as `m:ss`, or `h:mm:ss` from one hour up.
#[must_use]
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    // Durations are far below u64::MAX seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = secs.round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Video leaf: a poster and what is known about the clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoViewer {
    pub duration_secs: Option<f64>,
    /// Size of the source reported by the probe.
    pub byte_size: Option<u64>,
}

impl VideoViewer {
    #[must_use]
    pub fn new(duration_secs: Option<f64>) -> Self {
        Self {
            duration_secs,
            byte_size: None,
        }
    }

    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        self.duration_secs.map(format_duration)
    }
}

/// Document leaf: one page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentViewer {
    page: u32,
    page_count: u32,
    /// Whether page images exist for this document.
    pub inline: bool,
}

impl DocumentViewer {
    /// Opens on the first page. A missing page count means a single page.
    #[must_use]
    pub fn new(page_count: Option<u32>, inline: bool) -> Self {
        Self {
            page: 1,
            page_count: page_count.unwrap_or(1).max(1),
            inline,
        }
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// Moves to the next page. Returns true if the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.inline && self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page. Returns true if the page changed.
    pub fn previous_page(&mut self) -> bool {
        if self.inline && self.has_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}
