// SPDX-License-Identifier: MPL-2.0
//! Accessible description of gallery cells.
//!
//! Every cell is announced as a button whose label names the kind, its
//! 1-based position and, when present, the item title.

use crate::domain::media::{MediaItem, MediaKind};
use crate::i18n::fluent::I18n;

/// What assistive output should say about one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescription {
    pub role: String,
    pub label: String,
    pub hint: String,
}

/// i18n key of the human-readable kind name.
#[must_use]
pub fn kind_label_key(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "kind-image",
        MediaKind::Video => "kind-video",
        MediaKind::Pdf => "kind-pdf",
        MediaKind::MobileMockup => "kind-mobile-mockup",
        MediaKind::DesktopMockup => "kind-desktop-mockup",
        MediaKind::Graphic => "kind-graphic",
    }
}

/// Describes the item at `index` of a collection of `total` items.
#[must_use]
pub fn describe(i18n: &I18n, item: &MediaItem, index: usize, total: usize) -> ItemDescription {
    let kind = i18n.tr(kind_label_key(item.kind()));
    let position = (index + 1).to_string();
    let total = total.to_string();

    let label = match item.title().filter(|t| !t.trim().is_empty()) {
        Some(title) => i18n.tr_with_args(
            "a11y-item-label-titled",
            &[
                ("kind", kind.as_str()),
                ("index", position.as_str()),
                ("total", total.as_str()),
                ("title", title),
            ],
        ),
        None => i18n.tr_with_args(
            "a11y-item-label",
            &[
                ("kind", kind.as_str()),
                ("index", position.as_str()),
                ("total", total.as_str()),
            ],
        ),
    };

    ItemDescription {
        role: i18n.tr("a11y-item-role-button"),
        label,
        hint: i18n.tr("a11y-item-hint"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GeneralConfig};

    fn english() -> I18n {
        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".into()),
            },
            ..Config::default()
        };
        I18n::new(Some("en-US".into()), &config)
    }

    #[test]
    fn label_names_kind_and_position() {
        let item = MediaItem::new("a", "a.mp4", "", MediaKind::Video);
        let description = describe(&english(), &item, 2, 12);
        assert_eq!(description.label, "Video 3 of 12");
        assert_eq!(description.role, "button");
    }

    #[test]
    fn title_is_appended_when_present() {
        let item = MediaItem::new("a", "a.png", "a.png", MediaKind::MobileMockup)
            .with_text(Some("Checkout".into()), None);
        let description = describe(&english(), &item, 0, 1);
        assert_eq!(description.label, "Mobile mockup 1 of 1: Checkout");
    }

    #[test]
    fn blank_title_is_ignored() {
        let item = MediaItem::new("a", "a.png", "a.png", MediaKind::Image)
            .with_text(Some("  ".into()), None);
        assert_eq!(describe(&english(), &item, 0, 2).label, "Image 1 of 2");
    }

    #[test]
    fn every_kind_has_a_label() {
        let i18n = english();
        for kind in MediaKind::ALL {
            assert!(!i18n.tr(kind_label_key(kind)).starts_with("MISSING"));
        }
    }
}
