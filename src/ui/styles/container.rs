// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::domain::media::MediaKind;
use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Tint of the placeholder shown before or instead of a thumbnail.
#[must_use]
pub fn kind_tint(kind: MediaKind) -> Color {
    match kind {
        MediaKind::Image => palette::KIND_IMAGE,
        MediaKind::Video => palette::KIND_VIDEO,
        MediaKind::Pdf => palette::KIND_PDF,
        MediaKind::MobileMockup => palette::KIND_MOBILE,
        MediaKind::DesktopMockup => palette::KIND_DESKTOP,
        MediaKind::Graphic => palette::KIND_GRAPHIC,
    }
}

/// Kind-specific placeholder cell.
pub fn placeholder(kind: MediaKind) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(kind_tint(kind))),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Placeholder of a thumbnail that failed to load.
pub fn failed_placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_900)),
        text_color: Some(palette::GRAY_100),
        border: Border {
            color: palette::ERROR_500,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Caption band under a cell, derived from the theme background.
pub fn caption(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        text_color: Some(palette.background.weak.text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
