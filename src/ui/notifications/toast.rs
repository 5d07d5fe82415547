// SPDX-License-Identifier: MPL-2.0
//! Toast rendering, stacked in the bottom-right corner.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, shadow, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, Column, Container, Row, Space, Text};
use iced::{Color, Element, Length, Theme};

const TOAST_WIDTH: f32 = 320.0;
const ACCENT_WIDTH: f32 = 2.0;

fn toast<'a>(notification: &'a Notification, i18n: &I18n) -> Element<'a, Message> {
    let message = if notification.message_args().is_empty() {
        i18n.tr(notification.message_key())
    } else {
        let args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        i18n.tr_with_args(notification.message_key(), &args)
    };
    let accent = notification.severity().color();

    let dismiss = button(Text::new("×").size(typography::BODY))
        .padding([0.0, spacing::XS])
        .style(styles::button::cell(false))
        .on_press(Message::Dismiss(notification.id()));

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(
            Container::new(Text::new(message).size(typography::BODY))
                .width(Length::Fill)
                .align_x(Horizontal::Left),
        )
        .push(dismiss);

    Container::new(content)
        .width(Length::Fixed(TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_style(theme, accent))
        .into()
}

/// All visible toasts, anchored bottom-right.
pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
    let mut column = Column::new().spacing(spacing::XS).align_x(Horizontal::Right);
    let mut any = false;
    for notification in manager.visible() {
        column = column.push(toast(notification, i18n));
        any = true;
    }
    if !any {
        return Space::new().into();
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Right)
        .align_y(Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}

fn toast_style(theme: &Theme, accent: Color) -> container::Style {
    container::Style {
        background: Some(theme.extended_palette().background.base.color.into()),
        border: iced::Border {
            color: accent,
            width: ACCENT_WIDTH,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}
