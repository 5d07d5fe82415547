// SPDX-License-Identifier: MPL-2.0
//! Root view: header and gallery, the lightbox above them, toasts on top.

use super::{App, Message};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gallery;
use crate::ui::lightbox;
use crate::ui::notifications;
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, Column, Container, Row, Space, Stack, Text};
use iced::{Element, Length};

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let lightbox_open = app.lightbox.is_open();

    let gallery_view = gallery::view(
        &app.gallery,
        gallery::ViewContext {
            i18n: &app.i18n,
            lightbox_open,
        },
    )
    .map(Message::Gallery);

    let base = Column::new()
        .push(header(app))
        .push(gallery_view)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = Stack::new().push(base);
    if lightbox_open {
        layers = layers.push(
            lightbox::view(&app.lightbox, lightbox::ViewContext { i18n: &app.i18n })
                .map(Message::Lightbox),
        );
    }
    layers = layers.push(
        notifications::view_overlay(&app.notifications, &app.i18n).map(Message::Notification),
    );

    Container::new(layers.width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn header(app: &App) -> Element<'_, Message> {
    let title = app
        .gallery_title
        .clone()
        .unwrap_or_else(|| app.i18n.tr("app-title"));

    let open = button(Text::new(app.i18n.tr("app-open-manifest")).size(typography::BODY))
        .style(styles::button::primary)
        .on_press(Message::OpenManifestDialog);

    let resume = app
        .lightbox
        .controller()
        .navigation()
        .resume_index()
        .filter(|_| !app.lightbox.is_open())
        .map(|index| {
            let position = (index + 1).to_string();
            button(
                Text::new(app.i18n.tr_with_args("app-resume", &[("index", position.as_str())]))
                    .size(typography::BODY),
            )
            .style(styles::button::primary)
            .on_press(Message::ResumeViewing)
        });

    let mut row = Row::new()
        .push(Text::new(title).size(typography::TITLE_MD))
        .push(Space::new().width(Length::Fill));
    if let Some(resume) = resume {
        row = row.push(resume);
    }
    row.push(open)
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT + 2.0 * spacing::SM))
        .align_y(Vertical::Center)
        .into()
}
