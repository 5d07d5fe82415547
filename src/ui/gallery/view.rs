// SPDX-License-Identifier: MPL-2.0
//! Grid rendering.

use super::{accessibility, Message, State, ThumbnailState, SCROLLABLE_ID};
use crate::domain::media::{MediaItem, MediaKind};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, spacing, typography};
use crate::ui::lightbox::leaf::format_duration;
use crate::ui::styles;
use crate::ui::widgets::scroll_suspender;
use crate::config::CAPTION_HEIGHT_PX;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::{Scrollable, Viewport};
use iced::widget::{button, image, tooltip, Column, Container, Id, Row, Stack, Text};
use iced::{Alignment, ContentFit, Element, Length, Rectangle};

/// Contextual data needed to render the grid.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    /// Wheel scrolling of the grid is suspended while the lightbox is open.
    pub lightbox_open: bool,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let collection = state.collection();
    if collection.is_empty() {
        return Container::new(Text::new(ctx.i18n.tr("gallery-empty")).size(typography::BODY_LG))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into();
    }

    let geometry = state.geometry();
    let total = collection.len();

    let mut grid = Column::new();
    for range in &geometry.rows {
        let cells = range.clone().filter_map(|index| {
            let item = collection.get(index)?;
            let rect = geometry.cells.get(index)?;
            Some(cell(state, &ctx, item, index, total, *rect))
        });
        grid = grid.push(
            Row::with_children(cells)
                .spacing(geometry.gap)
                .align_y(Alignment::Start),
        );
    }

    let grid = grid
        .spacing(geometry.gap)
        .padding(geometry.padding)
        .width(Length::Fill);

    let scrollable = Scrollable::new(grid)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::Scrolled {
            bounds: viewport.bounds(),
            offset: viewport.absolute_offset(),
        });

    let header = Row::new()
        .spacing(spacing::MD)
        .padding([spacing::XS, spacing::MD])
        .push(
            Text::new(ctx.i18n.tr_with_args(
                "gallery-layout",
                &[("name", state.layout().layout_name.as_str())],
            ))
            .size(typography::BODY_SM),
        )
        .push(
            Text::new(ctx.i18n.tr_with_args(
                "gallery-count",
                &[("count", total.to_string().as_str())],
            ))
            .size(typography::BODY_SM),
        );

    Column::new()
        .push(header)
        .push(scroll_suspender(scrollable).suspended(ctx.lightbox_open))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn cell<'a>(
    state: &'a State,
    ctx: &ViewContext<'a>,
    item: &'a MediaItem,
    index: usize,
    total: usize,
    rect: Rectangle,
) -> Element<'a, Message> {
    let show_metadata = state.options().show_metadata;
    let media_height = state.geometry().media_height(index, show_metadata);
    let kind = item.kind();

    let surface: Element<'a, Message> = match state.thumbnail(index) {
        Some(ThumbnailState::Ready(handle)) => image(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Some(ThumbnailState::Failed(_)) => {
            let retry = button(Text::new(ctx.i18n.tr("gallery-retry")).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::button::primary)
                .on_press(Message::Retry(index));
            placeholder(
                Column::new()
                    .spacing(spacing::XS)
                    .align_x(Alignment::Center)
                    .push(Text::new(kind_name(ctx.i18n, kind)).size(typography::BODY))
                    .push(Text::new(ctx.i18n.tr("gallery-thumbnail-failed")).size(typography::CAPTION))
                    .push(retry),
                styles::container::failed_placeholder,
            )
        }
        Some(ThumbnailState::Loading | ThumbnailState::Unavailable) => placeholder(
            Text::new(kind_name(ctx.i18n, kind)).size(typography::BODY),
            styles::container::placeholder(kind),
        ),
        Some(ThumbnailState::Hidden) | None => {
            placeholder(Text::new(""), styles::container::placeholder(kind))
        }
    };

    let media = Container::new(surface)
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(media_height))
        .clip(true);

    let media: Element<'a, Message> = match item.duration_secs() {
        Some(duration) => Stack::new()
            .push(media)
            .push(
                Container::new(
                    Container::new(Text::new(format_duration(duration)).size(typography::CAPTION))
                        .padding([spacing::XXS, spacing::XS])
                        .style(styles::overlay::indicator(radius::SM)),
                )
                .width(Length::Fixed(rect.width))
                .height(Length::Fixed(media_height))
                .padding(spacing::XS)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Bottom),
            )
            .into(),
        None => media.into(),
    };

    let mut content = Column::new().push(media);
    if show_metadata {
        content = content.push(caption(ctx.i18n, item, rect.width));
    }

    let description = accessibility::describe(ctx.i18n, item, index, total);
    let selected = state.selected() == Some(index);
    let activator = button(content)
        .padding(0.0)
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(rect.height))
        .style(styles::button::cell(selected))
        .on_press(Message::Activate(index));

    styles::tooltip::styled(activator, description.label, tooltip::Position::Bottom).into()
}

fn placeholder<'a>(
    content: impl Into<Element<'a, Message>>,
    style: impl Fn(&iced::Theme) -> iced::widget::container::Style + 'a,
) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(style)
        .into()
}

fn caption<'a>(i18n: &I18n, item: &'a MediaItem, width: f32) -> Element<'a, Message> {
    let title = item.title().unwrap_or_else(|| item.id());
    let mut details = kind_name(i18n, item.kind());
    if let Some(duration) = item.duration_secs() {
        details = format!("{details} · {}", format_duration(duration));
    }
    if let Some(pages) = item.metadata().page_count {
        details = format!("{details} · {pages} p.");
    }
    if let Some(format) = &item.metadata().format {
        details = format!("{details} · {format}");
    }

    Container::new(
        Column::new()
            .spacing(spacing::XXS)
            .push(Text::new(title).size(typography::BODY_SM))
            .push(Text::new(details).size(typography::CAPTION)),
    )
    .width(Length::Fixed(width))
    .height(Length::Fixed(CAPTION_HEIGHT_PX))
    .padding([spacing::XXS, spacing::XS])
    .style(styles::container::caption)
    .into()
}

fn kind_name(i18n: &I18n, kind: MediaKind) -> String {
    i18n.tr(accessibility::kind_label_key(kind))
}
