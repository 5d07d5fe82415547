// SPDX-License-Identifier: MPL-2.0
//! Lightbox rendering: backdrop, asset surface, controls and indicators.

use super::controller::{AssetState, Leaf, ViewerState};
use super::leaf::{DocumentViewer, VideoViewer};
use super::{Action, Direction, Message, State, SCROLLABLE_ID};
use crate::domain::media::MediaItem;
use crate::domain::ui::ViewMode;
use crate::error::MediaError;
use crate::i18n::fluent::I18n;
use crate::media::ImageData;
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::scroll_suspender;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::FilterMethod;
use iced::widget::scrollable::{Direction as ScrollDirection, Scrollbar, Scrollable};
use iced::widget::{
    button, image, mouse_area, opaque, tooltip, Column, Container, Id, Row, Space, Stack, Text,
};
use iced::{mouse, ContentFit, Element, Length, Padding, Radians, Rotation, Size};

/// Height of the control bar above the asset and the page bar below it.
pub const BAR_HEIGHT: f32 = sizing::BUTTON_HEIGHT + 2.0 * spacing::SM;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Area left to the asset once both bars are laid out in `window`.
#[must_use]
pub fn asset_frame(window: Size) -> Size {
    Size::new(
        window.width.max(1.0),
        (window.height - 2.0 * BAR_HEIGHT).max(1.0),
    )
}

/// Renders the open viewer.
///
/// The result is opaque. It captures every press over it and hides the
/// cursor from the layers below, so the gallery gets no pointer input while
/// the lightbox is open.
pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let controller = state.controller();
    let (Some(viewer), Some(item)) = (controller.viewer(), controller.current_item()) else {
        return Space::new().into();
    };
    let frame = controller.frame();
    let total = controller.collection().len();

    let surface: Element<'a, Message> = match (viewer.asset(), viewer.leaf()) {
        (AssetState::Loading, _) => centered(
            Text::new(ctx.i18n.tr("lightbox-loading"))
                .size(typography::BODY_LG)
                .color(palette::WHITE),
        ),
        (AssetState::Failed(err), _) => error_panel(&ctx, err),
        (AssetState::Ready(data), Leaf::Video(video)) => video_panel(&ctx, Some(data), video),
        (AssetState::NoPreview, Leaf::Video(video)) => video_panel(&ctx, None, video),
        (AssetState::Ready(data), _) => {
            asset_surface(data, controller.display_size().unwrap_or(frame), frame, viewer)
        }
        (AssetState::NoPreview, _) => error_panel(&ctx, &MediaError::Other(String::new())),
    };

    let stage = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(surface)
        .push(navigation_row(&ctx, total));

    let bottom: Element<'a, Message> = match viewer.leaf() {
        Leaf::Document(doc) => page_bar(&ctx, doc),
        _ => Space::new().width(Length::Fill).height(Length::Fixed(BAR_HEIGHT)).into(),
    };

    let content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(top_bar(&ctx, viewer, item, total))
        .push(stage)
        .push(bottom);

    opaque(
        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::overlay::backdrop),
    )
}

/// Zoomable, pannable image inside a scrollable with hidden scrollbars.
///
/// The scroll position is driven by the controller's pan; the wheel never
/// scrolls it directly.
fn asset_surface<'a>(
    data: &'a ImageData,
    display: Size,
    frame: Size,
    viewer: &ViewerState,
) -> Element<'a, Message> {
    let picture = image(data.handle.clone())
        .width(Length::Fixed(display.width))
        .height(Length::Fixed(display.height))
        .content_fit(ContentFit::Fill)
        .filter_method(FilterMethod::Linear)
        .rotation(Rotation::Solid(Radians(viewer.rotation().radians())));

    let padded = Container::new(picture).padding(centering_padding(display, frame));

    let scrollable = Scrollable::new(padded)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .direction(ScrollDirection::Both {
            vertical: Scrollbar::hidden(),
            horizontal: Scrollbar::hidden(),
        });

    let interaction = if viewer.is_dragging() {
        mouse::Interaction::Grabbing
    } else if viewer.zoom().is_magnified() && viewer.kind().supports_pan() {
        mouse::Interaction::Grab
    } else {
        mouse::Interaction::default()
    };

    // The lightbox captures every press, so a drag starts from here.
    mouse_area(scroll_suspender(scrollable))
        .interaction(interaction)
        .on_press(Message::RawEvent(iced::Event::Mouse(
            mouse::Event::ButtonPressed(mouse::Button::Left),
        )))
        .into()
}

fn centering_padding(display: Size, frame: Size) -> Padding {
    let horizontal = ((frame.width - display.width) / 2.0).max(0.0);
    let vertical = ((frame.height - display.height) / 2.0).max(0.0);
    Padding {
        top: vertical,
        right: horizontal,
        bottom: vertical,
        left: horizontal,
    }
}

fn top_bar<'a>(
    ctx: &ViewContext<'a>,
    viewer: &ViewerState,
    item: &'a MediaItem,
    total: usize,
) -> Element<'a, Message> {
    let position = ctx.i18n.tr_with_args(
        "lightbox-position",
        &[
            ("index", (viewer.index() + 1).to_string().as_str()),
            ("total", total.to_string().as_str()),
        ],
    );

    let mut info = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(indicator(position));
    if let Some(title) = item.title() {
        info = info.push(Text::new(title).size(typography::BODY).color(palette::WHITE));
    }

    let mut controls = Row::new().spacing(spacing::XS).align_y(Vertical::Center);

    if viewer.kind().supports_transform() {
        let zoom = viewer.zoom();
        controls = controls
            .push(indicator(ctx.i18n.tr_with_args(
                "lightbox-zoom-level",
                &[("percent", zoom.percent().to_string().as_str())],
            )))
            .push(control(
                ctx.i18n.tr("lightbox-zoom-out"),
                "-",
                (!zoom.is_min()).then_some(Message::Action(Action::ZoomOut)),
                false,
            ))
            .push(control(
                ctx.i18n.tr("lightbox-zoom-reset"),
                "1:1",
                Some(Message::Action(Action::ResetZoom)),
                false,
            ))
            .push(control(
                ctx.i18n.tr("lightbox-zoom-in"),
                "+",
                (!zoom.is_max()).then_some(Message::Action(Action::ZoomIn)),
                false,
            ))
            .push(control(
                ctx.i18n.tr("lightbox-rotate"),
                "R",
                Some(Message::Action(Action::Rotate)),
                false,
            ));

        for mode in ViewMode::ALL {
            let label = ctx.i18n.tr(mode.label_key());
            controls = controls.push(control(
                label.clone(),
                label,
                Some(Message::Action(Action::SetViewMode(mode))),
                viewer.view_mode() == mode,
            ));
        }
    }

    let fullscreen_key = if viewer.is_fullscreen() {
        "lightbox-fullscreen-exit"
    } else {
        "lightbox-fullscreen-enter"
    };
    let fullscreen_label = ctx.i18n.tr(fullscreen_key);
    controls = controls
        .push(control(
            fullscreen_label.clone(),
            fullscreen_label,
            Some(Message::Action(Action::ToggleFullscreen)),
            viewer.is_fullscreen(),
        ))
        .push(control(
            ctx.i18n.tr("lightbox-download"),
            ctx.i18n.tr("lightbox-download"),
            Some(Message::Download),
            false,
        ))
        .push(control(
            ctx.i18n.tr("lightbox-close"),
            "X",
            Some(Message::Action(Action::Close)),
            false,
        ));

    Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(Vertical::Center)
            .push(info)
            .push(Space::new().width(Length::Fill))
            .push(controls),
    )
    .width(Length::Fill)
    .height(Length::Fixed(BAR_HEIGHT))
    .padding([0.0, spacing::SM])
    .align_y(Vertical::Center)
    .style(styles::overlay::controls_container)
    .into()
}

/// Previous/next arrows on both edges. Hidden for single-item collections.
fn navigation_row<'a>(ctx: &ViewContext<'a>, total: usize) -> Element<'a, Message> {
    if total <= 1 {
        return Space::new().width(Length::Fill).height(Length::Fill).into();
    }
    let arrow = |glyph: &'static str, tip: String, direction: Direction| {
        let content = button(Text::new(glyph).size(typography::TITLE_MD))
            .padding(spacing::SM)
            .width(Length::Fixed(sizing::TOUCH_TARGET + spacing::SM))
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::TRANSPARENT,
                opacity::OVERLAY_MEDIUM,
            ))
            .on_press(Message::Action(Action::Navigate(direction)));
        Container::new(styles::tooltip::styled(content, tip, tooltip::Position::Bottom))
            .height(Length::Fill)
            .padding(spacing::MD)
            .align_y(Vertical::Center)
    };

    Row::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(arrow(
            "◀",
            ctx.i18n.tr("lightbox-previous"),
            Direction::Backward,
        ))
        .push(Space::new().width(Length::Fill))
        .push(arrow("▶", ctx.i18n.tr("lightbox-next"), Direction::Forward))
        .into()
}

fn page_bar<'a>(ctx: &ViewContext<'a>, doc: &DocumentViewer) -> Element<'a, Message> {
    let page = ctx.i18n.tr_with_args(
        "lightbox-page",
        &[
            ("page", doc.page().to_string().as_str()),
            ("count", doc.page_count().to_string().as_str()),
        ],
    );
    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(control(
            ctx.i18n.tr("lightbox-page-previous"),
            "<",
            (doc.inline && doc.has_previous()).then_some(Message::Action(Action::PreviousPage)),
            false,
        ))
        .push(indicator(page))
        .push(control(
            ctx.i18n.tr("lightbox-page-next"),
            ">",
            (doc.inline && doc.has_next()).then_some(Message::Action(Action::NextPage)),
            false,
        ));

    Container::new(row)
        .width(Length::Fill)
        .height(Length::Fixed(BAR_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn video_panel<'a>(
    ctx: &ViewContext<'a>,
    poster: Option<&'a ImageData>,
    video: &VideoViewer,
) -> Element<'a, Message> {
    let mut panel = Column::new()
        .spacing(spacing::MD)
        .align_x(iced::Alignment::Center);

    if let Some(poster) = poster {
        panel = panel.push(
            image(poster.handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::FillPortion(4)),
        );
    }

    let mut details = Row::new().spacing(spacing::MD).align_y(Vertical::Center);
    if let Some(duration) = video.duration_label() {
        details = details.push(indicator(ctx.i18n.tr_with_args(
            "lightbox-video-duration",
            &[("duration", duration.as_str())],
        )));
    }
    if let Some(bytes) = video.byte_size {
        details = details.push(indicator(format_bytes(bytes)));
    }

    panel = panel.push(details).push(
        button(Text::new(ctx.i18n.tr("lightbox-video-play-externally")))
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::primary)
            .on_press(Message::OpenExternally),
    );

    centered(panel)
}

fn error_panel<'a>(ctx: &ViewContext<'a>, err: &MediaError) -> Element<'a, Message> {
    let mut actions = Row::new().spacing(spacing::SM);
    if *err != MediaError::InlineUnsupported {
        actions = actions.push(
            button(Text::new(ctx.i18n.tr("lightbox-retry")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press(Message::Action(Action::Retry)),
        );
    }
    actions = actions
        .push(
            button(Text::new(ctx.i18n.tr("lightbox-open-externally")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::overlay(
                    palette::WHITE,
                    opacity::OVERLAY_SUBTLE,
                    opacity::OVERLAY_MEDIUM,
                ))
                .on_press(Message::OpenExternally),
        )
        .push(
            button(Text::new(ctx.i18n.tr("lightbox-download")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::overlay(
                    palette::WHITE,
                    opacity::OVERLAY_SUBTLE,
                    opacity::OVERLAY_MEDIUM,
                ))
                .on_press(Message::Download),
        );

    centered(
        Column::new()
            .spacing(spacing::MD)
            .align_x(iced::Alignment::Center)
            .push(
                Text::new(ctx.i18n.tr(err.i18n_key()))
                    .size(typography::BODY_LG)
                    .color(palette::WHITE),
            )
            .push(actions),
    )
}

/// Icon-like overlay button with an accessible tooltip.
fn control<'a>(
    tip: String,
    label: impl Into<String>,
    on_press: Option<Message>,
    selected: bool,
) -> Element<'a, Message> {
    let content = button(Text::new(label.into()).size(typography::BODY))
    .padding([spacing::XXS, spacing::XS])
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .on_press_maybe(on_press);

    let content = if selected {
        content.style(styles::button::overlay_selected)
    } else {
        content.style(styles::button::overlay(
            palette::WHITE,
            opacity::OVERLAY_SUBTLE,
            opacity::OVERLAY_MEDIUM,
        ))
    };

    styles::tooltip::styled(content, tip, tooltip::Position::Bottom).into()
}

fn indicator<'a>(label: String) -> Element<'a, Message> {
    Container::new(Text::new(label).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::overlay::indicator(radius::SM))
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::XL)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    // Display-only conversion.
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaCollection, MediaKind};
    use crate::media::ManifestUrls;
    use std::sync::Arc;

    #[test]
    fn centering_padding_is_zero_when_overflowing() {
        let padding = centering_padding(Size::new(2000.0, 500.0), Size::new(1000.0, 1000.0));
        assert_eq!(padding.left, 0.0);
        assert_eq!(padding.top, 250.0);
    }

    #[test]
    fn bytes_are_humanized() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn view_renders_open_and_closed() {
        let i18n = I18n::default();
        let mut state = State::default();
        let _ = view(&state, ViewContext { i18n: &i18n });

        let collection = MediaCollection::new(vec![MediaItem::new(
            "v",
            "/g/v.mp4",
            "",
            MediaKind::Video,
        )]);
        let _ = state.set_collection(collection, Arc::new(ManifestUrls::new("/g")));
        let _ = state.open(0).expect("open");
        let _ = view(&state, ViewContext { i18n: &i18n });
    }
}
