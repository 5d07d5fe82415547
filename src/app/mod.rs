// SPDX-License-Identifier: MPL-2.0
//! Application root: the gallery, the lightbox above it, and toasts.
//!
//! `App` owns both components and translates their effects into each
//! other's calls: an activated thumbnail opens the lightbox, lightbox
//! navigation moves the gallery selection, closing returns focus to the
//! last viewed cell. Handoffs (open externally, download) and manifest
//! loading run as platform tasks from here.

mod message;
mod platform;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::diagnostics::{DiagnosticsLog, WarningType};
use crate::i18n::fluent::I18n;
use crate::media::manifest;
use crate::ui::gallery::{self, GalleryOptions};
use crate::ui::lightbox;
use crate::ui::notifications::{self, Notification};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1280.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 400.0;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    gallery: gallery::State,
    lightbox: lightbox::State,
    diagnostics: DiagnosticsLog,
    notifications: notifications::Manager,
    /// Title declared by the open manifest.
    gallery_title: Option<String>,
    /// Directory of the last opened manifest, for the open dialog.
    manifest_dir: Option<PathBuf>,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("items", &self.gallery.collection().len())
            .field("lightbox_open", &self.lightbox.is_open())
            .field("window_id", &self.window_id)
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        Self {
            i18n: I18n::default(),
            gallery: gallery::State::new(GalleryOptions::from_config(&config)),
            lightbox: lightbox::State::new(&config.lightbox),
            config,
            diagnostics: DiagnosticsLog::default(),
            notifications: notifications::Manager::new(),
            gallery_title: None,
            manifest_dir: None,
            window_id: None,
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 wants an `Fn` boot; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Reads settings, applies command-line overrides and starts loading
    /// the manifest given on the command line, if any.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load_with_override(flags.config_dir.clone());
        let mut app = Self::with_config(config, &flags);

        if let Some(warning) = config_warning {
            app.diagnostics.warn(WarningType::Config, warning);
            app.notifications
                .push(Notification::warning("notification-config-load-error"));
        }

        let task = match flags.manifest_path {
            Some(path) => app.load_manifest(path),
            None => Task::none(),
        };
        (app, task)
    }

    /// Builds the state from settings and flags without touching the disk.
    fn with_config(mut config: Config, flags: &Flags) -> Self {
        if flags.no_lazy {
            config.gallery.enable_lazy_loading = false;
        }
        if flags.fixed_layout {
            config.gallery.adaptive_layout = false;
        }
        Self {
            i18n: I18n::new(flags.lang.clone(), &config),
            gallery: gallery::State::new(GalleryOptions::from_config(&config)),
            lightbox: lightbox::State::new(&config.lightbox),
            config,
            ..Self::default()
        }
    }

    fn load_manifest(&mut self, path: PathBuf) -> Task<Message> {
        self.manifest_dir = path.parent().map(PathBuf::from);
        Task::perform(manifest::load_async(path), Message::ManifestLoaded)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("app-title");
        match &self.gallery_title {
            Some(title) => format!("{title} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.lightbox.is_open());
        let tick_sub = subscription::create_tick_subscription(self.notifications.has_notifications());
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, UserAction};
    use crate::error::Error;
    use crate::ui::lightbox::{Action, Direction};
    use std::path::Path;

    const MANIFEST: &str = r#"
title = "Portfolio"

[[media]]
id = "one"
source = "one.png"
width = 800
height = 600

[[media]]
id = "two"
source = "two.png"
width = 800
height = 600

[[media]]
id = "three"
source = "three.png"
width = 800
height = 600
"#;

    fn loaded_app() -> App {
        let mut app = App::with_config(Config::default(), &Flags::default());
        let gallery = manifest::parse(MANIFEST, Path::new("/portfolio")).expect("manifest");
        let _ = app.update(Message::ManifestLoaded(Ok(gallery)));
        app
    }

    fn recorded_actions(app: &App) -> Vec<UserAction> {
        app.diagnostics
            .events()
            .filter_map(|event| match &event.kind {
                DiagnosticEventKind::UserAction(action) => Some(action.clone()),
                DiagnosticEventKind::Warning(_) => None,
            })
            .collect()
    }

    #[test]
    fn flags_override_gallery_settings() {
        let flags = Flags {
            no_lazy: true,
            fixed_layout: true,
            ..Flags::default()
        };
        let app = App::with_config(Config::default(), &flags);
        assert!(!app.config.gallery.enable_lazy_loading);
        assert!(!app.config.gallery.adaptive_layout);
    }

    #[test]
    fn manifest_title_shows_in_window_title() {
        let app = loaded_app();
        assert_eq!(app.gallery.collection().len(), 3);
        assert!(app.title().starts_with("Portfolio - "));
    }

    #[test]
    fn failed_manifest_keeps_empty_gallery_and_notifies() {
        let mut app = App::default();
        let _ = app.update(Message::ManifestLoaded(Err(Error::Manifest("bad".into()))));
        assert!(app.gallery.collection().is_empty());
        assert!(app.notifications.has_notifications());
    }

    #[test]
    fn activating_a_cell_opens_the_lightbox() {
        let mut app = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Activate(1)));

        assert!(app.lightbox.is_open());
        let viewer = app.lightbox.controller().viewer().expect("viewer");
        assert_eq!(viewer.index(), 1);
        assert!(recorded_actions(&app).contains(&UserAction::OpenLightbox { index: 1 }));
    }

    #[test]
    fn lightbox_navigation_moves_gallery_selection() {
        let mut app = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Activate(2)));
        let _ = app.update(Message::Lightbox(lightbox::Message::Action(
            Action::Navigate(Direction::Forward),
        )));

        assert_eq!(app.gallery.selected(), Some(0));

        let _ = app.update(Message::Lightbox(lightbox::Message::Action(Action::Close)));
        assert!(!app.lightbox.is_open());
        assert_eq!(app.gallery.selected(), Some(0));
        assert!(recorded_actions(&app).contains(&UserAction::CloseLightbox));
    }

    #[test]
    fn fullscreen_before_any_window_event_is_reported() {
        let mut app = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Activate(0)));
        let _ = app.update(Message::Lightbox(lightbox::Message::Action(
            Action::ToggleFullscreen,
        )));

        let viewer = app.lightbox.controller().viewer().expect("viewer");
        assert!(!viewer.is_fullscreen());
        assert!(app.diagnostics.last_warning().is_some());
        assert!(app.notifications.has_notifications());
    }

    #[test]
    fn resume_reopens_at_last_closed_item() {
        let mut config = Config::default();
        config.lightbox.remember_last_index = true;
        let mut app = App::with_config(config, &Flags::default());
        let gallery = manifest::parse(MANIFEST, Path::new("/portfolio")).expect("manifest");
        let _ = app.update(Message::ManifestLoaded(Ok(gallery)));

        let _ = app.update(Message::Gallery(gallery::Message::Activate(2)));
        let _ = app.update(Message::Lightbox(lightbox::Message::Action(Action::Close)));
        let _ = app.update(Message::Gallery(gallery::Message::Activate(0)));
        let _ = app.update(Message::Lightbox(lightbox::Message::Action(Action::Close)));
        let _ = app.update(Message::ResumeViewing);

        let viewer = app.lightbox.controller().viewer().expect("viewer");
        assert_eq!(viewer.index(), 0);
    }

    fn click_view(app: &App, position: iced::Point) -> Vec<Message> {
        use iced::advanced::renderer::Headless;
        use iced::mouse;
        use iced_runtime::user_interface::{Cache, UserInterface};

        let mut renderer = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(iced::Renderer::new(
                iced::Font::default(),
                iced::Pixels(16.0),
                Some("tiny-skia"),
            ))
            .expect("headless renderer");
        let mut ui = UserInterface::build(
            app.view(),
            iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
            Cache::default(),
            &mut renderer,
        );
        let events = [
            iced::Event::Mouse(mouse::Event::CursorMoved { position }),
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
        ];
        let mut messages = Vec::new();
        let _ = ui.update(
            &events,
            mouse::Cursor::Available(position),
            &mut renderer,
            &mut iced::advanced::clipboard::Null,
            &mut messages,
        );
        messages
    }

    #[test]
    fn header_and_grid_ignore_clicks_while_the_lightbox_is_open() {
        let mut app = loaded_app();
        let open_button = iced::Point::new(1262.0, 30.0);
        let cell = iced::Point::new(200.0, 200.0);

        let closed = click_view(&app, open_button);
        assert!(closed
            .iter()
            .any(|message| matches!(message, Message::OpenManifestDialog)));

        let _ = app.update(Message::Gallery(gallery::Message::Activate(0)));
        for position in [open_button, cell] {
            let messages = click_view(&app, position);
            assert!(
                !messages.iter().any(|message| matches!(
                    message,
                    Message::OpenManifestDialog | Message::ResumeViewing | Message::Gallery(_)
                )),
                "{messages:?}"
            );
        }
    }

    #[test]
    fn new_manifest_closes_the_lightbox() {
        let mut app = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Activate(0)));
        let gallery = manifest::parse(MANIFEST, Path::new("/other")).expect("manifest");
        let _ = app.update(Message::ManifestLoaded(Ok(gallery)));
        assert!(!app.lightbox.is_open());
    }
}
