// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Component messages are forwarded to their component, and the returned
//! effects are applied here. This is the only place the gallery and the
//! lightbox learn about each other.

use super::{platform, App, Message};
use crate::diagnostics::{UserAction, WarningType};
use crate::error::Error;
use crate::media::Gallery;
use crate::ui::gallery;
use crate::ui::lightbox::{self, Action, Direction, Handoff, Leaf, NavigationEvent};
use crate::ui::notifications::Notification;
use iced::{window, Size, Task};
use std::path::PathBuf;
use std::sync::Arc;

pub(super) fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Gallery(message) => handle_gallery_message(app, message),
        Message::Lightbox(message) => handle_lightbox_message(app, message),
        Message::Notification(message) => {
            app.notifications.handle_message(&message);
            Task::none()
        }
        Message::RawEvent { window, event } => {
            remember_window(app, window);
            handle_lightbox_message(app, lightbox::Message::RawEvent(event))
        }
        Message::WindowResized { window, size } => {
            remember_window(app, window);
            handle_resize(app, size)
        }
        Message::ResumeViewing => handle_resume(app),
        Message::OpenManifestDialog => Task::perform(
            platform::pick_manifest(app.manifest_dir.clone()),
            Message::ManifestPicked,
        ),
        Message::ManifestPicked(Some(path)) => app.load_manifest(path),
        Message::ManifestPicked(None) => Task::none(),
        Message::ManifestLoaded(result) => handle_manifest_loaded(app, result),
        Message::DownloadTargetPicked {
            source,
            target: Some(target),
        } => Task::perform(
            platform::download(source, target),
            Message::DownloadFinished,
        ),
        Message::DownloadTargetPicked { target: None, .. } => Task::none(),
        Message::DownloadFinished(result) => {
            handle_download_finished(app, result);
            Task::none()
        }
        Message::OpenedExternally(result) => {
            if let Err(err) = result {
                app.diagnostics.warn(WarningType::Other, err.to_string());
                app.notifications
                    .push(Notification::error("notification-open-failed"));
            }
            Task::none()
        }
        Message::Tick(now) => {
            app.notifications.tick(now);
            Task::none()
        }
    }
}

fn remember_window(app: &mut App, window: window::Id) {
    if app.window_id != Some(window) {
        app.window_id = Some(window);
        app.lightbox.attach_window(window);
    }
}

fn handle_resize(app: &mut App, size: Size) -> Task<Message> {
    let gallery_task = handle_gallery_message(app, gallery::Message::Resized(size));
    let lightbox_task = app.lightbox.resize(size).map(Message::Lightbox);
    Task::batch([gallery_task, lightbox_task])
}

fn handle_manifest_loaded(app: &mut App, result: Result<Gallery, Error>) -> Task<Message> {
    let loaded = match result {
        Ok(loaded) => loaded,
        Err(err) => {
            let details = err.to_string();
            app.diagnostics.warn(WarningType::Other, details.clone());
            app.notifications
                .push(Notification::error("error-manifest-load").with_arg("details", details));
            return Task::none();
        }
    };

    let Gallery {
        title,
        collection,
        urls,
        ..
    } = loaded;
    app.gallery_title = title;
    app.diagnostics.record_action(UserAction::LoadCollection {
        items: collection.len(),
    });

    let urls: Arc<dyn crate::media::UrlProvider + Send + Sync> = Arc::new(urls);
    let (lightbox_effect, lightbox_task) =
        app.lightbox.set_collection(collection.clone(), Arc::clone(&urls));
    let lightbox_task = lightbox_task.map(Message::Lightbox);
    let follow_up = apply_lightbox_effect(app, lightbox_effect);

    let (gallery_effect, gallery_task) = app.gallery.set_collection(collection, urls);
    let gallery_task = gallery_task.map(Message::Gallery);
    let gallery_follow_up = apply_gallery_effect(app, gallery_effect);

    Task::batch([lightbox_task, follow_up, gallery_task, gallery_follow_up])
}

fn handle_resume(app: &mut App) -> Task<Message> {
    let fallback = app.gallery.selected().unwrap_or(0);
    match app.lightbox.reopen(fallback) {
        Ok((effect, task)) => {
            let index = app
                .lightbox
                .controller()
                .viewer()
                .map_or(fallback, |viewer| viewer.index());
            app.gallery.select(index);
            app.diagnostics
                .record_action(UserAction::OpenLightbox { index });
            let follow_up = apply_lightbox_effect(app, effect);
            Task::batch([task.map(Message::Lightbox), follow_up])
        }
        Err(err) => {
            app.diagnostics.warn(WarningType::Other, err.to_string());
            Task::none()
        }
    }
}

fn handle_gallery_message(app: &mut App, message: gallery::Message) -> Task<Message> {
    if let gallery::Message::Retry(index) = &message {
        app.diagnostics
            .record_action(UserAction::RetryLoad { index: *index });
    }
    let (effect, task) = app.gallery.handle_message(message);
    let task = task.map(Message::Gallery);
    Task::batch([task, apply_gallery_effect(app, effect)])
}

fn apply_gallery_effect(app: &mut App, effect: gallery::Effect) -> Task<Message> {
    match effect {
        gallery::Effect::None => Task::none(),
        gallery::Effect::Warning(warning) => {
            app.diagnostics.record_warning(warning);
            Task::none()
        }
        gallery::Effect::Open(index) => match app.lightbox.open(index) {
            Ok((effect, task)) => {
                app.diagnostics
                    .record_action(UserAction::OpenLightbox { index });
                let follow_up = apply_lightbox_effect(app, effect);
                Task::batch([task.map(Message::Lightbox), follow_up])
            }
            Err(err) => {
                app.diagnostics.warn(WarningType::Other, err.to_string());
                Task::none()
            }
        },
    }
}

fn handle_lightbox_message(app: &mut App, message: lightbox::Message) -> Task<Message> {
    let (effect, task) = app.lightbox.handle_message(message);
    let task = task.map(Message::Lightbox);
    Task::batch([task, apply_lightbox_effect(app, effect)])
}

fn apply_lightbox_effect(app: &mut App, effect: lightbox::Effect) -> Task<Message> {
    let lightbox::Effect {
        action,
        navigation,
        warning,
        handoff,
    } = effect;

    if let Some(action) = action.and_then(|action| user_action(app, action)) {
        app.diagnostics.record_action(action);
    }

    let mut tasks = Vec::new();
    match navigation {
        Some(NavigationEvent::Next(index) | NavigationEvent::Prev(index)) => {
            app.gallery.select(index);
        }
        Some(NavigationEvent::Closed(index)) => {
            tasks.push(app.gallery.focus(index).map(Message::Gallery));
        }
        None => {}
    }

    if let Some(warning) = warning {
        if let Some(notification) = Notification::for_warning(&warning) {
            app.notifications.push(notification);
        }
        app.diagnostics.record_warning(warning);
    }

    if let Some(handoff) = handoff {
        tasks.push(handle_handoff(app, handoff));
    }

    Task::batch(tasks)
}

/// Activity-log entry for an applied lightbox action. Pointer drags and
/// pure resizes are not worth recording.
fn user_action(app: &App, action: Action) -> Option<UserAction> {
    let action = match action {
        Action::ZoomIn => UserAction::ZoomIn,
        Action::ZoomOut => UserAction::ZoomOut,
        Action::Wheel(delta) if delta > 0.0 => UserAction::ZoomIn,
        Action::Wheel(_) => UserAction::ZoomOut,
        Action::ResetZoom => UserAction::ResetZoom,
        Action::Rotate => UserAction::RotateClockwise,
        Action::SetViewMode(_) => UserAction::SetViewMode,
        Action::ToggleFullscreen => UserAction::ToggleFullscreen,
        Action::Navigate(Direction::Forward) => UserAction::NavigateNext,
        Action::Navigate(Direction::Backward) => UserAction::NavigatePrevious,
        Action::Close => UserAction::CloseLightbox,
        Action::PreviousPage | Action::NextPage => {
            let viewer = app.lightbox.controller().viewer()?;
            match viewer.leaf() {
                Leaf::Document(document) => UserAction::ChangePage {
                    page: document.page(),
                },
                _ => return None,
            }
        }
        Action::Retry => UserAction::RetryLoad {
            index: app.lightbox.controller().viewer()?.index(),
        },
        Action::DragStart(_) | Action::DragMove(_) | Action::DragEnd => return None,
    };
    Some(action)
}

fn handle_handoff(app: &mut App, handoff: Handoff) -> Task<Message> {
    match handoff {
        Handoff::OpenExternally(location) => {
            app.diagnostics.record_action(UserAction::OpenExternally);
            Task::perform(
                platform::open_externally(location),
                Message::OpenedExternally,
            )
        }
        Handoff::Download(source) => {
            app.diagnostics.record_action(UserAction::Download);
            let suggested = platform::suggested_file_name(&source);
            Task::perform(platform::pick_download_target(suggested), move |target| {
                Message::DownloadTargetPicked {
                    source: source.clone(),
                    target,
                }
            })
        }
    }
}

fn handle_download_finished(app: &mut App, result: Result<PathBuf, Error>) {
    match result {
        Ok(path) => app.notifications.push(
            Notification::success("notification-download-saved")
                .with_arg("path", path.display().to_string()),
        ),
        Err(err) => {
            let details = err.to_string();
            app.diagnostics.warn(WarningType::Other, details.clone());
            app.notifications.push(
                Notification::error("notification-download-failed").with_arg("details", details),
            );
        }
    }
}
