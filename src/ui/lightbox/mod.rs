// SPDX-License-Identifier: MPL-2.0
//! Lightbox component: a modal viewer over the gallery.
//!
//! The component wraps a [`LightboxController`] and a [`GestureInput`]. It
//! turns controller [`Transition`]s into Iced tasks (asset loads, scroll
//! snapping for pan, window mode changes) and reports navigation and
//! warnings to the application through [`Effect`].

pub mod controller;
pub mod fullscreen;
pub mod gesture;
pub mod leaf;
pub mod navigation;
mod view;

pub use controller::{
    display_size, pan_limit, Action, AssetState, Direction, Leaf, LightboxController, LoadOutcome,
    LoadRequest, LoadTarget, LoadTicket, Transition, ViewerState,
};
pub use fullscreen::{FullscreenCapability, FullscreenError, WindowFullscreen};
pub use gesture::GestureInput;
pub use navigation::{IndexOutOfRange, NavigationCoordinator, NavigationEvent};
pub use view::{asset_frame, view, ViewContext, BAR_HEIGHT};

use crate::config::LightboxConfig;
use crate::diagnostics::WarningEvent;
use crate::domain::media::MediaCollection;
use crate::error::MediaError;
use crate::media::{self, ImageData, UrlProvider};
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{operation, Id};
use iced::{window, Size, Task};
use std::sync::Arc;
use std::time::Instant;

/// Identifier of the scrollable holding the asset.
pub const SCROLLABLE_ID: &str = "lightbox-asset-scrollable";

#[derive(Debug, Clone)]
pub enum Message {
    /// A control was pressed.
    Action(Action),
    /// Keyboard, pointer, wheel or touch input.
    RawEvent(iced::Event),
    Loaded {
        ticket: LoadTicket,
        result: Result<LoadOutcome, MediaError>,
    },
    OpenExternally,
    Download,
}

/// Requests to hand the open asset to something outside the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    OpenExternally(String),
    Download(String),
}

/// What the application has to react to after a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effect {
    /// Action that was applied, for activity tracking.
    pub action: Option<Action>,
    pub navigation: Option<NavigationEvent>,
    pub warning: Option<WarningEvent>,
    pub handoff: Option<Handoff>,
}

#[derive(Debug)]
pub struct State {
    controller: LightboxController<WindowFullscreen>,
    gestures: GestureInput,
}

impl State {
    #[must_use]
    pub fn new(config: &LightboxConfig) -> Self {
        Self {
            controller: LightboxController::new(
                WindowFullscreen::default(),
                config.remember_last_index,
            ),
            gestures: GestureInput::from_config(config),
        }
    }

    /// Records the window fullscreen requests apply to.
    pub fn attach_window(&mut self, window_id: window::Id) {
        self.controller.fullscreen_mut().attach(window_id);
    }

    /// Replaces the collection, closing the viewer if it was open.
    pub fn set_collection(
        &mut self,
        collection: MediaCollection,
        urls: Arc<dyn UrlProvider + Send + Sync>,
    ) -> (Effect, Task<Message>) {
        let transition = self.controller.set_collection(collection, urls);
        self.apply(transition)
    }

    /// Opens the viewer at `index`.
    pub fn open(&mut self, index: usize) -> Result<(Effect, Task<Message>), IndexOutOfRange> {
        let transition = self.controller.open(index)?;
        self.gestures.reset();
        Ok(self.apply(transition))
    }

    /// Opens the viewer where it was last closed, or at `fallback`.
    pub fn reopen(&mut self, fallback: usize) -> Result<(Effect, Task<Message>), IndexOutOfRange> {
        let transition = self.controller.reopen(fallback)?;
        self.gestures.reset();
        Ok(self.apply(transition))
    }

    /// Follows a window resize. The asset gets the window minus the bars.
    pub fn resize(&mut self, window: Size) -> Task<Message> {
        self.controller.set_frame(asset_frame(window));
        if self.controller.is_open() {
            self.snap_task()
        } else {
            Task::none()
        }
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Action(action) => self.dispatch(action),
            Message::RawEvent(event) => {
                if !self.controller.is_open() {
                    return (Effect::default(), Task::none());
                }
                match self.gestures.translate(&event, Instant::now()) {
                    Some(action) => self.dispatch(action),
                    None => (Effect::default(), Task::none()),
                }
            }
            Message::Loaded { ticket, result } => {
                let transition = self.controller.complete_load(ticket, result);
                self.apply(transition)
            }
            Message::OpenExternally => self.handoff(Handoff::OpenExternally),
            Message::Download => self.handoff(Handoff::Download),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    #[must_use]
    pub fn controller(&self) -> &LightboxController<WindowFullscreen> {
        &self.controller
    }

    fn dispatch(&mut self, action: Action) -> (Effect, Task<Message>) {
        let transition = self.controller.dispatch(action);
        let applied = transition.changed;
        let (mut effect, task) = self.apply(transition);
        if applied {
            effect.action = Some(action);
        }
        (effect, task)
    }

    fn handoff(&self, make: fn(String) -> Handoff) -> (Effect, Task<Message>) {
        let effect = Effect {
            handoff: self
                .controller
                .current_item()
                .map(|item| make(item.source_url().to_string())),
            ..Effect::default()
        };
        (effect, Task::none())
    }

    fn apply(&mut self, transition: Transition) -> (Effect, Task<Message>) {
        let mut tasks = Vec::new();
        if let Some(request) = transition.load {
            tasks.push(load_task(request));
        }
        if let Some((window_id, mode)) = self.controller.fullscreen_mut().take_pending() {
            tasks.push(window::set_mode(window_id, mode));
        }
        if transition.changed && self.controller.is_open() {
            tasks.push(self.snap_task());
        }
        if !self.controller.is_open() {
            self.gestures.reset();
        }

        let effect = Effect {
            navigation: transition.event,
            warning: transition.warning,
            ..Effect::default()
        };
        (effect, Task::batch(tasks))
    }

    /// Scrolls the asset so the visible region matches the current pan.
    fn snap_task(&self) -> Task<Message> {
        operation::snap_to(Id::new(SCROLLABLE_ID), self.relative_offset())
    }

    fn relative_offset(&self) -> RelativeOffset {
        let (Some(viewer), Some(display)) = (self.controller.viewer(), self.controller.display_size())
        else {
            return RelativeOffset { x: 0.5, y: 0.5 };
        };
        let limit = pan_limit(display, self.controller.frame());
        let pan = viewer.pan();
        let axis = |pan: f32, limit: f32| {
            if limit > 0.0 {
                (0.5 - pan / (2.0 * limit)).clamp(0.0, 1.0)
            } else {
                0.5
            }
        };
        RelativeOffset {
            x: axis(pan.x, limit.x),
            y: axis(pan.y, limit.y),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(&LightboxConfig::default())
    }
}

fn load_task(request: LoadRequest) -> Task<Message> {
    let ticket = request.ticket;
    match request.target {
        LoadTarget::Image(location) => Task::perform(
            async move { media::image::load_full(location).await.map(LoadOutcome::Image) },
            move |result| Message::Loaded { ticket, result },
        ),
        LoadTarget::Video { source, poster } => Task::perform(
            load_video(source, poster),
            move |result| Message::Loaded { ticket, result },
        ),
    }
}

/// Confirms the clip exists and fetches its poster frame.
///
/// A missing poster is not an error: the viewer shows a placeholder.
async fn load_video(source: String, poster: Option<String>) -> Result<LoadOutcome, MediaError> {
    let byte_size = media::probe(source)
        .await
        .map_err(|err| MediaError::from(&err))?;
    let poster: Option<ImageData> = match poster {
        Some(location) => media::image::load_full(location).await.ok(),
        None => None,
    };
    Ok(LoadOutcome::Video { poster, byte_size })
}
