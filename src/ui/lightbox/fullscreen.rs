// SPDX-License-Identifier: MPL-2.0
//! Fullscreen as an injected capability.
//!
//! The controller never talks to the window directly. It asks a
//! [`FullscreenCapability`], which tests replace with a fake.

use iced::window;
use std::fmt;

/// The platform refused a fullscreen change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenError(pub String);

impl fmt::Display for FullscreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for FullscreenError {}

pub trait FullscreenCapability {
    fn is_supported(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;
    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

/// Fullscreen of the main Iced window.
///
/// Requests are queued as a window mode; the application drains the queue
/// into `window::set_mode` once it knows the window id.
#[derive(Debug, Clone, Default)]
pub struct WindowFullscreen {
    window_id: Option<window::Id>,
    pending: Option<window::Mode>,
}

impl WindowFullscreen {
    /// Records the window that fullscreen applies to.
    pub fn attach(&mut self, window_id: window::Id) {
        self.window_id = Some(window_id);
    }

    #[must_use]
    pub fn window_id(&self) -> Option<window::Id> {
        self.window_id
    }

    /// Takes the mode change waiting to be applied, with its window.
    pub fn take_pending(&mut self) -> Option<(window::Id, window::Mode)> {
        let id = self.window_id?;
        self.pending.take().map(|mode| (id, mode))
    }

    fn queue(&mut self, mode: window::Mode) -> Result<(), FullscreenError> {
        if self.window_id.is_none() {
            return Err(FullscreenError("no window to change".to_string()));
        }
        self.pending = Some(mode);
        Ok(())
    }
}

impl FullscreenCapability for WindowFullscreen {
    fn is_supported(&self) -> bool {
        true
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.queue(window::Mode::Fullscreen)
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.queue(window::Mode::Windowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_fail_until_a_window_is_known() {
        let mut fullscreen = WindowFullscreen::default();
        assert!(fullscreen.request_fullscreen().is_err());
        assert!(fullscreen.take_pending().is_none());
    }

    #[test]
    fn pending_mode_is_taken_once() {
        let mut fullscreen = WindowFullscreen::default();
        let id = window::Id::unique();
        fullscreen.attach(id);

        fullscreen.request_fullscreen().expect("queue");
        assert_eq!(
            fullscreen.take_pending(),
            Some((id, window::Mode::Fullscreen))
        );
        assert_eq!(fullscreen.take_pending(), None);

        fullscreen.exit_fullscreen().expect("queue");
        assert_eq!(fullscreen.take_pending(), Some((id, window::Mode::Windowed)));
    }
}
