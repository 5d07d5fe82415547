// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for outcomes the user should see.
//!
//! Most gallery and lightbox problems stay inside their component (failed
//! thumbnails show a placeholder, failed assets an error panel). Toasts
//! cover the rest: settings that could not be read, fullscreen refusals,
//! finished or failed downloads.
//!
//! - [`notification`] - `Notification` with severity and i18n key
//! - [`manager`] - queueing and auto-dismiss
//! - [`toast`] - rendering

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::view_overlay;
