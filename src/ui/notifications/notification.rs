// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.

use crate::diagnostics::{WarningEvent, WarningType};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity level determines display duration and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::PRIMARY_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A notification to be displayed to the user.
///
/// The message is an i18n key resolved at render time, so a language switch
/// applies to toasts already on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Toast for a diagnostic warning, when the user can act on it.
    ///
    /// Thumbnail and asset failures are already visible in place, stale
    /// loads and observer fallbacks are invisible by nature.
    #[must_use]
    pub fn for_warning(warning: &WarningEvent) -> Option<Self> {
        let key = match warning.warning_type {
            WarningType::FullscreenUnavailable => "notification-fullscreen-unavailable",
            WarningType::FullscreenFailed => "notification-fullscreen-failed",
            WarningType::Config => "notification-config-load-error",
            _ => return None,
        };
        Some(Self::warning(key))
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    /// Whether the notification has outlived its display duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|duration| now.saturating_duration_since(self.created_at) >= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        assert_ne!(
            Notification::success("a").id(),
            Notification::success("a").id()
        );
    }

    #[test]
    fn errors_never_expire() {
        let notification = Notification::error("download-failed");
        assert!(!notification.is_expired(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn success_expires_after_its_duration() {
        let notification = Notification::success("saved");
        let created = notification.created_at;
        assert!(!notification.is_expired(created + Duration::from_secs(1)));
        assert!(notification.is_expired(created + Duration::from_secs(3)));
    }

    #[test]
    fn only_actionable_warnings_become_toasts() {
        let fullscreen = WarningEvent::new(WarningType::FullscreenFailed, "denied");
        let stale = WarningEvent::new(WarningType::StaleLoadDiscarded, "late");
        assert_eq!(
            Notification::for_warning(&fullscreen).map(|n| n.message_key().to_string()),
            Some("notification-fullscreen-failed".to_string())
        );
        assert!(Notification::for_warning(&stale).is_none());
    }

    #[test]
    fn builder_collects_arguments() {
        let notification = Notification::error("notification-download-failed")
            .with_arg("details", "disk full");
        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_args().len(), 1);
    }
}
