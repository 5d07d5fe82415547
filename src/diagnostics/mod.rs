// SPDX-License-Identifier: MPL-2.0
//! In-memory diagnostics for the gallery and lightbox.
//!
//! Nothing in the gallery or lightbox fails loudly: load errors become item
//! state, fullscreen refusals and observer failures become warnings. Those
//! warnings, together with the user actions that preceded them, are kept in
//! a memory-bounded [`CircularBuffer`] so they can be inspected after the
//! fact, and echoed to stderr as they happen.

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind, UserAction, WarningEvent, WarningType};

/// Bounded log of recent user actions and warnings.
#[derive(Debug, Clone)]
pub struct DiagnosticsLog {
    events: CircularBuffer<DiagnosticEvent>,
}

impl Default for DiagnosticsLog {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl DiagnosticsLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
        }
    }

    pub fn record_action(&mut self, action: UserAction) {
        self.events
            .push(DiagnosticEvent::new(DiagnosticEventKind::UserAction(action)));
    }

    /// Records a warning and prints it to stderr.
    pub fn record_warning(&mut self, warning: WarningEvent) {
        eprintln!("[WARN] {}: {}", warning.warning_type, warning.message);
        self.events
            .push(DiagnosticEvent::new(DiagnosticEventKind::Warning(warning)));
    }

    /// Shorthand for [`record_warning`](Self::record_warning).
    pub fn warn(&mut self, warning_type: WarningType, message: impl Into<String>) {
        self.record_warning(WarningEvent::new(warning_type, message));
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Retained warnings, oldest first.
    pub fn warnings(&self) -> impl Iterator<Item = &WarningEvent> {
        self.events.iter().filter_map(|event| match &event.kind {
            DiagnosticEventKind::Warning(warning) => Some(warning),
            DiagnosticEventKind::UserAction(_) => None,
        })
    }

    /// Most recent warning, if any.
    #[must_use]
    pub fn last_warning(&self) -> Option<&WarningEvent> {
        self.events.iter().rev().find_map(|event| match &event.kind {
            DiagnosticEventKind::Warning(warning) => Some(warning),
            DiagnosticEventKind::UserAction(_) => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
