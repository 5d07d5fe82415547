// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Handles grab-and-drag interaction state for panning a magnified asset.

use iced::{Point, Vector};

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Pointer position where the drag started
    pub origin: Option<Point>,

    /// Pan offset when the drag started
    pub start_pan: Vector,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, position: Point, pan: Vector) {
        self.is_dragging = true;
        self.origin = Some(position);
        self.start_pan = pan;
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.origin = None;
        self.start_pan = Vector::ZERO;
    }

    /// Pan offset for the current pointer position: the starting pan plus
    /// the pointer's travel since the drag began.
    #[must_use]
    pub fn pan_at(&self, current_position: Point) -> Option<Vector> {
        if !self.is_dragging {
            return None;
        }
        let origin = self.origin?;
        Some(self.start_pan + (current_position - origin))
    }
}
