// SPDX-License-Identifier: MPL-2.0
//! Reusable interaction state shared by viewer components.

pub mod drag;

pub use drag::DragState;
