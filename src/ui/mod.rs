// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! owns its state, handles its own messages and reports what the
//! application must react to as an effect.
//!
//! # Components
//!
//! - [`gallery`] - Adaptive thumbnail grid with lazy loading
//! - [`lightbox`] - Modal viewer with zoom, pan, rotation and fullscreen
//! - [`notifications`] - Toasts for outcomes outside either component
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Reusable interaction state (drag)
//! - [`widgets`] - Custom Iced widgets
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod gallery;
pub mod lightbox;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod widgets;
