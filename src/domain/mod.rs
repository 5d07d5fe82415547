// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core gallery types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) so the gallery
//! heuristics and the viewer state machine can be tested without a window.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaItem`](media::MediaItem), [`MediaKind`](media::MediaKind),
//!   [`MediaCollection`](media::MediaCollection))
//! - [`ui`]: UI value objects ([`ZoomLevel`](ui::newtypes::ZoomLevel),
//!   [`RotationAngle`](ui::newtypes::RotationAngle), [`ViewMode`](ui::newtypes::ViewMode))

pub mod media;
pub mod ui;
