// SPDX-License-Identifier: MPL-2.0
//! Shared styles for the gallery and the lightbox.

pub mod button;
pub mod container;
pub mod overlay;
pub mod tooltip;
