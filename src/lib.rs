// SPDX-License-Identifier: MPL-2.0
//! `iced_folio` is an adaptive media gallery with a lightbox viewer, built
//! with the Iced GUI framework.
//!
//! A gallery manifest lists images, videos, documents and mockups. Items
//! are classified once, laid out on a grid chosen from the content, and
//! thumbnails load as cells scroll into view. Activating a cell opens a
//! lightbox with zoom, pan, rotation, fit modes, fullscreen, and keyboard,
//! pointer and touch navigation.

#![doc(html_root_url = "https://docs.rs/iced_folio/0.1.0")]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod layout;
pub mod media;
pub mod ui;
