// SPDX-License-Identifier: MPL-2.0
//! Custom widgets.

pub mod scroll_suspender;

pub use scroll_suspender::{scroll_suspender, ScrollSuspender};
