// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Lazy loading**: Eager count and intersection options
//! - **Layout**: Breakpoints, gaps, dominance threshold
//! - **Gestures**: Swipe thresholds
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Lazy Loading Defaults
// ==========================================================================

/// Number of leading items revealed without waiting for the viewport.
pub const DEFAULT_EAGER_COUNT: usize = 6;

/// Maximum configurable eager count.
pub const MAX_EAGER_COUNT: usize = 200;

/// Lookahead margin added around the viewport before testing intersection (px).
pub const DEFAULT_ROOT_MARGIN_PX: f32 = 100.0;

/// Fraction of a cell that must be inside the expanded viewport to reveal it.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Widths below this use the mobile column count.
pub const TABLET_MIN_WIDTH: f32 = 640.0;

/// Widths at or above this use the desktop column count.
pub const DESKTOP_MIN_WIDTH: f32 = 1024.0;

/// Share of the collection one kind must exceed to get its own preset.
pub const DOMINANT_KIND_SHARE: f32 = 0.6;

/// Maximum column count accepted from configuration.
pub const MAX_COLUMNS: u16 = 12;

/// Height of the title/metadata band under each cell when enabled (px).
pub const CAPTION_HEIGHT_PX: f32 = 48.0;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Minimum horizontal travel for a touch swipe to navigate (px).
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Minimum configurable swipe threshold (px).
pub const MIN_SWIPE_THRESHOLD_PX: f32 = 10.0;

/// Maximum configurable swipe threshold (px).
pub const MAX_SWIPE_THRESHOLD_PX: f32 = 400.0;

/// Swipes slower than this are ignored (ms).
pub const DEFAULT_SWIPE_MAX_DURATION_MS: u64 = 600;

/// Minimum configurable swipe duration budget (ms).
pub const MIN_SWIPE_MAX_DURATION_MS: u64 = 100;

/// Maximum configurable swipe duration budget (ms).
pub const MAX_SWIPE_MAX_DURATION_MS: u64 = 5_000;

// ==========================================================================
// Cache Defaults
// ==========================================================================

/// Number of decoded thumbnails kept in memory.
pub const DEFAULT_THUMBNAIL_CACHE_ENTRIES: usize = 256;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_EAGER_COUNT <= MAX_EAGER_COUNT);
    assert!(DEFAULT_ROOT_MARGIN_PX >= 0.0);
    assert!(DEFAULT_VISIBILITY_THRESHOLD > 0.0);
    assert!(DEFAULT_VISIBILITY_THRESHOLD <= 1.0);

    assert!(TABLET_MIN_WIDTH < DESKTOP_MIN_WIDTH);
    assert!(DOMINANT_KIND_SHARE > 0.5);
    assert!(DOMINANT_KIND_SHARE < 1.0);

    assert!(MIN_SWIPE_THRESHOLD_PX <= DEFAULT_SWIPE_THRESHOLD_PX);
    assert!(DEFAULT_SWIPE_THRESHOLD_PX <= MAX_SWIPE_THRESHOLD_PX);
    assert!(MIN_SWIPE_MAX_DURATION_MS <= DEFAULT_SWIPE_MAX_DURATION_MS);
    assert!(DEFAULT_SWIPE_MAX_DURATION_MS <= MAX_SWIPE_MAX_DURATION_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY <= DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
