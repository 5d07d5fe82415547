// SPDX-License-Identifier: MPL-2.0
//! Viewer newtypes.
//!
//! This module provides type-safe wrappers for viewer transform values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom factor bounds (0.1× to 10×).
pub mod zoom_bounds {
    /// Minimum zoom factor.
    pub const MIN: f32 = 0.1;
    /// Maximum zoom factor.
    pub const MAX: f32 = 10.0;
    /// Neutral zoom factor.
    pub const DEFAULT: f32 = 1.0;
    /// Multiplier applied by one zoom-in / zoom-out step.
    pub const STEP_FACTOR: f32 = 1.5;
    /// Additive change applied by one wheel notch.
    pub const WHEEL_STEP: f32 = 0.2;
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Zoom factor, guaranteed to be within the valid range (0.1–10).
///
/// Every constructor clamps, so no sequence of zoom operations can leave
/// the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Neutral zoom (1×).
    pub const NEUTRAL: Self = Self(zoom_bounds::DEFAULT);

    /// Creates a new zoom level, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the neutral zoom.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() {
            Self(factor.clamp(zoom_bounds::MIN, zoom_bounds::MAX))
        } else {
            Self::NEUTRAL
        }
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Multiplies by the step factor, saturating at the maximum.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 * zoom_bounds::STEP_FACTOR)
    }

    /// Divides by the step factor, saturating at the minimum.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 / zoom_bounds::STEP_FACTOR)
    }

    /// Applies one wheel notch in the direction of `delta`.
    ///
    /// Positive deltas zoom in, negative deltas zoom out, zero is a no-op.
    #[must_use]
    pub fn wheel(self, delta: f32) -> Self {
        if delta > 0.0 {
            Self::new(self.0 + zoom_bounds::WHEEL_STEP)
        } else if delta < 0.0 {
            Self::new(self.0 - zoom_bounds::WHEEL_STEP)
        } else {
            self
        }
    }

    /// True when the asset is magnified beyond its fitted size.
    #[must_use]
    pub fn is_magnified(self) -> bool {
        self.0 > zoom_bounds::DEFAULT
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX
    }

    /// Zoom as a whole percentage, for display.
    #[must_use]
    pub fn percent(self) -> u32 {
        // Bounded to [10, 1000], the cast cannot truncate meaningfully.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.0 * 100.0).round() as u32;
        percent
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// =============================================================================
// RotationAngle
// =============================================================================

/// Rotation angle in 90° increments.
///
/// The only way to change an angle is a quarter turn, so the value is
/// always one of 0°, 90°, 180° or 270°.
///
/// # Example
///
/// ```
/// use iced_folio::domain::ui::RotationAngle;
///
/// let angle = RotationAngle::default().rotate_clockwise();
/// assert_eq!(angle.degrees(), 90);
///
/// let full = angle.rotate_clockwise().rotate_clockwise().rotate_clockwise();
/// assert_eq!(full.degrees(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Returns the angle in radians.
    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self.0).to_radians()
    }

    /// Rotates a quarter turn clockwise, wrapping at 360°.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        Self((self.0 + 90) % 360)
    }

    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }

    /// Width and height trade places at 90° and 270°.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.0 == 90 || self.0 == 270
    }
}

// =============================================================================
// ViewMode
// =============================================================================

/// How an asset is fitted inside the viewer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Whole asset visible, letterboxed.
    #[default]
    Fit,
    /// Frame fully covered, asset cropped.
    Fill,
    /// One asset pixel per screen pixel.
    Actual,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Fit, ViewMode::Fill, ViewMode::Actual];

    /// i18n key of the mode label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            ViewMode::Fit => "lightbox-view-fit",
            ViewMode::Fill => "lightbox-view-fill",
            ViewMode::Actual => "lightbox-view-actual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_level_clamps_on_construction() {
        assert_eq!(ZoomLevel::new(0.0).value(), zoom_bounds::MIN);
        assert_eq!(ZoomLevel::new(42.0).value(), zoom_bounds::MAX);
        assert_eq!(ZoomLevel::new(f32::NAN), ZoomLevel::NEUTRAL);
    }

    #[test]
    fn zoom_in_from_eight_saturates_at_ten() {
        assert_eq!(ZoomLevel::new(8.0).zoom_in().value(), 10.0);
    }

    #[test]
    fn zoom_steps_stay_in_range() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..40 {
            zoom = zoom.zoom_out();
        }
        assert!(zoom.is_min());
        for _ in 0..40 {
            zoom = zoom.zoom_in();
        }
        assert!(zoom.is_max());
    }

    #[test]
    fn wheel_moves_by_fixed_step_following_sign() {
        let zoom = ZoomLevel::default();
        assert!((zoom.wheel(3.0).value() - 1.2).abs() < 1e-6);
        assert!((zoom.wheel(-0.5).value() - 0.8).abs() < 1e-6);
        assert_eq!(zoom.wheel(0.0), zoom);
    }

    #[test]
    fn only_zoom_above_one_is_magnified() {
        assert!(!ZoomLevel::NEUTRAL.is_magnified());
        assert!(ZoomLevel::new(1.5).is_magnified());
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(ZoomLevel::new(1.5).percent(), 150);
        assert_eq!(ZoomLevel::new(0.1).percent(), 10);
    }

    #[test]
    fn rotation_cycles_through_quarter_turns() {
        let mut angle = RotationAngle::ZERO;
        let mut seen = Vec::new();
        for _ in 0..9 {
            angle = angle.rotate_clockwise();
            seen.push(angle.degrees());
        }
        assert_eq!(seen, vec![90, 180, 270, 0, 90, 180, 270, 0, 90]);
    }

    #[test]
    fn swaps_dimensions_for_90_and_270() {
        let a90 = RotationAngle::ZERO.rotate_clockwise();
        let a180 = a90.rotate_clockwise();
        assert!(a90.swaps_dimensions());
        assert!(!a180.swaps_dimensions());
        assert!(a180.rotate_clockwise().swaps_dimensions());
    }

    #[test]
    fn default_view_mode_is_fit() {
        assert_eq!(ViewMode::default(), ViewMode::Fit);
    }
}
