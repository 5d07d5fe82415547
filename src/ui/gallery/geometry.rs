// SPDX-License-Identifier: MPL-2.0
//! Cell placement for one grid configuration at one container width.
//!
//! The same rectangles drive drawing and viewport observation, so a cell is
//! revealed exactly where it is painted.

use crate::config::CAPTION_HEIGHT_PX;
use crate::domain::media::MediaItem;
use crate::layout::GridLayoutConfig;
use iced::{Point, Rectangle, Size};

/// Narrowest and widest cell proportions honored in `auto` mode.
const MIN_AUTO_RATIO: f32 = 0.25;
const MAX_AUTO_RATIO: f32 = 4.0;

/// Laid-out grid, in content coordinates (origin at the top-left of the
/// scrollable content).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub column_width: f32,
    pub gap: f32,
    pub padding: f32,
    /// One rectangle per item, including its caption band.
    pub cells: Vec<Rectangle>,
    /// Item indices per row.
    pub rows: Vec<std::ops::Range<usize>>,
    /// Height of each row.
    pub row_heights: Vec<f32>,
    pub content_height: f32,
}

impl GridGeometry {
    /// Height of the media area of a cell, caption excluded.
    #[must_use]
    pub fn media_height(&self, index: usize, show_metadata: bool) -> f32 {
        let cell = self.cells.get(index).map_or(0.0, |c| c.height);
        if show_metadata {
            (cell - CAPTION_HEIGHT_PX).max(0.0)
        } else {
            cell
        }
    }
}

/// Lays out `items` in rows of `layout.columns.for_width(width)` cells.
#[must_use]
pub fn compute(
    width: f32,
    padding: f32,
    layout: &GridLayoutConfig,
    items: &[MediaItem],
    show_metadata: bool,
) -> GridGeometry {
    let columns = usize::from(layout.columns.for_width(width));
    let gap = layout.spacing.gap();
    let inner = (width - 2.0 * padding).max(0.0);
    let column_width = ((inner - gap * (columns as f32 - 1.0)) / columns as f32).max(1.0);
    let caption = if show_metadata { CAPTION_HEIGHT_PX } else { 0.0 };

    let mut cells = Vec::with_capacity(items.len());
    let mut rows = Vec::new();
    let mut row_heights = Vec::new();
    let mut y = padding;

    for start in (0..items.len()).step_by(columns) {
        let end = (start + columns).min(items.len());
        let heights: Vec<f32> = items[start..end]
            .iter()
            .map(|item| column_width / cell_ratio(layout, item) + caption)
            .collect();
        let row_height = heights.iter().copied().fold(0.0, f32::max);

        for (offset, height) in heights.iter().enumerate() {
            let x = padding + offset as f32 * (column_width + gap);
            cells.push(Rectangle::new(
                Point::new(x, y),
                Size::new(column_width, *height),
            ));
        }

        rows.push(start..end);
        row_heights.push(row_height);
        y += row_height + gap;
    }

    let content_height = if rows.is_empty() {
        2.0 * padding
    } else {
        y - gap + padding
    };

    GridGeometry {
        columns,
        column_width,
        gap,
        padding,
        cells,
        rows,
        row_heights,
        content_height,
    }
}

fn cell_ratio(layout: &GridLayoutConfig, item: &MediaItem) -> f32 {
    layout.aspect_ratio.value().unwrap_or_else(|| {
        item.aspect_ratio()
            .unwrap_or(1.0)
            .clamp(MIN_AUTO_RATIO, MAX_AUTO_RATIO)
    })
}
