//! Pure calculation functions for thumbnail geometry and paging.
//!
//! All functions here are pure and testable without a host or any images.

use crate::types::Size;
use std::ops::Range;

/// Fit `target` to the aspect ratio of `source`.
///
/// Returns `target` unchanged when the source size is unknown or already
/// matches the target's aspect ratio. Otherwise the long axis of the
/// source is pinned to the target and the other axis shrinks (letterbox).
///
/// # Examples
/// ```
/// # use vn_gallery::imaging::fit_within;
/// # use vn_gallery::types::Size;
/// // 2:1 source into a 100x100 box → 100x50
/// assert_eq!(fit_within(Some(Size::new(200, 100)), Size::new(100, 100)), Size::new(100, 50));
/// // unknown source → box unchanged
/// assert_eq!(fit_within(None, Size::new(100, 100)), Size::new(100, 100));
/// ```
pub fn fit_within(source: Option<Size>, target: Size) -> Size {
    let Some(source) = source else {
        return target;
    };
    let ratio = source.aspect_ratio();
    let target_ratio = target.aspect_ratio();
    if source == target || ratio == target_ratio {
        return target;
    }
    if ratio > target_ratio {
        // Source is wider: width pins, height shrinks
        Size::new(target.width, (target.width as f64 / ratio) as u32)
    } else {
        // Source is taller: height pins, width shrinks
        Size::new((target.height as f64 * ratio) as u32, target.height)
    }
}

/// Horizontal offset that centers `content` inside `canvas`.
///
/// Negative when the content is wider than the canvas.
pub fn center_offset(canvas: Size, content: Size) -> i32 {
    (canvas.width as f64 / 2.0 - content.width as f64 / 2.0) as i32
}

/// Thumbnail box for a `columns` x `rows` page grid.
///
/// The screen width left after the navigation chrome and the gaps between
/// items is divided over the larger of the two grid dimensions; the height
/// keeps the screen's aspect ratio.
pub fn thumbnail_box(
    screen: Size,
    chrome_width: u32,
    item_spacing: u32,
    columns: u32,
    rows: u32,
) -> Size {
    let target = columns.max(rows).max(1);
    let spacing = item_spacing.saturating_mul(target - 1);
    let available = screen
        .width
        .saturating_sub(chrome_width)
        .saturating_sub(spacing);
    let width = available as f64 / target as f64;
    let ratio = screen.aspect_ratio();
    let height = if ratio == 0.0 { 0.0 } else { width / ratio };
    Size::new(width as u32, height as u32)
}

/// Item indices shown on `page`: `start..end`, with `end` clamped to `total`.
///
/// A page past the end yields an empty range starting at its first index.
pub fn page_window(page: usize, per_page: usize, total: usize) -> Range<usize> {
    let start = page.saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(total).max(start);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // fit_within
    // =========================================================================

    #[test]
    fn fit_unknown_source_returns_target() {
        assert_eq!(fit_within(None, Size::new(300, 200)), Size::new(300, 200));
    }

    #[test]
    fn fit_same_ratio_returns_target() {
        assert_eq!(
            fit_within(Some(Size::new(1920, 1080)), Size::new(320, 180)),
            Size::new(320, 180)
        );
    }

    #[test]
    fn fit_wider_source_pins_width() {
        // 2:1 into 300x200 (1.5:1) → 300x150
        let fitted = fit_within(Some(Size::new(400, 200)), Size::new(300, 200));
        assert_eq!(fitted, Size::new(300, 150));
        assert_eq!(fitted.aspect_ratio(), 2.0);
    }

    #[test]
    fn fit_taller_source_pins_height() {
        // 1:2 into 300x200 → 100x200
        let fitted = fit_within(Some(Size::new(100, 200)), Size::new(300, 200));
        assert_eq!(fitted, Size::new(100, 200));
        assert!(fitted.width <= 300);
    }

    #[test]
    fn fit_zero_height_source() {
        // ratio 0 is "taller than anything": width collapses
        assert_eq!(
            fit_within(Some(Size::new(10, 0)), Size::new(300, 200)),
            Size::new(0, 200)
        );
    }

    // =========================================================================
    // center_offset
    // =========================================================================

    #[test]
    fn center_letterboxed_content() {
        assert_eq!(center_offset(Size::new(300, 200), Size::new(100, 200)), 100);
        assert_eq!(center_offset(Size::new(300, 200), Size::new(300, 150)), 0);
    }

    #[test]
    fn center_odd_difference_truncates() {
        assert_eq!(center_offset(Size::new(301, 10), Size::new(100, 10)), 100);
    }

    // =========================================================================
    // thumbnail_box
    // =========================================================================

    #[test]
    fn box_for_default_grid() {
        // 1920 - 420 chrome - 3 * 15 gaps = 1455 / 4 = 363.75
        let size = thumbnail_box(Size::new(1920, 1080), 420, 15, 4, 4);
        assert_eq!(size.width, 363);
        assert_eq!(size.height, (363.75 / (1920.0 / 1080.0)) as u32);
    }

    #[test]
    fn box_uses_larger_dimension() {
        let wide = thumbnail_box(Size::new(1000, 500), 0, 0, 5, 2);
        let tall = thumbnail_box(Size::new(1000, 500), 0, 0, 2, 5);
        assert_eq!(wide, tall);
        assert_eq!(wide, Size::new(200, 100));
    }

    #[test]
    fn box_saturates_when_chrome_is_wider_than_screen() {
        assert_eq!(thumbnail_box(Size::new(100, 100), 500, 10, 3, 3), Size::new(0, 0));
    }

    // =========================================================================
    // page_window
    // =========================================================================

    #[test]
    fn window_pages_of_ten_items() {
        assert_eq!(page_window(0, 4, 10), 0..4);
        assert_eq!(page_window(1, 4, 10), 4..8);
        assert_eq!(page_window(2, 4, 10), 8..10);
    }

    #[test]
    fn window_past_end_is_empty() {
        assert!(page_window(3, 4, 10).is_empty());
        assert!(page_window(0, 4, 0).is_empty());
    }
}
