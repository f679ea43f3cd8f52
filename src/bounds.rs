//! Bounding box of drawn character cells.
//!
//! Exports only encode the cells inside these bounds, so they are computed
//! fresh from the grids every time an export runs.

use serde::Serialize;

use crate::grid::{AttributeGrid, PixelGrid, CHAR_SIZE};

/// Inclusive rectangle of character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawBounds {
    pub min_char_x: usize,
    pub min_char_y: usize,
    pub max_char_x: usize,
    pub max_char_y: usize,
    pub width: usize,
    pub height: usize,
}

impl DrawBounds {
    /// Bounds covering the inclusive cell range.
    pub fn new(min_char_x: usize, min_char_y: usize, max_char_x: usize, max_char_y: usize) -> Self {
        Self {
            min_char_x,
            min_char_y,
            max_char_x,
            max_char_y,
            width: max_char_x - min_char_x + 1,
            height: max_char_y - min_char_y + 1,
        }
    }

    /// Bounds covering a whole grid of `chars_width x chars_height`.
    pub fn full(chars_width: usize, chars_height: usize) -> Self {
        Self::new(0, 0, chars_width - 1, chars_height - 1)
    }

    pub fn char_count(&self) -> usize {
        self.width * self.height
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &DrawBounds) -> DrawBounds {
        DrawBounds::new(
            self.min_char_x.min(other.min_char_x),
            self.min_char_y.min(other.min_char_y),
            self.max_char_x.max(other.max_char_x),
            self.max_char_y.max(other.max_char_y),
        )
    }
}

/// Find the cells that hold any ink pixel or, when `attrs` is given, a
/// non-default attribute. Returns `None` if there are none.
pub fn drawn_bounds(
    pixels: &PixelGrid,
    chars_width: usize,
    chars_height: usize,
    attrs: Option<&AttributeGrid>,
) -> Option<DrawBounds> {
    let mut found: Option<DrawBounds> = None;

    for cy in 0..chars_height {
        for cx in 0..chars_width {
            if !cell_has_content(pixels, attrs, cx, cy) {
                continue;
            }
            let cell = DrawBounds::new(cx, cy, cx, cy);
            found = Some(match found {
                Some(b) => b.union(&cell),
                None => cell,
            });
        }
    }

    found
}

fn cell_has_content(pixels: &PixelGrid, attrs: Option<&AttributeGrid>, cx: usize, cy: usize) -> bool {
    if let Some(attrs) = attrs {
        if !attrs.get(cx, cy).is_default() {
            return true;
        }
    }
    (0..CHAR_SIZE).any(|py| (0..CHAR_SIZE).any(|px| pixels.get(cx * CHAR_SIZE + px, cy * CHAR_SIZE + py)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::grid::Canvas;

    #[test]
    fn test_empty_grid_has_no_bounds() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(drawn_bounds(&canvas.pixels, 4, 3, Some(&canvas.attributes)), None);
        assert_eq!(drawn_bounds(&canvas.pixels, 4, 3, None), None);
    }

    #[test]
    fn test_single_pixel() {
        let mut canvas = Canvas::new(4, 3);
        canvas.pixels.set(17, 10, true);
        let b = drawn_bounds(&canvas.pixels, 4, 3, None).unwrap();
        assert_eq!(b, DrawBounds::new(2, 1, 2, 1));
        assert_eq!(b.width, 1);
        assert_eq!(b.height, 1);
    }

    #[test]
    fn test_spanning_pixels() {
        let mut canvas = Canvas::new(5, 4);
        canvas.pixels.set(9, 2, true);
        canvas.pixels.set(30, 25, true);
        let b = drawn_bounds(&canvas.pixels, 5, 4, None).unwrap();
        assert_eq!(b.min_char_x, 1);
        assert_eq!(b.min_char_y, 0);
        assert_eq!(b.max_char_x, 3);
        assert_eq!(b.max_char_y, 3);
        assert_eq!(b.char_count(), 12);
    }

    #[test]
    fn test_attribute_only_cell_counts_when_supplied() {
        let mut canvas = Canvas::new(4, 4);
        canvas.attributes.set(3, 2, Attribute::new(2, 1, false));

        assert_eq!(drawn_bounds(&canvas.pixels, 4, 4, None), None);
        let b = drawn_bounds(&canvas.pixels, 4, 4, Some(&canvas.attributes)).unwrap();
        assert_eq!(b, DrawBounds::new(3, 2, 3, 2));
    }

    #[test]
    fn test_union() {
        let a = DrawBounds::new(1, 1, 2, 2);
        let b = DrawBounds::new(0, 2, 1, 4);
        assert_eq!(a.union(&b), DrawBounds::new(0, 1, 2, 4));
    }

    #[test]
    fn test_full() {
        let b = DrawBounds::full(32, 24);
        assert_eq!(b.width, 32);
        assert_eq!(b.height, 24);
        assert_eq!(b.char_count(), 768);
    }
}
