//! Drawing side effects on the attribute grid.
//!
//! The Spectrum can only show one ink and one paper colour per 8x8 cell.
//! Drawing an ink pixel therefore recolours the whole cell with the current
//! brush: whatever colours the cell had before are replaced, last write wins.
//! This matches what the hardware would show and is intentional.
//!
//! Erasing only clears pixels and never touches attributes.

use std::collections::HashSet;

use crate::attribute::Attribute;
use crate::grid::{AttributeGrid, PixelGrid, CHAR_SIZE};
use crate::shapes::line_points;

/// The colours currently selected in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub ink: u8,
    pub paper: u8,
    pub bright: bool,
}

impl Brush {
    pub const fn new(ink: u8, paper: u8, bright: bool) -> Self {
        Self { ink, paper, bright }
    }

    pub fn attribute(&self) -> Attribute {
        Attribute::new(self.ink, self.paper, self.bright)
    }
}

impl Default for Brush {
    fn default() -> Self {
        let attr = Attribute::DEFAULT;
        Self::new(attr.ink, attr.paper, attr.bright)
    }
}

impl From<Attribute> for Brush {
    fn from(attr: Attribute) -> Self {
        Self::new(attr.ink, attr.paper, attr.bright)
    }
}

/// Set or clear one pixel.
///
/// When `is_ink` is true the owning cell's attribute is overwritten with the
/// brush colours. Coordinates must lie inside the grid.
pub fn set_ink_pixel(
    pixels: &mut PixelGrid,
    attrs: &mut AttributeGrid,
    x: usize,
    y: usize,
    is_ink: bool,
    brush: Brush,
) {
    pixels.set(x, y, is_ink);
    if is_ink {
        attrs.set(x / CHAR_SIZE, y / CHAR_SIZE, brush.attribute());
    }
}

/// Draw a line of pixels from `(x0, y0)` to `(x1, y1)`.
///
/// Points falling outside the grid are skipped. Each cell the line touches
/// is recoloured once, however many of its pixels the line covers.
/// Returns the number of distinct cells recoloured.
pub fn draw_line(
    pixels: &mut PixelGrid,
    attrs: &mut AttributeGrid,
    from: (i32, i32),
    to: (i32, i32),
    is_ink: bool,
    brush: Brush,
) -> usize {
    let (width, height) = (pixels.width() as i32, pixels.height() as i32);
    let mut touched: HashSet<(usize, usize)> = HashSet::new();

    for p in line_points(from.0, from.1, to.0, to.1) {
        if p.x < 0 || p.y < 0 || p.x >= width || p.y >= height {
            continue;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        pixels.set(x, y, is_ink);
        if is_ink {
            touched.insert((x / CHAR_SIZE, y / CHAR_SIZE));
        }
    }

    let attr = brush.attribute();
    for &(cx, cy) in &touched {
        attrs.set(cx, cy, attr);
    }
    touched.len()
}

/// Bucket fill for the scene and level editors: repaint one cell's paper and
/// bright flag, keeping its ink.
pub fn fill_cell_paper(attrs: &mut AttributeGrid, char_x: usize, char_y: usize, paper: u8, bright: bool) {
    let cell = attrs.get_mut(char_x, char_y);
    cell.paper = paper;
    cell.bright = bright;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Canvas;

    #[test]
    fn test_set_ink_pixel_overwrites_cell_attribute() {
        let mut canvas = Canvas::new(2, 2);
        canvas.attributes.set(1, 0, Attribute::new(1, 6, false));

        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 9, 3, true, Brush::new(3, 5, true));

        assert!(canvas.pixels.get(9, 3));
        assert_eq!(canvas.attributes.get(1, 0), Attribute::new(3, 5, true));
    }

    #[test]
    fn test_last_colour_wins_in_same_cell() {
        let mut canvas = Canvas::new(1, 1);
        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 0, 0, true, Brush::new(2, 0, false));
        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 7, 7, true, Brush::new(4, 1, true));

        assert!(canvas.pixels.get(0, 0));
        assert!(canvas.pixels.get(7, 7));
        assert_eq!(canvas.attributes.get(0, 0), Attribute::new(4, 1, true));
    }

    #[test]
    fn test_erase_keeps_attribute() {
        let mut canvas = Canvas::new(1, 1);
        let brush = Brush::new(2, 3, false);
        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 4, 4, true, brush);
        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 4, 4, false, Brush::new(6, 6, true));

        assert!(!canvas.pixels.get(4, 4));
        assert_eq!(canvas.attributes.get(0, 0), brush.attribute());
    }

    #[test]
    fn test_draw_line_recolours_each_cell_once() {
        let mut canvas = Canvas::new(3, 1);
        let touched = draw_line(
            &mut canvas.pixels,
            &mut canvas.attributes,
            (0, 2),
            (17, 2),
            true,
            Brush::new(5, 1, false),
        );
        assert_eq!(touched, 3);
        for cx in 0..3 {
            assert_eq!(canvas.attributes.get(cx, 0), Attribute::new(5, 1, false));
        }
        for x in 0..18 {
            assert!(canvas.pixels.get(x, 2));
        }
        assert!(!canvas.pixels.get(18, 2));
    }

    #[test]
    fn test_draw_line_skips_out_of_range_points() {
        let mut canvas = Canvas::new(1, 1);
        let touched = draw_line(
            &mut canvas.pixels,
            &mut canvas.attributes,
            (-3, 0),
            (10, 0),
            true,
            Brush::default(),
        );
        assert_eq!(touched, 1);
        assert!((0..8).all(|x| canvas.pixels.get(x, 0)));
    }

    #[test]
    fn test_erase_line_leaves_attributes() {
        let mut canvas = Canvas::new(2, 1);
        canvas.attributes.set(0, 0, Attribute::new(1, 1, false));
        let touched = draw_line(
            &mut canvas.pixels,
            &mut canvas.attributes,
            (0, 0),
            (15, 0),
            false,
            Brush::new(6, 6, true),
        );
        assert_eq!(touched, 0);
        assert_eq!(canvas.attributes.get(0, 0), Attribute::new(1, 1, false));
        assert!(canvas.attributes.get(1, 0).is_default());
    }

    #[test]
    fn test_fill_cell_paper_keeps_ink() {
        let mut canvas = Canvas::new(2, 2);
        canvas.attributes.set(1, 1, Attribute::new(2, 0, true));
        fill_cell_paper(&mut canvas.attributes, 1, 1, 6, false);
        assert_eq!(canvas.attributes.get(1, 1), Attribute::new(2, 6, false));
        assert!(canvas.attributes.get(0, 0).is_default());
    }
}
