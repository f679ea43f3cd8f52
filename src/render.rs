//! Preview rendering of attribute canvases to RGBA images.
//!
//! Each pixel takes the ink or paper colour of its character cell, with the
//! cell's bright flag choosing between the normal and bright palette.

use image::{Rgba, RgbaImage};

use crate::color::color_rgba;
use crate::grid::{Canvas, CHAR_SIZE};

/// Colour of the optional cell grid overlay.
pub const GRID_COLOR: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xFF]);

/// Render a canvas at one image pixel per canvas pixel.
pub fn render_canvas(canvas: &Canvas) -> RgbaImage {
    let width = canvas.pixel_width() as u32;
    let height = canvas.pixel_height() as u32;
    RgbaImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let attr = canvas.attributes.get(x / CHAR_SIZE, y / CHAR_SIZE);
        let index = if canvas.pixels.get(x, y) { attr.ink } else { attr.paper };
        color_rgba(index, attr.bright)
    })
}

/// Draw character cell boundaries onto an image rendered at `scale`.
///
/// Lines go along the top and left edge of every cell, so the bottom and
/// right edge of the image stay clear.
pub fn draw_cell_grid(image: &mut RgbaImage, scale: u32) {
    let step = CHAR_SIZE as u32 * scale.max(1);
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            if x % step == 0 || y % step == 0 {
                image.put_pixel(x, y, GRID_COLOR);
            }
        }
    }
}

/// Render, scale and optionally overlay the cell grid.
pub fn render_preview(canvas: &Canvas, scale: u32, grid: bool) -> RgbaImage {
    let mut image = crate::output::scale_image(render_canvas(canvas), scale);
    if grid {
        draw_cell_grid(&mut image, scale);
    }
    image
}
