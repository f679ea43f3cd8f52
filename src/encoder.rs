//! Packing of pixel and attribute grids into Spectrum bytes.
//!
//! A character cell becomes eight pixel bytes (one per pixel row, top row
//! first, bit 7 = leftmost pixel, set bit = ink) and one attribute byte.
//! Pixel bytes for a whole region come first, followed by all of its
//! attribute bytes.
//!
//! Regions are walked in row-major cell order. Full screens can instead be
//! written in display file order, where pixel row `y` of column `c` lives at
//! offset `((y & 0xC0) << 5) | ((y & 0x07) << 8) | ((y & 0x38) << 2) | c`.

use crate::bounds::{drawn_bounds, DrawBounds};
use crate::export::ExportError;
use crate::grid::{Canvas, PixelGrid, CHAR_SIZE};
use crate::size_class::{ByteLayout, Cropping, ExportProfile, SCREEN_CHARS_HEIGHT, SCREEN_CHARS_WIDTH};

/// Size of the Spectrum display file (pixel data) in bytes.
pub const DISPLAY_FILE_SIZE: usize = 6144;

/// Size of the Spectrum attribute file in bytes.
pub const ATTRIBUTE_FILE_SIZE: usize = 768;

/// Encoded bytes for a rectangular region of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlock {
    /// Cells covered, in source coordinates
    pub bounds: DrawBounds,
    pub layout: ByteLayout,
    /// Eight bytes per cell
    pub pixel_bytes: Vec<u8>,
    /// One byte per cell, row-major
    pub attr_bytes: Vec<u8>,
}

impl EncodedBlock {
    pub fn char_count(&self) -> usize {
        self.bounds.char_count()
    }

    pub fn total_bytes(&self) -> usize {
        self.pixel_bytes.len() + self.attr_bytes.len()
    }
}

/// Pack eight pixels starting at `(x, y)` into a byte, MSB leftmost.
pub fn pack_pixel_row(pixels: &PixelGrid, x: usize, y: usize) -> u8 {
    (0..CHAR_SIZE).fold(0u8, |byte, bit| {
        if pixels.get(x + bit, y) {
            byte | (0x80 >> bit)
        } else {
            byte
        }
    })
}

/// Offset of pixel row `y`, character column `col` within the display file.
pub fn display_file_offset(y: usize, col: usize) -> usize {
    ((y & 0xC0) << 5) | ((y & 0x07) << 8) | ((y & 0x38) << 2) | col
}

/// Pick the cells an export covers and check the character budget.
pub fn plan_region(canvas: &Canvas, profile: &ExportProfile) -> Result<DrawBounds, ExportError> {
    let (chars_width, chars_height) = (canvas.chars_width(), canvas.chars_height());

    if let Some(expected) = profile.char_dim {
        if expected != (chars_width, chars_height) {
            return Err(ExportError::SizeMismatch { expected, found: (chars_width, chars_height) });
        }
    }

    let bounds = match profile.cropping {
        Cropping::DrawnBounds => {
            drawn_bounds(&canvas.pixels, chars_width, chars_height, Some(&canvas.attributes))
                .ok_or(ExportError::NothingToExport)?
        }
        Cropping::Full => {
            if chars_width == 0 || chars_height == 0 {
                return Err(ExportError::NothingToExport);
            }
            DrawBounds::full(chars_width, chars_height)
        }
    };

    if let Some(limit) = profile.max_chars {
        let count = bounds.char_count();
        if count > limit {
            return Err(ExportError::TooManyChars { count, limit });
        }
    }

    Ok(bounds)
}

/// Encode a canvas with the given profile.
pub fn encode(canvas: &Canvas, profile: &ExportProfile) -> Result<EncodedBlock, ExportError> {
    let bounds = plan_region(canvas, profile)?;
    let block = match profile.layout {
        ByteLayout::CellOrder => encode_region(canvas, &bounds),
        ByteLayout::DisplayFile => encode_display_file(canvas)?,
    };
    log::debug!(
        "encoded {} {}x{} chars: {} pixel bytes, {} attribute bytes",
        profile.kind,
        block.bounds.width,
        block.bounds.height,
        block.pixel_bytes.len(),
        block.attr_bytes.len()
    );
    Ok(block)
}

/// Encode the cells inside `bounds` in row-major cell order.
pub fn encode_region(canvas: &Canvas, bounds: &DrawBounds) -> EncodedBlock {
    let mut pixel_bytes = Vec::with_capacity(bounds.char_count() * CHAR_SIZE);
    let mut attr_bytes = Vec::with_capacity(bounds.char_count());

    for cy in bounds.min_char_y..=bounds.max_char_y {
        for cx in bounds.min_char_x..=bounds.max_char_x {
            for row in 0..CHAR_SIZE {
                pixel_bytes.push(pack_pixel_row(&canvas.pixels, cx * CHAR_SIZE, cy * CHAR_SIZE + row));
            }
        }
    }

    for cy in bounds.min_char_y..=bounds.max_char_y {
        for cx in bounds.min_char_x..=bounds.max_char_x {
            attr_bytes.push(canvas.attributes.get(cx, cy).to_byte());
        }
    }

    EncodedBlock { bounds: *bounds, layout: ByteLayout::CellOrder, pixel_bytes, attr_bytes }
}

/// Encode a full 32x24 canvas as display file plus attribute file.
pub fn encode_display_file(canvas: &Canvas) -> Result<EncodedBlock, ExportError> {
    let expected = (SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT);
    let found = (canvas.chars_width(), canvas.chars_height());
    if found != expected {
        return Err(ExportError::SizeMismatch { expected, found });
    }

    let mut pixel_bytes = vec![0u8; DISPLAY_FILE_SIZE];
    for y in 0..SCREEN_CHARS_HEIGHT * CHAR_SIZE {
        for col in 0..SCREEN_CHARS_WIDTH {
            pixel_bytes[display_file_offset(y, col)] = pack_pixel_row(&canvas.pixels, col * CHAR_SIZE, y);
        }
    }

    let attr_bytes: Vec<u8> =
        canvas.attributes.rows().iter().flat_map(|row| row.iter().map(|a| a.to_byte())).collect();

    Ok(EncodedBlock {
        bounds: DrawBounds::full(SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT),
        layout: ByteLayout::DisplayFile,
        pixel_bytes,
        attr_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::size_class::TileSize;

    #[test]
    fn test_top_left_pixel_is_msb() {
        let mut canvas = Canvas::new(1, 1);
        canvas.pixels.set(0, 0, true);
        let block = encode(&canvas, &ExportProfile::UDG).unwrap();
        assert_eq!(block.pixel_bytes, vec![0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(block.attr_bytes, vec![0x47]);
    }

    #[test]
    fn test_pack_pixel_row() {
        let mut canvas = Canvas::new(2, 1);
        canvas.pixels.set(7, 3, true);
        canvas.pixels.set(8, 3, true);
        canvas.pixels.set(10, 3, true);
        assert_eq!(pack_pixel_row(&canvas.pixels, 0, 3), 0x01);
        assert_eq!(pack_pixel_row(&canvas.pixels, 8, 3), 0xA0);
    }

    #[test]
    fn test_region_cell_order() {
        // 2x2 cells, each cell marked by a distinct row
        let mut canvas = Canvas::new(2, 2);
        canvas.pixels.set(0, 0, true); // cell (0,0) row 0
        canvas.pixels.set(8, 1, true); // cell (1,0) row 1
        canvas.pixels.set(0, 10, true); // cell (0,1) row 2
        canvas.pixels.set(15, 15, true); // cell (1,1) row 7
        canvas.attributes.set(1, 0, Attribute::new(1, 0, false));
        canvas.attributes.set(0, 1, Attribute::new(2, 0, false));

        let block = encode_region(&canvas, &DrawBounds::full(2, 2));
        assert_eq!(block.pixel_bytes.len(), 32);
        assert_eq!(block.pixel_bytes[0], 0x80);
        assert_eq!(block.pixel_bytes[8 + 1], 0x80);
        assert_eq!(block.pixel_bytes[16 + 2], 0x80);
        assert_eq!(block.pixel_bytes[24 + 7], 0x01);
        assert_eq!(block.pixel_bytes.iter().filter(|&&b| b != 0).count(), 4);
        assert_eq!(block.attr_bytes, vec![0x47, 0x01, 0x02, 0x47]);
    }

    #[test]
    fn test_udg_crops_to_drawn_cells() {
        let mut canvas = Canvas::new(4, 3);
        canvas.pixels.set(17, 9, true);
        let block = encode(&canvas, &ExportProfile::UDG).unwrap();
        assert_eq!(block.bounds, DrawBounds::new(2, 1, 2, 1));
        assert_eq!(block.pixel_bytes, vec![0, 0x40, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_nothing_to_export() {
        let canvas = Canvas::new(3, 3);
        assert!(matches!(encode(&canvas, &ExportProfile::UDG), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn test_udg_budget() {
        let mut canvas = Canvas::new(7, 4);
        canvas.pixels.set(0, 0, true);
        canvas.pixels.set(55, 31, true);
        let err = encode(&canvas, &ExportProfile::UDG).unwrap_err();
        assert!(matches!(err, ExportError::TooManyChars { count: 28, limit: 21 }));
        assert!(err.to_string().contains("28"));

        let mut canvas = Canvas::new(7, 3);
        canvas.pixels.set(0, 0, true);
        canvas.pixels.set(55, 23, true);
        let block = encode(&canvas, &ExportProfile::UDG).unwrap();
        assert_eq!(block.char_count(), 21);
        assert_eq!(block.pixel_bytes.len(), 168);
    }

    #[test]
    fn test_tile_exports_whole_extent() {
        let canvas = Canvas::new(2, 2);
        let block = encode(&canvas, &ExportProfile::tile(TileSize::Px16)).unwrap();
        assert_eq!(block.pixel_bytes.len(), 32);
        assert_eq!(block.attr_bytes.len(), 4);
    }

    #[test]
    fn test_tile_size_mismatch() {
        let canvas = Canvas::new(2, 2);
        let err = encode(&canvas, &ExportProfile::tile(TileSize::Px8)).unwrap_err();
        assert!(matches!(err, ExportError::SizeMismatch { expected: (1, 1), found: (2, 2) }));
    }

    #[test]
    fn test_display_file_offsets() {
        assert_eq!(display_file_offset(0, 0), 0);
        assert_eq!(display_file_offset(1, 0), 256);
        assert_eq!(display_file_offset(8, 0), 32);
        assert_eq!(display_file_offset(64, 0), 2048);
        assert_eq!(display_file_offset(191, 31), 6143);
    }

    #[test]
    fn test_blank_screen() {
        let canvas = Canvas::new(32, 24);
        let block = encode(&canvas, &ExportProfile::SCREEN).unwrap();
        assert_eq!(block.pixel_bytes.len(), DISPLAY_FILE_SIZE);
        assert_eq!(block.attr_bytes.len(), ATTRIBUTE_FILE_SIZE);
        assert!(block.pixel_bytes.iter().all(|&b| b == 0));
        assert!(block.attr_bytes.iter().all(|&b| b == 0x47));
    }

    #[test]
    fn test_screen_pixel_placement() {
        let mut canvas = Canvas::new(32, 24);
        canvas.pixels.set(0, 1, true);
        canvas.pixels.set(255, 191, true);
        canvas.attributes.set(31, 23, Attribute::new(2, 6, false));
        let block = encode(&canvas, &ExportProfile::SCREEN).unwrap();
        assert_eq!(block.pixel_bytes[256], 0x80);
        assert_eq!(block.pixel_bytes[6143], 0x01);
        assert_eq!(block.pixel_bytes.iter().filter(|&&b| b != 0).count(), 2);
        assert_eq!(block.attr_bytes[767], 0x32);
    }

    #[test]
    fn test_screen_rejects_wrong_size() {
        let canvas = Canvas::new(8, 8);
        assert!(matches!(
            encode(&canvas, &ExportProfile::SCREEN),
            Err(ExportError::SizeMismatch { .. })
        ));
    }
}
