//! UDG and sprite sheet exports.

use crate::bounds::{drawn_bounds, DrawBounds};
use crate::canvas::{SpriteSheet, UdgCanvas};
use crate::encoder::{encode, encode_region};
use crate::export::{
    layout_note, write_block_data, write_block_header, AsmDocument, AsmOptions, AsmWriter, ExportError,
    Exporter, Result,
};
use crate::grid::Canvas;
use crate::size_class::{ByteLayout, ExportProfile};

/// Export the drawn area of a sprite canvas as UDG data.
///
/// Fails with [`ExportError::NothingToExport`] for a blank canvas and with
/// [`ExportError::TooManyChars`] when the drawn area exceeds 21 characters.
pub fn export_udg(canvas: &Canvas, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
    let profile = ExportProfile::UDG;
    let block = encode(canvas, &profile)?;

    let mut writer = AsmWriter::new(options);
    write_block_header(&mut writer, name, &profile, &block);
    write_block_data(&mut writer, name, &block);
    Ok(AsmDocument::new(name, writer.finish()))
}

/// Export every frame over the union of the frames' drawn areas.
///
/// All frames come out the same size so they can be swapped in place.
/// Each frame is a pixel block followed by an attribute block. Frames must
/// all match the first frame's size, otherwise [`ExportError::SizeMismatch`].
pub fn export_frames(frames: &[Canvas], name: &str, options: &AsmOptions) -> Result<AsmDocument> {
    if let Some(first) = frames.first() {
        let expected = (first.chars_width(), first.chars_height());
        if let Some(odd) = frames.iter().find(|f| (f.chars_width(), f.chars_height()) != expected) {
            return Err(ExportError::SizeMismatch { expected, found: (odd.chars_width(), odd.chars_height()) });
        }
    }

    let bounds = frames
        .iter()
        .filter_map(|f| drawn_bounds(&f.pixels, f.chars_width(), f.chars_height(), Some(&f.attributes)))
        .reduce(|a, b| a.union(&b))
        .ok_or(ExportError::NothingToExport)?;

    let blocks: Vec<_> = frames.iter().map(|f| encode_region(f, &bounds)).collect();
    let frame_bytes = blocks.first().map_or(0, |b| b.total_bytes());
    log::debug!("sprite sheet {}: {} frames of {} bytes", name, blocks.len(), frame_bytes);

    let mut writer = AsmWriter::new(options);
    write_sheet_header(&mut writer, name, &bounds, blocks.len(), frame_bytes);

    let table = writer.options().label(name, "frames");
    writer.label(&table);
    writer.comment(&format!("{} frames, {} bytes each", blocks.len(), frame_bytes));
    writer.blank();

    for (i, block) in blocks.iter().enumerate() {
        write_block_data(&mut writer, &format!("{}_frame{}", name, i), block);
    }

    Ok(AsmDocument::new(name, writer.finish()))
}

fn write_sheet_header(
    writer: &mut AsmWriter<'_>,
    name: &str,
    bounds: &DrawBounds,
    frame_count: usize,
    frame_bytes: usize,
) {
    writer.comment(&format!("{}.asm", name));
    writer.comment(&format!(
        "{}: {} frames of {}x{} characters ({}x{} pixels), {} characters per frame",
        ExportProfile::SPRITE_SHEET.kind,
        frame_count,
        bounds.width,
        bounds.height,
        bounds.width * 8,
        bounds.height * 8,
        bounds.char_count()
    ));
    if bounds.min_char_x != 0 || bounds.min_char_y != 0 {
        writer.comment(&format!("Cropped from cell ({}, {})", bounds.min_char_x, bounds.min_char_y));
    }
    writer.comment(&format!(
        "Per frame: {} pixel bytes ({}), then {} attribute bytes",
        bounds.char_count() * 8,
        layout_note(ByteLayout::CellOrder),
        bounds.char_count()
    ));
    writer.comment(&format!("Frame size: {} bytes", frame_bytes));
    writer.blank();
}

impl Exporter for UdgCanvas {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
        export_udg(self.canvas(), name, options)
    }

    fn format_name(&self) -> &'static str {
        "UDG"
    }
}

impl Exporter for SpriteSheet {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
        export_frames(self.frames(), name, options)
    }

    fn format_name(&self) -> &'static str {
        "sprite sheet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::paint::{set_ink_pixel, Brush};

    #[test]
    fn test_udg_text_layout() {
        let mut canvas = Canvas::new(3, 3);
        set_ink_pixel(&mut canvas.pixels, &mut canvas.attributes, 8, 8, true, Brush::new(3, 5, true));
        let doc = export_udg(&canvas, "dot", &AsmOptions::default()).unwrap();

        assert_eq!(doc.file_name, "dot.asm");
        assert!(doc.text.starts_with("; dot.asm\n"));
        assert!(doc.text.contains("; UDG: 1x1 characters (8x8 pixels), 1 characters"));
        assert!(doc.text.contains("; Cropped from cell (1, 1)"));
        assert!(doc.text.contains("dot_pixels:\n    DEFB $80,$00,$00,$00,$00,$00,$00,$00\n"));
        assert!(doc.text.contains("dot_attrs:\n    DEFB $6B\n"));
    }

    #[test]
    fn test_udg_pixels_precede_attributes() {
        let mut canvas = Canvas::new(2, 1);
        canvas.pixels.set(0, 0, true);
        canvas.pixels.set(8, 0, true);
        let doc = export_udg(&canvas, "pair", &AsmOptions::default()).unwrap();
        let pixels_at = doc.text.find("pair_pixels:").unwrap();
        let attrs_at = doc.text.find("pair_attrs:").unwrap();
        assert!(pixels_at < attrs_at);
        assert!(doc.text.contains("    DEFB $47,$47\n"));
    }

    #[test]
    fn test_udg_over_budget_names_count() {
        let mut canvas = Canvas::new(7, 4);
        canvas.pixels.set(0, 0, true);
        canvas.pixels.set(55, 31, true);
        let err = export_udg(&canvas, "big", &AsmOptions::default()).unwrap_err();
        assert!(err.to_string().contains("28"));
    }

    #[test]
    fn test_udg_blank_canvas() {
        let udg = UdgCanvas::new(2, 2).unwrap();
        assert!(matches!(udg.to_asm("blank", &AsmOptions::default()), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn test_frames_share_union_bounds() {
        let mut sheet = SpriteSheet::new(4, 2).unwrap();
        sheet.frame_mut(0).unwrap().pixels.set(8, 0, true);
        let second = sheet.add_frame();
        sheet.frame_mut(second).unwrap().attributes.set(2, 1, Attribute::new(2, 0, false));

        let doc = sheet.to_asm("walk", &AsmOptions::default()).unwrap();
        assert!(doc.text.contains("2 frames of 2x2 characters"));
        assert!(doc.text.contains("walk_frame0_pixels:"));
        assert!(doc.text.contains("walk_frame1_attrs:"));
        assert!(doc.text.contains("; Frame size: 36 bytes"));
        // Frame 1 attributes: cells (1,0) (2,0) (1,1) (2,1)
        assert!(doc.text.contains("walk_frame1_attrs:\n    DEFB $47,$47,$47,$02\n"));
    }

    #[test]
    fn test_frames_of_different_sizes_rejected() {
        let mut small = Canvas::new(1, 1);
        small.pixels.set(0, 0, true);
        let mut large = Canvas::new(3, 2);
        large.pixels.set(20, 12, true);

        let err = export_frames(&[small, large], "mixed", &AsmOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::SizeMismatch { expected: (1, 1), found: (3, 2) }));
        assert!(matches!(export_frames(&[], "none", &AsmOptions::default()), Err(ExportError::NothingToExport)));
    }

    #[test]
    fn test_frames_all_blank() {
        let sheet = SpriteSheet::new(2, 2).unwrap();
        assert!(matches!(sheet.to_asm("idle", &AsmOptions::default()), Err(ExportError::NothingToExport)));
    }
}
