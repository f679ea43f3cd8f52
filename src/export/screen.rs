//! Full screen exports in Spectrum memory layout.
//!
//! The output is the 6144-byte display file followed by the 768-byte
//! attribute file, ready to be loaded at `$4000`.

use crate::canvas::Scene;
use crate::encoder::encode;
use crate::export::{write_block_header, AsmDocument, AsmOptions, AsmWriter, Exporter, Result};
use crate::grid::Canvas;
use crate::size_class::ExportProfile;

/// Export a 32x24 canvas as a full screen. No cropping, no budget.
pub fn export_screen(canvas: &Canvas, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
    let profile = ExportProfile::SCREEN;
    let block = encode(canvas, &profile)?;

    let mut writer = AsmWriter::new(options);
    write_block_header(&mut writer, name, &profile, &block);

    let screen = writer.options().label(name, "");
    let pixels = writer.options().label(name, "pixels");
    let attrs = writer.options().label(name, "attrs");
    writer.label(&screen);
    writer.data_block(&pixels, &block.pixel_bytes);
    writer.data_block(&attrs, &block.attr_bytes);
    Ok(AsmDocument::new(name, writer.finish()))
}

impl Exporter for Scene {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
        export_screen(self.canvas(), name, options)
    }

    fn format_name(&self) -> &'static str {
        "screen"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;

    fn defb_values(text: &str, label: &str) -> Vec<String> {
        let start = text.find(&format!("{}:\n", label)).unwrap() + label.len() + 2;
        text[start..]
            .lines()
            .take_while(|l| l.starts_with("    DEFB "))
            .flat_map(|l| l.trim_start_matches("    DEFB ").split(',').map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn test_blank_screen_sizes() {
        let doc = Scene::new().to_asm("title", &AsmOptions::default()).unwrap();
        assert!(doc.text.contains("; screen: 32x24 characters (256x192 pixels), 768 characters"));
        let pixels = defb_values(&doc.text, "title_pixels");
        let attrs = defb_values(&doc.text, "title_attrs");
        assert_eq!(pixels.len(), 6144);
        assert_eq!(attrs.len(), 768);
        assert!(attrs.iter().all(|v| v == "$47"));
    }

    #[test]
    fn test_screen_second_pixel_row() {
        let mut scene = Scene::new();
        scene.canvas_mut().pixels.set(0, 1, true);
        let doc = scene.to_asm("title", &AsmOptions::default()).unwrap();
        let pixels = defb_values(&doc.text, "title_pixels");
        assert_eq!(pixels[256], "$80");
        assert_eq!(pixels.iter().filter(|v| *v != "$00").count(), 1);
    }

    #[test]
    fn test_screen_wrong_size() {
        let canvas = Canvas::new(4, 4);
        assert!(matches!(
            export_screen(&canvas, "x", &AsmOptions::default()),
            Err(ExportError::SizeMismatch { .. })
        ));
    }
}
