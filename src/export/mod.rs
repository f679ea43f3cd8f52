//! Assembly exports for every editor.
//!
//! Each export encodes its source with [`crate::encoder`] and formats the
//! bytes as an assembler include file (`<name>.asm`).
//!
//! # Supported Exports
//!
//! - **UDG**: drawn area of a sprite canvas, at most 21 characters
//! - **Tile**: a whole 8, 16 or 24 pixel tile
//! - **Screen**: a full 32x24 scene in display file order
//! - **Sprite sheet**: every frame of an animated sprite over a shared area
//! - **Level**: the tiles a level uses plus one map table per screen
//!
//! # Example
//!
//! ```
//! use zxpaint::canvas::UdgCanvas;
//! use zxpaint::export::{AsmOptions, Exporter};
//!
//! let mut udg = UdgCanvas::new(2, 1).unwrap();
//! udg.canvas_mut().pixels.set(0, 0, true);
//! let doc = udg.to_asm("hero", &AsmOptions::default()).unwrap();
//! assert_eq!(doc.file_name, "hero.asm");
//! assert!(doc.text.contains("DEFB $80"));
//! ```

pub mod asm;
pub mod level;
pub mod screen;
pub mod sprite;
pub mod tile;

pub use asm::{AsmOptions, AsmWriter, NumberFormat};
pub use level::export_level;
pub use screen::export_screen;
pub use sprite::{export_frames, export_udg};
pub use tile::export_tile;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::encoder::EncodedBlock;
use crate::size_class::{ByteLayout, ExportProfile};

/// Why an export produced no file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// No ink pixels or coloured cells
    #[error("nothing to export: the canvas is empty")]
    NothingToExport,
    /// Drawn area is over the character budget
    #[error("too many characters: {count} used, the limit is {limit}")]
    TooManyChars { count: usize, limit: usize },
    /// Level map bytes cannot address this many tiles
    #[error("too many tiles: {count} referenced, the limit is 255")]
    TooManyTiles { count: usize },
    /// A level map refers to a tile the library does not have
    #[error("level map refers to missing tile {index}")]
    MissingTile { index: usize },
    /// Source does not have the fixed size the export requires
    #[error("expected {}x{} characters, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    SizeMismatch { expected: (usize, usize), found: (usize, usize) },
    /// Failed to write the output file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// A finished assembly file, ready to be saved or handed to a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmDocument {
    /// `<name>.asm`
    pub file_name: String,
    pub text: String,
}

impl AsmDocument {
    pub fn new(name: &str, text: String) -> Self {
        Self { file_name: format!("{}.asm", name), text }
    }

    /// Write into `dir`, creating it if needed. Returns the written path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.text)?;
        log::info!("wrote {} ({} bytes of text)", path.display(), self.text.len());
        Ok(path)
    }
}

/// Something that can be exported as an assembly file.
pub trait Exporter {
    /// Encode and format as `<name>.asm`.
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument>;

    /// Short name of the export, used in messages.
    fn format_name(&self) -> &'static str;
}

/// Header shared by single-block exports.
pub(crate) fn write_block_header(
    writer: &mut AsmWriter<'_>,
    name: &str,
    profile: &ExportProfile,
    block: &EncodedBlock,
) {
    let b = &block.bounds;
    writer.comment(&format!("{}.asm", name));
    writer.comment(&format!(
        "{}: {}x{} characters ({}x{} pixels), {} characters",
        profile.kind,
        b.width,
        b.height,
        b.width * 8,
        b.height * 8,
        b.char_count()
    ));
    if b.min_char_x != 0 || b.min_char_y != 0 {
        writer.comment(&format!("Cropped from cell ({}, {})", b.min_char_x, b.min_char_y));
    }
    writer.comment(&format!("Pixel data: {} bytes, {}", block.pixel_bytes.len(), layout_note(block.layout)));
    writer.comment(&format!("Attribute data: {} bytes, row-major", block.attr_bytes.len()));
    writer.blank();
}

pub(crate) fn layout_note(layout: ByteLayout) -> &'static str {
    match layout {
        ByteLayout::CellOrder => "8 bytes per character, characters row-major",
        ByteLayout::DisplayFile => "display file order",
    }
}

/// Pixel block then attribute block, labelled `<name>_pixels` / `<name>_attrs`.
pub(crate) fn write_block_data(writer: &mut AsmWriter<'_>, label_base: &str, block: &EncodedBlock) {
    let pixels = writer.options().label(label_base, "pixels");
    let attrs = writer.options().label(label_base, "attrs");
    writer.data_block(&pixels, &block.pixel_bytes);
    writer.data_block(&attrs, &block.attr_bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_error_display() {
        let err = ExportError::TooManyChars { count: 28, limit: 21 };
        assert!(err.to_string().contains("28"));
        assert!(err.to_string().contains("21"));

        let err = ExportError::SizeMismatch { expected: (32, 24), found: (4, 4) };
        assert_eq!(err.to_string(), "expected 32x24 characters, found 4x4");

        assert!(ExportError::NothingToExport.to_string().contains("nothing to export"));

        let err = ExportError::MissingTile { index: 4 };
        assert_eq!(err.to_string(), "level map refers to missing tile 4");
    }

    #[test]
    fn test_document_file_name() {
        let doc = AsmDocument::new("level1", String::new());
        assert_eq!(doc.file_name, "level1.asm");
    }

    #[test]
    fn test_write_to_creates_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("out").join("asm");
        let doc = AsmDocument::new("hero", "; hero.asm\n".to_string());
        let path = doc.write_to(&dir).expect("should write document");
        assert_eq!(path, dir.join("hero.asm"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "; hero.asm\n");
    }
}
