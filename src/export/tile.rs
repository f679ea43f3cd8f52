//! Tile exports. Tiles are always exported whole.

use crate::canvas::TileCanvas;
use crate::encoder::encode;
use crate::export::{write_block_data, write_block_header, AsmDocument, AsmOptions, AsmWriter, Exporter, Result};
use crate::grid::Canvas;
use crate::size_class::{ExportProfile, TileSize};

/// Export a whole tile. The canvas must be exactly `size` square.
pub fn export_tile(canvas: &Canvas, size: TileSize, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
    let profile = ExportProfile::tile(size);
    let block = encode(canvas, &profile)?;

    let mut writer = AsmWriter::new(options);
    write_block_header(&mut writer, name, &profile, &block);
    write_block_data(&mut writer, name, &block);
    Ok(AsmDocument::new(name, writer.finish()))
}

impl Exporter for TileCanvas {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
        export_tile(self.canvas(), self.size(), name, options)
    }

    fn format_name(&self) -> &'static str {
        "tile"
    }
}
