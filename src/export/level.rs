//! Level exports: tile graphics plus one map table per screen.
//!
//! Only tiles referenced by some screen are exported. They are emitted in
//! library order and renumbered from zero; the map tables use these new
//! numbers. Each map table is one byte per cell, row-major, with
//! [`EMPTY_CELL`] marking cells without a tile.

use std::collections::BTreeMap;

use crate::encoder::encode;
use crate::export::{layout_note, write_block_data, AsmDocument, AsmOptions, AsmWriter, ExportError, Exporter, Result};
use crate::level::Level;
use crate::size_class::{ByteLayout, ExportProfile};

/// Map byte for a cell with no tile.
pub const EMPTY_CELL: u8 = 0xFF;

/// Highest number of distinct tiles a map byte can address.
pub const MAX_LEVEL_TILES: usize = EMPTY_CELL as usize;

/// Export every tile used by the level and a map table for each screen.
pub fn export_level(level: &Level, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
    // library index -> exported tile number
    let mut used: BTreeMap<usize, u8> = BTreeMap::new();
    for screen in level.screens() {
        for index in screen.references() {
            used.insert(index, 0);
        }
    }
    if used.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    if used.len() > MAX_LEVEL_TILES {
        return Err(ExportError::TooManyTiles { count: used.len() });
    }
    for (number, slot) in used.values_mut().enumerate() {
        *slot = number as u8;
    }

    let profile = ExportProfile::tile(level.tile_size());
    let mut blocks = Vec::with_capacity(used.len());
    for &index in used.keys() {
        let tile = level.tile(index).map_err(|_| ExportError::MissingTile { index })?;
        blocks.push((tile, encode(&tile.canvas, &profile)?));
    }

    let size = level.tile_size();
    let mut writer = AsmWriter::new(options);
    writer.comment(&format!("{}.asm", name));
    writer.comment(&format!(
        "Level: {} tiles, {} screens of {}x{} tiles",
        size,
        level.screens().len(),
        size.level_cols(),
        size.level_rows()
    ));
    writer.comment(&format!(
        "Tiles: {} used of {} in library, {} pixel bytes ({}) then {} attribute bytes each",
        blocks.len(),
        level.tiles().len(),
        size.chars() * size.chars() * 8,
        layout_note(ByteLayout::CellOrder),
        size.chars() * size.chars()
    ));
    writer.comment(&format!(
        "Maps: one byte per cell, row-major, {} = empty",
        options.format_byte(EMPTY_CELL)
    ));
    writer.blank();

    for (number, (tile, block)) in blocks.iter().enumerate() {
        writer.comment(&format!("Tile {}: {} ({})", number, tile.name, tile.id));
        write_block_data(&mut writer, &format!("{}_tile{}", name, number), block);
    }
    writer.blank();

    for (i, screen) in level.screens().iter().enumerate() {
        let bytes: Vec<u8> = screen
            .map()
            .iter()
            .flatten()
            .map(|cell| cell.and_then(|index| used.get(&index).copied()).unwrap_or(EMPTY_CELL))
            .collect();
        writer.comment(&format!("Screen {}: {}", i, screen.name));
        let label = writer.options().label(&format!("{}_screen{}", name, i), "map");
        writer.data_block(&label, &bytes);
    }

    log::debug!("level {}: {} tiles, {} screens", name, blocks.len(), level.screens().len());
    Ok(AsmDocument::new(name, writer.finish()))
}

impl Exporter for Level {
    fn to_asm(&self, name: &str, options: &AsmOptions) -> Result<AsmDocument> {
        export_level(self, name, options)
    }

    fn format_name(&self) -> &'static str {
        "level"
    }
}
