//! Tile libraries and level screens.
//!
//! A [`Level`] owns an ordered tile library and a list of screens. Screens
//! reference tiles by library index, so removing a tile renumbers every
//! screen: references to the removed tile become empty and references past
//! it move down by one.

use thiserror::Error;

use crate::grid::Canvas;
use crate::size_class::TileSize;

/// Error type for level editing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("tile {index} does not exist ({count} tiles)")]
    NoSuchTile { index: usize, count: usize },
    #[error("screen {index} does not exist ({count} screens)")]
    NoSuchScreen { index: usize, count: usize },
    #[error("cell ({col}, {row}) is outside the {cols}x{rows} map")]
    OutOfMap { col: usize, row: usize, cols: usize, rows: usize },
    #[error("cannot remove the last screen")]
    LastScreen,
    #[error("tile is {found}, level uses {expected} tiles")]
    TileSizeMismatch { expected: TileSize, found: TileSize },
}

/// One entry of the tile library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileData {
    pub id: String,
    pub name: String,
    pub canvas: Canvas,
}

/// One screen of a level: a map of optional tile indices, `map[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenData {
    pub name: String,
    map: Vec<Vec<Option<usize>>>,
}

impl ScreenData {
    pub fn new(name: impl Into<String>, cols: usize, rows: usize) -> Self {
        Self { name: name.into(), map: vec![vec![None; cols]; rows] }
    }

    /// Build from stored rows, clipping or padding to `cols x rows`.
    pub fn from_map(name: impl Into<String>, map: &[Vec<Option<usize>>], cols: usize, rows: usize) -> Self {
        let mut screen = Self::new(name, cols, rows);
        for (r, row) in map.iter().take(rows).enumerate() {
            for (c, &cell) in row.iter().take(cols).enumerate() {
                screen.map[r][c] = cell;
            }
        }
        screen
    }

    pub fn cols(&self) -> usize {
        self.map.first().map_or(0, |r| r.len())
    }

    pub fn rows(&self) -> usize {
        self.map.len()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<usize> {
        self.map[row][col]
    }

    pub fn map(&self) -> &[Vec<Option<usize>>] {
        &self.map
    }

    /// Every tile index referenced by this screen, in scan order.
    pub fn references(&self) -> impl Iterator<Item = usize> + '_ {
        self.map.iter().flatten().filter_map(|&c| c)
    }

    fn drop_tile(&mut self, removed: usize) {
        for cell in self.map.iter_mut().flatten() {
            *cell = match *cell {
                Some(i) if i == removed => None,
                Some(i) if i > removed => Some(i - 1),
                other => other,
            };
        }
    }
}

/// A tile library plus the screens built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    tile_size: TileSize,
    tiles: Vec<TileData>,
    screens: Vec<ScreenData>,
    pub current_screen: usize,
    next_tile_id: usize,
}

impl Level {
    /// Empty library and a single empty screen.
    pub fn new(tile_size: TileSize) -> Self {
        Self {
            tile_size,
            tiles: Vec::new(),
            screens: vec![ScreenData::new("Screen 1", tile_size.level_cols(), tile_size.level_rows())],
            current_screen: 0,
            next_tile_id: 1,
        }
    }

    /// Rebuild a level from loaded parts. Screens are resized to the map
    /// size, dangling tile references are dropped and at least one screen
    /// is kept.
    pub fn from_parts(
        tile_size: TileSize,
        tiles: Vec<TileData>,
        screens: Vec<ScreenData>,
        current_screen: usize,
    ) -> Self {
        let mut level = Self::new(tile_size);
        let (cols, rows) = (tile_size.level_cols(), tile_size.level_rows());
        let count = tiles.len();

        level.tiles = tiles
            .into_iter()
            .map(|t| {
                let canvas = if t.canvas.chars_width() == tile_size.chars()
                    && t.canvas.chars_height() == tile_size.chars()
                {
                    t.canvas
                } else {
                    log::warn!("tile '{}' resized to {}", t.name, tile_size);
                    t.canvas.resized(tile_size.chars(), tile_size.chars())
                };
                TileData { canvas, ..t }
            })
            .collect();

        if !screens.is_empty() {
            level.screens = screens
                .into_iter()
                .map(|s| {
                    let mut screen = ScreenData::from_map(s.name, &s.map, cols, rows);
                    for cell in screen.map.iter_mut().flatten() {
                        if matches!(cell, Some(i) if *i >= count) {
                            log::warn!("screen '{}' referenced missing tile {:?}", screen.name, cell);
                            *cell = None;
                        }
                    }
                    screen
                })
                .collect();
        }

        level.current_screen = current_screen.min(level.screens.len() - 1);
        level.next_tile_id = level.tiles.len() + 1;
        level
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn tiles(&self) -> &[TileData] {
        &self.tiles
    }

    pub fn screens(&self) -> &[ScreenData] {
        &self.screens
    }

    pub fn tile(&self, index: usize) -> Result<&TileData, LevelError> {
        let count = self.tiles.len();
        self.tiles.get(index).ok_or(LevelError::NoSuchTile { index, count })
    }

    pub fn tile_mut(&mut self, index: usize) -> Result<&mut TileData, LevelError> {
        let count = self.tiles.len();
        self.tiles.get_mut(index).ok_or(LevelError::NoSuchTile { index, count })
    }

    pub fn screen(&self, index: usize) -> Result<&ScreenData, LevelError> {
        let count = self.screens.len();
        self.screens.get(index).ok_or(LevelError::NoSuchScreen { index, count })
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = format!("tile-{}", self.next_tile_id);
            self.next_tile_id += 1;
            if !self.tiles.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    /// Append a blank tile and return its library index.
    pub fn add_tile(&mut self, name: impl Into<String>) -> usize {
        let chars = self.tile_size.chars();
        let id = self.fresh_id();
        self.tiles.push(TileData { id, name: name.into(), canvas: Canvas::new(chars, chars) });
        self.tiles.len() - 1
    }

    /// Append an already drawn tile, which must match the level's tile size.
    pub fn import_tile(
        &mut self,
        name: impl Into<String>,
        size: TileSize,
        canvas: Canvas,
    ) -> Result<usize, LevelError> {
        if size != self.tile_size {
            return Err(LevelError::TileSizeMismatch { expected: self.tile_size, found: size });
        }
        let index = self.add_tile(name);
        self.tiles[index].canvas = canvas.resized(size.chars(), size.chars());
        Ok(index)
    }

    pub fn rename_tile(&mut self, index: usize, name: impl Into<String>) -> Result<(), LevelError> {
        self.tile_mut(index)?.name = name.into();
        Ok(())
    }

    /// Remove tile `index`. Screen cells pointing at it become empty, cells
    /// pointing past it are decremented.
    pub fn remove_tile(&mut self, index: usize) -> Result<TileData, LevelError> {
        self.tile(index)?;
        let removed = self.tiles.remove(index);
        for screen in &mut self.screens {
            screen.drop_tile(index);
        }
        Ok(removed)
    }

    /// Append an empty screen and return its index.
    pub fn add_screen(&mut self, name: impl Into<String>) -> usize {
        let (cols, rows) = (self.tile_size.level_cols(), self.tile_size.level_rows());
        self.screens.push(ScreenData::new(name, cols, rows));
        self.screens.len() - 1
    }

    /// Remove a screen. The last remaining screen cannot be removed.
    pub fn remove_screen(&mut self, index: usize) -> Result<ScreenData, LevelError> {
        self.screen(index)?;
        if self.screens.len() == 1 {
            return Err(LevelError::LastScreen);
        }
        let removed = self.screens.remove(index);
        if self.current_screen >= self.screens.len() || self.current_screen > index {
            self.current_screen = self.current_screen.saturating_sub(1);
        }
        Ok(removed)
    }

    /// Place a tile (or clear the cell with `None`).
    pub fn set_cell(
        &mut self,
        screen: usize,
        col: usize,
        row: usize,
        tile: Option<usize>,
    ) -> Result<(), LevelError> {
        if let Some(t) = tile {
            self.tile(t)?;
        }
        let count = self.screens.len();
        let target = self.screens.get_mut(screen).ok_or(LevelError::NoSuchScreen { index: screen, count })?;
        let (cols, rows) = (target.cols(), target.rows());
        if col >= cols || row >= rows {
            return Err(LevelError::OutOfMap { col, row, cols, rows });
        }
        target.map[row][col] = tile;
        Ok(())
    }

    /// Switch tile size. Destroys the library and every screen.
    pub fn set_tile_size(&mut self, tile_size: TileSize) {
        log::debug!("level reset from {} to {} tiles", self.tile_size, tile_size);
        *self = Self::new(tile_size);
    }

    /// Flatten a screen into one canvas by stamping each referenced tile.
    pub fn compose_screen(&self, index: usize) -> Result<Canvas, LevelError> {
        let screen = self.screen(index)?;
        let chars = self.tile_size.chars();
        let mut canvas = Canvas::new(screen.cols() * chars, screen.rows() * chars);
        for row in 0..screen.rows() {
            for col in 0..screen.cols() {
                if let Some(t) = screen.get(col, row) {
                    canvas.blit(&self.tile(t)?.canvas, col * chars, row * chars);
                }
            }
        }
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn level_with_tiles(n: usize) -> Level {
        let mut level = Level::new(TileSize::Px16);
        for i in 0..n {
            level.add_tile(format!("t{}", i));
        }
        level
    }

    #[test]
    fn test_new_level() {
        let level = Level::new(TileSize::Px16);
        assert!(level.tiles().is_empty());
        assert_eq!(level.screens().len(), 1);
        assert_eq!(level.screens()[0].cols(), 16);
        assert_eq!(level.screens()[0].rows(), 12);
    }

    #[test]
    fn test_tile_ids_unique() {
        let mut level = level_with_tiles(3);
        level.remove_tile(1).unwrap();
        level.add_tile("new");
        let mut ids: Vec<&str> = level.tiles().iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_remove_tile_renumbers_screens() {
        let mut level = level_with_tiles(4);
        level.set_cell(0, 0, 0, Some(0)).unwrap();
        level.set_cell(0, 1, 0, Some(1)).unwrap();
        level.set_cell(0, 2, 0, Some(2)).unwrap();
        level.set_cell(0, 3, 0, Some(3)).unwrap();
        let second = level.add_screen("two");
        level.set_cell(second, 5, 5, Some(3)).unwrap();
        level.set_cell(second, 6, 5, Some(1)).unwrap();

        let removed = level.remove_tile(1).unwrap();
        assert_eq!(removed.name, "t1");

        let s0 = level.screen(0).unwrap();
        assert_eq!(s0.get(0, 0), Some(0));
        assert_eq!(s0.get(1, 0), None);
        assert_eq!(s0.get(2, 0), Some(1));
        assert_eq!(s0.get(3, 0), Some(2));
        let s1 = level.screen(second).unwrap();
        assert_eq!(s1.get(5, 5), Some(2));
        assert_eq!(s1.get(6, 5), None);
    }

    #[test]
    fn test_remove_missing_tile() {
        let mut level = level_with_tiles(1);
        assert_eq!(level.remove_tile(4), Err(LevelError::NoSuchTile { index: 4, count: 1 }));
    }

    #[test]
    fn test_last_screen_cannot_be_removed() {
        let mut level = Level::new(TileSize::Px8);
        assert_eq!(level.remove_screen(0), Err(LevelError::LastScreen));
        level.add_screen("two");
        level.current_screen = 1;
        level.remove_screen(1).unwrap();
        assert_eq!(level.current_screen, 0);
        assert_eq!(level.screens().len(), 1);
    }

    #[test]
    fn test_set_cell_validation() {
        let mut level = level_with_tiles(1);
        assert_eq!(
            level.set_cell(0, 16, 0, Some(0)),
            Err(LevelError::OutOfMap { col: 16, row: 0, cols: 16, rows: 12 })
        );
        assert_eq!(level.set_cell(0, 0, 0, Some(2)), Err(LevelError::NoSuchTile { index: 2, count: 1 }));
        assert_eq!(level.set_cell(3, 0, 0, None), Err(LevelError::NoSuchScreen { index: 3, count: 1 }));
        level.set_cell(0, 15, 11, Some(0)).unwrap();
        level.set_cell(0, 15, 11, None).unwrap();
        assert_eq!(level.screen(0).unwrap().get(15, 11), None);
    }

    #[test]
    fn test_set_tile_size_resets() {
        let mut level = level_with_tiles(2);
        level.add_screen("two");
        level.set_tile_size(TileSize::Px24);
        assert_eq!(level.tile_size(), TileSize::Px24);
        assert!(level.tiles().is_empty());
        assert_eq!(level.screens().len(), 1);
        assert_eq!(level.screens()[0].cols(), 10);
        assert_eq!(level.screens()[0].rows(), 8);
    }

    #[test]
    fn test_import_tile_size_mismatch() {
        let mut level = Level::new(TileSize::Px16);
        let err = level.import_tile("x", TileSize::Px8, Canvas::new(1, 1)).unwrap_err();
        assert_eq!(err, LevelError::TileSizeMismatch { expected: TileSize::Px16, found: TileSize::Px8 });
        assert!(level.tiles().is_empty());
        let index = level.import_tile("y", TileSize::Px16, Canvas::new(2, 2)).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_compose_screen() {
        let mut level = level_with_tiles(1);
        {
            let tile = level.tile_mut(0).unwrap();
            tile.canvas.pixels.set(0, 0, true);
            tile.canvas.attributes.set(1, 1, Attribute::new(2, 0, false));
        }
        level.set_cell(0, 2, 1, Some(0)).unwrap();

        let canvas = level.compose_screen(0).unwrap();
        assert_eq!(canvas.chars_width(), 32);
        assert_eq!(canvas.chars_height(), 24);
        assert!(canvas.pixels.get(32, 16));
        assert_eq!(canvas.attributes.get(5, 3), Attribute::new(2, 0, false));
        assert!(canvas.attributes.get(4, 2).is_default());
    }

    #[test]
    fn test_from_parts_drops_dangling_references() {
        let tiles = vec![TileData { id: "a".into(), name: "a".into(), canvas: Canvas::new(1, 1) }];
        let screen = ScreenData::from_map("s", &[vec![Some(0), Some(5)]], 32, 24);
        let level = Level::from_parts(TileSize::Px16, tiles, vec![screen], 9);
        assert_eq!(level.tiles()[0].canvas.chars_width(), 2);
        let s = level.screen(0).unwrap();
        assert_eq!(s.cols(), 16);
        assert_eq!(s.get(0, 0), Some(0));
        assert_eq!(s.get(1, 0), None);
        assert_eq!(level.current_screen, 0);
    }
}
