//! Size classes and export profiles.
//!
//! Every export runs the same packing code. What differs between a UDG, a
//! tile and a full screen is captured by an [`ExportProfile`]: how big the
//! source is, whether it is cropped to the drawn area, whether a character
//! budget applies and how pixel bytes are ordered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::CHAR_SIZE;

/// Maximum number of character cells in a UDG export.
pub const UDG_MAX_CHARS: usize = 21;

/// Spectrum screen width in character cells.
pub const SCREEN_CHARS_WIDTH: usize = 32;

/// Spectrum screen height in character cells.
pub const SCREEN_CHARS_HEIGHT: usize = 24;

/// Spectrum screen size in pixels.
pub const SCREEN_PIXEL_WIDTH: usize = SCREEN_CHARS_WIDTH * CHAR_SIZE;
pub const SCREEN_PIXEL_HEIGHT: usize = SCREEN_CHARS_HEIGHT * CHAR_SIZE;

/// Tile edge length used by the tile and level editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TileSize {
    #[default]
    Px8,
    Px16,
    Px24,
}

impl TileSize {
    pub const ALL: [TileSize; 3] = [TileSize::Px8, TileSize::Px16, TileSize::Px24];

    pub fn from_pixels(px: u32) -> Option<Self> {
        match px {
            8 => Some(TileSize::Px8),
            16 => Some(TileSize::Px16),
            24 => Some(TileSize::Px24),
            _ => None,
        }
    }

    pub fn pixels(&self) -> usize {
        match self {
            TileSize::Px8 => 8,
            TileSize::Px16 => 16,
            TileSize::Px24 => 24,
        }
    }

    /// Tile edge length in character cells.
    pub fn chars(&self) -> usize {
        self.pixels() / CHAR_SIZE
    }

    /// Level map columns: as many whole tiles as fit across the screen.
    pub fn level_cols(&self) -> usize {
        SCREEN_PIXEL_WIDTH / self.pixels()
    }

    /// Level map rows: as many whole tiles as fit down the screen.
    pub fn level_rows(&self) -> usize {
        SCREEN_PIXEL_HEIGHT / self.pixels()
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.pixels(), self.pixels())
    }
}

impl TryFrom<u32> for TileSize {
    type Error = String;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        TileSize::from_pixels(px).ok_or_else(|| format!("invalid tile size {}, expected 8, 16 or 24", px))
    }
}

impl From<TileSize> for u32 {
    fn from(size: TileSize) -> u32 {
        size.pixels() as u32
    }
}

/// Which cells an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cropping {
    /// Only the bounding box of drawn cells.
    DrawnBounds,
    /// The whole source, drawn or not.
    Full,
}

/// Order of pixel bytes in the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteLayout {
    /// Eight bytes per cell, cells in row-major order.
    CellOrder,
    /// Spectrum display file order (interleaved thirds). Full screens only.
    DisplayFile,
}

/// Parameters for one export variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProfile {
    /// Label used in headers ("UDG", "tile", ...)
    pub kind: &'static str,
    /// Source width and height in pixels, if fixed
    pub pixel_dim: Option<(usize, usize)>,
    /// Source width and height in character cells, if fixed
    pub char_dim: Option<(usize, usize)>,
    /// Character budget, if any
    pub max_chars: Option<usize>,
    pub cropping: Cropping,
    pub layout: ByteLayout,
}

impl ExportProfile {
    /// Variable-size UDG canvas, cropped and limited to 21 characters.
    pub const UDG: ExportProfile = ExportProfile {
        kind: "UDG",
        pixel_dim: None,
        char_dim: None,
        max_chars: Some(UDG_MAX_CHARS),
        cropping: Cropping::DrawnBounds,
        layout: ByteLayout::CellOrder,
    };

    /// Full 32x24 screen in display file order.
    pub const SCREEN: ExportProfile = ExportProfile {
        kind: "screen",
        pixel_dim: Some((SCREEN_PIXEL_WIDTH, SCREEN_PIXEL_HEIGHT)),
        char_dim: Some((SCREEN_CHARS_WIDTH, SCREEN_CHARS_HEIGHT)),
        max_chars: None,
        cropping: Cropping::Full,
        layout: ByteLayout::DisplayFile,
    };

    /// Frames of an animated sprite, cropped to the drawn area, no budget.
    pub const SPRITE_SHEET: ExportProfile = ExportProfile {
        kind: "sprite sheet",
        pixel_dim: None,
        char_dim: None,
        max_chars: None,
        cropping: Cropping::DrawnBounds,
        layout: ByteLayout::CellOrder,
    };

    /// A whole tile of the given size.
    pub fn tile(size: TileSize) -> ExportProfile {
        ExportProfile {
            kind: "tile",
            pixel_dim: Some((size.pixels(), size.pixels())),
            char_dim: Some((size.chars(), size.chars())),
            max_chars: None,
            cropping: Cropping::Full,
            layout: ByteLayout::CellOrder,
        }
    }
}
