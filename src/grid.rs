//! Pixel and attribute grids.
//!
//! A [`Canvas`] pairs a [`PixelGrid`] with an [`AttributeGrid`] and keeps the
//! two in step: the pixel grid is always exactly eight times the attribute
//! grid in each direction, and pixel `(x, y)` belongs to cell `(x / 8, y / 8)`.

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// Width and height of a character cell in pixels.
pub const CHAR_SIZE: usize = 8;

/// Boolean ink/paper bitmap, indexed `rows[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelGrid {
    rows: Vec<Vec<bool>>,
}

/// Build an all-paper pixel grid. Every row is a separate allocation.
pub fn empty_grid(width: usize, height: usize) -> PixelGrid {
    PixelGrid { rows: (0..height).map(|_| vec![false; width]).collect() }
}

impl PixelGrid {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        self.rows[y][x] = ink;
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Copy stored rows into a grid of exactly `width x height`.
    ///
    /// Short rows and missing rows are padded with paper, extra rows and
    /// columns are dropped. Returns the grid and whether anything was changed.
    pub fn fit(rows: &[Vec<bool>], width: usize, height: usize) -> (Self, bool) {
        let mut grid = empty_grid(width, height);
        let mut repaired = rows.len() != height;
        for (y, row) in rows.iter().take(height).enumerate() {
            if row.len() != width {
                repaired = true;
            }
            for (x, &ink) in row.iter().take(width).enumerate() {
                grid.rows[y][x] = ink;
            }
        }
        (grid, repaired)
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|&p| !p))
    }
}

/// One [`Attribute`] per character cell, indexed `cells[char_y][char_x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeGrid {
    cells: Vec<Vec<Attribute>>,
}

impl AttributeGrid {
    /// Grid of default attributes.
    pub fn new(chars_width: usize, chars_height: usize) -> Self {
        Self { cells: (0..chars_height).map(|_| vec![Attribute::DEFAULT; chars_width]).collect() }
    }

    pub fn chars_width(&self) -> usize {
        self.cells.first().map_or(0, |r| r.len())
    }

    pub fn chars_height(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, char_x: usize, char_y: usize) -> Attribute {
        self.cells[char_y][char_x]
    }

    pub fn get_mut(&mut self, char_x: usize, char_y: usize) -> &mut Attribute {
        &mut self.cells[char_y][char_x]
    }

    pub fn set(&mut self, char_x: usize, char_y: usize, attr: Attribute) {
        self.cells[char_y][char_x] = attr;
    }

    pub fn rows(&self) -> &[Vec<Attribute>] {
        &self.cells
    }

    /// Same clip/pad rules as [`PixelGrid::fit`]; colour indices are clamped.
    pub fn fit(cells: &[Vec<Attribute>], chars_width: usize, chars_height: usize) -> (Self, bool) {
        let mut grid = Self::new(chars_width, chars_height);
        let mut repaired = cells.len() != chars_height;
        for (y, row) in cells.iter().take(chars_height).enumerate() {
            if row.len() != chars_width {
                repaired = true;
            }
            for (x, attr) in row.iter().take(chars_width).enumerate() {
                let clamped = attr.clamped();
                if clamped != *attr {
                    repaired = true;
                }
                grid.cells[y][x] = clamped;
            }
        }
        (grid, repaired)
    }
}

/// A pixel grid and its attribute grid, sized in character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub pixels: PixelGrid,
    pub attributes: AttributeGrid,
}

impl Canvas {
    /// Blank canvas with default attributes.
    pub fn new(chars_width: usize, chars_height: usize) -> Self {
        Self {
            pixels: empty_grid(chars_width * CHAR_SIZE, chars_height * CHAR_SIZE),
            attributes: AttributeGrid::new(chars_width, chars_height),
        }
    }

    /// Build a canvas from stored rows, clipping or padding both grids to the
    /// requested size. The flag reports whether any repair happened.
    pub fn from_parts(
        pixels: &[Vec<bool>],
        attributes: &[Vec<Attribute>],
        chars_width: usize,
        chars_height: usize,
    ) -> (Self, bool) {
        let (pixels, pixels_repaired) =
            PixelGrid::fit(pixels, chars_width * CHAR_SIZE, chars_height * CHAR_SIZE);
        let (attributes, attrs_repaired) = AttributeGrid::fit(attributes, chars_width, chars_height);
        (Self { pixels, attributes }, pixels_repaired || attrs_repaired)
    }

    pub fn chars_width(&self) -> usize {
        self.attributes.chars_width()
    }

    pub fn chars_height(&self) -> usize {
        self.attributes.chars_height()
    }

    pub fn pixel_width(&self) -> usize {
        self.pixels.width()
    }

    pub fn pixel_height(&self) -> usize {
        self.pixels.height()
    }

    /// New canvas of the given size holding the overlapping top-left region
    /// of this one. Cells outside the overlap get defaults.
    pub fn resized(&self, chars_width: usize, chars_height: usize) -> Self {
        let (canvas, _) =
            Self::from_parts(self.pixels.rows(), self.attributes.rows(), chars_width, chars_height);
        canvas
    }

    /// Copy `source` into this canvas with its top-left cell at `(char_x, char_y)`.
    /// Anything falling outside this canvas is dropped.
    pub fn blit(&mut self, source: &Canvas, char_x: usize, char_y: usize) {
        for cy in 0..source.chars_height() {
            for cx in 0..source.chars_width() {
                let (tx, ty) = (char_x + cx, char_y + cy);
                if tx >= self.chars_width() || ty >= self.chars_height() {
                    continue;
                }
                self.attributes.set(tx, ty, source.attributes.get(cx, cy));
                for py in 0..CHAR_SIZE {
                    for px in 0..CHAR_SIZE {
                        let ink = source.pixels.get(cx * CHAR_SIZE + px, cy * CHAR_SIZE + py);
                        self.pixels.set(tx * CHAR_SIZE + px, ty * CHAR_SIZE + py, ink);
                    }
                }
            }
        }
    }
}
