//! zxpaint - ZX Spectrum attribute graphics
//!
//! This library provides functionality to:
//! - Edit 1-bit pixel grids with per-cell ink/paper/bright attributes
//! - Draw lines and recolour character cells the way the Spectrum does
//! - Manage UDG sprites, tiles, full screens, sprite sheets and tile-map levels
//! - Export any of these as `DEFB` assembly, in cell order or display-file order
//! - Load and save projects as JSON and render PNG previews

pub mod attribute;
pub mod bounds;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod encoder;
pub mod export;
pub mod grid;
pub mod level;
pub mod output;
pub mod paint;
pub mod project;
pub mod render;
pub mod shapes;
pub mod size_class;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use attribute::Attribute;
pub use canvas::{Scene, SpriteSheet, TileCanvas, UdgCanvas};
pub use export::{AsmDocument, AsmOptions, ExportError, Exporter};
pub use grid::{AttributeGrid, Canvas, PixelGrid};
pub use level::Level;
pub use project::Project;
pub use size_class::TileSize;
