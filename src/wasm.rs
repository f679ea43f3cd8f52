//! WASM API module for browser/JS interop
//!
//! Exposes project export and preview rendering to a browser editor, plus
//! the line rasterizer and palette lookups used while drawing.

use wasm_bindgen::prelude::*;

use crate::color::color_hex;
use crate::export::{AsmOptions, Exporter};
use crate::project::Project;
use crate::render::render_canvas;
use crate::shapes::line_points;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Result of exporting a project to assembly text.
#[wasm_bindgen]
pub struct ExportResult {
    file_name: String,
    text: String,
    error: Option<String>,
}

#[wasm_bindgen]
impl ExportResult {
    /// Suggested download name (`<name>.asm`), empty on error
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// Assembly source, empty on error
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    /// User-facing error message, if the export was refused
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Result of rendering a project to RGBA pixels.
#[wasm_bindgen]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    error: Option<String>,
}

#[wasm_bindgen]
impl RenderResult {
    /// Width of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Export a project JSON document with default assembly formatting.
#[wasm_bindgen]
pub fn export_project(json: &str, name: &str) -> ExportResult {
    let result = Project::from_json(json)
        .map_err(|e| e.to_string())
        .and_then(|p| p.to_asm(name, &AsmOptions::default()).map_err(|e| e.to_string()));
    match result {
        Ok(doc) => ExportResult { file_name: doc.file_name, text: doc.text, error: None },
        Err(e) => ExportResult { file_name: String::new(), text: String::new(), error: Some(e) },
    }
}

/// Render a project at one image pixel per Spectrum pixel. Levels render
/// their current screen, sprite sheets their first frame.
#[wasm_bindgen]
pub fn render_project(json: &str) -> RenderResult {
    let project = match Project::from_json(json) {
        Ok(project) => project,
        Err(e) => return RenderResult { width: 0, height: 0, pixels: Vec::new(), error: Some(e.to_string()) },
    };
    let screen = match &project {
        Project::Level(level) => level.current_screen,
        _ => 0,
    };
    match project.preview_canvas(screen) {
        Some(canvas) => {
            let image = render_canvas(&canvas);
            RenderResult { width: image.width(), height: image.height(), pixels: image.into_raw(), error: None }
        }
        None => RenderResult { width: 0, height: 0, pixels: Vec::new(), error: Some("nothing to render".to_string()) },
    }
}

/// Points of a line as a flat `[x0, y0, x1, y1, ...]` array, in drawing order.
#[wasm_bindgen]
pub fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<i32> {
    line_points(x0, y0, x1, y1).into_iter().flat_map(|p| [p.x, p.y]).collect()
}

/// `#RRGGBB` for a colour index; indices above 7 are clamped.
#[wasm_bindgen]
pub fn colour_hex(index: u8, bright: bool) -> String {
    color_hex(index.min(7), bright).to_string()
}
