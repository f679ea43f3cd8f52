//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::bounds::{drawn_bounds, DrawBounds};
use crate::grid::Canvas;
use crate::project::Project;
use crate::size_class::UDG_MAX_CHARS;

use super::{EXIT_ERROR, EXIT_SUCCESS};

fn canvas_bounds(canvas: &Canvas) -> Option<DrawBounds> {
    drawn_bounds(&canvas.pixels, canvas.chars_width(), canvas.chars_height(), Some(&canvas.attributes))
}

fn describe_bounds(bounds: Option<DrawBounds>) -> String {
    match bounds {
        Some(b) => format!(
            "{}x{} characters at cell ({}, {}), {} characters",
            b.width,
            b.height,
            b.min_char_x,
            b.min_char_y,
            b.char_count()
        ),
        None => "nothing drawn".to_string(),
    }
}

/// Summary lines for a loaded project.
pub(crate) fn describe(project: &Project) -> Vec<String> {
    let mut lines = vec![format!("Kind: {}", project.kind())];
    match project {
        Project::Sprite(udg) => {
            lines.push(format!("Size: {}x{} characters", udg.chars_width(), udg.chars_height()));
            let bounds = canvas_bounds(udg.canvas());
            lines.push(format!("Drawn: {}", describe_bounds(bounds)));
            if let Some(b) = bounds {
                let status = if b.char_count() <= UDG_MAX_CHARS { "within" } else { "over" };
                lines.push(format!("UDG budget: {} of {} characters ({})", b.char_count(), UDG_MAX_CHARS, status));
            }
        }
        Project::Tile(tile) => {
            lines.push(format!("Size: {} ({} characters)", tile.size(), tile.size().chars() * tile.size().chars()));
            lines.push(format!("Drawn: {}", describe_bounds(canvas_bounds(tile.canvas()))));
        }
        Project::Scene(scene) => {
            lines.push("Size: 32x24 characters".to_string());
            lines.push(format!("Drawn: {}", describe_bounds(canvas_bounds(scene.canvas()))));
        }
        Project::Level(level) => {
            let size = level.tile_size();
            lines.push(format!("Tile size: {}", size));
            lines.push(format!("Map: {}x{} tiles per screen", size.level_cols(), size.level_rows()));
            lines.push(format!("Tiles: {}", level.tiles().len()));
            lines.push(format!("Screens: {}", level.screens().len()));
            for (i, screen) in level.screens().iter().enumerate() {
                lines.push(format!("  {}: {} ({} cells used)", i, screen.name, screen.references().count()));
            }
        }
        Project::SpriteSheet(sheet) => {
            lines.push(format!("Frame size: {}x{} characters", sheet.chars_width(), sheet.chars_height()));
            lines.push(format!("Frames: {} at {} fps", sheet.frame_count(), sheet.fps));
            let bounds = sheet.frames().iter().filter_map(canvas_bounds).reduce(|a, b| a.union(&b));
            lines.push(format!("Drawn: {}", describe_bounds(bounds)));
        }
    }
    lines
}

/// Execute the info command
pub fn run_info(input: &Path) -> ExitCode {
    match Project::load(input) {
        Ok(project) => {
            for line in describe(&project) {
                println!("{}", line);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
