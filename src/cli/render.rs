//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::output::{preview_path, save_png};
use crate::project::Project;
use crate::render::render_preview;

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    input: &Path,
    output: Option<&Path>,
    screen: usize,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let project = match Project::load(input) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let Some(canvas) = project.preview_canvas(screen) else {
        eprintln!("Error: screen {} does not exist", screen);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let image = render_preview(&canvas, config.render.scale, config.render.grid);
    let output_path = preview_path(input, output);
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
