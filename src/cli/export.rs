//! Export command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::export::{AsmOptions, Exporter};
use crate::project::Project;

use super::{expand_inputs, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the export command
pub fn run_export(
    inputs: &[PathBuf],
    output: Option<&Path>,
    name: Option<&str>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let options = config.asm.to_options();

    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: no project files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if name.is_some() && files.len() > 1 {
        eprintln!("Error: --name can only be used with a single project file");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut failed = 0;
    for file in &files {
        let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("graphics");
        let base = name.unwrap_or(stem);
        let dir = output.map(Path::to_path_buf).unwrap_or_else(|| file.parent().map(Path::to_path_buf).unwrap_or_default());

        match export_file(file, base, &dir, &options) {
            Ok(path) => println!("Wrote: {}", path.display()),
            Err(e) => {
                eprintln!("Error: {}: {}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::debug!("{} of {} exports failed", failed, files.len());
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn export_file(
    file: &Path,
    name: &str,
    dir: &Path,
    options: &AsmOptions,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let project = Project::load(file)?;
    log::debug!("{}: {} project", file.display(), project.kind());
    let document = project.to_asm(name, options)?;
    Ok(document.write_to(dir)?)
}
