//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod export;
mod info;
mod render;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ZxConfig};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path looks like a project file.
pub fn is_project_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json"))
}

/// Find the project files directly inside a directory, sorted.
pub fn find_project_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = dir.join("*.json");
    let mut files: Vec<PathBuf> = match glob(&pattern.to_string_lossy()) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// Expand directory arguments into the project files they contain.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_project_files(input));
        } else {
            if !is_project_file(input) {
                log::warn!("{} does not have a .json extension", input.display());
            }
            files.push(input.clone());
        }
    }
    files
}

/// ZX Spectrum attribute graphics: export projects as DEFB assembly or PNG previews
#[derive(Parser)]
#[command(name = "zxp")]
#[command(about = "Export ZX Spectrum sprite, tile, screen and level projects to assembly")]
#[command(version)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export project files as DEFB assembly (.asm)
    Export {
        /// Project files, or directories of .json project files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base name for labels and the .asm file (single input only)
        #[arg(long)]
        name: Option<String>,

        /// Write DEFB values in decimal instead of hex
        #[arg(long)]
        decimal: bool,

        /// Values per DEFB line (1-32)
        #[arg(long)]
        bytes_per_line: Option<usize>,

        /// Path to zxpaint.toml (default: search upwards from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a project file to a PNG preview
    Render {
        /// Project file
        input: PathBuf,

        /// Output file or directory (default: {input}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16)
        #[arg(long)]
        scale: Option<u32>,

        /// Draw character cell boundaries
        #[arg(long)]
        grid: bool,

        /// Level screen to render
        #[arg(long, default_value = "0")]
        screen: usize,

        /// Path to zxpaint.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show kind, size, drawn bounds and budget of a project file
    Info {
        /// Project file
        input: PathBuf,
    },
}

/// Load the config and apply command-line overrides.
///
/// Config problems are argument errors: the message is printed and
/// `EXIT_INVALID_ARGS` is returned.
pub(crate) fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<ZxConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    if let Err(e) = merge_cli_overrides(&mut config, overrides) {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Export { inputs, output, name, decimal, bytes_per_line, config } => {
            let overrides = CliOverrides { bytes_per_line, decimal: decimal.then_some(true), ..Default::default() };
            export::run_export(&inputs, output.as_deref(), name.as_deref(), config.as_deref(), &overrides)
        }
        Commands::Render { input, output, scale, grid, screen, config } => {
            let overrides = CliOverrides { scale, grid: grid.then_some(true), ..Default::default() };
            render::run_render(&input, output.as_deref(), screen, config.as_deref(), &overrides)
        }
        Commands::Info { input } => info::run_info(&input),
    }
}
