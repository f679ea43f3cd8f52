//! Configuration schema types for `zxpaint.toml`
//!
//! ```toml
//! [asm]
//! bytes_per_line = 16
//! number_format = "decimal"
//! hex_prefix = "#"
//! label_prefix = "gfx_"
//!
//! [render]
//! scale = 3
//! grid = true
//! ```

use serde::{Deserialize, Serialize};

use crate::export::{AsmOptions, NumberFormat};

/// Largest accepted `asm.bytes_per_line`.
pub const MAX_BYTES_PER_LINE: usize = 32;

/// Largest accepted `render.scale`.
pub const MAX_SCALE: u32 = 16;

/// Assembly output section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Values per `DEFB` line
    #[serde(default = "default_bytes_per_line")]
    pub bytes_per_line: usize,
    #[serde(default)]
    pub number_format: NumberFormat,
    #[serde(default = "default_hex_prefix")]
    pub hex_prefix: String,
    #[serde(default)]
    pub label_prefix: String,
}

fn default_bytes_per_line() -> usize {
    8
}

fn default_hex_prefix() -> String {
    "$".to_string()
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: default_bytes_per_line(),
            number_format: NumberFormat::Hex,
            hex_prefix: default_hex_prefix(),
            label_prefix: String::new(),
        }
    }
}

impl AsmConfig {
    pub fn to_options(&self) -> AsmOptions {
        AsmOptions {
            bytes_per_line: self.bytes_per_line,
            number_format: self.number_format,
            hex_prefix: self.hex_prefix.clone(),
            label_prefix: self.label_prefix.clone(),
        }
    }
}

/// PNG preview section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixel scale factor
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Draw character cell boundaries
    #[serde(default)]
    pub grid: bool,
}

fn default_scale() -> u32 {
    4
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: default_scale(), grid: false }
    }
}

/// Complete zxpaint.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZxConfig {
    #[serde(default)]
    pub asm: AsmConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "asm.bytes_per_line")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zxpaint.toml: '{}' {}", self.field, self.message)
    }
}

impl ZxConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if !(1..=MAX_BYTES_PER_LINE).contains(&self.asm.bytes_per_line) {
            errors.push(ConfigValidationError {
                field: "asm.bytes_per_line".to_string(),
                message: format!("must be between 1 and {}", MAX_BYTES_PER_LINE),
            });
        }

        if self.asm.label_prefix.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
            errors.push(ConfigValidationError {
                field: "asm.label_prefix".to_string(),
                message: "may only contain letters, digits and underscores".to_string(),
            });
        }

        if !(1..=MAX_SCALE).contains(&self.render.scale) {
            errors.push(ConfigValidationError {
                field: "render.scale".to_string(),
                message: format!("must be between 1 and {}", MAX_SCALE),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
