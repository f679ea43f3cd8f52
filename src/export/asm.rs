//! Assembly source formatting.
//!
//! Turns encoded byte streams into assembler text: `;` comment headers,
//! labels and `DEFB` lines.
//!
//! ```text
//! ; hero.asm
//! ; UDG: 2x1 characters (16x8 pixels), 2 characters
//!
//! hero_pixels:
//!     DEFB $00,$3C,$42,$42,$7E,$42,$42,$00
//!     DEFB $00,$7C,$42,$7C,$42,$42,$7C,$00
//! hero_attrs:
//!     DEFB $47,$47
//! ```
//!
//! Only the byte values and their order matter to consumers. Number base,
//! hex prefix and line length are cosmetic and configurable.

use serde::{Deserialize, Serialize};

/// Number base for `DEFB` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Hex,
    Decimal,
}

/// Formatting options for assembly output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmOptions {
    /// Bytes per `DEFB` line
    pub bytes_per_line: usize,
    pub number_format: NumberFormat,
    /// Prefix for hex values (`$`, `#` or `0x` depending on the assembler)
    pub hex_prefix: String,
    /// Prepended to every generated label
    pub label_prefix: String,
}

impl Default for AsmOptions {
    fn default() -> Self {
        Self {
            bytes_per_line: 8,
            number_format: NumberFormat::Hex,
            hex_prefix: "$".to_string(),
            label_prefix: String::new(),
        }
    }
}

impl AsmOptions {
    pub fn format_byte(&self, byte: u8) -> String {
        match self.number_format {
            NumberFormat::Hex => format!("{}{:02X}", self.hex_prefix, byte),
            NumberFormat::Decimal => byte.to_string(),
        }
    }

    /// Build a label from a free-form name.
    pub fn label(&self, name: &str, suffix: &str) -> String {
        let base = sanitize_label(name);
        if suffix.is_empty() {
            format!("{}{}", self.label_prefix, base)
        } else {
            format!("{}{}_{}", self.label_prefix, base, suffix)
        }
    }
}

/// Reduce a name to `[A-Za-z0-9_]`, never starting with a digit.
pub fn sanitize_label(name: &str) -> String {
    let mut label: String =
        name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if label.is_empty() {
        label.push_str("data");
    }
    if label.starts_with(|c: char| c.is_ascii_digit()) {
        label.insert(0, '_');
    }
    label
}

/// Accumulates assembly text.
#[derive(Debug)]
pub struct AsmWriter<'a> {
    options: &'a AsmOptions,
    out: String,
}

impl<'a> AsmWriter<'a> {
    pub fn new(options: &'a AsmOptions) -> Self {
        Self { options, out: String::new() }
    }

    pub fn options(&self) -> &AsmOptions {
        self.options
    }

    /// Write a `;` comment line. Control characters, newlines included,
    /// become spaces so the comment stays on one line.
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.out.push_str(";\n");
        } else {
            self.out.push_str("; ");
            self.out.extend(text.chars().map(|c| if c.is_control() { ' ' } else { c }));
            self.out.push('\n');
        }
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn label(&mut self, label: &str) {
        self.out.push_str(label);
        self.out.push_str(":\n");
    }

    /// Write `bytes` as `DEFB` lines.
    pub fn defb(&mut self, bytes: &[u8]) {
        let per_line = self.options.bytes_per_line.max(1);
        for chunk in bytes.chunks(per_line) {
            let values: Vec<String> = chunk.iter().map(|&b| self.options.format_byte(b)).collect();
            self.out.push_str("    DEFB ");
            self.out.push_str(&values.join(","));
            self.out.push('\n');
        }
    }

    /// Label followed by its `DEFB` lines.
    pub fn data_block(&mut self, label: &str, bytes: &[u8]) {
        self.label(label);
        self.defb(bytes);
    }

    pub fn finish(self) -> String {
        self.out
    }
}
