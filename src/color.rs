//! ZX Spectrum colour palette lookups
//!
//! The Spectrum has eight colour indices, each with a normal and a bright
//! variant. Black is the same in both modes.
//!
//! | Index | Name    | Normal    | Bright    |
//! |-------|---------|-----------|-----------|
//! | 0     | black   | `#000000` | `#000000` |
//! | 1     | blue    | `#0000D7` | `#0000FF` |
//! | 2     | red     | `#D70000` | `#FF0000` |
//! | 3     | magenta | `#D700D7` | `#FF00FF` |
//! | 4     | green   | `#00D700` | `#00FF00` |
//! | 5     | cyan    | `#00D7D7` | `#00FFFF` |
//! | 6     | yellow  | `#D7D700` | `#FFFF00` |
//! | 7     | white   | `#D7D7D7` | `#FFFFFF` |

use image::Rgba;

/// One palette slot with its normal and bright hex values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub normal: &'static str,
    pub bright: &'static str,
}

/// The fixed Spectrum palette, indexed by colour number.
pub const PALETTE: [PaletteEntry; 8] = [
    PaletteEntry { name: "black", normal: "#000000", bright: "#000000" },
    PaletteEntry { name: "blue", normal: "#0000D7", bright: "#0000FF" },
    PaletteEntry { name: "red", normal: "#D70000", bright: "#FF0000" },
    PaletteEntry { name: "magenta", normal: "#D700D7", bright: "#FF00FF" },
    PaletteEntry { name: "green", normal: "#00D700", bright: "#00FF00" },
    PaletteEntry { name: "cyan", normal: "#00D7D7", bright: "#00FFFF" },
    PaletteEntry { name: "yellow", normal: "#D7D700", bright: "#FFFF00" },
    PaletteEntry { name: "white", normal: "#D7D7D7", bright: "#FFFFFF" },
];

/// Resolve a colour index and bright flag to its hex string.
///
/// # Panics
///
/// `index` must be in `0..8`. Out-of-range indices are a caller bug and
/// panic on the table lookup.
///
/// # Examples
///
/// ```
/// use zxpaint::color::color_hex;
///
/// assert_eq!(color_hex(0, false), "#000000");
/// assert_eq!(color_hex(0, true), "#000000");
/// assert_eq!(color_hex(7, false), "#D7D7D7");
/// assert_eq!(color_hex(7, true), "#FFFFFF");
/// ```
pub fn color_hex(index: u8, bright: bool) -> &'static str {
    let entry = &PALETTE[index as usize];
    if bright {
        entry.bright
    } else {
        entry.normal
    }
}

/// Resolve a colour index and bright flag to an opaque RGBA pixel.
///
/// Same precondition as [`color_hex`].
pub fn color_rgba(index: u8, bright: bool) -> Rgba<u8> {
    let hex = &color_hex(index, bright)[1..];
    // Table entries are always six valid hex digits.
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Rgba([channel(0), channel(2), channel(4), 255])
}

/// Human-readable name of a colour index.
pub fn color_name(index: u8) -> &'static str {
    PALETTE[index as usize].name
}
