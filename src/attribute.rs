//! Character-cell colour attributes.
//!
//! Every 8x8 character cell carries exactly one [`Attribute`]: an ink colour,
//! a paper colour and a bright flag. On the wire it packs into a single byte
//! laid out as `FBPPPIII` (flash, bright, paper, ink). Flash is never set.

use serde::{Deserialize, Serialize};

/// Bright bit of a packed attribute byte.
pub const BRIGHT_BIT: u8 = 0x40;

/// Flash bit of a packed attribute byte. Not modelled, always written as 0.
pub const FLASH_BIT: u8 = 0x80;

/// Ink/paper/bright record for one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Foreground colour index (0-7)
    #[serde(default = "default_ink")]
    pub ink: u8,
    /// Background colour index (0-7)
    #[serde(default)]
    pub paper: u8,
    /// Use the bright palette variant
    #[serde(default = "default_bright")]
    pub bright: bool,
}

fn default_ink() -> u8 {
    7
}

fn default_bright() -> bool {
    true
}

impl Attribute {
    /// White ink on black paper, bright.
    pub const DEFAULT: Attribute = Attribute { ink: 7, paper: 0, bright: true };

    pub const fn new(ink: u8, paper: u8, bright: bool) -> Self {
        Self { ink, paper, bright }
    }

    /// Pack into the Spectrum attribute byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use zxpaint::attribute::Attribute;
    ///
    /// assert_eq!(Attribute::new(3, 5, true).to_byte(), 0x6B);
    /// assert_eq!(Attribute::new(7, 0, false).to_byte(), 0x07);
    /// ```
    pub fn to_byte(&self) -> u8 {
        let bright = if self.bright { BRIGHT_BIT } else { 0 };
        bright | ((self.paper & 0x07) << 3) | (self.ink & 0x07)
    }

    /// Unpack a Spectrum attribute byte. The flash bit is dropped.
    pub fn from_byte(byte: u8) -> Self {
        Self { ink: byte & 0x07, paper: (byte >> 3) & 0x07, bright: byte & BRIGHT_BIT != 0 }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Clamp colour indices into `0..=7`. Used when repairing loaded data.
    pub fn clamped(self) -> Self {
        Self { ink: self.ink.min(7), paper: self.paper.min(7), bright: self.bright }
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::DEFAULT
    }
}
