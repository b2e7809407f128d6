//! Hex color helpers used to derive layer and bubble colors.
//!
//! Colors are not validated: a string that fails to parse is treated as
//! black, and whatever the host makes of an odd CSS color is its concern.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected #rgb or #rrggbb, got {0:?}")]
    Length(String),
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn parse_hex(s: &str) -> Result<Rgb, ColorError> {
        let digits = s.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError::Length(s.to_string())),
        };
        let n = u32::from_str_radix(&expanded, 16)
            .map_err(|_| ColorError::Digits(s.to_string()))?;
        Ok(Rgb {
            r: ((n >> 16) & 255) as u8,
            g: ((n >> 8) & 255) as u8,
            b: (n & 255) as u8,
        })
    }

    /// Parse, falling back to black.
    pub fn from_hex_lossy(s: &str) -> Rgb {
        Rgb::parse_hex(s).unwrap_or_else(|e| {
            log::debug!("color fallback to black: {e}");
            Rgb::BLACK
        })
    }

    /// Scale each channel by `1 + amount`, truncating and clamping to a byte.
    pub fn shade(self, amount: f64) -> Rgb {
        let scale = |c: u8| -> u8 { ((c as f64 * (1.0 + amount)) as i32).clamp(0, 255) as u8 };
        Rgb {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

/// Lighten (`amount > 0`) or darken a hex color, returning `#rrggbb`.
pub fn shade(hex: &str, amount: f64) -> String {
    Rgb::from_hex_lossy(hex).shade(amount).to_hex()
}

/// `rgba(r,g,b,a)` for a hex color.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    Rgb::from_hex_lossy(hex).to_rgba(alpha)
}
