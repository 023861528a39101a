use plotters::style::RGBColor;
use rand::Rng;

use crate::error::{CompareError, Result};

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// Random `#rrggbb` color
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    let digits: String = (0..6)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect();
    format!("#{digits}")
}

/// One random color per assembly
pub fn random_palette(n: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| random_color(&mut rng)).collect()
}

/// Parse a `#rrggbb` (or `rrggbb`) hex code
pub fn parse_hex(color: &str) -> Result<RGBColor> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CompareError::Parameter(format!(
            "'{color}' is not a #rrggbb hex color"
        )));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| CompareError::Parameter(format!("'{color}': {e}")))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
