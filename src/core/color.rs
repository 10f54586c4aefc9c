use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8, // Red component (0 - 255)
    pub g: u8, // Green component (0 - 255)
    pub b: u8, // Blue component (0 - 255)
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, &'static str> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex string should be 6 characters long (RRGGBB).");
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid red component in hex")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid green component in hex")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid blue component in hex")?;

        Ok(Self::new(r, g, b))
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Only for the constants below, input is trusted.
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        let offset = if bytes[0] == b'#' { 1 } else { 0 };

        Self {
            r: Self::hex_pair_to_u8(bytes[offset], bytes[offset + 1]),
            g: Self::hex_pair_to_u8(bytes[offset + 2], bytes[offset + 3]),
            b: Self::hex_pair_to_u8(bytes[offset + 4], bytes[offset + 5]),
        }
    }
}

// Predefined colors
impl Color {
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const SKY: Color = Color::hex("97F4F7");
    pub const HOT_PINK: Color = Color::hex("FF0073");
    pub const CHARCOAL: Color = Color::hex("4D4242");
}

/// Wire form: the three channels as decimal, space separated.
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_hex_parser() {
        assert_eq!(Color::from_hex("#FF0000"), Ok(Color::RED));
        assert_eq!(Color::from_hex("97f4f7"), Ok(Color::SKY));
        assert_eq!(Color::HOT_PINK, Color::new(255, 0, 115));
        assert_eq!(Color::CHARCOAL, Color::new(77, 66, 66));
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("GG0000").is_err());
        assert!(Color::from_hex("ééé").is_err());
    }

    #[test]
    fn displays_as_wire_channels() {
        assert_eq!(Color::WHITE.to_string(), "255 255 255");
        assert_eq!(Color::RED.to_string(), "255 0 0");
    }
}
