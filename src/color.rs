use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A pen color: sRGB plus alpha, one byte per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color([u8; 4]);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(u8::MAX, u8::MAX, u8::MAX);
    pub const RED: Color = Color::rgb(u8::MAX, 0, 0);
    pub const GREEN: Color = Color::rgb(0, u8::MAX, 0);
    pub const BLUE: Color = Color::rgb(0, 0, u8::MAX);
    pub const YELLOW: Color = Color::rgb(u8::MAX, u8::MAX, 0);
    pub const ORANGE: Color = Color::rgb(u8::MAX, 200, 0);
    pub const MAGENTA: Color = Color::rgb(u8::MAX, 0, u8::MAX);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    pub fn red(self) -> u8 {
        self.0[0]
    }

    pub fn green(self) -> u8 {
        self.0[1]
    }

    pub fn blue(self) -> u8 {
        self.0[2]
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    pub fn is_opaque(self) -> bool {
        self.alpha() == u8::MAX
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when translucent.
impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}
