/*
 * Defines the RGBA color type shared by styles and shapes. Colors are plain
 * 8-bit-per-channel values handed to the host batch untouched; the named
 * constants cover the stock widget palette.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 139);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const BUTTON_FACE: Color = Color::rgb(240, 240, 240);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Scales every channel, alpha included, clamping to the valid range.
    /// Used for dimmed fills such as an unchecked check mark preview.
    pub fn scaled(self, factor: f32) -> Color {
        let scale = |channel: u8| (f32::from(channel) * factor).clamp(0.0, 255.0) as u8;
        Color {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: scale(self.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_halves_every_channel() {
        let dimmed = Color::rgba(200, 100, 50, 255).scaled(0.5);
        assert_eq!(dimmed, Color::rgba(100, 50, 25, 127));
    }

    #[test]
    fn scaled_clamps_instead_of_wrapping() {
        let boosted = Color::rgb(200, 10, 0).scaled(2.0);
        assert_eq!(boosted.r, 255);
        assert_eq!(boosted.g, 20);
    }
}
