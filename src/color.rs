// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// The alpha byte is the color's own opacity; draw calls multiply it with
// the per-shape alpha.

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "u32")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    /// CSS `rgba()` string for this color drawn at `alpha` (0..=1).
    pub fn to_css(&self, alpha: f64) -> String {
        let alpha = (alpha * self.a as f64 / 255.0).max(0.0).min(1.0);
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }
}

impl From<u32> for Color {
    fn from(num: u32) -> Self {
        Color::from_u32(num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x6366f1ff);
        assert_eq!(c, Color { r: 0x63, g: 0x66, b: 0xf1, a: 0xff });
    }

    #[test]
    fn css_scales_alpha_by_color_opacity() {
        assert_eq!(Color::from_u32(0x0a141eff).to_css(0.5), "rgba(10, 20, 30, 0.500)");
        assert_eq!(Color::from_u32(0x00000080).to_css(1.0), "rgba(0, 0, 0, 0.502)");
        assert_eq!(Color::from_u32(0xffffffff).to_css(3.0), "rgba(255, 255, 255, 1.000)");
    }
}
