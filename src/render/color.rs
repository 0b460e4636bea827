// 文件: render/color.rs
// 作用: 图层使用的RGBA颜色，以及烟花样式需要的三分色(triad)计算

/// A color in the sRGB color space with an alpha component.
///
/// Values are stored as `f32`s in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);
    pub const PURPLE: Color = Color::new(0.5, 0.0, 0.5, 1.0);
    /// 默认着色
    pub const SYSTEM_BLUE: Color = Color::new(0.0, 0.478, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Hue, saturation, brightness in `[0, 1]`.
    pub fn to_hsb(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == self.r {
            ((self.g - self.b) / delta).rem_euclid(6.0) / 6.0
        } else if max == self.g {
            ((self.b - self.r) / delta + 2.0) / 6.0
        } else {
            ((self.r - self.g) / delta + 4.0) / 6.0
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        (hue, saturation, max)
    }

    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let c = brightness * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = brightness - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r + m, g + m, b + m, alpha)
    }

    /// The two colors forming a split-complementary triad with this one.
    ///
    /// Low saturation or brightness is pushed to full so the result stays vivid.
    pub fn triad(self) -> (Color, Color) {
        const SPLIT: f32 = 0.0813;

        let (hue, mut saturation, mut brightness) = self.to_hsb();
        if saturation < 0.5 {
            saturation = 1.0;
        }
        if brightness < 0.5 {
            brightness = 1.0;
        }

        let adjust = |delta: f32| (hue - delta).rem_euclid(1.0);
        (
            Self::from_hsb(adjust(0.5 + SPLIT), saturation, brightness, 1.0),
            Self::from_hsb(adjust(0.5 - SPLIT), saturation, brightness, 1.0),
        )
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::CLEAR
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn hsb_round_trip() {
        let color = Color::from_rgb(0.2, 0.6, 0.9);
        let (h, s, b) = color.to_hsb();
        let back = Color::from_hsb(h, s, b, 1.0);
        assert_abs_diff_eq!(back.r, color.r, epsilon = 1e-5);
        assert_abs_diff_eq!(back.g, color.g, epsilon = 1e-5);
        assert_abs_diff_eq!(back.b, color.b, epsilon = 1e-5);
    }

    #[test]
    fn triad_of_red_is_opaque_and_distinct() {
        let (first, second) = Color::RED.triad();
        assert_eq!(first.a, 1.0);
        assert_eq!(second.a, 1.0);
        assert_ne!(first, second);
        assert_ne!(first, Color::RED);

        // 红色色相为0，两个三分色分别落在 0.4187 和 0.5813 附近（青绿/青蓝）
        let (h1, _, _) = first.to_hsb();
        let (h2, _, _) = second.to_hsb();
        assert_abs_diff_eq!(h1, 0.4187, epsilon = 1e-3);
        assert_abs_diff_eq!(h2, 0.5813, epsilon = 1e-3);
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let faded = Color::SYSTEM_BLUE.with_alpha(0.3);
        assert_eq!(faded.b, 1.0);
        assert_eq!(faded.a, 0.3);
    }
}
