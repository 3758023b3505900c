use embedded_graphics::pixelcolor::Rgb888;

#[allow(unused_imports)]
use micromath::F32Ext;

/// Converts an HSV triple to RGB using the six 60° sector formulation.
///
/// `hue_degrees` wraps modulo 360; saturation and value are clamped to
/// `[0.0, 1.0]`.
pub fn hsv_to_rgb(hue_degrees: f32, saturation: f32, value: f32) -> Rgb888 {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let mut h = if hue_degrees.is_finite() {
        hue_degrees % 360.0
    } else {
        0.0
    };
    if h < 0.0 {
        h += 360.0;
    }

    let chroma = v * s;
    let h_prime = h / 60.0;
    let x = chroma * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h_prime.floor() as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb888::new(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

fn to_channel(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// The slice of the hue circle the bar gradient is mapped into.
///
/// Both bounds are fractions of a full turn in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueWindow {
    pub min_hue: f32,
    pub max_hue: f32,
}

impl HueWindow {
    pub const fn new(min_hue: f32, max_hue: f32) -> Self {
        Self { min_hue, max_hue }
    }

    /// Hue in degrees for a bar filled to `ratio` of its maximum height.
    pub fn hue_at(&self, ratio: f32) -> f32 {
        (self.min_hue + (self.max_hue - self.min_hue) * ratio) * 360.0
    }
}

impl Default for HueWindow {
    fn default() -> Self {
        Self::new(0.7, 0.85)
    }
}

/// Slowly rotates a [`HueWindow`] around the color circle.
///
/// Both bounds advance at `speed` turns per second and wrap at 1.0. After
/// every step the bounds are held exactly `max_separation` apart: a wider
/// window is narrowed by lowering `max_hue`, a narrower one is widened by
/// lowering `min_hue`.
#[derive(Debug, Clone)]
pub struct HueRotation {
    window: HueWindow,
    speed: f32,
    max_separation: f32,
}

impl HueRotation {
    pub const DEFAULT_SPEED: f32 = 0.01;
    pub const DEFAULT_MAX_SEPARATION: f32 = 0.25;

    pub fn new(start: HueWindow, speed: f32, max_separation: f32) -> Self {
        Self {
            window: start,
            speed,
            max_separation,
        }
    }

    pub fn window(&self) -> HueWindow {
        self.window
    }

    /// Advances the rotation by `dt` seconds and returns the new window.
    pub fn advance(&mut self, dt: f32) -> HueWindow {
        let step = self.speed * dt;
        let w = &mut self.window;
        w.min_hue += step;
        w.max_hue += step;
        if w.min_hue >= 1.0 {
            w.min_hue -= 1.0;
        }
        if w.max_hue >= 1.0 {
            w.max_hue -= 1.0;
        }
        // Once max wraps before min, the clamps below snap min to
        // max - separation and the gradient keeps rotating from there.
        if w.max_hue > w.min_hue + self.max_separation {
            w.max_hue = w.min_hue + self.max_separation;
        }
        if w.min_hue > w.max_hue - self.max_separation {
            w.min_hue = w.max_hue - self.max_separation;
        }
        self.window
    }
}

impl Default for HueRotation {
    fn default() -> Self {
        Self::new(
            HueWindow::default(),
            Self::DEFAULT_SPEED,
            Self::DEFAULT_MAX_SEPARATION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb888::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb888::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb888::new(0, 0, 255));
    }

    #[test]
    fn test_secondary_hues() {
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Rgb888::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Rgb888::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), Rgb888::new(255, 0, 255));
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(480.0, 1.0, 1.0), Rgb888::new(0, 255, 0));
    }

    #[test]
    fn test_saturation_and_value() {
        assert_eq!(hsv_to_rgb(200.0, 0.0, 1.0), Rgb888::new(255, 255, 255));
        assert_eq!(hsv_to_rgb(200.0, 1.0, 0.0), Rgb888::new(0, 0, 0));
        assert_eq!(hsv_to_rgb(0.0, 1.0, 0.5), Rgb888::new(128, 0, 0));
    }

    #[test]
    fn test_hue_window_endpoints() {
        let window = HueWindow::new(0.7, 0.85);
        assert_abs_diff_eq!(window.hue_at(0.0), 252.0, epsilon = 1e-3);
        assert_abs_diff_eq!(window.hue_at(1.0), 306.0, epsilon = 1e-3);
    }

    #[test]
    fn test_hue_rotation_advances_and_wraps() {
        let mut rotation = HueRotation::new(HueWindow::new(0.5, 0.6), 0.1, 0.25);
        let w = rotation.advance(1.0);
        // A 0.1 wide window is widened to the full separation.
        assert_abs_diff_eq!(w.min_hue, 0.45, epsilon = 1e-5);
        assert_abs_diff_eq!(w.max_hue, 0.7, epsilon = 1e-5);

        let mut rotation = HueRotation::new(HueWindow::new(0.85, 0.95), 0.1, 0.25);
        let w = rotation.advance(1.0);
        // max wrapped to 0.05, min is pulled back below it.
        assert_abs_diff_eq!(w.max_hue, 0.05, epsilon = 1e-5);
        assert_abs_diff_eq!(w.min_hue, -0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_default_rotation_first_step() {
        let mut rotation = HueRotation::default();
        let step = HueRotation::DEFAULT_SPEED * 0.5;
        let w = rotation.advance(0.5);
        assert_abs_diff_eq!(w.min_hue, 0.6 + step, epsilon = 1e-5);
        assert_abs_diff_eq!(w.max_hue, 0.85 + step, epsilon = 1e-5);
    }

    #[test]
    fn test_micromath_rounding_matches_channels() {
        assert_eq!(F32Ext::round(127.5f32), 128.0);
        assert_eq!(F32Ext::round(254.49f32), 254.0);
        assert_eq!(F32Ext::floor(1.9999f32), 1.0);
        assert_eq!(F32Ext::abs(-0.25f32), 0.25);
    }

    #[test]
    fn test_hue_rotation_limits_separation() {
        let mut rotation = HueRotation::new(HueWindow::new(0.1, 0.9), 0.0, 0.25);
        let w = rotation.advance(0.016);
        assert_abs_diff_eq!(w.max_hue - w.min_hue, 0.25, epsilon = 1e-5);
    }
}
