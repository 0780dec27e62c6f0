//! Scalar to color mapping.
//!
//! Values are mapped onto a five-stop ramp running blue, cyan, green,
//! yellow, red between a lower and an upper bound. Values outside the bounds
//! saturate to the end colors.

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure blue, the low end of the ramp.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Pure green, the middle of the ramp.
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Pure red, the high end of the ramp.
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0, 1]`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Position of `value` within `[lower, upper]` as a channel value.
///
/// A zero-width band yields 0.
fn ramp(value: f64, lower: f64, upper: f64) -> u8 {
    let width = upper - lower;
    if width <= 0.0 {
        return 0;
    }
    let frac = ((value - lower) / width).clamp(0.0, 1.0);
    (255.0 * frac).round() as u8
}

/// Map `value` onto the color ramp spanning `[min, max]`.
///
/// The range is split into four equal bands at breakpoints `v0..v4`:
///
/// | band      | color                |
/// |-----------|----------------------|
/// | `< v0`    | `(0, 0, 255)`        |
/// | `v0..=v1` | `(0, u, 255)`        |
/// | `v1..=v2` | `(0, 255, 255 - u)`  |
/// | `v2..=v3` | `(u, 255, 0)`        |
/// | `v3..=v4` | `(255, 255 - u, 0)`  |
/// | `> v4`    | `(255, 0, 0)`        |
///
/// where `u` is the rounded position inside the band scaled to `0..=255`.
/// Bounds given in the wrong order are swapped. NaN maps to blue.
pub fn value_to_color(value: f64, min: f64, max: f64) -> Rgb {
    let (min, max) = if max < min { (max, min) } else { (min, max) };
    let step = (max - min) / 4.0;
    let v0 = min;
    let v1 = min + step;
    let v2 = min + 2.0 * step;
    let v3 = min + 3.0 * step;
    let v4 = max;

    if value.is_nan() || value < v0 {
        Rgb::BLUE
    } else if value > v4 {
        Rgb::RED
    } else if value <= v1 {
        Rgb::new(0, ramp(value, v0, v1), 255)
    } else if value <= v2 {
        Rgb::new(0, 255, 255 - ramp(value, v1, v2))
    } else if value <= v3 {
        Rgb::new(ramp(value, v2, v3), 255, 0)
    } else {
        Rgb::new(255, 255 - ramp(value, v3, v4), 0)
    }
}

/// Range of `values` with the outer 5% clipped from each tail.
///
/// Sorts a copy, drops `⌊n/20⌋` values from each end and returns the
/// remaining extremes. NaN values are ignored. Returns `None` if nothing is
/// left to take a range from.
pub fn robust_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let k = n / 20;
    Some((sorted[k], sorted[n - 1 - k]))
}

/// Map every value onto the ramp spanning `[min, max]`.
pub fn colorize(values: &[f64], min: f64, max: f64) -> Vec<Rgb> {
    values.iter().map(|&v| value_to_color(v, min, max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::quality::DEGENERATE_SHAPE;

    #[test]
    fn test_endpoints() {
        for &(min, max) in &[(0.0, 1.0), (-3.5, 12.0), (0.6, 2.0)] {
            assert_eq!(value_to_color(min, min, max), Rgb::BLUE);
            assert_eq!(value_to_color(max, min, max), Rgb::RED);
        }
    }

    #[test]
    fn test_midpoint_is_green() {
        assert_eq!(value_to_color(0.5, 0.0, 1.0), Rgb::GREEN);
        let c = value_to_color(5.0, 2.0, 8.0);
        assert_eq!((c.g, c.b), (255, 0));
    }

    #[test]
    fn test_saturation_outside_range() {
        assert_eq!(value_to_color(-1.0, 0.0, 1.0), Rgb::BLUE);
        assert_eq!(value_to_color(2.0, 0.0, 1.0), Rgb::RED);
        assert_eq!(value_to_color(f64::NEG_INFINITY, 0.0, 1.0), Rgb::BLUE);
        assert_eq!(value_to_color(f64::INFINITY, 0.0, 1.0), Rgb::RED);
    }

    #[test]
    fn test_band_colors() {
        // Band boundaries belong to the lower band.
        assert_eq!(value_to_color(0.25, 0.0, 1.0), Rgb::new(0, 255, 255));
        assert_eq!(value_to_color(0.75, 0.0, 1.0), Rgb::new(255, 255, 0));

        assert_eq!(value_to_color(0.125, 0.0, 1.0), Rgb::new(0, 128, 255));
        assert_eq!(value_to_color(0.375, 0.0, 1.0), Rgb::new(0, 255, 127));
        assert_eq!(value_to_color(0.625, 0.0, 1.0), Rgb::new(128, 255, 0));
        assert_eq!(value_to_color(0.875, 0.0, 1.0), Rgb::new(255, 127, 0));
    }

    #[test]
    fn test_degenerate_sentinel_is_red() {
        assert_eq!(value_to_color(DEGENERATE_SHAPE, 0.6, 2.0), Rgb::RED);
    }

    #[test]
    fn test_nan_is_blue() {
        assert_eq!(value_to_color(f64::NAN, 0.0, 1.0), Rgb::BLUE);
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(value_to_color(1.0, 1.0, 1.0), Rgb::BLUE);
        assert_eq!(value_to_color(0.0, 1.0, 1.0), Rgb::BLUE);
        assert_eq!(value_to_color(2.0, 1.0, 1.0), Rgb::RED);
    }

    #[test]
    fn test_swapped_bounds() {
        assert_eq!(value_to_color(0.0, 1.0, 0.0), Rgb::BLUE);
        assert_eq!(value_to_color(1.0, 1.0, 0.0), Rgb::RED);
    }

    #[test]
    fn test_robust_range_excludes_outlier() {
        let mut values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        values.push(1.0e6);

        let (min, max) = robust_range(&values).unwrap();
        assert_eq!((min, max), (5.0, 95.0));
        assert!(max < 1.0e6);
    }

    #[test]
    fn test_robust_range_small_input() {
        // Fewer than 20 values: nothing is clipped.
        assert_eq!(robust_range(&[3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(robust_range(&[7.0]), Some((7.0, 7.0)));
        assert_eq!(robust_range(&[]), None);
        assert_eq!(robust_range(&[f64::NAN]), None);
    }

    #[test]
    fn test_to_f32() {
        assert_eq!(Rgb::RED.to_f32(), [1.0, 0.0, 0.0]);
        assert_eq!(<[u8; 3]>::from(Rgb::new(1, 2, 3)), [1, 2, 3]);
    }

    #[test]
    fn test_colorize() {
        let colors = colorize(&[0.0, 0.5, 1.0], 0.0, 1.0);
        assert_eq!(colors, vec![Rgb::BLUE, Rgb::GREEN, Rgb::RED]);
    }
}
