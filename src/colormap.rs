//! Colormaps for drawing matrices as images.

use ndarray::ArrayView2;
use plotters::style::RGBColor;
use serde::Deserialize;

/// A mapping from values in `[0, 1]` to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// White for low values, black for high values.
    #[default]
    Greys,
    /// Black for low values, white for high values.
    Gray,
    /// Black through red and yellow to white.
    Hot,
    /// Purple through teal to yellow.
    Viridis,
}

/// Color stops for `Viridis`, sampled from the usual definition.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const HOT: [(u8, u8, u8); 4] =
    [(0, 0, 0), (230, 0, 0), (255, 210, 0), (255, 255, 255)];

impl Colormap {
    /// Look up the color for `t`, which is clamped to `[0, 1]`.
    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Greys => {
                let v = (255.0 * (1.0 - t)).round() as u8;
                RGBColor(v, v, v)
            }
            Colormap::Gray => {
                let v = (255.0 * t).round() as u8;
                RGBColor(v, v, v)
            }
            Colormap::Hot => interpolate_stops(&HOT, t),
            Colormap::Viridis => interpolate_stops(&VIRIDIS, t),
        }
    }
}

/// Linear interpolation between evenly spaced color stops.
fn interpolate_stops(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let scaled = t * (stops.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - i as f64;
    let lerp = |a: u8, b: u8| {
        (a as f64 + (b as f64 - a as f64) * frac).round() as u8
    };
    let (r0, g0, b0) = stops[i];
    let (r1, g1, b1) = stops[i + 1];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Linear normalization of image values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub min: f64,
    pub max: f64,
}

impl Normalize {
    /// Normalize over the finite values of `data`.
    pub fn from_data(data: &ArrayView2<f64>) -> Self {
        let (min, max) = data
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            // No finite values at all.
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// Map `value` onto `[0, 1]`. Returns `None` for non-finite values. A
    /// constant image maps everything to 0.
    pub fn apply(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.max <= self.min {
            return Some(0.0);
        }
        Some(((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
    }
}
