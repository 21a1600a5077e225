//! Aspect and interpolation handling for image subplots.

use std::str::FromStr;

use anyhow::{anyhow, Result};
use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

/// How many output cells we create per input cell when interpolating.
pub const UPSAMPLE_FACTOR: usize = 4;

/// The shape of the cells of an image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "AspectSpec")]
pub enum Aspect {
    /// Stretch the image to fill its subplot.
    #[default]
    Auto,
    /// Square cells.
    Equal,
    /// Cells whose height is this many times their width.
    Ratio(f64),
}

impl Aspect {
    /// The cell height/width ratio, or `None` if we fill the subplot.
    fn ratio(&self) -> Option<f64> {
        match self {
            Aspect::Auto => None,
            Aspect::Equal => Some(1.0),
            Aspect::Ratio(r) => Some(*r),
        }
    }

    /// Fit an image of `rows` x `cols` cells into an area of `(width,
    /// height)` pixels, returning the `(width, height)` the image should
    /// actually use.
    pub fn fit(
        &self,
        area: (u32, u32),
        rows: usize,
        cols: usize,
    ) -> (u32, u32) {
        let (width, height) = area;
        let ratio = match self.ratio() {
            Some(ratio) if rows > 0 && cols > 0 => ratio,
            _ => return area,
        };
        // Desired height/width of the whole image.
        let image_ratio = ratio * rows as f64 / cols as f64;
        let fitted_height = width as f64 * image_ratio;
        if fitted_height <= height as f64 {
            (width, fitted_height.round() as u32)
        } else {
            ((height as f64 / image_ratio).round() as u32, height)
        }
    }
}

impl FromStr for Aspect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Aspect::Auto),
            "equal" => Ok(Aspect::Equal),
            _ => {
                let ratio = s
                    .parse::<f64>()
                    .map_err(|_| anyhow!("unknown aspect {:?}", s))?;
                Aspect::try_from(AspectSpec::Ratio(ratio))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AspectSpec {
    Ratio(f64),
    Name(String),
}

impl TryFrom<AspectSpec> for Aspect {
    type Error = anyhow::Error;

    fn try_from(spec: AspectSpec) -> Result<Self> {
        match spec {
            AspectSpec::Ratio(r) if r.is_finite() && r > 0.0 => {
                Ok(Aspect::Ratio(r))
            }
            AspectSpec::Ratio(r) => {
                Err(anyhow!("aspect ratio must be positive, got {}", r))
            }
            AspectSpec::Name(name) => name.parse(),
        }
    }
}

/// How to fill in the space between the centers of image cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Every cell is a flat block of color.
    #[default]
    Nearest,
    /// Blend linearly between neighboring cells.
    Bilinear,
}

impl Interpolation {
    /// Prepare `data` for drawing, one rectangle per output cell.
    pub fn resample(&self, data: &ArrayView2<f64>) -> Array2<f64> {
        match self {
            Interpolation::Nearest => data.to_owned(),
            Interpolation::Bilinear => bilinear(data, UPSAMPLE_FACTOR),
        }
    }
}

/// Upsample `data` by `factor` in both directions, sampling at the centers of
/// the output cells. Samples outside the outermost input centers are clamped
/// to the edge.
fn bilinear(data: &ArrayView2<f64>, factor: usize) -> Array2<f64> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return data.to_owned();
    }
    // Map an output index onto fractional input coordinates.
    let source = |i: usize, len: usize| -> (usize, usize, f64) {
        let x = (i as f64 + 0.5) / factor as f64 - 0.5;
        let x = x.clamp(0.0, (len - 1) as f64);
        let lo = x.floor() as usize;
        let hi = (lo + 1).min(len - 1);
        (lo, hi, x - lo as f64)
    };
    Array2::from_shape_fn((rows * factor, cols * factor), |(r, c)| {
        let (r0, r1, fr) = source(r, rows);
        let (c0, c1, fc) = source(c, cols);
        let top = data[[r0, c0]] * (1.0 - fc) + data[[r0, c1]] * fc;
        let bottom = data[[r1, c0]] * (1.0 - fc) + data[[r1, c1]] * fc;
        top * (1.0 - fr) + bottom * fr
    })
}
