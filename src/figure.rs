//! The in-memory description of a figure: a title and a stack of subplots.
//!
//! Nothing here draws anything. See [`crate::render`] for that.

use ndarray::{Array1, Array2};
use plotters::style::RGBColor;

use crate::{
    colormap::Colormap,
    histogram::Histogram,
    image::{Aspect, Interpolation},
    position::GridPosition,
};

/// The color used for line graphs.
pub const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// The fill color used for histograms.
pub const HISTOGRAM_COLOR: RGBColor = RGBColor(0, 128, 0);

/// The opacity used for histograms.
pub const HISTOGRAM_ALPHA: f64 = 0.8;

/// A figure with a title and any number of subplots.
#[derive(Debug, Clone, Default)]
pub struct Figure {
    title: String,
    subplots: Vec<Subplot>,
}

impl Figure {
    /// Create an empty figure.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subplots: vec![],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subplots(&self) -> &[Subplot] {
        &self.subplots
    }

    pub fn subplot_count(&self) -> usize {
        self.subplots.len()
    }

    /// Add a new subplot at `position`. Existing subplots are never replaced,
    /// even at the same position; later subplots are drawn on top.
    pub fn add_subplot(&mut self, position: GridPosition) -> &mut Subplot {
        self.subplots.push(Subplot {
            position,
            xlabel: None,
            ylabel: None,
            artists: vec![],
        });
        self.subplots.last_mut().expect("just pushed a subplot")
    }
}

/// A labeled region of a figure.
#[derive(Debug, Clone)]
pub struct Subplot {
    pub position: GridPosition,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub artists: Vec<Artist>,
}

impl Subplot {
    pub fn set_xlabel(&mut self, label: Option<&str>) {
        self.xlabel = label.map(str::to_owned);
    }

    pub fn set_ylabel(&mut self, label: Option<&str>) {
        self.ylabel = label.map(str::to_owned);
    }

    pub fn add_artist(&mut self, artist: Artist) {
        self.artists.push(artist);
    }
}

/// Something drawn inside a subplot.
#[derive(Debug, Clone)]
pub enum Artist {
    /// A line through `(i, data[i])`.
    Line(Array1<f64>),
    Image(ImageArtist),
    Histogram(HistogramArtist),
}

/// A matrix drawn as a grid of colored cells.
#[derive(Debug, Clone)]
pub struct ImageArtist {
    pub data: Array2<f64>,
    pub cmap: Colormap,
    pub aspect: Aspect,
    pub interpolation: Interpolation,
}

/// A histogram drawn as filled bars.
#[derive(Debug, Clone)]
pub struct HistogramArtist {
    pub histogram: Histogram,
    pub color: RGBColor,
    pub alpha: f64,
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::*;

    #[test]
    fn subplots_accumulate() {
        let mut figure = Figure::new("Foo");
        let p = GridPosition::default();
        figure.add_subplot(p).set_xlabel(Some("time"));
        figure.add_subplot(p).add_artist(Artist::Line(arr1(&[1.0])));

        assert_eq!(figure.title(), "Foo");
        assert_eq!(figure.subplot_count(), 2);
        assert_eq!(figure.subplots()[0].xlabel.as_deref(), Some("time"));
        assert_eq!(figure.subplots()[0].ylabel, None);
        assert_eq!(figure.subplots()[1].artists.len(), 1);
    }
}
