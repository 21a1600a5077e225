//! Plots used by monitors to show their internal state.
use anyhow::Result;
use log::{debug, trace, warn};
use ndarray::{ArrayView1, ArrayView2};
use serde::Deserialize;

use crate::{
    colormap::Colormap,
    figure::{
        Artist, Figure, HistogramArtist, ImageArtist, Subplot, HISTOGRAM_ALPHA,
        HISTOGRAM_COLOR,
    },
    histogram::{Bins, Histogram},
    image::{Aspect, Interpolation},
    monitor::{pretty_title, Monitor},
    position::GridPosition,
    window::FigureWindow,
};

/// Options for [`Plot::add_graph`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Where to put the subplot. Defaults to `111`, the whole figure.
    pub position: GridPosition,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
}

/// Options for [`Plot::add_image`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub position: GridPosition,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Defaults to [`Colormap::Greys`].
    pub cmap: Colormap,
    /// Defaults to [`Aspect::Auto`].
    pub aspect: Aspect,
    /// Defaults to [`Interpolation::Nearest`].
    pub interpolation: Interpolation,
}

/// Options for [`Plot::add_histogram`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistogramOptions {
    pub position: GridPosition,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Defaults to [`Bins::Auto`].
    pub bins: Bins,
}

/// A titled figure owned by a monitor. Every `add_*` call adds a new subplot
/// and redraws the figure in its window.
///
/// The figure lives exactly as long as the `Plot`. Call [`Plot::close`] to do
/// a final redraw and release the window; simply dropping the `Plot` is also
/// fine, and does no further drawing.
pub struct Plot<W: FigureWindow> {
    title: String,
    figure: Figure,
    window: W,
}

impl<W: FigureWindow> Plot<W> {
    /// Create a plot for `monitor`, and show it in `window`.
    ///
    /// The monitor is only consulted here, to build the figure title.
    pub fn new(
        monitor: &dyn Monitor,
        title: impl Into<String>,
        mut window: W,
    ) -> Result<Self> {
        let title = title.into();
        let figure = Figure::new(pretty_title(monitor, &title));
        debug!("Created figure {:?}", figure.title());
        window.show(&figure)?;
        Ok(Self {
            title,
            figure,
            window,
        })
    }

    /// The title we were created with, without the monitor name.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Plot `data` as a line against its index.
    pub fn add_graph<'a>(
        &mut self,
        data: impl Into<ArrayView1<'a, f64>>,
        opt: &GraphOptions,
    ) -> Result<()> {
        let data = data.into().to_owned();
        let subplot = self.add_base(
            opt.position,
            opt.xlabel.as_deref(),
            opt.ylabel.as_deref(),
        );
        subplot.add_artist(Artist::Line(data));
        self.redraw()
    }

    /// Show `data` as an image, one colored cell per element. Passing `None`
    /// logs a warning and changes nothing.
    pub fn add_image(
        &mut self,
        data: Option<ArrayView2<'_, f64>>,
        opt: &ImageOptions,
    ) -> Result<()> {
        let Some(data) = data else {
            warn!("Cannot show None");
            return Ok(());
        };
        let subplot = self.add_base(
            opt.position,
            opt.xlabel.as_deref(),
            opt.ylabel.as_deref(),
        );
        subplot.add_artist(Artist::Image(ImageArtist {
            data: data.to_owned(),
            cmap: opt.cmap,
            aspect: opt.aspect,
            interpolation: opt.interpolation,
        }));
        self.redraw()
    }

    /// Show a histogram of `data`.
    pub fn add_histogram<'a>(
        &mut self,
        data: impl Into<ArrayView1<'a, f64>>,
        opt: &HistogramOptions,
    ) -> Result<()> {
        let values = data.into().to_vec();
        // Bin first, so bad bins leave the figure untouched.
        let histogram = Histogram::compute(&values, &opt.bins)?;
        let subplot = self.add_base(
            opt.position,
            opt.xlabel.as_deref(),
            opt.ylabel.as_deref(),
        );
        subplot.add_artist(Artist::Histogram(HistogramArtist {
            histogram,
            color: HISTOGRAM_COLOR,
            alpha: HISTOGRAM_ALPHA,
        }));
        self.redraw()
    }

    /// Do a final redraw and release our window.
    pub fn close(mut self) -> Result<()> {
        self.redraw()?;
        self.window.close()
    }

    /// Add a labeled subplot to our figure, ready to draw into.
    fn add_base(
        &mut self,
        position: GridPosition,
        xlabel: Option<&str>,
        ylabel: Option<&str>,
    ) -> &mut Subplot {
        debug!("Adding subplot {} to {:?}", position, self.figure.title());
        let subplot = self.figure.add_subplot(position);
        subplot.set_xlabel(xlabel);
        subplot.set_ylabel(ylabel);
        subplot
    }

    fn redraw(&mut self) -> Result<()> {
        trace!("Redrawing {:?}", self.figure.title());
        self.window.redraw(&self.figure)
    }
}
