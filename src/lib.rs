//! Figures for monitors: line graphs, images and histograms of internal
//! algorithm state, drawn with `plotters`.
//!
//! ```no_run
//! use monitor_plot::{GraphOptions, NamedMonitor, Plot, SvgWindow};
//!
//! # fn main() -> anyhow::Result<()> {
//! let monitor = NamedMonitor::new("TM");
//! let window = SvgWindow::new("activity.svg", (800, 600));
//! let mut plot = Plot::new(&monitor, "Active cells", window)?;
//! plot.add_graph(&[3.0f64, 5.0, 4.0], &GraphOptions::default())?;
//! plot.close()?;
//! # Ok(())
//! # }
//! ```

pub mod colormap;
pub mod csv_data;
pub mod figure;
pub mod histogram;
pub mod image;
pub mod layout;
pub mod monitor;
pub mod plot;
pub mod position;
pub mod render;
#[cfg(test)]
mod test_utils;
pub mod window;

pub use colormap::Colormap;
pub use figure::Figure;
pub use histogram::Bins;
pub use image::{Aspect, Interpolation};
pub use monitor::{Monitor, NamedMonitor};
pub use plot::{GraphOptions, HistogramOptions, ImageOptions, Plot};
pub use position::GridPosition;
pub use window::{FigureWindow, PngWindow, SvgWindow};
