//! Places where a figure can be shown.
//!
//! We have no GUI event loop. Instead, a window is anything that accepts the
//! whole figure every time it changes. The file windows re-render on every
//! redraw, so an image viewer watching the file acts as a live display.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::trace;
use plotters::prelude::{BitMapBackend, IntoDrawingArea};
use plotters_svg::SVGBackend;

use crate::{figure::Figure, render::render_figure};

/// The default size of a figure, in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (800, 600);

/// A display for a [`Figure`].
pub trait FigureWindow {
    /// Show the figure for the first time. Must not block.
    fn show(&mut self, figure: &Figure) -> Result<()>;

    /// The figure has changed, draw it again.
    fn redraw(&mut self, figure: &Figure) -> Result<()>;

    /// Release the window. Most windows have nothing to do here.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<W: FigureWindow + ?Sized> FigureWindow for Box<W> {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        (**self).show(figure)
    }

    fn redraw(&mut self, figure: &Figure) -> Result<()> {
        (**self).redraw(figure)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<W: FigureWindow + ?Sized> FigureWindow for &mut W {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        (**self).show(figure)
    }

    fn redraw(&mut self, figure: &Figure) -> Result<()> {
        (**self).redraw(figure)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// A window that writes the figure to an SVG file.
#[derive(Debug, Clone)]
pub struct SvgWindow {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgWindow {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, figure: &Figure) -> Result<()> {
        trace!("Writing {}", self.path.display());
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        render_figure(figure, &root)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl FigureWindow for SvgWindow {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.write(figure)
    }

    fn redraw(&mut self, figure: &Figure) -> Result<()> {
        self.write(figure)
    }
}

/// A window that writes the figure to a PNG file.
#[derive(Debug, Clone)]
pub struct PngWindow {
    path: PathBuf,
    size: (u32, u32),
}

impl PngWindow {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32)) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, figure: &Figure) -> Result<()> {
        trace!("Writing {}", self.path.display());
        let root =
            BitMapBackend::new(&self.path, self.size).into_drawing_area();
        render_figure(figure, &root)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl FigureWindow for PngWindow {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.write(figure)
    }

    fn redraw(&mut self, figure: &Figure) -> Result<()> {
        self.write(figure)
    }
}

/// Pick a file window based on the extension of `path`.
pub fn window_for_path(
    path: &Path,
    size: (u32, u32),
) -> Result<Box<dyn FigureWindow>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("svg") => Ok(Box::new(SvgWindow::new(path, size))),
        Some("png") => Ok(Box::new(PngWindow::new(path, size))),
        _ => Err(anyhow!(
            "don't know how to display a figure as {} (expected .svg or .png)",
            path.display()
        )),
    }
}
