//! Draw a [`Figure`] with `plotters`. Works on any drawing backend, so the
//! same code writes SVG files, PNG files or in-memory buffers.

use std::ops::Range;

use anyhow::{anyhow, Result};
use log::trace;
use ndarray::Array1;
use plotters::{
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::{
        ChartBuilder, ChartContext, DrawingArea, DrawingBackend, Rectangle,
    },
    series::LineSeries,
    style::{Color, IntoFont, WHITE},
};

use crate::{
    colormap::Normalize,
    figure::{
        Artist, Figure, HistogramArtist, ImageArtist, Subplot, LINE_COLOR,
    },
    image::Aspect,
};

const TITLE_FONT_SIZE: i32 = 24;
const SUBPLOT_MARGIN: u32 = 8;
const X_LABEL_AREA: u32 = 35;
const Y_LABEL_AREA: u32 = 50;

/// How much empty space to leave around line data, as a fraction of its
/// range.
const LINE_PADDING: f64 = 0.05;

type Chart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draw `figure` onto `root`, replacing whatever was there.
pub fn render_figure<DB>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let area = if figure.title().is_empty() {
        root.clone()
    } else {
        let font = ("sans-serif", TITLE_FONT_SIZE).into_font();
        root.titled(figure.title(), font)?
    };

    for subplot in figure.subplots() {
        let position = subplot.position;
        let cell = area
            .split_evenly((position.rows(), position.cols()))
            .into_iter()
            .nth(position.index() - 1)
            .ok_or_else(|| anyhow!("no grid cell for subplot {}", position))?;
        trace!("Drawing subplot {}", position);
        draw_subplot(subplot, &cell)?;
    }

    root.present()?;
    Ok(())
}

/// Draw a single subplot, filling `cell`.
fn draw_subplot<DB>(
    subplot: &Subplot,
    cell: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let cell = fit_image_aspect(subplot, cell);
    let (x_range, y_range) = subplot_ranges(subplot);
    check_range("x", &x_range)?;
    check_range("y", &y_range)?;

    let mut chart = ChartBuilder::on(&cell)
        .margin(SUBPLOT_MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_range.clone())?;

    let has_image = subplot
        .artists
        .iter()
        .any(|a| matches!(a, Artist::Image(_)));
    // Images put row 0 at the top, so flip the row labels to match.
    let flip_rows = |y: &f64| row_label(y_range.end, *y);
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(subplot.xlabel.as_deref().unwrap_or(""))
            .y_desc(subplot.ylabel.as_deref().unwrap_or(""));
        if has_image {
            mesh.disable_x_mesh()
                .disable_y_mesh()
                .y_label_formatter(&flip_rows);
        }
        mesh.draw()?;
    }

    for artist in &subplot.artists {
        match artist {
            Artist::Line(data) => draw_line(&mut chart, data)?,
            Artist::Image(image) => draw_image(&mut chart, image)?,
            Artist::Histogram(hist) => draw_histogram(&mut chart, hist)?,
        }
    }
    Ok(())
}

/// Shrink `cell` so that a fixed-aspect image gets correctly shaped cells.
fn fit_image_aspect<DB: DrawingBackend>(
    subplot: &Subplot,
    cell: &DrawingArea<DB, Shift>,
) -> DrawingArea<DB, Shift> {
    let image = subplot.artists.iter().find_map(|a| match a {
        Artist::Image(image) if image.aspect != Aspect::Auto => Some(image),
        _ => None,
    });
    let Some(image) = image else {
        return cell.clone();
    };

    let (width, height) = cell.dim_in_pixel();
    let extra_x = Y_LABEL_AREA + 2 * SUBPLOT_MARGIN;
    let extra_y = X_LABEL_AREA + 2 * SUBPLOT_MARGIN;
    let plot_area = (
        width.saturating_sub(extra_x),
        height.saturating_sub(extra_y),
    );
    let (rows, cols) = image.data.dim();
    let (fit_width, fit_height) = image.aspect.fit(plot_area, rows, cols);
    let (new_width, new_height) = (fit_width + extra_x, fit_height + extra_y);
    let left = (width.saturating_sub(new_width) / 2) as i32;
    let top = (height.saturating_sub(new_height) / 2) as i32;
    cell.clone()
        .shrink((left, top), (new_width as i32, new_height as i32))
}

/// The data ranges covering every artist in `subplot`.
fn subplot_ranges(subplot: &Subplot) -> (Range<f64>, Range<f64>) {
    subplot
        .artists
        .iter()
        .map(artist_ranges)
        .reduce(|(ax, ay), (bx, by)| (union(ax, bx), union(ay, by)))
        .unwrap_or((0.0..1.0, 0.0..1.0))
}

fn artist_ranges(artist: &Artist) -> (Range<f64>, Range<f64>) {
    match artist {
        Artist::Line(data) => {
            let x = widen(0.0..data.len().saturating_sub(1) as f64);
            let (lo, hi) = data
                .iter()
                .filter(|v| v.is_finite())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            let y = if lo > hi {
                0.0..1.0
            } else {
                // Scale before subtracting, since `hi - lo` may overflow.
                let pad = hi * LINE_PADDING - lo * LINE_PADDING;
                widen((lo - pad)..(hi + pad))
            };
            (x, y)
        }
        Artist::Image(image) => {
            let (rows, cols) = image.data.dim();
            (widen(0.0..cols as f64), widen(0.0..rows as f64))
        }
        Artist::Histogram(hist) => {
            let edges = hist.histogram.edges();
            let x = edges[0]..edges[edges.len() - 1];
            let top = hist.histogram.max_count() as f64 * (1.0 + LINE_PADDING);
            (x, widen(0.0..top))
        }
    }
}

fn union(a: Range<f64>, b: Range<f64>) -> Range<f64> {
    a.start.min(b.start)..a.end.max(b.end)
}

/// Refuse ranges that `plotters` can't lay out. Their width must be finite
/// as well as their ends.
fn check_range(axis: &str, range: &Range<f64>) -> Result<()> {
    let width = range.end - range.start;
    let ends_finite = range.start.is_finite() && range.end.is_finite();
    if !ends_finite || !width.is_finite() {
        return Err(anyhow!(
            "{} data range {:?} is too large to draw",
            axis,
            range
        ));
    }
    Ok(())
}

/// Label an image row tick. Ticks between rows get no label.
fn row_label(top: f64, y: f64) -> String {
    let row = top - y;
    if (row - row.round()).abs() < 1e-9 {
        format!("{:.0}", row.round())
    } else {
        String::new()
    }
}

/// Give degenerate ranges some width so the chart has something to show.
fn widen(range: Range<f64>) -> Range<f64> {
    if range.end > range.start {
        range
    } else {
        (range.start - 0.5)..(range.end + 0.5)
    }
}

/// Draw `data` as a line against its index. Non-finite values break the line.
fn draw_line<DB>(
    chart: &mut Chart<'_, DB>,
    data: &Array1<f64>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut segment = vec![];
    let points = data
        .iter()
        .enumerate()
        .map(|(x, &y)| (x as f64, y))
        .chain(std::iter::once((f64::NAN, f64::NAN)));
    for (x, y) in points {
        if y.is_finite() {
            segment.push((x, y));
        } else if !segment.is_empty() {
            let series = LineSeries::new(segment.drain(..), &LINE_COLOR);
            chart.draw_series(series)?;
        }
    }
    Ok(())
}

/// Draw a histogram as one bar per bin.
fn draw_histogram<DB>(
    chart: &mut Chart<'_, DB>,
    hist: &HistogramArtist,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let style = hist.color.mix(hist.alpha).filled();
    chart.draw_series(
        hist.histogram
            .bins()
            .filter(|&(_, _, count)| count > 0)
            .map(|(left, right, count)| {
                Rectangle::new([(left, 0.0), (right, count as f64)], style)
            }),
    )?;
    Ok(())
}

/// Draw a matrix as a grid of colored cells, with row 0 at the top.
fn draw_image<DB>(
    chart: &mut Chart<'_, DB>,
    image: &ImageArtist,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (rows, cols) = image.data.dim();
    let norm = Normalize::from_data(&image.data.view());
    let samples = image.interpolation.resample(&image.data.view());
    let (sample_rows, sample_cols) = samples.dim();
    if sample_rows == 0 || sample_cols == 0 {
        return Ok(());
    }
    let cell_height = rows as f64 / sample_rows as f64;
    let cell_width = cols as f64 / sample_cols as f64;

    chart.draw_series(samples.indexed_iter().filter_map(|((r, c), &value)| {
        let t = norm.apply(value)?;
        let top = rows as f64 - r as f64 * cell_height;
        let left = c as f64 * cell_width;
        Some(Rectangle::new(
            [(left, top), (left + cell_width, top - cell_height)],
            image.cmap.color(t).filled(),
        ))
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2};
    use plotters::prelude::IntoDrawingArea;
    use plotters_svg::SVGBackend;

    use super::*;
    use crate::{
        colormap::Colormap,
        histogram::{Bins, Histogram},
        image::Interpolation,
        position::GridPosition,
    };

    fn histogram_artist(data: &[f64], bins: Bins) -> Artist {
        Artist::Histogram(HistogramArtist {
            histogram: Histogram::compute(data, &bins).unwrap(),
            color: crate::figure::HISTOGRAM_COLOR,
            alpha: crate::figure::HISTOGRAM_ALPHA,
        })
    }

    fn render_to_svg(figure: &Figure) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (800, 600))
                .into_drawing_area();
            render_figure(figure, &root)?;
        }
        Ok(svg)
    }

    fn subplot_with(artists: Vec<Artist>) -> Subplot {
        let mut figure = Figure::new("");
        let subplot = figure.add_subplot(GridPosition::default());
        subplot.artists = artists;
        subplot.clone()
    }

    #[test]
    fn empty_subplot_gets_unit_ranges() {
        let (x, y) = subplot_ranges(&subplot_with(vec![]));
        assert_eq!((x, y), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn line_ranges_are_padded() {
        let line = Artist::Line(arr1(&[0.0, 10.0, f64::NAN, 5.0]));
        let (x, y) = subplot_ranges(&subplot_with(vec![line]));
        assert_relative_eq!(x.end, 3.0);
        assert_relative_eq!(y.start, -0.5);
        assert_relative_eq!(y.end, 10.5);
    }

    #[test]
    fn single_point_line_is_widened() {
        let line = Artist::Line(arr1(&[2.0]));
        let (x, y) = subplot_ranges(&subplot_with(vec![line]));
        assert_eq!(x, -0.5..0.5);
        assert_eq!(y, 1.5..2.5);
    }

    #[test]
    fn histogram_and_image_ranges() {
        let hist = histogram_artist(&[1.0, 2.0, 2.0, 3.0], Bins::Count(2));
        let (x, y) = subplot_ranges(&subplot_with(vec![hist]));
        assert_eq!(x, 1.0..3.0);
        assert_relative_eq!(y.end, 3.0 * (1.0 + LINE_PADDING));

        let image = Artist::Image(ImageArtist {
            data: arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]),
            cmap: Colormap::Greys,
            aspect: Aspect::Auto,
            interpolation: Interpolation::Nearest,
        });
        let (x, y) = subplot_ranges(&subplot_with(vec![image]));
        assert_eq!((x, y), (0.0..3.0, 0.0..2.0));
    }

    #[test]
    fn huge_line_ranges_stay_finite() {
        let line = Artist::Line(arr1(&[-1e308, 1e308]));
        let (_, y) = subplot_ranges(&subplot_with(vec![line]));
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!(y.start < -1e308 && y.end > 1e308);
    }

    #[test]
    fn unbounded_ranges_are_refused() {
        assert!(check_range("y", &(0.0..1e308)).is_ok());
        assert!(check_range("y", &(-1e308..1e308)).is_err());
        assert!(check_range("y", &(0.0..f64::INFINITY)).is_err());
        assert!(check_range("x", &(f64::NAN..1.0)).is_err());

        let mut figure = Figure::new("Too wide");
        figure
            .add_subplot(GridPosition::default())
            .add_artist(Artist::Line(arr1(&[-1e308, 1e308])));
        assert!(render_to_svg(&figure).is_err());

        let mut figure = Figure::new("Too wide");
        figure
            .add_subplot(GridPosition::default())
            .add_artist(histogram_artist(&[-1e308, 1e308], Bins::Auto));
        assert!(render_to_svg(&figure).is_err());
    }

    #[test]
    fn row_labels_only_on_whole_rows() {
        assert_eq!(row_label(4.0, 4.0), "0");
        assert_eq!(row_label(4.0, 1.0), "3");
        assert_eq!(row_label(4.0, 1.5), "");
        assert_eq!(row_label(2.0, 0.25), "");
    }

    #[test]
    fn renders_every_artist_kind() {
        let mut figure = Figure::new("[M1] Foo");

        let graph = figure.add_subplot(GridPosition::from_code(221).unwrap());
        graph.set_xlabel(Some("step"));
        graph.set_ylabel(Some("value"));
        graph.add_artist(Artist::Line(arr1(&[0.0, 1.0, f64::NAN, 0.5, 2.0])));

        let image = figure.add_subplot(GridPosition::from_code(222).unwrap());
        image.add_artist(Artist::Image(ImageArtist {
            data: arr2(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]),
            cmap: Colormap::Viridis,
            aspect: Aspect::Equal,
            interpolation: Interpolation::Bilinear,
        }));

        let hist = figure.add_subplot(GridPosition::from_code(212).unwrap());
        hist.set_xlabel(Some("bucket"));
        hist.add_artist(histogram_artist(&[1.0, 2.0, 2.0, 3.0], Bins::Auto));

        // Empty artists still draw.
        let empty = figure.add_subplot(GridPosition::from_code(221).unwrap());
        empty.add_artist(Artist::Line(arr1(&[])));

        let svg = render_to_svg(&figure).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("[M1] Foo"));
        assert!(svg.contains("step"));
        assert!(svg.contains("value"));
        assert!(svg.contains("bucket"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<polyline"));
    }
}
