use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use monitor_plot::{
    layout::Layout, window::window_for_path, Bins, Colormap, FigureWindow,
    GraphOptions, GridPosition, HistogramOptions, ImageOptions, NamedMonitor,
    Plot,
};
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Draw monitor figures as SVG or PNG files.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Draw a figure described by a JSON layout file.
    Render(RenderOpt),
    /// Draw a figure of random data, to check that everything works.
    Demo(DemoOpt),
}

#[derive(Debug, Parser)]
struct RenderOpt {
    /// Path to the JSON layout file.
    layout: PathBuf,

    #[command(flatten)]
    output: OutputOpt,
}

#[derive(Debug, Parser)]
struct DemoOpt {
    /// Name of the monitor that "owns" the figure.
    #[arg(long = "monitor")]
    monitor: Option<String>,

    /// Random seed.
    #[arg(long = "seed", default_value = "0")]
    seed: u64,

    #[command(flatten)]
    output: OutputOpt,
}

#[derive(Debug, Parser)]
struct OutputOpt {
    /// Where to write the figure. Must end in `.svg` or `.png`.
    #[arg(long = "output", short = 'o')]
    output: PathBuf,

    /// Figure width in pixels.
    #[arg(long = "width", default_value = "800")]
    width: u32,

    /// Figure height in pixels.
    #[arg(long = "height", default_value = "600")]
    height: u32,
}

impl OutputOpt {
    fn window(&self) -> Result<Box<dyn FigureWindow>> {
        window_for_path(&self.output, (self.width, self.height))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::parse();
    match opt.cmd {
        Cmd::Render(opt) => render(&opt),
        Cmd::Demo(opt) => demo(&opt),
    }
}

fn render(opt: &RenderOpt) -> Result<()> {
    let layout = Layout::load(&opt.layout)?;
    let base_dir = opt.layout.parent().unwrap_or_else(|| Path::new("."));
    let window = opt.output.window()?;
    let plot = layout.draw(base_dir, window)?;
    let path = &opt.output.output;
    plot.close()
        .with_context(|| format!("failed to finish {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn demo(opt: &DemoOpt) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(opt.seed);
    let monitor = NamedMonitor {
        name: opt.monitor.clone(),
    };
    let window = opt.output.window()?;
    let mut plot = Plot::new(&monitor, "Demo", window)?;

    // A random walk.
    let mut walker = 0.0;
    let walk = (0..200)
        .map(|_| {
            walker += rng.gen_range(-1.0..1.0);
            walker
        })
        .collect::<Array1<f64>>();
    plot.add_graph(
        &walk,
        &GraphOptions {
            position: GridPosition::from_code(221)?,
            xlabel: Some("Step".to_owned()),
            ylabel: Some("Position".to_owned()),
        },
    )?;

    // Uniform noise.
    let noise = Array2::from_shape_fn((16, 24), |_| rng.gen::<f64>());
    plot.add_image(
        Some(noise.view()),
        &ImageOptions {
            position: GridPosition::from_code(222)?,
            cmap: Colormap::Viridis,
            ..ImageOptions::default()
        },
    )?;

    // Roughly normal values, as the sum of uniform ones.
    let sums = (0..1000)
        .map(|_| (0..4).map(|_| rng.gen::<f64>()).sum::<f64>())
        .collect::<Vec<_>>();
    plot.add_histogram(
        &sums,
        &HistogramOptions {
            position: GridPosition::from_code(212)?,
            xlabel: Some("Sum of 4 uniform samples".to_owned()),
            bins: Bins::Count(20),
            ..HistogramOptions::default()
        },
    )?;

    plot.close()?;
    info!("Wrote {}", opt.output.output.display());
    Ok(())
}
