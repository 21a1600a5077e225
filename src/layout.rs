//! Figure layouts stored as JSON, so a whole figure can be described in a
//! file and drawn from the command line.
//!
//! ```json
//! {
//!     "title": "Activity",
//!     "monitor": "TM",
//!     "panels": [
//!         {
//!             "kind": "graph", "csv": "active.csv",
//!             "position": 211, "ylabel": "cells"
//!         },
//!         {
//!             "kind": "histogram", "csv": "overlap.csv",
//!             "position": 223, "bins": 20
//!         },
//!         {
//!             "kind": "image", "csv": "perm.csv",
//!             "position": 224, "cmap": "viridis"
//!         }
//!     ]
//! }
//! ```
//!
//! CSV paths are relative to the layout file.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::{
    csv_data::{read_matrix, read_series},
    monitor::NamedMonitor,
    plot::{GraphOptions, HistogramOptions, ImageOptions, Plot},
    window::FigureWindow,
};

/// A figure and all of its panels.
#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub title: String,
    /// The name of the monitor that owns this figure, if any.
    #[serde(default)]
    pub monitor: Option<String>,
    #[serde(default)]
    pub panels: Vec<Panel>,
}

/// One subplot, along with where to find its data.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Panel {
    Graph {
        csv: PathBuf,
        #[serde(flatten)]
        options: GraphOptions,
    },
    Image {
        /// A missing image is reported, but is not an error.
        #[serde(default)]
        csv: Option<PathBuf>,
        #[serde(flatten)]
        options: ImageOptions,
    },
    Histogram {
        csv: PathBuf,
        #[serde(flatten)]
        options: HistogramOptions,
    },
}

impl Layout {
    /// Load a layout from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| {
            format!("failed to open layout {}", path.display())
        })?;
        serde_json::from_reader(BufReader::new(file)).with_context(|| {
            format!("failed to parse layout {}", path.display())
        })
    }

    /// Draw every panel into a new plot shown in `window`. Relative CSV paths
    /// are resolved against `base_dir`.
    pub fn draw<W: FigureWindow>(
        &self,
        base_dir: &Path,
        window: W,
    ) -> Result<Plot<W>> {
        let monitor = NamedMonitor {
            name: self.monitor.clone(),
        };
        let mut plot = Plot::new(&monitor, self.title.as_str(), window)?;
        for panel in &self.panels {
            match panel {
                Panel::Graph { csv, options } => {
                    let data = read_series(&base_dir.join(csv))?;
                    debug!(
                        "Graph of {} values from {}",
                        data.len(),
                        csv.display()
                    );
                    plot.add_graph(&data, options)?;
                }
                Panel::Image { csv, options } => {
                    let data = csv
                        .as_ref()
                        .map(|csv| read_matrix(&base_dir.join(csv)))
                        .transpose()?;
                    plot.add_image(data.as_ref().map(|d| d.view()), options)?;
                }
                Panel::Histogram { csv, options } => {
                    let data = read_series(&base_dir.join(csv))?;
                    debug!(
                        "Histogram of {} values from {}",
                        data.len(),
                        csv.display()
                    );
                    plot.add_histogram(&data, options)?;
                }
            }
        }
        Ok(plot)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        figure::Artist, histogram::Bins, position::GridPosition,
        test_utils::RecordingWindow,
    };

    const LAYOUT: &str = r#"{
        "title": "Activity",
        "monitor": "TM",
        "panels": [
            {
                "kind": "graph", "csv": "series.csv",
                "position": 211, "ylabel": "cells"
            },
            {
                "kind": "histogram", "csv": "series.csv",
                "position": 223, "bins": 4
            },
            {
                "kind": "image", "csv": "matrix.csv",
                "position": 224, "aspect": "equal"
            },
            { "kind": "image" }
        ]
    }"#;

    #[test]
    fn parses_panels() {
        let layout: Layout = serde_json::from_str(LAYOUT).unwrap();
        assert_eq!(layout.monitor.as_deref(), Some("TM"));
        assert_eq!(layout.panels.len(), 4);
        match &layout.panels[1] {
            Panel::Histogram { csv, options } => {
                assert_eq!(csv, Path::new("series.csv"));
                assert_eq!(options.bins, Bins::Count(4));
                let position = GridPosition::from_code(223).unwrap();
                assert_eq!(options.position, position);
            }
            other => panic!("expected a histogram, got {:?}", other),
        }
        match &layout.panels[3] {
            Panel::Image { csv, .. } => assert_eq!(*csv, None),
            other => panic!("expected an image, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_kinds() {
        let json = r#"{
            "title": "x",
            "panels": [{ "kind": "pie", "csv": "a.csv" }]
        }"#;
        assert!(serde_json::from_str::<Layout>(json).is_err());
    }

    #[test]
    fn draws_panels_from_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("series.csv"), "1\n2\n2\n3\n").unwrap();
        fs::write(dir.path().join("matrix.csv"), "0,1\n1,0\n").unwrap();

        let layout: Layout = serde_json::from_str(LAYOUT).unwrap();
        let plot = layout.draw(dir.path(), RecordingWindow::default()).unwrap();

        let figure = plot.figure();
        assert_eq!(figure.title(), "[TM] Activity");
        // The image without data is skipped.
        assert_eq!(figure.subplot_count(), 3);
        assert_eq!(plot.window().redraws, 3);
        assert_eq!(figure.subplots()[0].ylabel.as_deref(), Some("cells"));
        assert!(matches!(figure.subplots()[2].artists[0], Artist::Image(_)));
    }

    #[test]
    fn missing_csv_is_an_error() {
        let layout: Layout = serde_json::from_str(LAYOUT).unwrap();
        let dir = Path::new("/nonexistent/monitor-plot");
        assert!(layout.draw(dir, RecordingWindow::default()).is_err());
    }
}
