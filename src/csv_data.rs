//! CSV format support.
//!
//! Our CSV files have no header row. A series is read from the first column
//! of every record, and a matrix uses one record per row:
//!
//! ```csv
//! 0.0,0.5,1.0
//! 0.2,0.7,0.1
//! ```

use std::{io, path::Path};

use anyhow::{anyhow, Context, Result};
use ndarray::{Array1, Array2};

fn reader<R: io::Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr)
}

/// Read a series of values from the first column of a CSV file.
pub fn read_series(path: &Path) -> Result<Array1<f64>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_series_from(file)
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Read a matrix from a CSV file, one record per row.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_matrix_from(file)
        .with_context(|| format!("failed to read {}", path.display()))
}

pub fn read_series_from<R: io::Read>(rdr: R) -> Result<Array1<f64>> {
    let mut values = Vec::new();
    for (line, result) in reader(rdr).records().enumerate() {
        let record = result?;
        let field = record
            .get(0)
            .ok_or_else(|| anyhow!("record {} is empty", line + 1))?;
        values.push(
            field.parse::<f64>().with_context(|| {
                format!("record {}: bad number {:?}", line + 1, field)
            })?,
        );
    }
    Ok(Array1::from_vec(values))
}

pub fn read_matrix_from<R: io::Read>(rdr: R) -> Result<Array2<f64>> {
    let mut rows = Vec::new();
    for (line, result) in reader(rdr).records().enumerate() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|s| s.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("record {}: bad number", line + 1))?,
        );
    }
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let ragged = rows.iter().enumerate().find(|(_, r)| r.len() != width);
    if let Some((i, row)) = ragged {
        return Err(anyhow!(
            "record {} has {} columns, expected {}",
            i + 1,
            row.len(),
            width
        ));
    }
    Ok(Array2::from_shape_vec(
        (rows.len(), width),
        rows.into_iter().flatten().collect(),
    )?)
}
