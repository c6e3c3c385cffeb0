//! Point and polygon tables on disk.
//!
//! Inputs are CSV (with header) or Parquet files carrying numeric `x` and `y`
//! columns; the format is picked from the file extension.

use anyhow::{bail, Context, Result};
use nalgebra::Vector2;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Read `x`/`y` columns as points, in file order.
pub fn read_points(path: &str) -> Result<Vec<Vector2<f64>>> {
    let lf = if path.ends_with(".parquet") {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .with_context(|| format!("scanning {path}"))?
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("reading {path}"))?
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("{path}: expected numeric columns `x` and `y`"))?;

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Vector2::new(x, y)),
            _ => bail!("{path}: row {row} has a missing coordinate"),
        }
    }
    tracing::info!(path, rows = out.len(), "points_loaded");
    Ok(out)
}

/// Write points as a two-column CSV with header `x,y`.
pub fn write_points(path: &Path, points: &[Vector2<f64>]) -> Result<()> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
