//! Result table writing.
//!
//! Score tables are small CSVs built by hand: a `video,score` header and
//! one row per corpus video in listing order, scores rounded to five
//! decimal places.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use vidprint_models::{ColorModel, Metric, ModelSelection};

use crate::error::StoreResult;

/// Writes per-metric score tables under `<root>/csv/`.
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    root: PathBuf,
}

impl ResultsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn csv_dir(&self) -> PathBuf {
        self.root.join("csv")
    }

    /// Path of the table for one (selection, model, metric) run.
    pub fn table_path(
        &self,
        selection: ModelSelection,
        model: ColorModel,
        metric: Metric,
    ) -> PathBuf {
        self.csv_dir().join(table_file_name(selection, model, metric))
    }

    /// Write one metric run's score table, overwriting any previous table.
    pub async fn write_scores(
        &self,
        selection: ModelSelection,
        model: ColorModel,
        metric: Metric,
        rows: &[(&str, f64)],
    ) -> StoreResult<PathBuf> {
        let dir = self.csv_dir();
        fs::create_dir_all(&dir).await?;

        let mut csv = String::with_capacity(16 + rows.len() * 32);
        csv.push_str("video,score\n");
        for (video, score) in rows {
            csv.push_str(&format!("{},{:.5}\n", video, score));
        }

        let path = dir.join(table_file_name(selection, model, metric));
        fs::write(&path, csv).await?;
        debug!(table = %path.display(), rows = rows.len(), "wrote score table");
        Ok(path)
    }
}

/// Table file name for one metric run.
///
/// A combined run prefixes the concrete model so its three passes do not
/// collide: `all-gray-correlation.csv` vs `gray-correlation.csv`.
pub fn table_file_name(selection: ModelSelection, model: ColorModel, metric: Metric) -> String {
    match selection {
        ModelSelection::All => format!("all-{}-{}.csv", model, metric.slug()),
        _ => format!("{}-{}.csv", model, metric.slug()),
    }
}

/// Write a shot-boundary divergence series as CSV.
///
/// Row `k` holds the divergence of the frame pair `(k, k + 1)` keyed by the
/// pair's second frame.
pub async fn write_divergence_series(path: impl AsRef<Path>, series: &[f64]) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut csv = String::with_capacity(18 + series.len() * 16);
    csv.push_str("frame,divergence\n");
    for (k, divergence) in series.iter().enumerate() {
        csv.push_str(&format!("{},{:.5}\n", k + 1, divergence));
    }

    fs::write(path, csv).await?;
    debug!(series = %path.display(), pairs = series.len(), "wrote divergence series");
    Ok(())
}
