//! Query-against-corpus comparison command.

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use vidprint_match::{MatchEngine, MatchReport};
use vidprint_media::{fingerprint_video, write_region_preview};
use vidprint_models::{ModelSelection, RegionOfInterest};
use vidprint_store::{list_video_files, FingerprintStore, ResultsWriter};

use crate::config::AppConfig;

/// Compare a query video against the indexed corpus.
#[derive(Args, Debug)]
pub struct CmdMatch {
    /// Query video file
    #[arg(long)]
    pub query: PathBuf,

    /// Directory of corpus videos
    #[arg(long)]
    pub footage: PathBuf,

    /// Color models to run (gray, rgb, hsv or all)
    #[arg(long, default_value = "all")]
    pub model: ModelSelection,

    /// Region of interest on the query, as x0,y0,x1,y1 pixel corners
    #[arg(long)]
    pub roi: Option<RegionOfInterest>,
}

impl CmdMatch {
    /// Execute the match command.
    pub async fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let query_name = self
            .query
            .file_name()
            .and_then(|n| n.to_str())
            .context("query path has no usable file name")?
            .to_string();

        let store = FingerprintStore::new(&config.data_dir);
        let results = ResultsWriter::new(&config.results_dir);
        let corpus = list_video_files(&self.footage).await?;

        if config.debug {
            if let Some(roi) = &self.roi {
                if let Err(e) = write_preview(&config.results_dir, &self.query, roi).await {
                    warn!(error = %e, "could not write region preview");
                }
            }
        }

        info!(query = query_name.as_str(), models = %self.model, "fingerprinting query");
        for &model in self.model.models() {
            let fingerprint = fingerprint_video(&self.query, model, self.roi.as_ref()).await?;
            store.save_fingerprint(&query_name, &fingerprint).await?;
        }

        let engine = MatchEngine::new(store, results);
        let report = engine.run(self.model, &query_name, &corpus).await?;
        print_report(&report);
        Ok(())
    }
}

async fn write_preview(
    results_dir: &Path,
    query: &Path,
    roi: &RegionOfInterest,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(results_dir).await?;
    write_region_preview(query, roi, results_dir.join("roi-preview.png")).await?;
    Ok(())
}

fn print_report(report: &MatchReport) {
    println!();
    println!("Query: {}", report.query);
    for run in &report.runs {
        println!();
        println!("[{}] {}", run.model, run.metric);
        for row in &run.rows {
            println!("  {:<40} {:>12.5}", row.video, row.score);
        }
        println!("  best: {} ({:.5})", run.outcome.winner, run.outcome.score);
    }

    println!();
    println!("Votes:");
    for count in &report.tally {
        println!("  {:<40} {:>4}", count.video, count.votes);
    }
    match &report.verdict {
        Some(winner) => {
            let votes = report
                .tally
                .iter()
                .find(|c| &c.video == winner)
                .map(|c| c.votes)
                .unwrap_or(0);
            println!("Best match: {} ({} of {} votes)", winner, votes, report.total_votes());
        }
        None => println!("No verdict"),
    }
}
