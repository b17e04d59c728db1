//! Shot boundary detection command.

use clap::Args;
use std::path::PathBuf;

use vidprint_media::{scan_shot_boundaries, BoundaryConfig};
use vidprint_store::write_divergence_series;

use crate::config::AppConfig;

/// Detect shot boundaries in a video.
#[derive(Args, Debug)]
pub struct CmdShots {
    /// Video file to scan
    #[arg(long)]
    pub video: PathBuf,

    /// Write the per-pair divergence series to this CSV file
    #[arg(long)]
    pub series_csv: Option<PathBuf>,
}

impl CmdShots {
    /// Execute the shots command.
    pub async fn run(&self, _config: &AppConfig) -> anyhow::Result<()> {
        let scan = scan_shot_boundaries(&self.video, &BoundaryConfig::default()).await?;

        println!(
            "{}: {} frame(s), {} boundary event(s)",
            self.video.display(),
            scan.frames_scanned,
            scan.events.len()
        );
        for event in &scan.events {
            println!(
                "  frame {:>6}  divergence {:>10.5}",
                event.frame_index, event.divergence
            );
        }

        if let Some(path) = &self.series_csv {
            write_divergence_series(path, &scan.series).await?;
            println!("Divergence series written to {}", path.display());
        }
        Ok(())
    }
}
