//! Corpus indexing command.

use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use vidprint_media::fingerprint_video;
use vidprint_models::ModelSelection;
use vidprint_store::{list_video_files, FingerprintStore};

use crate::config::AppConfig;

/// Fingerprint every video in a footage directory.
#[derive(Args, Debug)]
pub struct CmdIndex {
    /// Directory of corpus videos
    #[arg(long)]
    pub footage: PathBuf,

    /// Color models to compute (gray, rgb, hsv or all)
    #[arg(long, default_value = "all")]
    pub model: ModelSelection,
}

impl CmdIndex {
    /// Execute the index command.
    ///
    /// Videos that fail to open or decode are logged and skipped so one bad
    /// file cannot abort a corpus run. Storage failures are fatal.
    pub async fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let store = FingerprintStore::new(&config.data_dir);
        let videos = list_video_files(&self.footage).await?;
        if videos.is_empty() {
            println!("No video files found under {}", self.footage.display());
            return Ok(());
        }

        info!(
            videos = videos.len(),
            footage = %self.footage.display(),
            models = %self.model,
            "indexing corpus"
        );
        let mut indexed = 0usize;
        let mut skipped = 0usize;

        'videos: for video in &videos {
            let path = self.footage.join(video);
            for &model in self.model.models() {
                let fingerprint = match fingerprint_video(&path, model, None).await {
                    Ok(fp) => fp,
                    Err(e) => {
                        warn!(video = video.as_str(), model = %model, error = %e, "skipping video");
                        skipped += 1;
                        continue 'videos;
                    }
                };
                store.save_fingerprint(video, &fingerprint).await?;
            }
            indexed += 1;
        }

        println!(
            "Indexed {} of {} video(s) into {}",
            indexed,
            videos.len(),
            config.data_dir.display()
        );
        if skipped > 0 {
            println!("Skipped {} video(s), see log for details", skipped);
        }
        Ok(())
    }
}
