//! Stored fingerprint inspection command.

use clap::Args;

use vidprint_models::{Fingerprint, ModelSelection};
use vidprint_store::{FingerprintStore, StoreError};

use crate::config::AppConfig;

/// Print stored fingerprint summaries.
#[derive(Args, Debug)]
pub struct CmdShow {
    /// Stored video name
    #[arg(long)]
    pub video: String,

    /// Color models to display (gray, rgb, hsv or all)
    #[arg(long, default_value = "all")]
    pub model: ModelSelection,
}

impl CmdShow {
    /// Execute the show command.
    pub async fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let store = FingerprintStore::new(&config.data_dir);
        println!(
            "Fingerprints of {} under {}",
            self.video,
            config.data_dir.display()
        );

        for &model in self.model.models() {
            match store.load_fingerprint(&self.video, model).await {
                Ok(fingerprint) => print_summary(&fingerprint),
                Err(StoreError::FingerprintMissing { .. }) => {
                    println!("  {:<5} no stored fingerprint", model.as_str());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn print_summary(fingerprint: &Fingerprint) {
    match fingerprint {
        Fingerprint::Gray(bins) => print_bins_line("gray", bins),
        Fingerprint::Rgb(channels) => {
            print_bins_line("b", &channels.blue);
            print_bins_line("g", &channels.green);
            print_bins_line("r", &channels.red);
        }
        Fingerprint::Hsv(grid) => {
            let mass: f64 = grid.iter().sum();
            if let Some(((h, s, v), value)) =
                grid.indexed_iter().max_by(|a, b| a.1.total_cmp(b.1))
            {
                println!(
                    "  {:<5} {:?} grid, mass {:.6}, peak ({}, {}, {}) = {:.6}",
                    "hsv",
                    grid.dim(),
                    mass,
                    h,
                    s,
                    v,
                    value
                );
            }
        }
    }
}

fn print_bins_line(label: &str, bins: &[f64]) {
    let mass: f64 = bins.iter().sum();
    if let Some((index, value)) = bins
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
    {
        println!(
            "  {:<5} {} bins, mass {:.6}, peak bin {} = {:.6}",
            label,
            bins.len(),
            mass,
            index,
            value
        );
    }
}
