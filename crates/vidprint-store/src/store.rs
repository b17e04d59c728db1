//! Fingerprint persistence.
//!
//! Each video gets a directory named after its file name under the store
//! root. One-dimensional fingerprints are one value per line; the joint
//! HSV grid is written as hue slices of 12 lines with 3 values each,
//! separated by comment lines. All values use fixed six-decimal
//! formatting, so a load after a save reproduces every bin within 1e-6.
//!
//! Layout:
//! ```text
//! <root>/<video>/hist-gray
//! <root>/<video>/hist-b
//! <root>/<video>/hist-g
//! <root>/<video>/hist-r
//! <root>/<video>/hist-hsv
//! ```

use ndarray::Array3;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use vidprint_models::histogram::{HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS};
use vidprint_models::{Channel, ChannelFingerprints, ColorModel, Fingerprint, FINGERPRINT_BINS};

use crate::error::{StoreError, StoreResult};

/// File name of the grayscale fingerprint.
pub const GRAY_FILE: &str = "hist-gray";
/// File name of the joint HSV fingerprint.
pub const HSV_FILE: &str = "hist-hsv";

/// File name of one channel's fingerprint.
pub fn channel_file(channel: Channel) -> String {
    format!("hist-{}", channel.suffix())
}

/// Filesystem store holding one fingerprint per (video, color model).
#[derive(Debug, Clone)]
pub struct FingerprintStore {
    root: PathBuf,
}

impl FingerprintStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all fingerprints of one video.
    pub fn video_dir(&self, video: &str) -> PathBuf {
        self.root.join(video)
    }

    /// Persist a fingerprint, overwriting any previous one for the same
    /// (video, model).
    pub async fn save_fingerprint(&self, video: &str, fingerprint: &Fingerprint) -> StoreResult<()> {
        let dir = self.video_dir(video);
        fs::create_dir_all(&dir).await?;

        match fingerprint {
            Fingerprint::Gray(bins) => {
                fs::write(dir.join(GRAY_FILE), format_bins(bins)).await?;
            }
            Fingerprint::Rgb(channels) => {
                fs::write(dir.join(channel_file(Channel::Blue)), format_bins(&channels.blue))
                    .await?;
                fs::write(dir.join(channel_file(Channel::Green)), format_bins(&channels.green))
                    .await?;
                fs::write(dir.join(channel_file(Channel::Red)), format_bins(&channels.red))
                    .await?;
            }
            Fingerprint::Hsv(grid) => {
                fs::write(dir.join(HSV_FILE), format_hsv(grid)).await?;
            }
        }

        debug!(video, model = %fingerprint.model(), "saved fingerprint");
        Ok(())
    }

    /// Load the fingerprint of a video under one color model.
    ///
    /// A missing file is [`StoreError::FingerprintMissing`]; unparsable or
    /// wrongly shaped content is [`StoreError::FingerprintMalformed`].
    pub async fn load_fingerprint(
        &self,
        video: &str,
        model: ColorModel,
    ) -> StoreResult<Fingerprint> {
        let dir = self.video_dir(video);
        match model {
            ColorModel::Gray => {
                let bins = self.read_bins(video, model, dir.join(GRAY_FILE)).await?;
                Ok(Fingerprint::Gray(bins))
            }
            ColorModel::Rgb => {
                let blue = self
                    .read_bins(video, model, dir.join(channel_file(Channel::Blue)))
                    .await?;
                let green = self
                    .read_bins(video, model, dir.join(channel_file(Channel::Green)))
                    .await?;
                let red = self
                    .read_bins(video, model, dir.join(channel_file(Channel::Red)))
                    .await?;
                Ok(Fingerprint::Rgb(ChannelFingerprints { blue, green, red }))
            }
            ColorModel::Hsv => {
                let path = dir.join(HSV_FILE);
                let text = self.read_text(video, model, &path).await?;
                let grid = parse_hsv(&text, &path)?;
                Ok(Fingerprint::Hsv(grid))
            }
        }
    }

    async fn read_bins(
        &self,
        video: &str,
        model: ColorModel,
        path: PathBuf,
    ) -> StoreResult<Vec<f64>> {
        let text = self.read_text(video, model, &path).await?;
        let bins = parse_values(&text, &path)?;
        if bins.len() != FINGERPRINT_BINS {
            return Err(StoreError::malformed(
                &path,
                format!("expected {} values, got {}", FINGERPRINT_BINS, bins.len()),
            ));
        }
        Ok(bins)
    }

    async fn read_text(&self, video: &str, model: ColorModel, path: &Path) -> StoreResult<String> {
        match fs::read_to_string(path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::FingerprintMissing {
                    video: video.to_string(),
                    model,
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn format_bins(bins: &[f64]) -> String {
    let mut text = String::with_capacity(bins.len() * 10);
    for v in bins {
        text.push_str(&format!("{:.6}\n", v));
    }
    text
}

fn format_hsv(grid: &Array3<f64>) -> String {
    let (hue_bins, sat_bins, _) = grid.dim();
    let mut text = format!(
        "# HSV histogram shape: ({}, {}, {})\n",
        HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS
    );
    for h in 0..hue_bins {
        for s in 0..sat_bins {
            text.push_str(&format!(
                "{:.6} {:.6} {:.6}\n",
                grid[[h, s, 0]],
                grid[[h, s, 1]],
                grid[[h, s, 2]]
            ));
        }
        text.push_str(&format!("# hue slice {} end\n", h));
    }
    text
}

/// All whitespace-separated values of a fingerprint file, skipping blank
/// and comment lines.
fn parse_values(text: &str, path: &Path) -> StoreResult<Vec<f64>> {
    let mut values = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for token in line.split_whitespace() {
            let value: f64 = token
                .parse()
                .map_err(|_| StoreError::malformed(path, format!("invalid value '{}'", token)))?;
            values.push(value);
        }
    }
    Ok(values)
}

fn parse_hsv(text: &str, path: &Path) -> StoreResult<Array3<f64>> {
    let values = parse_values(text, path)?;
    let expected = HSV_HUE_BINS * HSV_SAT_BINS * HSV_VAL_BINS;
    if values.len() != expected {
        return Err(StoreError::malformed(
            path,
            format!("expected {} values, got {}", expected, values.len()),
        ));
    }
    Array3::from_shape_vec((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS), values)
        .map_err(|e| StoreError::malformed(path, e.to_string()))
}
