//! Shot boundary detection over consecutive frames.
//!
//! Every adjacent frame pair is scored with the mean per-channel
//! Kullback-Leibler divergence of their 256-bin color histograms. A
//! two-state gate turns the divergence series into boundary events: a rise
//! above the threshold fires once, and the gate re-arms only after the
//! divergence falls back below the threshold. Sustained high divergence
//! therefore yields a single event, not one per frame.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use vidprint_models::histogram::ChannelHistograms;
use vidprint_models::metric::kl_divergence;
use vidprint_models::PixelRect;

use crate::decode::FrameStream;
use crate::error::MediaResult;
use crate::histogram::channel_histograms;
use crate::probe::probe_video;

/// Configuration for shot boundary detection.
#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    /// Mean KL divergence above which a frame pair is a cut.
    pub threshold: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

/// A detected shot boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryEvent {
    /// Zero-based index of the frame that opens the new shot.
    pub frame_index: u64,
    /// Divergence of the pair that fired the event.
    pub divergence: f64,
}

/// Result of scanning a video for shot boundaries.
#[derive(Debug, Clone)]
pub struct BoundaryScan {
    pub events: Vec<BoundaryEvent>,
    /// Divergence per frame pair; entry `k` covers frames `k` and `k + 1`.
    pub series: Vec<f64>,
    pub frames_scanned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Below,
    Above,
}

/// Two-state divergence gate with hysteresis.
pub struct BoundaryDetector {
    threshold: f64,
    state: GateState,
}

impl BoundaryDetector {
    pub fn new(config: &BoundaryConfig) -> Self {
        Self {
            threshold: config.threshold,
            state: GateState::Below,
        }
    }

    /// Create with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            state: GateState::Below,
        }
    }

    /// Feed the next pair divergence. Returns true when a boundary fires.
    ///
    /// Crossing the threshold upward fires; staying above does not fire
    /// again until the divergence has dropped below the threshold. A value
    /// exactly at the threshold never changes state.
    pub fn observe(&mut self, divergence: f64) -> bool {
        match self.state {
            GateState::Below if divergence > self.threshold => {
                self.state = GateState::Above;
                true
            }
            GateState::Above if divergence < self.threshold => {
                self.state = GateState::Below;
                false
            }
            _ => false,
        }
    }
}

/// Boundary events for a precomputed divergence series.
///
/// Entry `k` of the series covers the frame pair `(k, k + 1)`, so an event
/// fired by entry `k` is reported at frame index `k + 1`.
pub fn detect_from_series(series: &[f64], threshold: f64) -> Vec<BoundaryEvent> {
    let mut detector = BoundaryDetector::with_threshold(threshold);
    series
        .iter()
        .enumerate()
        .filter(|(_, &d)| detector.observe(d))
        .map(|(k, &d)| BoundaryEvent {
            frame_index: k as u64 + 1,
            divergence: d,
        })
        .collect()
}

/// Scan a video for shot boundaries, keeping the full divergence series.
pub async fn scan_shot_boundaries(
    path: impl AsRef<Path>,
    config: &BoundaryConfig,
) -> MediaResult<BoundaryScan> {
    let path = path.as_ref();
    let info = probe_video(path).await?;
    let mut stream = FrameStream::open(path, info.width, info.height).await?;

    let rect = PixelRect::full(info.width, info.height);
    let mut detector = BoundaryDetector::new(config);
    let mut previous: Option<ChannelHistograms> = None;
    let mut series = Vec::new();
    let mut events = Vec::new();
    let mut index: u64 = 0;

    while let Some(frame) = stream.next_frame().await? {
        let histograms = channel_histograms(&frame, &rect);
        if let Some(prev) = &previous {
            let divergence = mean_channel_kl(prev, &histograms);
            series.push(divergence);
            if detector.observe(divergence) {
                debug!(
                    frame = index,
                    divergence = format!("{:.3}", divergence),
                    "shot boundary"
                );
                events.push(BoundaryEvent {
                    frame_index: index,
                    divergence,
                });
            }
        }
        previous = Some(histograms);
        index += 1;
    }
    stream.finish().await?;

    info!(
        video = %path.display(),
        frames = index,
        boundaries = events.len(),
        "shot boundary scan complete"
    );

    Ok(BoundaryScan {
        events,
        series,
        frames_scanned: index,
    })
}

/// Mean KL divergence across the blue, green and red histograms.
fn mean_channel_kl(a: &ChannelHistograms, b: &ChannelHistograms) -> f64 {
    (kl_divergence(&a.blue, &b.blue)
        + kl_divergence(&a.green, &b.green)
        + kl_divergence(&a.red, &b.red))
        / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hysteresis_fires_once_per_excursion() {
        let series = [2.0, 15.0, 20.0, 3.0, 16.0];
        let events = detect_from_series(&series, 10.0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].frame_index, 2);
        assert_eq!(events[1].frame_index, 5);
    }

    #[test]
    fn test_quiet_series_has_no_events() {
        let series = [0.5, 1.0, 2.0, 9.9];
        assert!(detect_from_series(&series, 10.0).is_empty());
    }

    #[test]
    fn test_threshold_equality_never_transitions() {
        let mut detector = BoundaryDetector::with_threshold(10.0);
        assert!(!detector.observe(10.0));
        assert!(detector.observe(10.1));
        // Still above: equality does not re-arm the gate
        assert!(!detector.observe(10.0));
        assert!(!detector.observe(11.0));
        assert!(!detector.observe(9.0));
        assert!(detector.observe(12.0));
    }

    #[test]
    fn test_first_pair_can_fire() {
        let events = detect_from_series(&[15.0], 10.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame_index, 1);
        assert!((events[0].divergence - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_channel_kl_identical_is_zero() {
        let bins = {
            let mut b = vec![0.0; 256];
            b[3] = 0.5;
            b[200] = 0.5;
            b
        };
        let hists = ChannelHistograms {
            blue: bins.clone(),
            green: bins.clone(),
            red: bins,
        };
        assert!(mean_channel_kl(&hists, &hists).abs() < 1e-12);
    }
}
