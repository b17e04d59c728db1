//! Shared data models for vidprint.
//!
//! This crate provides the types every other crate builds on:
//! - Color models and the metrics that apply to each
//! - Raw frames and regions of interest
//! - Per-frame histograms and per-video fingerprints
//! - Pure scoring math for all comparison metrics

pub mod color;
pub mod fingerprint;
pub mod frame;
pub mod histogram;
pub mod metric;
pub mod roi;

// Re-export common types
pub use color::{Channel, ColorModel, ModelParseError, ModelSelection};
pub use fingerprint::{ChannelFingerprints, Fingerprint, FINGERPRINT_BINS};
pub use frame::Frame;
pub use histogram::{
    normalize_l1, ChannelHistograms, FrameHistogram, HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS,
    INTENSITY_BINS,
};
pub use metric::{score_fingerprints, Metric, MetricError, Polarity};
pub use roi::{PixelRect, Point, RegionOfInterest, RoiParseError};
