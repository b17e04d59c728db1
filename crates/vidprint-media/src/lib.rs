//! Video decoding and fingerprint computation.
//!
//! Wraps the FFmpeg CLI tools for probing and sequential frame decoding,
//! and builds on them: per-frame histograms, temporal fingerprint
//! aggregation and shot boundary detection.

pub mod aggregate;
pub mod analyze;
pub mod boundary;
pub mod decode;
pub mod error;
pub mod histogram;
pub mod preview;
pub mod probe;
pub mod sample;

pub use aggregate::FingerprintAccumulator;
pub use analyze::fingerprint_video;
pub use boundary::{
    detect_from_series, scan_shot_boundaries, BoundaryConfig, BoundaryDetector, BoundaryEvent,
    BoundaryScan,
};
pub use decode::FrameStream;
pub use error::{MediaError, MediaResult};
pub use histogram::{channel_histograms, frame_histogram, grayscale_histogram, hsv_histogram};
pub use preview::write_region_preview;
pub use probe::{probe_video, VideoInfo};
pub use sample::sample_indices;
