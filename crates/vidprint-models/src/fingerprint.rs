//! Per-video fingerprints.
//!
//! A fingerprint is the bin-wise arithmetic mean of the per-frame histograms
//! of a video's sampled frames, one fingerprint per (video, color model).

use ndarray::Array3;

use crate::color::ColorModel;
use crate::histogram::{HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS};

/// Bins carried by a one-dimensional fingerprint.
///
/// One less than the per-frame histogram width: the top intensity bin is not
/// part of the serialized aggregation window.
pub const FINGERPRINT_BINS: usize = 255;

/// Averaged per-channel fingerprints, `FINGERPRINT_BINS` each.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelFingerprints {
    pub blue: Vec<f64>,
    pub green: Vec<f64>,
    pub red: Vec<f64>,
}

/// Fingerprint of one video under one color model.
#[derive(Debug, Clone, PartialEq)]
pub enum Fingerprint {
    /// `FINGERPRINT_BINS` averaged luminance bins.
    Gray(Vec<f64>),
    /// Averaged blue/green/red fingerprints.
    Rgb(ChannelFingerprints),
    /// Averaged joint HSV grid, `(HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS)`.
    Hsv(Array3<f64>),
}

impl Fingerprint {
    pub fn model(&self) -> ColorModel {
        match self {
            Fingerprint::Gray(_) => ColorModel::Gray,
            Fingerprint::Rgb(_) => ColorModel::Rgb,
            Fingerprint::Hsv(_) => ColorModel::Hsv,
        }
    }

    /// Total number of bins across the fingerprint.
    pub fn bin_count(&self) -> usize {
        match self {
            Fingerprint::Gray(bins) => bins.len(),
            Fingerprint::Rgb(channels) => {
                channels.blue.len() + channels.green.len() + channels.red.len()
            }
            Fingerprint::Hsv(grid) => grid.len(),
        }
    }

    /// Sum of all bins. Close to 1 for gray/hsv, close to 3 for rgb.
    pub fn total_mass(&self) -> f64 {
        match self {
            Fingerprint::Gray(bins) => bins.iter().sum(),
            Fingerprint::Rgb(channels) => {
                channels.blue.iter().sum::<f64>()
                    + channels.green.iter().sum::<f64>()
                    + channels.red.iter().sum::<f64>()
            }
            Fingerprint::Hsv(grid) => grid.sum(),
        }
    }

    /// True when the fingerprint has the expected shape for its model.
    pub fn has_expected_shape(&self) -> bool {
        match self {
            Fingerprint::Gray(bins) => bins.len() == FINGERPRINT_BINS,
            Fingerprint::Rgb(channels) => {
                channels.blue.len() == FINGERPRINT_BINS
                    && channels.green.len() == FINGERPRINT_BINS
                    && channels.red.len() == FINGERPRINT_BINS
            }
            Fingerprint::Hsv(grid) => grid.dim() == (HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_and_shape() {
        let fp = Fingerprint::Gray(vec![0.0; FINGERPRINT_BINS]);
        assert_eq!(fp.model(), ColorModel::Gray);
        assert!(fp.has_expected_shape());
        assert_eq!(fp.bin_count(), FINGERPRINT_BINS);

        let bad = Fingerprint::Gray(vec![0.0; 10]);
        assert!(!bad.has_expected_shape());

        let hsv = Fingerprint::Hsv(Array3::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS)));
        assert!(hsv.has_expected_shape());
        assert_eq!(hsv.bin_count(), HSV_HUE_BINS * HSV_SAT_BINS * HSV_VAL_BINS);
    }

    #[test]
    fn test_total_mass() {
        let mut bins = vec![0.0; FINGERPRINT_BINS];
        bins[0] = 0.25;
        bins[100] = 0.75;
        let fp = Fingerprint::Gray(bins);
        assert!((fp.total_mass() - 1.0).abs() < 1e-12);
    }
}
