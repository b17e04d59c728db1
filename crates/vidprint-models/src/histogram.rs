//! Per-frame histogram containers.
//!
//! All histograms are L1-normalized: bins are non-negative and sum to 1
//! for any frame with at least one pixel.

use ndarray::Array3;

use crate::color::ColorModel;

/// Bins of a single-channel intensity histogram.
pub const INTENSITY_BINS: usize = 256;

/// Hue bins of the joint HSV histogram (hue range 0..180).
pub const HSV_HUE_BINS: usize = 8;
/// Saturation bins of the joint HSV histogram (range 0..256).
pub const HSV_SAT_BINS: usize = 12;
/// Value bins of the joint HSV histogram (range 0..256).
pub const HSV_VAL_BINS: usize = 3;

/// Independent per-channel histograms of one frame, `INTENSITY_BINS` each.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistograms {
    pub blue: Vec<f64>,
    pub green: Vec<f64>,
    pub red: Vec<f64>,
}

/// Histogram of one frame under a specific color model.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameHistogram {
    /// `INTENSITY_BINS` luminance bins.
    Gray(Vec<f64>),
    /// Independent blue/green/red intensity histograms.
    Channels(ChannelHistograms),
    /// Joint `HSV_HUE_BINS x HSV_SAT_BINS x HSV_VAL_BINS` grid.
    Hsv(Array3<f64>),
}

impl FrameHistogram {
    pub fn model(&self) -> ColorModel {
        match self {
            FrameHistogram::Gray(_) => ColorModel::Gray,
            FrameHistogram::Channels(_) => ColorModel::Rgb,
            FrameHistogram::Hsv(_) => ColorModel::Hsv,
        }
    }
}

/// Scale bins in place so they sum to 1. A zero histogram is left unchanged.
pub fn normalize_l1(bins: &mut [f64]) {
    let total: f64 = bins.iter().sum();
    if total > 0.0 {
        for v in bins.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_l1() {
        let mut bins = vec![2.0, 6.0, 0.0, 8.0];
        normalize_l1(&mut bins);
        assert!((bins.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((bins[0] - 0.125).abs() < 1e-12);
        assert!((bins[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_l1_zero_histogram() {
        let mut bins = vec![0.0; 4];
        normalize_l1(&mut bins);
        assert!(bins.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_frame_histogram_model() {
        let gray = FrameHistogram::Gray(vec![0.0; INTENSITY_BINS]);
        assert_eq!(gray.model(), ColorModel::Gray);
        let hsv = FrameHistogram::Hsv(Array3::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS)));
        assert_eq!(hsv.model(), ColorModel::Hsv);
    }
}
