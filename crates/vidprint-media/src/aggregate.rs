//! Temporal fingerprint aggregation.
//!
//! Per-frame histograms are averaged bin-wise into one fingerprint per
//! (video, color model). One-dimensional histograms contribute only their
//! serialized window, so gray and rgb fingerprints carry
//! [`FINGERPRINT_BINS`] values.

use ndarray::Array3;

use vidprint_models::histogram::{
    ChannelHistograms, FrameHistogram, HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS, INTENSITY_BINS,
};
use vidprint_models::{ChannelFingerprints, ColorModel, Fingerprint, FINGERPRINT_BINS};

use crate::error::{MediaError, MediaResult};

enum AccumulatorState {
    Gray(Vec<f64>),
    Channels {
        blue: Vec<f64>,
        green: Vec<f64>,
        red: Vec<f64>,
    },
    Hsv(Array3<f64>),
}

/// Accumulates per-frame histograms into a fingerprint.
pub struct FingerprintAccumulator {
    state: AccumulatorState,
    frames: u64,
}

impl FingerprintAccumulator {
    pub fn new(model: ColorModel) -> Self {
        let state = match model {
            ColorModel::Gray => AccumulatorState::Gray(vec![0.0; FINGERPRINT_BINS]),
            ColorModel::Rgb => AccumulatorState::Channels {
                blue: vec![0.0; FINGERPRINT_BINS],
                green: vec![0.0; FINGERPRINT_BINS],
                red: vec![0.0; FINGERPRINT_BINS],
            },
            ColorModel::Hsv => {
                AccumulatorState::Hsv(Array3::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS)))
            }
        };
        Self { state, frames: 0 }
    }

    pub fn model(&self) -> ColorModel {
        match &self.state {
            AccumulatorState::Gray(_) => ColorModel::Gray,
            AccumulatorState::Channels { .. } => ColorModel::Rgb,
            AccumulatorState::Hsv(_) => ColorModel::Hsv,
        }
    }

    /// Number of histograms accumulated so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Add one frame's histogram. The histogram must match the
    /// accumulator's color model and expected shape.
    pub fn push(&mut self, histogram: &FrameHistogram) -> MediaResult<()> {
        let model = self.model();
        match (&mut self.state, histogram) {
            (AccumulatorState::Gray(acc), FrameHistogram::Gray(bins)) => {
                accumulate_window(acc, bins)?;
            }
            (AccumulatorState::Channels { blue, green, red }, FrameHistogram::Channels(hists)) => {
                let ChannelHistograms {
                    blue: b,
                    green: g,
                    red: r,
                } = hists;
                accumulate_window(blue, b)?;
                accumulate_window(green, g)?;
                accumulate_window(red, r)?;
            }
            (AccumulatorState::Hsv(acc), FrameHistogram::Hsv(grid)) => {
                if grid.dim() != acc.dim() {
                    return Err(MediaError::HistogramShape(format!(
                        "expected {:?}, got {:?}",
                        acc.dim(),
                        grid.dim()
                    )));
                }
                *acc += grid;
            }
            (_, other) => {
                return Err(MediaError::HistogramShape(format!(
                    "expected {} histogram, got {}",
                    model,
                    other.model()
                )));
            }
        }
        self.frames += 1;
        Ok(())
    }

    /// Divide the accumulated bins by the frame count.
    ///
    /// Fails before any division when no frames were pushed, so aggregation
    /// never produces NaN bins.
    pub fn finish(self) -> MediaResult<Fingerprint> {
        if self.frames == 0 {
            return Err(MediaError::NoSampledFrames);
        }
        let count = self.frames as f64;

        let fingerprint = match self.state {
            AccumulatorState::Gray(mut acc) => {
                divide(&mut acc, count);
                Fingerprint::Gray(acc)
            }
            AccumulatorState::Channels {
                mut blue,
                mut green,
                mut red,
            } => {
                divide(&mut blue, count);
                divide(&mut green, count);
                divide(&mut red, count);
                Fingerprint::Rgb(ChannelFingerprints { blue, green, red })
            }
            AccumulatorState::Hsv(mut acc) => {
                acc.mapv_inplace(|v| v / count);
                Fingerprint::Hsv(acc)
            }
        };
        Ok(fingerprint)
    }
}

/// Add the serialized window of a per-frame histogram into the accumulator.
fn accumulate_window(acc: &mut [f64], bins: &[f64]) -> MediaResult<()> {
    if bins.len() != INTENSITY_BINS {
        return Err(MediaError::HistogramShape(format!(
            "expected {} bins, got {}",
            INTENSITY_BINS,
            bins.len()
        )));
    }
    for (a, v) in acc.iter_mut().zip(bins[..FINGERPRINT_BINS].iter()) {
        *a += v;
    }
    Ok(())
}

fn divide(bins: &mut [f64], count: f64) {
    for v in bins.iter_mut() {
        *v /= count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_hist(hot_bin: usize) -> FrameHistogram {
        let mut bins = vec![0.0; INTENSITY_BINS];
        bins[hot_bin] = 1.0;
        FrameHistogram::Gray(bins)
    }

    #[test]
    fn test_average_of_three_frames() {
        let mut acc = FingerprintAccumulator::new(ColorModel::Gray);
        acc.push(&gray_hist(10)).unwrap();
        acc.push(&gray_hist(10)).unwrap();
        acc.push(&gray_hist(20)).unwrap();
        assert_eq!(acc.frames(), 3);

        let fp = acc.finish().unwrap();
        match fp {
            Fingerprint::Gray(bins) => {
                assert!((bins[10] - 2.0 / 3.0).abs() < 1e-12);
                assert!((bins[20] - 1.0 / 3.0).abs() < 1e-12);
            }
            other => panic!("unexpected fingerprint: {:?}", other.model()),
        }
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let histograms = [gray_hist(5), gray_hist(7), gray_hist(9)];
        let run = || {
            let mut acc = FingerprintAccumulator::new(ColorModel::Gray);
            for h in &histograms {
                acc.push(h).unwrap();
            }
            acc.finish().unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_top_bin_excluded_from_window() {
        let mut bins = vec![0.0; INTENSITY_BINS];
        bins[INTENSITY_BINS - 1] = 1.0;
        let mut acc = FingerprintAccumulator::new(ColorModel::Gray);
        acc.push(&FrameHistogram::Gray(bins)).unwrap();

        let fp = acc.finish().unwrap();
        assert_eq!(fp.bin_count(), FINGERPRINT_BINS);
        assert!(fp.total_mass().abs() < 1e-12);
    }

    #[test]
    fn test_zero_frames_is_an_error() {
        let acc = FingerprintAccumulator::new(ColorModel::Hsv);
        assert!(matches!(acc.finish(), Err(MediaError::NoSampledFrames)));
    }

    #[test]
    fn test_model_mismatch_rejected() {
        let mut acc = FingerprintAccumulator::new(ColorModel::Rgb);
        let err = acc.push(&gray_hist(0)).unwrap_err();
        assert!(matches!(err, MediaError::HistogramShape(_)));
        assert_eq!(acc.frames(), 0);
    }

    #[test]
    fn test_wrong_bin_count_rejected() {
        let mut acc = FingerprintAccumulator::new(ColorModel::Gray);
        let err = acc.push(&FrameHistogram::Gray(vec![0.0; 10])).unwrap_err();
        assert!(matches!(err, MediaError::HistogramShape(_)));
    }

    #[test]
    fn test_hsv_accumulation() {
        let mut grid = Array3::<f64>::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS));
        grid[[1, 2, 1]] = 1.0;
        let mut acc = FingerprintAccumulator::new(ColorModel::Hsv);
        acc.push(&FrameHistogram::Hsv(grid.clone())).unwrap();
        acc.push(&FrameHistogram::Hsv(Array3::zeros((
            HSV_HUE_BINS,
            HSV_SAT_BINS,
            HSV_VAL_BINS,
        ))))
        .unwrap();

        match acc.finish().unwrap() {
            Fingerprint::Hsv(avg) => assert!((avg[[1, 2, 1]] - 0.5).abs() < 1e-12),
            other => panic!("unexpected fingerprint: {:?}", other.model()),
        }
    }
}
