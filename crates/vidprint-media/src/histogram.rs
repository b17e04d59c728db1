//! Per-frame histogram computation.
//!
//! All builders operate on a pixel rectangle within the frame, so a region
//! of interest is a plain sub-rectangle and the full frame is the default.
//! Every histogram is L1-normalized before it is returned.
//!
//! The HSV grid uses hue in half-degrees (0..180) with 8 bins, saturation
//! in 0..256 with 12 bins and value in 0..256 with 3 bins.

use ndarray::Array3;

use vidprint_models::histogram::{
    normalize_l1, ChannelHistograms, FrameHistogram, HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS,
    INTENSITY_BINS,
};
use vidprint_models::{ColorModel, Frame, PixelRect};

/// Histogram of one frame rectangle under the given color model.
pub fn frame_histogram(frame: &Frame, rect: &PixelRect, model: ColorModel) -> FrameHistogram {
    match model {
        ColorModel::Gray => FrameHistogram::Gray(grayscale_histogram(frame, rect)),
        ColorModel::Rgb => FrameHistogram::Channels(channel_histograms(frame, rect)),
        ColorModel::Hsv => FrameHistogram::Hsv(hsv_histogram(frame, rect)),
    }
}

/// 256-bin luminance histogram over BT.601 luma.
pub fn grayscale_histogram(frame: &Frame, rect: &PixelRect) -> Vec<f64> {
    let mut bins = vec![0.0; INTENSITY_BINS];
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let (r, g, b) = frame.pixel(x, y);
            let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
            let bin = (luma.round() as usize).min(INTENSITY_BINS - 1);
            bins[bin] += 1.0;
        }
    }
    normalize_l1(&mut bins);
    bins
}

/// Independent 256-bin histograms per color channel.
pub fn channel_histograms(frame: &Frame, rect: &PixelRect) -> ChannelHistograms {
    let mut blue = vec![0.0; INTENSITY_BINS];
    let mut green = vec![0.0; INTENSITY_BINS];
    let mut red = vec![0.0; INTENSITY_BINS];

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let (r, g, b) = frame.pixel(x, y);
            red[r as usize] += 1.0;
            green[g as usize] += 1.0;
            blue[b as usize] += 1.0;
        }
    }

    normalize_l1(&mut blue);
    normalize_l1(&mut green);
    normalize_l1(&mut red);
    ChannelHistograms { blue, green, red }
}

/// Joint 8x12x3 HSV histogram.
pub fn hsv_histogram(frame: &Frame, rect: &PixelRect) -> Array3<f64> {
    let mut grid = Array3::<f64>::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS));

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let (r, g, b) = frame.pixel(x, y);
            let (h, s, v) = rgb_to_hsv(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);

            // Half-degree hue, byte-range saturation and value
            let h = h / 2.0;
            let s = s * 255.0;
            let v = v * 255.0;

            let h_bin = ((h * HSV_HUE_BINS as f64 / 180.0) as usize).min(HSV_HUE_BINS - 1);
            let s_bin = ((s * HSV_SAT_BINS as f64 / 256.0) as usize).min(HSV_SAT_BINS - 1);
            let v_bin = ((v * HSV_VAL_BINS as f64 / 256.0) as usize).min(HSV_VAL_BINS - 1);

            grid[[h_bin, s_bin, v_bin]] += 1.0;
        }
    }

    let total = grid.sum();
    if total > 0.0 {
        grid.mapv_inplace(|v| v / total);
    }
    grid
}

/// Convert RGB to HSV color space.
///
/// # Arguments
/// * `r`, `g`, `b` - RGB values in [0, 1]
///
/// # Returns
/// (H, S, V) where H is in [0, 360), S and V are in [0, 1]
fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    // Value
    let v = max;

    // Saturation
    let s = if max == 0.0 { 0.0 } else { delta / max };

    // Hue
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, v)
}
