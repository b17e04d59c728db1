//! Frame sampling for fingerprint computation.

use crate::error::{MediaError, MediaResult};

/// 1-based frame indices to sample, roughly one per second of video.
///
/// Starts at frame 1 and advances by `ceil(fps)` frames, never exceeding
/// `total_frames`. A non-positive or non-finite frame rate is an error.
pub fn sample_indices(total_frames: u64, fps: f64) -> MediaResult<Vec<u64>> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(MediaError::InvalidFrameRate(fps));
    }

    let step = fps.ceil() as u64;
    let mut indices = Vec::new();
    let mut next = 1u64;
    while next <= total_frames {
        indices.push(next);
        next += step;
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sample_per_second() {
        let indices = sample_indices(100, 30.0).unwrap();
        assert_eq!(indices, vec![1, 31, 61, 91]);
    }

    #[test]
    fn test_fractional_fps_rounds_up() {
        let indices = sample_indices(100, 29.97).unwrap();
        assert_eq!(indices[1] - indices[0], 30);
        assert_eq!(indices[0], 1);
    }

    #[test]
    fn test_bounds_and_monotonicity() {
        for &(total, fps) in &[(1u64, 1.0), (59, 30.0), (60, 30.0), (61, 30.0), (1000, 24.0)] {
            let indices = sample_indices(total, fps).unwrap();
            assert!(!indices.is_empty());
            assert_eq!(indices[0], 1);
            assert!(*indices.last().unwrap() <= total);
            assert!(indices.windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn test_short_video_single_sample() {
        assert_eq!(sample_indices(5, 30.0).unwrap(), vec![1]);
    }

    #[test]
    fn test_zero_frames_yields_empty() {
        assert!(sample_indices(0, 30.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_frame_rate() {
        assert!(matches!(
            sample_indices(100, 0.0),
            Err(MediaError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            sample_indices(100, -24.0),
            Err(MediaError::InvalidFrameRate(_))
        ));
        assert!(matches!(
            sample_indices(100, f64::NAN),
            Err(MediaError::InvalidFrameRate(_))
        ));
    }
}
