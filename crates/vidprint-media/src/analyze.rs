//! End-to-end fingerprint computation for a single video.

use std::path::Path;
use tracing::{debug, info, warn};

use vidprint_models::{ColorModel, Fingerprint, PixelRect, RegionOfInterest};

use crate::aggregate::FingerprintAccumulator;
use crate::decode::FrameStream;
use crate::error::MediaResult;
use crate::histogram::frame_histogram;
use crate::probe::probe_video;
use crate::sample::sample_indices;

/// Compute one fingerprint for a video under one color model.
///
/// One sequential pass: probe, pick sampled frame indices, decode frames in
/// order, build a histogram for each sampled frame and average them. The
/// optional region restricts histograms to a sub-rectangle of each frame;
/// an unusable region falls back to the full frame.
pub async fn fingerprint_video(
    path: impl AsRef<Path>,
    model: ColorModel,
    region: Option<&RegionOfInterest>,
) -> MediaResult<Fingerprint> {
    let path = path.as_ref();
    let info = probe_video(path).await?;
    let indices = sample_indices(info.frame_count, info.fps)?;

    debug!(
        video = %path.display(),
        model = %model,
        frames = info.frame_count,
        fps = info.fps,
        samples = indices.len(),
        "sampling frames"
    );

    let rect = resolve_region(region, info.width, info.height);
    let mut stream = FrameStream::open(path, info.width, info.height).await?;
    let mut accumulator = FingerprintAccumulator::new(model);
    let mut targets = indices.into_iter().peekable();

    // Frames are numbered from 1 in decode order
    let mut index: u64 = 0;
    while let Some(frame) = stream.next_frame().await? {
        index += 1;
        match targets.peek() {
            Some(&target) if target == index => {
                targets.next();
                let histogram = frame_histogram(&frame, &rect, model);
                accumulator.push(&histogram)?;
            }
            Some(_) => {}
            None => break,
        }
    }
    stream.finish().await?;

    let sampled = accumulator.frames();
    let fingerprint = accumulator.finish()?;
    info!(
        video = %path.display(),
        model = %model,
        sampled,
        "fingerprint computed"
    );
    Ok(fingerprint)
}

/// Normalize an optional region against the frame, warning once when it is
/// unusable.
pub(crate) fn resolve_region(
    region: Option<&RegionOfInterest>,
    width: u32,
    height: u32,
) -> PixelRect {
    match region {
        None => PixelRect::full(width, height),
        Some(roi) => match roi.resolve(width, height) {
            Some(rect) => rect,
            None => {
                warn!(
                    region = %roi,
                    "unusable region of interest, falling back to full frame"
                );
                PixelRect::full(width, height)
            }
        },
    }
}
