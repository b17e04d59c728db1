//! Debug preview of the region applied to a query video.

use std::path::Path;
use tracing::info;

use vidprint_models::RegionOfInterest;

use crate::analyze::resolve_region;
use crate::decode::FrameStream;
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_video;

/// Write the region crop of the first frame as a PNG.
///
/// Debug aid only; never affects fingerprints or scores.
pub async fn write_region_preview(
    video: impl AsRef<Path>,
    region: &RegionOfInterest,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let video = video.as_ref();
    let output = output.as_ref();

    let info = probe_video(video).await?;
    let rect = resolve_region(Some(region), info.width, info.height);

    let mut stream = FrameStream::open(video, info.width, info.height).await?;
    let frame = stream
        .next_frame()
        .await?
        .ok_or_else(|| MediaError::InvalidVideo("video has no frames".to_string()))?;
    stream.finish().await?;

    let mut cropped = Vec::with_capacity(rect.pixel_count() as usize * 3);
    for y in rect.y0..rect.y1 {
        let row_start = (y as usize * frame.width() as usize + rect.x0 as usize) * 3;
        let row_end = row_start + rect.width() as usize * 3;
        cropped.extend_from_slice(&frame.data()[row_start..row_end]);
    }

    let image = image::RgbImage::from_raw(rect.width(), rect.height(), cropped)
        .ok_or_else(|| MediaError::internal("preview buffer size mismatch"))?;
    image
        .save(output)
        .map_err(|e| MediaError::internal(format!("failed to write preview: {}", e)))?;

    info!(preview = %output.display(), "wrote region preview");
    Ok(())
}
