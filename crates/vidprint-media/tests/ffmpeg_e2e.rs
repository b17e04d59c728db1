//! End-to-end tests against a real FFmpeg installation.
//!
//! These tests synthesize footage with `ffmpeg -f lavfi` and exercise the
//! full probe, decode and fingerprint path.
//! Run with: `cargo test -p vidprint-media -- --ignored`

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::TempDir;
use tokio::process::Command;

use vidprint_media::{fingerprint_video, probe_video, scan_shot_boundaries, BoundaryConfig};
use vidprint_models::{ColorModel, Fingerprint, FINGERPRINT_BINS};

/// Render three seconds of `testsrc` at 10 fps into `dir`.
async fn synthesize_clip(dir: &Path) -> PathBuf {
    let output = dir.join("testsrc.mp4");
    let status = Command::new("ffmpeg")
        .args([
            "-y",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=3:size=192x108:rate=10",
            "-pix_fmt",
            "yuv420p",
        ])
        .arg(&output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .expect("Failed to spawn ffmpeg");
    assert!(status.success(), "ffmpeg could not synthesize the clip");
    output
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe on PATH"]
async fn test_probe_synthesized_clip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let clip = synthesize_clip(dir.path()).await;

    let info = probe_video(&clip).await.expect("Failed to probe clip");
    assert_eq!(info.width, 192);
    assert_eq!(info.height, 108);
    assert!((info.fps - 10.0).abs() < 0.05);
    assert!((29..=31).contains(&info.frame_count));
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe on PATH"]
async fn test_fingerprint_synthesized_clip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let clip = synthesize_clip(dir.path()).await;

    let fingerprint = fingerprint_video(&clip, ColorModel::Gray, None)
        .await
        .expect("Failed to fingerprint clip");
    match fingerprint {
        Fingerprint::Gray(bins) => {
            assert_eq!(bins.len(), FINGERPRINT_BINS);
            let mass: f64 = bins.iter().sum();
            assert!(mass > 0.5 && mass <= 1.0 + 1e-9, "mass {}", mass);
        }
        other => panic!("expected a gray fingerprint, got {:?}", other),
    }

    let fingerprint = fingerprint_video(&clip, ColorModel::Rgb, None)
        .await
        .expect("Failed to fingerprint clip");
    match fingerprint {
        Fingerprint::Rgb(channels) => {
            assert_eq!(channels.blue.len(), FINGERPRINT_BINS);
            assert_eq!(channels.green.len(), FINGERPRINT_BINS);
            assert_eq!(channels.red.len(), FINGERPRINT_BINS);
        }
        other => panic!("expected an rgb fingerprint, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires ffmpeg and ffprobe on PATH"]
async fn test_boundary_scan_on_continuous_clip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let clip = synthesize_clip(dir.path()).await;

    let config = BoundaryConfig::default();
    let scan = scan_shot_boundaries(&clip, &config)
        .await
        .expect("Failed to scan clip");
    assert!(scan.frames_scanned >= 2);
    assert_eq!(scan.series.len() as u64, scan.frames_scanned - 1);
    for event in &scan.events {
        assert!(event.frame_index >= 1);
        assert!(event.divergence > config.threshold);
    }
}
