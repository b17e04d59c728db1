//! Sequential frame decoding via FFmpeg rawvideo output.
//!
//! FFmpeg writes packed RGB24 frames to stdout and [`FrameStream`] reads
//! them back one frame at a time. Exactly one frame is in flight; decoding
//! order is frame order.

use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, warn};

use vidprint_models::Frame;

use crate::error::{MediaError, MediaResult};

/// Streaming RGB24 frame reader over an FFmpeg child process.
pub struct FrameStream {
    child: Child,
    reader: BufReader<ChildStdout>,
    width: u32,
    height: u32,
    bytes_per_frame: usize,
}

impl FrameStream {
    /// Spawn FFmpeg decoding `path` to raw RGB24 frames of the given size.
    pub async fn open(path: impl AsRef<Path>, width: u32, height: u32) -> MediaResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }
        if width == 0 || height == 0 {
            return Err(MediaError::InvalidVideo(format!(
                "invalid frame size {}x{}",
                width, height
            )));
        }

        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error", "-i"])
            .arg(path)
            .args(["-pix_fmt", "rgb24", "-f", "rawvideo", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(video = %path.display(), "spawning FFmpeg frame decoder");

        let mut child = cmd
            .spawn()
            .map_err(|e| MediaError::ffmpeg_failed(format!("Failed to spawn FFmpeg: {}", e), None, None))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            MediaError::ffmpeg_failed("Failed to capture FFmpeg stdout", None, None)
        })?;

        Ok(Self {
            child,
            reader: BufReader::new(stdout),
            width,
            height,
            bytes_per_frame: width as usize * height as usize * 3,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read the next frame. Returns `None` at end of stream.
    ///
    /// A partial frame at the tail of the stream is dropped with a warning
    /// rather than surfaced as data.
    pub async fn next_frame(&mut self) -> MediaResult<Option<Frame>> {
        let mut buf = vec![0u8; self.bytes_per_frame];
        let mut filled = 0usize;

        while filled < self.bytes_per_frame {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.bytes_per_frame {
            warn!(
                expected = self.bytes_per_frame,
                got = filled,
                "truncated frame at end of stream, dropping"
            );
            return Ok(None);
        }

        Frame::from_rgb24(self.width, self.height, buf)
            .ok_or_else(|| MediaError::internal("frame buffer size mismatch"))
            .map(Some)
    }

    /// Stop the decoder and reap the child process.
    ///
    /// Safe to call after a full read as well as mid-stream; an early stop
    /// kills the child so the pipe is always released.
    pub async fn finish(mut self) -> MediaResult<()> {
        self.child.start_kill().ok();
        let status = self.child.wait().await?;
        debug!(status = ?status.code(), "FFmpeg frame decoder finished");
        Ok(())
    }
}
