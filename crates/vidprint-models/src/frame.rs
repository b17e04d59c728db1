//! Raw decoded video frames.

use std::fmt;

/// A decoded frame holding packed RGB24 pixels.
#[derive(Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a packed RGB24 buffer. Returns `None` when the buffer length
    /// does not match `width * height * 3`.
    pub fn from_rgb24(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed RGB24 pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// (r, g, b) of the pixel at `(x, y)`. Caller keeps coordinates in
    /// bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb24_length_check() {
        assert!(Frame::from_rgb24(2, 2, vec![0; 12]).is_some());
        assert!(Frame::from_rgb24(2, 2, vec![0; 11]).is_none());
    }

    #[test]
    fn test_pixel_accessor() {
        let mut data = vec![0u8; 12];
        // Pixel (1, 1) in a 2x2 frame
        data[9] = 10;
        data[10] = 20;
        data[11] = 30;
        let frame = Frame::from_rgb24(2, 2, data).unwrap();
        assert_eq!(frame.pixel(1, 1), (10, 20, 30));
        assert_eq!(frame.pixel(0, 0), (0, 0, 0));
    }
}
