//! Regions of interest over video frames.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a region string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid region of interest '{0}', expected X0,Y0,X1,Y1")]
pub struct RoiParseError(pub String);

/// A point in frame coordinates. May lie outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle, half-open on both axes.
///
/// `x0 <= x < x1`, `y0 <= y < y1`, always within the frame it was resolved
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Rectangle covering an entire frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// A region of interest given as two corner points.
///
/// The points may be in any order and may extend past the frame edges.
/// [`RegionOfInterest::resolve`] normalizes them against concrete frame
/// dimensions; a region that does not cover at least one pixel is unusable
/// and callers fall back to the full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOfInterest {
    pub first: Point,
    pub second: Point,
}

impl RegionOfInterest {
    pub fn new(first: Point, second: Point) -> Self {
        Self { first, second }
    }

    /// Normalize against a frame: sort the corners, clamp to the frame, and
    /// require positive area. Returns `None` when the region is degenerate
    /// or lies entirely outside the frame.
    pub fn resolve(&self, width: u32, height: u32) -> Option<PixelRect> {
        let x0 = self.first.x.min(self.second.x).clamp(0, width as i64) as u32;
        let x1 = self.first.x.max(self.second.x).clamp(0, width as i64) as u32;
        let y0 = self.first.y.min(self.second.y).clamp(0, height as i64) as u32;
        let y1 = self.first.y.max(self.second.y).clamp(0, height as i64) as u32;

        if x1 > x0 && y1 > y0 {
            Some(PixelRect { x0, y0, x1, y1 })
        } else {
            None
        }
    }
}

impl fmt::Display for RegionOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.first.x, self.first.y, self.second.x, self.second.y
        )
    }
}

impl FromStr for RegionOfInterest {
    type Err = RoiParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<i64> = s
            .split(',')
            .map(|p| p.trim().parse::<i64>())
            .collect::<Result<_, _>>()
            .map_err(|_| RoiParseError(s.to_string()))?;
        if parts.len() != 4 {
            return Err(RoiParseError(s.to_string()));
        }
        Ok(Self::new(
            Point::new(parts[0], parts[1]),
            Point::new(parts[2], parts[3]),
        ))
    }
}
