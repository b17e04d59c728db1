//! Color models and channel definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color model name cannot be parsed.
#[derive(Debug, Error)]
#[error("unrecognized color model: {0}")]
pub struct ModelParseError(pub String);

/// Color model a histogram or fingerprint is computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// Single 256-bin luminance histogram.
    Gray,
    /// Independent 256-bin histograms per blue/green/red channel.
    Rgb,
    /// Joint 8x12x3 hue/saturation/value histogram.
    Hsv,
}

impl ColorModel {
    /// All models, in the order passes run.
    pub const ALL: [ColorModel; 3] = [ColorModel::Gray, ColorModel::Rgb, ColorModel::Hsv];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorModel::Gray => "gray",
            ColorModel::Rgb => "rgb",
            ColorModel::Hsv => "hsv",
        }
    }

    /// Weight of one metric run's vote when tallying winners across models.
    ///
    /// Joint color statistics are the strongest discriminator, luminance the
    /// weakest.
    pub fn vote_weight(&self) -> u32 {
        match self {
            ColorModel::Gray => 1,
            ColorModel::Rgb => 5,
            ColorModel::Hsv => 8,
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColorModel {
    type Err = ModelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" => Ok(ColorModel::Gray),
            "rgb" => Ok(ColorModel::Rgb),
            "hsv" => Ok(ColorModel::Hsv),
            other => Err(ModelParseError(other.to_string())),
        }
    }
}

/// Which color model passes a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSelection {
    Gray,
    Rgb,
    Hsv,
    /// Run gray, rgb and hsv sequentially as independent passes.
    All,
}

impl ModelSelection {
    /// Concrete models this selection expands to, in run order.
    pub fn models(&self) -> &'static [ColorModel] {
        match self {
            ModelSelection::Gray => &[ColorModel::Gray],
            ModelSelection::Rgb => &[ColorModel::Rgb],
            ModelSelection::Hsv => &[ColorModel::Hsv],
            ModelSelection::All => &ColorModel::ALL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSelection::Gray => "gray",
            ModelSelection::Rgb => "rgb",
            ModelSelection::Hsv => "hsv",
            ModelSelection::All => "all",
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelSelection {
    type Err = ModelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" => Ok(ModelSelection::Gray),
            "rgb" => Ok(ModelSelection::Rgb),
            "hsv" => Ok(ModelSelection::Hsv),
            "all" => Ok(ModelSelection::All),
            other => Err(ModelParseError(other.to_string())),
        }
    }
}

/// One color channel of an RGB frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Blue,
    Green,
    Red,
}

impl Channel {
    /// Channel iteration order used for storage and scoring.
    pub const ALL: [Channel; 3] = [Channel::Blue, Channel::Green, Channel::Red];

    /// One-letter suffix used in fingerprint file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            Channel::Blue => "b",
            Channel::Green => "g",
            Channel::Red => "r",
        }
    }

    /// Byte offset of this channel within a packed RGB24 pixel.
    pub fn byte_offset(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_model_parse() {
        assert_eq!("gray".parse::<ColorModel>().unwrap(), ColorModel::Gray);
        assert_eq!(" RGB ".parse::<ColorModel>().unwrap(), ColorModel::Rgb);
        assert_eq!("hsv".parse::<ColorModel>().unwrap(), ColorModel::Hsv);
        assert!("lab".parse::<ColorModel>().is_err());
    }

    #[test]
    fn test_selection_expansion() {
        assert_eq!(ModelSelection::Gray.models(), &[ColorModel::Gray]);
        assert_eq!(
            ModelSelection::All.models(),
            &[ColorModel::Gray, ColorModel::Rgb, ColorModel::Hsv]
        );
        assert_eq!("all".parse::<ModelSelection>().unwrap(), ModelSelection::All);
    }

    #[test]
    fn test_vote_weights() {
        assert_eq!(ColorModel::Gray.vote_weight(), 1);
        assert_eq!(ColorModel::Rgb.vote_weight(), 5);
        assert_eq!(ColorModel::Hsv.vote_weight(), 8);
    }

    #[test]
    fn test_channel_offsets() {
        assert_eq!(Channel::Red.byte_offset(), 0);
        assert_eq!(Channel::Green.byte_offset(), 1);
        assert_eq!(Channel::Blue.byte_offset(), 2);
        assert_eq!(Channel::Blue.suffix(), "b");
    }
}
