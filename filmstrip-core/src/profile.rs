//! Output profiles, video norms and aspect ratios.
//!
//! A `Profile` describes one render target: its video norm (which fixes the
//! frame rate), target bitrate and resolution. Profiles are created by the
//! caller and read-only to the renderer.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, config_error};

/// Analog video norm of the output. Each norm implies a fixed frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoNorm {
    Pal,
    Ntsc,
}

impl VideoNorm {
    /// Rational frame-rate string as the encoder expects it.
    pub fn frame_rate(self) -> &'static str {
        match self {
            VideoNorm::Pal => "25/1",
            VideoNorm::Ntsc => "30000/1001",
        }
    }

    pub fn fps(self) -> f64 {
        match self {
            VideoNorm::Pal => 25.0,
            VideoNorm::Ntsc => 30000.0 / 1001.0,
        }
    }

    /// GOP keyframe interval used by the MPEG formats.
    pub fn key_interval(self) -> u32 {
        match self {
            VideoNorm::Pal => 15,
            VideoNorm::Ntsc => 18,
        }
    }
}

impl fmt::Display for VideoNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoNorm::Pal => write!(f, "PAL"),
            VideoNorm::Ntsc => write!(f, "NTSC"),
        }
    }
}

impl FromStr for VideoNorm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pal" => Ok(VideoNorm::Pal),
            "ntsc" => Ok(VideoNorm::Ntsc),
            other => Err(config_error(format!("unknown video norm: {other}"))),
        }
    }
}

/// Immutable description of a render target.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    bitrate: u32,
    resolution: (u32, u32),
    norm: VideoNorm,
}

impl Profile {
    pub fn new(name: impl Into<String>, bitrate: u32, resolution: (u32, u32), norm: VideoNorm) -> Self {
        Self {
            name: name.into(),
            bitrate,
            resolution,
            norm,
        }
    }

    /// Preset identity; the MPEG formats validate compatibility against it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target video bitrate in kbit/s.
    pub fn bitrate(&self) -> u32 {
        self.bitrate
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn norm(&self) -> VideoNorm {
        self.norm
    }
}

/// The built-in profile table, matching the presets the application ships.
pub fn standard_profiles(norm: VideoNorm) -> Vec<Profile> {
    let pal = norm == VideoNorm::Pal;
    vec![
        Profile::new("VCD", 1152, if pal { (352, 288) } else { (352, 240) }, norm),
        Profile::new("SVCD", 2500, if pal { (480, 576) } else { (480, 480) }, norm),
        Profile::new("DVD", 8000, if pal { (720, 576) } else { (720, 480) }, norm),
        Profile::new("Medium", 2500, (640, 360), norm),
        Profile::new("HD", 8000, (1280, 720), norm),
        Profile::new("FULL-HD", 12000, (1920, 1080), norm),
    ]
}

/// Looks up a built-in profile by its preset name (case-insensitive).
pub fn find_profile(name: &str, norm: VideoNorm) -> Option<Profile> {
    standard_profiles(norm)
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(name))
}

/// Picture aspect ratio of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    #[default]
    Ratio4x3,
    Ratio3x2,
    Ratio16x9,
}

impl Aspect {
    pub fn as_f64(self) -> f64 {
        match self {
            Aspect::Ratio4x3 => 4.0 / 3.0,
            Aspect::Ratio3x2 => 3.0 / 2.0,
            Aspect::Ratio16x9 => 16.0 / 9.0,
        }
    }

    /// Formats the ratio the way the encoder command line expects it.
    pub fn to_arg(self) -> String {
        format!("{:.3}", self.as_f64())
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aspect::Ratio4x3 => write!(f, "4:3"),
            Aspect::Ratio3x2 => write!(f, "3:2"),
            Aspect::Ratio16x9 => write!(f, "16:9"),
        }
    }
}

impl FromStr for Aspect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4:3" => Ok(Aspect::Ratio4x3),
            "3:2" => Ok(Aspect::Ratio3x2),
            "16:9" => Ok(Aspect::Ratio16x9),
            other => Err(config_error(format!("unknown aspect ratio: {other}"))),
        }
    }
}
