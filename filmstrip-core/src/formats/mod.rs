//! Output format strategies.
//!
//! Each output format maps a profile, aspect ratio and the format's
//! configurable properties onto a concrete encoder invocation. The formats
//! share the same pipe-input contract: the session streams JPEG frames into
//! the encoder's stdin, which is demuxed as an MJPEG stream. Formats differ
//! only in codec/container selection, their bitrate tables and whether the
//! audio or subtitle argument blocks apply.

pub mod flash;
pub mod mjpeg;
pub mod mpeg;
pub mod mpeg4;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, config_error};
use crate::probe;
use crate::profile::{Aspect, Profile};
use crate::properties::{
    DEFAULT_SENTINEL, PROP_BITRATE, PROP_FFOURCC, PROP_RENDER_SUBTITLE, PropertyRegistry,
};

/// Name of the external encoder binary.
pub const ENCODER_BIN: &str = "mencoder";

/// Name of the transient subtitle file rendered next to the output.
pub const SUBTITLE_FILE: &str = "output.srt";

/// A fully built external encoder invocation. Immutable once produced.
#[derive(Debug, Clone)]
pub struct RenderCommand {
    pub program: String,
    pub args: Vec<String>,
    pub output_file: PathBuf,
}

impl RenderCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>, output_file: PathBuf) -> Self {
        Self {
            program: program.into(),
            args,
            output_file,
        }
    }

    /// Single-line rendering for logs.
    pub fn line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Everything a format strategy consults while building its command.
pub struct RenderContext<'a> {
    pub profile: &'a Profile,
    pub aspect: Aspect,
    pub output_dir: &'a Path,
    pub audio_file: Option<&'a Path>,
    pub properties: &'a PropertyRegistry,
}

/// One output format: display identity, declared properties and the mapping
/// from a render context to the encoder invocation.
pub trait VideoFormat: Send + Sync {
    fn id(&self) -> FormatId;

    /// Display name of the format.
    fn name(&self) -> &'static str;

    /// Property names this format accepts.
    fn properties(&self) -> &'static [&'static str] {
        &[PROP_BITRATE, PROP_RENDER_SUBTITLE]
    }

    /// Declared default for a property.
    fn default_property(&self, name: &str) -> String {
        base_default(name)
    }

    /// Builds the encoder invocation for one render session.
    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand>;

    /// Probes the external tooling this format needs. Returns human-readable
    /// messages for anything missing; an empty list means ready to render.
    fn check_dependencies(&self) -> Vec<String> {
        probe::check_encoder(ENCODER_BIN)
    }
}

pub(crate) fn base_default(name: &str) -> String {
    match name {
        PROP_RENDER_SUBTITLE => "false".to_string(),
        _ => DEFAULT_SENTINEL.to_string(),
    }
}

/// Identity of an output format, used as registry key and factory handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    Vcd,
    Svcd,
    Dvd,
    Mpeg4Ac3,
    Mpeg4Mp3,
    Flash,
    Mjpeg,
}

impl FormatId {
    pub const ALL: [FormatId; 7] = [
        FormatId::Vcd,
        FormatId::Svcd,
        FormatId::Dvd,
        FormatId::Mpeg4Ac3,
        FormatId::Mpeg4Mp3,
        FormatId::Flash,
        FormatId::Mjpeg,
    ];

    /// Returns the strategy implementation for this format.
    pub fn strategy(self) -> &'static dyn VideoFormat {
        match self {
            FormatId::Vcd => &mpeg::VcdFormat,
            FormatId::Svcd => &mpeg::SvcdFormat,
            FormatId::Dvd => &mpeg::DvdFormat,
            FormatId::Mpeg4Ac3 => &mpeg4::Mpeg4Ac3Format,
            FormatId::Mpeg4Mp3 => &mpeg4::Mpeg4Mp3Format,
            FormatId::Flash => &flash::FlashFormat,
            FormatId::Mjpeg => &mjpeg::MjpegFormat,
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormatId::Vcd => "vcd",
            FormatId::Svcd => "svcd",
            FormatId::Dvd => "dvd",
            FormatId::Mpeg4Ac3 => "mpeg4-ac3",
            FormatId::Mpeg4Mp3 => "mpeg4-mp3",
            FormatId::Flash => "flash",
            FormatId::Mjpeg => "mjpeg",
        };
        write!(f, "{s}")
    }
}

impl FromStr for FormatId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vcd" => Ok(FormatId::Vcd),
            "svcd" => Ok(FormatId::Svcd),
            "dvd" => Ok(FormatId::Dvd),
            "mpeg4-ac3" => Ok(FormatId::Mpeg4Ac3),
            "mpeg4-mp3" => Ok(FormatId::Mpeg4Mp3),
            "flash" => Ok(FormatId::Flash),
            "mjpeg" => Ok(FormatId::Mjpeg),
            other => Err(config_error(format!("unknown format: {other}"))),
        }
    }
}

// --- Shared argument blocks ---

/// Arguments that configure the MJPEG frame stream on stdin. Every format
/// starts with these.
pub(crate) fn pipe_input_args() -> Vec<String> {
    ["-demuxer", "lavf", "-fps", "25", "-lavfdopts", "format=mjpeg"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(crate) fn audio_args(ctx: &RenderContext<'_>) -> Vec<String> {
    match ctx.audio_file {
        Some(path) => vec!["-audiofile".to_string(), path.to_string_lossy().into_owned()],
        None => vec![],
    }
}

/// True when subtitles are to be burned into the video.
pub(crate) fn subtitle_enabled(properties: &PropertyRegistry, id: FormatId) -> bool {
    let value = properties.get(id, PROP_RENDER_SUBTITLE).to_lowercase();
    !matches!(value.as_str(), "0" | "no" | "false")
}

pub(crate) fn subtitle_args(ctx: &RenderContext<'_>, id: FormatId) -> Vec<String> {
    if subtitle_enabled(ctx.properties, id) {
        vec![
            "-sub".to_string(),
            ctx.output_dir.join(SUBTITLE_FILE).to_string_lossy().into_owned(),
            "-subcp".to_string(),
            "utf8".to_string(),
        ]
    } else {
        vec![]
    }
}

/// Bitrate policy: an override left at its declared default defers to the
/// profile; anything else must parse as an integer.
pub(crate) fn resolve_bitrate(ctx: &RenderContext<'_>, id: FormatId) -> CoreResult<u32> {
    if ctx.properties.is_default(id, PROP_BITRATE) {
        return Ok(ctx.profile.bitrate());
    }
    let value = ctx.properties.get(id, PROP_BITRATE);
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| config_error(format!("Bitrate must be a number, got '{value}'")))
}

pub(crate) fn ffourcc(ctx: &RenderContext<'_>, id: FormatId) -> String {
    ctx.properties.get(id, PROP_FFOURCC)
}
