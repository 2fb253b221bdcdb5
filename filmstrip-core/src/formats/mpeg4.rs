//! The MPEG4 AVI formats, with AC3 or MP3 audio.

use super::{
    ENCODER_BIN, FormatId, RenderCommand, RenderContext, VideoFormat, audio_args, base_default,
    ffourcc, pipe_input_args, resolve_bitrate, subtitle_args,
};
use crate::error::CoreResult;
use crate::probe;
use crate::properties::{PROP_BITRATE, PROP_FFOURCC, PROP_RENDER_SUBTITLE};

const MPEG4_PROPERTIES: [&str; 3] = [PROP_BITRATE, PROP_RENDER_SUBTITLE, PROP_FFOURCC];

fn mpeg4_default(name: &str) -> String {
    match name {
        PROP_FFOURCC => "XVID".to_string(),
        other => base_default(other),
    }
}

pub struct Mpeg4Ac3Format;

impl VideoFormat for Mpeg4Ac3Format {
    fn id(&self) -> FormatId {
        FormatId::Mpeg4Ac3
    }

    fn name(&self) -> &'static str {
        "MPEG4-XVid/AC3 (AVI)"
    }

    fn properties(&self) -> &'static [&'static str] {
        &MPEG4_PROPERTIES
    }

    fn default_property(&self, name: &str) -> String {
        mpeg4_default(name)
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let bitrate = resolve_bitrate(ctx, self.id())?;
        let output_file = ctx.output_dir.join("output.avi");

        let mut args = pipe_input_args();
        args.extend(audio_args(ctx));
        args.extend(subtitle_args(ctx, self.id()));
        args.extend(
            [
                "-oac",
                "lavc",
                "-srate",
                "44100",
                "-ovc",
                "lavc",
                "-lavcopts",
                &format!("vcodec=mpeg4:vbitrate={bitrate}:vhq:autoaspect:acodec=ac3"),
                "-ffourcc",
                &ffourcc(ctx, self.id()),
                "-ofps",
                ctx.profile.norm().frame_rate(),
                "-o",
                &output_file.to_string_lossy(),
                "-",
            ]
            .into_iter()
            .map(String::from),
        );

        Ok(RenderCommand::new(ENCODER_BIN, args, output_file))
    }
}

pub struct Mpeg4Mp3Format;

impl VideoFormat for Mpeg4Mp3Format {
    fn id(&self) -> FormatId {
        FormatId::Mpeg4Mp3
    }

    fn name(&self) -> &'static str {
        "MPEG4-XVid/MP3 (AVI)"
    }

    fn properties(&self) -> &'static [&'static str] {
        &MPEG4_PROPERTIES
    }

    fn default_property(&self, name: &str) -> String {
        mpeg4_default(name)
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let bitrate = resolve_bitrate(ctx, self.id())?;
        let output_file = ctx.output_dir.join("output.avi");

        let mut args = pipe_input_args();
        args.extend(audio_args(ctx));
        args.extend(subtitle_args(ctx, self.id()));
        args.extend(
            [
                "-oac",
                "mp3lame",
                "-lameopts",
                "cbr:br=192",
                "-srate",
                "44100",
                "-ovc",
                "lavc",
                "-lavcopts",
                &format!("vcodec=mpeg4:vbitrate={bitrate}:vhq:autoaspect"),
                "-ffourcc",
                &ffourcc(ctx, self.id()),
                "-ofps",
                ctx.profile.norm().frame_rate(),
                "-o",
                &output_file.to_string_lossy(),
                "-",
            ]
            .into_iter()
            .map(String::from),
        );

        Ok(RenderCommand::new(ENCODER_BIN, args, output_file))
    }

    fn check_dependencies(&self) -> Vec<String> {
        probe::check_encoder_mp3(ENCODER_BIN)
    }
}
