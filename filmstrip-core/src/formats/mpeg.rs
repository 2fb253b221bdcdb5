//! The MPEG disc formats: VCD, SVCD and DVD.
//!
//! These three share one command shape and differ only in their codec and
//! rate-control tables. They are the only formats that constrain the
//! profile: the encoder's disc-compliant rate control presumes the matching
//! VCD/SVCD/DVD preset resolutions and bitrates.

use super::{
    ENCODER_BIN, FormatId, RenderCommand, RenderContext, VideoFormat, audio_args,
    pipe_input_args, subtitle_args,
};
use crate::error::{CoreResult, config_error};

const MPEG_PRESETS: [&str; 3] = ["VCD", "SVCD", "DVD"];

/// Codec/rate-control table for one MPEG variant.
struct MpegOptions {
    sample_rate: &'static str,
    lavcopts: String,
}

fn build_mpeg_command(
    format: &dyn VideoFormat,
    ctx: &RenderContext<'_>,
    options: &MpegOptions,
) -> CoreResult<RenderCommand> {
    if !MPEG_PRESETS.contains(&ctx.profile.name()) {
        return Err(config_error(format!(
            "{} supports only the VCD, SVCD and DVD profiles, got '{}'",
            format.name(),
            ctx.profile.name()
        )));
    }

    let output_file = ctx.output_dir.join("output.mpg");
    let mut args = pipe_input_args();
    args.extend(audio_args(ctx));
    args.extend(subtitle_args(ctx, format.id()));
    args.extend(
        [
            "-oac",
            "lavc",
            "-ovc",
            "lavc",
            "-of",
            "lavf",
            "-lavfopts",
            "format=mpg",
            "-srate",
            options.sample_rate,
            "-af",
            &format!("lavcresample={}", options.sample_rate),
            "-lavcopts",
            &options.lavcopts,
            "-ofps",
            "25",
            "-o",
            &output_file.to_string_lossy(),
            "-",
        ]
        .into_iter()
        .map(String::from),
    );

    Ok(RenderCommand::new(ENCODER_BIN, args, output_file))
}

pub struct VcdFormat;

impl VideoFormat for VcdFormat {
    fn id(&self) -> FormatId {
        FormatId::Vcd
    }

    fn name(&self) -> &'static str {
        "VCD (MPG)"
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let keyint = ctx.profile.norm().key_interval();
        let aspect = ctx.aspect.to_arg();
        let options = MpegOptions {
            sample_rate: "44100",
            lavcopts: format!(
                "vcodec=mpeg1video:keyint={keyint}:vrc_buf_size=327:vrc_minrate=1152:\
                 vbitrate=1152:vrc_maxrate=1152:acodec=mp2:abitrate=224:aspect={aspect}"
            ),
        };
        build_mpeg_command(self, ctx, &options)
    }
}

pub struct SvcdFormat;

impl VideoFormat for SvcdFormat {
    fn id(&self) -> FormatId {
        FormatId::Svcd
    }

    fn name(&self) -> &'static str {
        "SVCD (MPG)"
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let keyint = ctx.profile.norm().key_interval();
        let aspect = ctx.aspect.to_arg();
        let options = MpegOptions {
            sample_rate: "44100",
            lavcopts: format!(
                "vcodec=mpeg2video:mbd=2:keyint={keyint}:vrc_buf_size=917:vrc_minrate=600:\
                 vbitrate=2500:vrc_maxrate=2500:acodec=mp2:abitrate=224:aspect={aspect}"
            ),
        };
        build_mpeg_command(self, ctx, &options)
    }
}

pub struct DvdFormat;

impl VideoFormat for DvdFormat {
    fn id(&self) -> FormatId {
        FormatId::Dvd
    }

    fn name(&self) -> &'static str {
        "DVD (MPG)"
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let keyint = ctx.profile.norm().key_interval();
        let aspect = ctx.aspect.to_arg();
        let options = MpegOptions {
            sample_rate: "48000",
            lavcopts: format!(
                "vcodec=mpeg2video:vrc_buf_size=1835:vrc_maxrate=9800:vbitrate=5000:\
                 keyint={keyint}:vstrict=0:acodec=ac3:abitrate=192:aspect={aspect}"
            ),
        };
        build_mpeg_command(self, ctx, &options)
    }
}
