//! The Flash Video (FLV) format.

use super::{
    ENCODER_BIN, FormatId, RenderCommand, RenderContext, VideoFormat, audio_args,
    pipe_input_args, resolve_bitrate, subtitle_args,
};
use crate::error::CoreResult;
use crate::probe;

pub struct FlashFormat;

impl VideoFormat for FlashFormat {
    fn id(&self) -> FormatId {
        FormatId::Flash
    }

    fn name(&self) -> &'static str {
        "Flash-Video (FLV)"
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let bitrate = resolve_bitrate(ctx, self.id())?;
        let output_file = ctx.output_dir.join("output.flv");

        let mut args = pipe_input_args();
        args.extend(audio_args(ctx));
        args.extend(subtitle_args(ctx, self.id()));
        args.extend(
            [
                "-oac",
                "mp3lame",
                "-lameopts",
                "cbr:br=128",
                "-srate",
                "44100",
                "-ovc",
                "lavc",
                "-lavcopts",
                &format!("vcodec=flv:vbitrate={bitrate}:mbd=2:mv0:trell:v4mv:cbp:last_pred=3"),
                "-of",
                "lavf",
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
