//! The Motion-JPEG (AVI) format. Frames are stored as-is, so no bitrate
//! control applies.

use super::{
    ENCODER_BIN, FormatId, RenderCommand, RenderContext, VideoFormat, audio_args,
    pipe_input_args, subtitle_args,
};
use crate::error::CoreResult;

pub struct MjpegFormat;

impl VideoFormat for MjpegFormat {
    fn id(&self) -> FormatId {
        FormatId::Mjpeg
    }

    fn name(&self) -> &'static str {
        "Motion-JPEG (AVI)"
    }

    fn build_command(&self, ctx: &RenderContext<'_>) -> CoreResult<RenderCommand> {
        let output_file = ctx.output_dir.join("output.avi");

        let mut args = pipe_input_args();
        args.extend(audio_args(ctx));
        args.extend(subtitle_args(ctx, self.id()));
        args.extend(
            [
                "-oac",
                "pcm",
                "-srate",
                "44100",
                "-ovc",
                "lavc",
                "-lavcopts",
                "vcodec=mjpeg",
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
}
