//! Render session lifecycle.
//!
//! A `RenderSession` owns the external encoder process for one video output:
//! it builds the invocation through the selected format strategy, launches
//! the child with its stdin piped and its stdout/stderr captured to log
//! files, and hands submitted frames to the `FrameFeeder`. `finalize` drains
//! the feeder, reaps the child and runs the format's post-processing;
//! `abort` kills the child and drops whatever is still queued.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use log::{debug, warn};

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::feeder::{CancelToken, FrameFeeder};
use crate::formats::{
    ENCODER_BIN, FormatId, RenderCommand, RenderContext, SUBTITLE_FILE, subtitle_enabled,
};
use crate::profile::{Aspect, Profile};
use crate::properties::PropertyRegistry;

/// JPEG quality for frames streamed to the encoder.
const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Configuration stored, no process launched.
    Idle,
    /// Encoder process running, feeder started, no frame submitted yet.
    Prepared,
    /// Frames are being accepted.
    Running,
    /// Graceful completion; terminal.
    Finalized,
    /// Cancelled mid-render; terminal.
    Aborted,
}

/// Drives one external encoder process from preparation to completion.
pub struct RenderSession {
    format: FormatId,
    profile: Profile,
    aspect: Aspect,
    output_dir: PathBuf,
    audio_file: Option<PathBuf>,
    properties: Arc<PropertyRegistry>,
    state: SessionState,
    command: Option<RenderCommand>,
    child: Option<Child>,
    feeder: Option<FrameFeeder>,
    cancel: CancelToken,
}

impl RenderSession {
    /// Stores the render configuration. Nothing is launched until
    /// [`prepare`](Self::prepare).
    pub fn new(
        format: FormatId,
        profile: Profile,
        aspect: Aspect,
        output_dir: impl Into<PathBuf>,
        properties: Arc<PropertyRegistry>,
    ) -> Self {
        Self {
            format,
            profile,
            aspect,
            output_dir: output_dir.into(),
            audio_file: None,
            properties,
            state: SessionState::Idle,
            command: None,
            child: None,
            feeder: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn set_audio_file(&mut self, path: impl Into<PathBuf>) {
        self.audio_file = Some(path.into());
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Token another thread may use to request cancellation. After the token
    /// fires, `submit_frame` refuses further frames and the owning thread is
    /// expected to call [`abort`](Self::abort).
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Path of the media file this session writes, once prepared.
    pub fn output_file(&self) -> Option<&Path> {
        self.command.as_ref().map(|c| c.output_file.as_path())
    }

    /// Builds the encoder command and launches the process, capturing its
    /// output streams to `<tool>_out.log` / `<tool>_err.log` under the
    /// output directory and binding the frame feeder to its stdin.
    pub fn prepare(&mut self) -> CoreResult<()> {
        if self.state != SessionState::Idle {
            return Err(CoreError::OperationFailed(
                "render session is already prepared".to_string(),
            ));
        }
        fs::create_dir_all(&self.output_dir)?;

        let command = {
            let ctx = RenderContext {
                profile: &self.profile,
                aspect: self.aspect,
                output_dir: &self.output_dir,
                audio_file: self.audio_file.as_deref(),
                properties: &self.properties,
            };
            self.format.strategy().build_command(&ctx)?
        };
        self.launch(command)
    }

    fn launch(&mut self, command: RenderCommand) -> CoreResult<()> {
        debug!("launching encoder: {}", command.line());

        let out_log = self.open_log("out")?;
        let err_log = self.open_log("err")?;

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(out_log))
            .stderr(Stdio::from(err_log))
            .spawn()
            .map_err(|e| command_start_error(&command.program, e))?;

        let stdin = child.stdin.take().ok_or_else(|| {
            CoreError::OperationFailed("encoder stdin was not captured".to_string())
        })?;
        self.feeder = Some(FrameFeeder::start(stdin, self.cancel.clone())?);
        self.child = Some(child);
        self.command = Some(command);
        self.state = SessionState::Prepared;
        Ok(())
    }

    /// Encodes the image as a quality-95 JPEG frame and queues it for the
    /// encoder. Blocks while the feeder queue is full; this backpressure is
    /// the intended throttle on the render loop.
    pub fn submit_frame(&mut self, image: &DynamicImage) -> CoreResult<()> {
        match self.state {
            SessionState::Prepared | SessionState::Running => {}
            _ => {
                return Err(CoreError::OperationFailed(
                    "render session is not accepting frames".to_string(),
                ));
            }
        }
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let frame = encode_frame(image)?;
        self.feeder
            .as_ref()
            .ok_or(CoreError::FeederStopped)?
            .enqueue(frame)?;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Drains the feeder, waits for the encoder to exit and performs the
    /// format's post-processing. No-op unless the session was prepared.
    /// A non-zero encoder exit is the fatal signal for the whole render.
    pub fn finalize(&mut self) -> CoreResult<()> {
        match self.state {
            SessionState::Prepared | SessionState::Running => {}
            _ => return Ok(()),
        }

        if let Some(mut feeder) = self.feeder.take() {
            feeder.finish()?;
        }
        let status = match self.child.take() {
            Some(mut child) => Some(child.wait()?),
            None => None,
        };
        self.remove_subtitle_artifact()?;
        self.state = SessionState::Finalized;

        if let Some(status) = status
            && !status.success()
        {
            let tool = self
                .command
                .as_ref()
                .map_or(ENCODER_BIN, |c| c.program.as_str());
            return Err(command_failed_error(tool, status));
        }
        Ok(())
    }

    /// Tears the session down without post-processing: kills the encoder,
    /// cancels the feeder and reaps the child. Safe with frames still
    /// queued; the kill fails any blocked pipe write, so the feeder worker
    /// stops within one poll interval.
    pub fn abort(&mut self) -> CoreResult<()> {
        match self.state {
            SessionState::Prepared | SessionState::Running => {}
            _ => return Ok(()),
        }

        self.cancel.cancel();
        if let Some(child) = self.child.as_mut()
            && let Err(err) = child.kill()
        {
            warn!("failed to kill encoder process: {err}");
        }
        if let Some(mut feeder) = self.feeder.take() {
            feeder.shutdown()?;
        }
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            debug!("encoder exited after abort with {status}");
        }
        self.state = SessionState::Aborted;
        Ok(())
    }

    /// Removes the transient subtitle file when it was burned into the
    /// video and has no business surviving next to the output.
    fn remove_subtitle_artifact(&self) -> CoreResult<()> {
        if subtitle_enabled(&self.properties, self.format) {
            let srt = self.output_dir.join(SUBTITLE_FILE);
            if srt.exists() {
                debug!("removing transient subtitle file {}", srt.display());
                fs::remove_file(&srt)?;
            }
        }
        Ok(())
    }

    fn open_log(&self, suffix: &str) -> CoreResult<File> {
        let path = self.output_dir.join(format!("{ENCODER_BIN}_{suffix}.log"));
        Ok(OpenOptions::new().create(true).append(true).open(path)?)
    }
}

/// JPEG-encodes one in-memory image into a frame buffer.
fn encode_frame(image: &DynamicImage) -> CoreResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CoreError::OperationFailed(format!("JPEG frame encoding failed: {e}")))?;
    Ok(buf)
}
