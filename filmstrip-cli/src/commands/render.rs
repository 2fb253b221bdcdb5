//! The `render` command: drives one render session from a directory of
//! photographs to a finished video.

use std::sync::Arc;

use indicatif::ProgressBar;
use log::{info, warn};

use filmstrip_core::error::{CoreError, CoreResult, config_error};
use filmstrip_core::{AudioClip, PropertyRegistry, RenderSession, find_images, find_profile};

use crate::cli::RenderArgs;

pub fn execute_render(args: RenderArgs) -> CoreResult<()> {
    let strategy = args.format.strategy();

    // Configuration errors surface before anything is probed or launched.
    let profile = find_profile(&args.profile, args.norm)
        .ok_or_else(|| config_error(format!("unknown profile: {}", args.profile)))?;

    let properties = Arc::new(PropertyRegistry::new());
    for assignment in &args.set {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            config_error(format!("expected PROP=VALUE, got '{assignment}'"))
        })?;
        properties.set(args.format, name, value);
    }

    if !args.skip_checks {
        let missing = strategy.check_dependencies();
        if !missing.is_empty() {
            return Err(CoreError::Configuration(missing.join("; ")));
        }
    }

    let images = find_images(&args.input_dir)?;
    info!(
        "rendering {} photographs as {} ({} {})",
        images.len(),
        strategy.name(),
        profile.name(),
        args.norm,
    );

    let mut session = RenderSession::new(
        args.format,
        profile,
        args.aspect,
        &args.output_dir,
        properties,
    );

    if let Some(audio) = &args.audio {
        let clip = AudioClip::probe(audio);
        match clip.duration() {
            Some(duration) => info!("audio clip {} ({duration:.1}s)", audio.display()),
            None => warn!("could not probe duration of {}", audio.display()),
        }
        session.set_audio_file(audio);
    }

    session.prepare()?;

    let progress = ProgressBar::new(images.len() as u64);
    for path in &images {
        let image = match image::open(path) {
            Ok(image) => image,
            Err(err) => {
                session.abort()?;
                return Err(CoreError::OperationFailed(format!(
                    "failed to load '{}': {err}",
                    path.display()
                )));
            }
        };
        if let Err(err) = session.submit_frame(&image) {
            session.abort()?;
            return Err(err);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    session.finalize()?;
    if let Some(output) = session.output_file() {
        info!("wrote {}", output.display());
    }
    Ok(())
}
