//! Audio clip duration probing via the external media player.
//!
//! The renderer treats this as an opaque oracle: a clip either has a known
//! duration or it does not. Probe failures are absence, never errors.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

/// Name of the external media player binary used for probing.
pub const PLAYER_BIN: &str = "mplayer";

/// An audio file with its probed duration.
#[derive(Debug, Clone)]
pub struct AudioClip {
    path: PathBuf,
    duration: Option<f64>,
}

impl AudioClip {
    /// Probes the clip's duration by identifying it without playback.
    pub fn probe(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let duration = identify_duration(&path);
        Self { path, duration }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Duration in seconds, or `None` when probing failed.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_ok(&self) -> bool {
        self.duration.is_some()
    }
}

fn identify_duration(path: &Path) -> Option<f64> {
    let output = Command::new(PLAYER_BIN)
        .args(["-identify", "-frames", "0", "-ao", "null", "-vo", "null"])
        .arg(path)
        .output()
        .map_err(|err| {
            debug!("identifying audio with {PLAYER_BIN} failed: {err}");
            err
        })
        .ok()?;

    let text = String::from_utf8_lossy(&output.stdout);
    parse_id_length(&text)
}

/// Extracts the `ID_LENGTH=<seconds>` marker from identify output.
fn parse_id_length(output: &str) -> Option<f64> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("ID_LENGTH="))
        .and_then(|value| value.trim().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_length_marker() {
        let output = "ID_AUDIO_CODEC=mp3\nID_LENGTH=183.42\nID_EXIT=EOF\n";
        assert_eq!(parse_id_length(output), Some(183.42));
    }

    #[test]
    fn missing_marker_yields_none() {
        assert_eq!(parse_id_length("ID_EXIT=EOF\n"), None);
        assert_eq!(parse_id_length(""), None);
        assert_eq!(parse_id_length("ID_LENGTH=abc\n"), None);
    }

    #[test]
    fn probe_of_missing_file_is_absence_not_error() {
        let clip = AudioClip::probe("/no/such/clip.mp3");
        assert!(!clip.is_ok());
        assert_eq!(clip.duration(), None);
    }
}
