//! External tool capability probing.
//!
//! Every check runs the tool, inspects its merged output for the expected
//! markers and reports anything missing as a human-readable message. Probe
//! failures (tool missing, non-zero exit) are never errors here; a missing
//! tool simply yields messages and the caller decides policy, typically by
//! not offering the affected formats.

use std::process::Command;

use log::debug;

/// Runs a tool with the given arguments and returns its merged
/// stdout/stderr, or `None` when it could not be started.
fn capture_output(bin: &str, args: &[&str]) -> Option<String> {
    match Command::new(bin).args(args).output() {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            Some(text)
        }
        Err(err) => {
            debug!("probing '{bin}' failed: {err}");
            None
        }
    }
}

/// Checks that the encoder binary exists and identifies itself.
pub fn check_encoder(bin: &str) -> Vec<String> {
    let mut missing = Vec::new();
    let output = capture_output(bin, &[]).unwrap_or_default();
    let head = output.trim_start().to_ascii_lowercase();
    if !(head.starts_with("mplayer") || head.starts_with("mencoder")) {
        missing.push(format!("mencoder ({bin}) required!"));
    }
    missing
}

/// Checks the encoder plus its MP3 audio codec support.
pub fn check_encoder_mp3(bin: &str) -> Vec<String> {
    let mut missing = check_encoder(bin);
    if !missing.is_empty() {
        return missing;
    }

    let output = capture_output(bin, &["-oac", "help"]).unwrap_or_default();
    if !output.contains("mp3lame") {
        missing.push(format!("{bin} with MP3 support (mp3lame) required!"));
    }
    missing
}
