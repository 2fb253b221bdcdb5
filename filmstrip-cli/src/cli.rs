// filmstrip-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use filmstrip_core::{Aspect, FormatId, VideoNorm};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Filmstrip: photo slideshow renderer",
    long_about = "Assembles still photographs into a video slideshow using an \
                  external encoder via the filmstrip-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Renders a directory of photographs into a video
    Render(RenderArgs),
    /// Lists the available output formats and their properties
    Formats,
    /// Checks the external tool dependencies of every format
    Check,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Directory containing the photographs, rendered in file-name order
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where the video and encoder logs are written
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_name = "FORMAT", default_value = "mpeg4-mp3")]
    pub format: FormatId,

    /// Profile preset (VCD, SVCD, DVD, Medium, HD, FULL-HD)
    #[arg(short, long, value_name = "PROFILE", default_value = "Medium")]
    pub profile: String,

    /// Video norm (pal or ntsc)
    #[arg(long, value_name = "NORM", default_value = "pal")]
    pub norm: VideoNorm,

    /// Picture aspect ratio (4:3, 3:2 or 16:9)
    #[arg(long, value_name = "ASPECT", default_value = "4:3")]
    pub aspect: Aspect,

    /// Background audio file
    #[arg(short, long, value_name = "AUDIO_FILE")]
    pub audio: Option<PathBuf>,

    /// Format property assignment, repeatable (e.g. --set Bitrate=3000)
    #[arg(long = "set", value_name = "PROP=VALUE")]
    pub set: Vec<String>,

    /// Skip the external tool pre-flight check
    #[arg(long)]
    pub skip_checks: bool,
}
