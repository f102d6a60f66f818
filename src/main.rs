mod concat;
mod convert;
mod duration;
mod ffmpeg;
mod format;
mod io;
mod probe;
mod split;
mod strip_audio;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::concat::ConcatArgs;
use crate::convert::ConvertArgs;
use crate::ffmpeg::Tools;
use crate::format::MediaKind;
use crate::split::SplitArgs;
use crate::strip_audio::StripAudioArgs;

/// Split, concatenate, convert and mute video files with ffmpeg
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// ffmpeg executable
    #[arg(long, env = "VIDKIT_FFMPEG", default_value = "ffmpeg", global = true)]
    ffmpeg: PathBuf,

    /// ffprobe executable
    #[arg(long, env = "VIDKIT_FFPROBE", default_value = "ffprobe", global = true)]
    ffprobe: PathBuf,

    /// Log diagnostics to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a video into two parts at a given time
    SplitVideo(SplitArgs),
    /// Split an audio file (m4a, mp3, wav, aac, flac, ogg) into two parts at a given time
    SplitAudio(SplitArgs),
    /// Join videos end to end into one file
    Concat(ConcatArgs),
    /// Convert a video to another container format
    Convert(ConvertArgs),
    /// Write a copy of a video without its audio track
    RemoveAudio(StripAudioArgs),
}

fn init_logging(verbose: u8) {
    // RUST_LOG wins unless -v was given
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tools = Tools {
        ffmpeg: cli.ffmpeg,
        ffprobe: cli.ffprobe,
    };

    match &cli.command {
        Commands::SplitVideo(args) => split::split(&tools, MediaKind::Video, args),
        Commands::SplitAudio(args) => split::split(&tools, MediaKind::Audio, args),
        Commands::Concat(args) => concat::concat(&tools, args),
        Commands::Convert(args) => convert::convert(&tools, args),
        Commands::RemoveAudio(args) => strip_audio::strip_audio(&tools, args),
    }
}
