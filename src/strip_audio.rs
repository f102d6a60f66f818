use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::ffmpeg::{self, Quality, Tools};
use crate::format::{extension_of, normalize_format, MediaKind};
use crate::io::{ensure_distinct, silent_output_name, validate_input_file, warn_if_exists};
use crate::probe::MediaInfo;

#[derive(Args, Debug)]
pub struct StripAudioArgs {
    /// Input video file
    pub input: String,

    /// Output file (default: <input>_silent.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output quality preset
    #[arg(short, long, value_enum, default_value_t = Quality::Medium)]
    pub quality: Quality,
}

pub fn strip_audio(tools: &Tools, args: &StripAudioArgs) -> Result<()> {
    let input = validate_input_file(&args.input, MediaKind::Video)?;

    let output = match &args.output {
        Some(output) => match extension_of(output) {
            Some(extension) => {
                normalize_format(&extension).context("Error in output filename")?;
                output.clone()
            }
            // keep the container of the input
            None => match input.extension() {
                Some(extension) => output.with_extension(extension),
                None => output.clone(),
            },
        },
        None => silent_output_name(&input),
    };
    ensure_distinct(&input, &output)?;
    warn_if_exists(&output);

    println!("Loading video: {}", input.display());
    let info = MediaInfo::from_ffprobe_file(tools, &input)?;
    info.require_video(&input)?;
    println!("Video duration: {:.2} seconds", info.duration);

    if info.has_audio {
        println!("Removing audio track...");
    } else {
        println!("Warning: Video has no audio track (already silent)");
    }

    println!("Writing silent video: {}", output.display());
    ffmpeg::run(
        tools.strip_audio_command(&input, &output, args.quality),
        &output,
    )?;

    println!("Successfully removed audio from video: {}", output.display());
    Ok(())
}
