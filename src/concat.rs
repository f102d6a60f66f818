use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::ffmpeg::{self, Tools};
use crate::format::MediaKind;
use crate::io::{concat_output_name, ensure_distinct, validate_input_file, warn_if_exists};
use crate::probe::MediaInfo;

#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// Input video files, joined in the order given
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<String>,

    /// Output file (default: <input1>_concat_<input2>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn concat(tools: &Tools, args: &ConcatArgs) -> Result<()> {
    let mut inputs = Vec::with_capacity(args.inputs.len());
    for (i, input) in args.inputs.iter().enumerate() {
        let input = validate_input_file(input, MediaKind::Video)
            .with_context(|| format!("Error with input {}", i + 1))?;
        inputs.push(input);
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| concat_output_name(&inputs));
    for input in &inputs {
        ensure_distinct(input, &output)?;
    }
    warn_if_exists(&output);

    let mut total_duration = 0.0;
    let mut with_audio = true;
    for (i, input) in inputs.iter().enumerate() {
        println!("Loading video {}: {}", i + 1, input.display());
        let info = MediaInfo::from_ffprobe_file(tools, input)?;
        info.require_video(input)?;
        println!("Video {} duration: {:.2} seconds", i + 1, info.duration);
        total_duration += info.duration;
        with_audio &= info.has_audio;
    }
    if !with_audio {
        println!("Warning: Not every input has an audio track, the output will be silent");
    }

    println!("Concatenating {} videos into: {}", inputs.len(), output.display());
    ffmpeg::run(tools.concat_command(&inputs, with_audio, &output), &output)?;

    println!("Output video duration: {:.2} seconds", total_duration);
    println!("Successfully concatenated videos into: {}", output.display());
    Ok(())
}
