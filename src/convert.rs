use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::ffmpeg::{self, Tools};
use crate::format::{extension_of, normalize_format, MediaKind};
use crate::io::{convert_output_name, ensure_distinct, validate_input_file, warn_if_exists};
use crate::probe::MediaInfo;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input video file
    pub input: String,

    /// Output file (default: input name with the new extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "mp4")]
    pub format: String,
}

pub fn convert(tools: &Tools, args: &ConvertArgs) -> Result<()> {
    let input = validate_input_file(&args.input, MediaKind::Video)?;
    let format = normalize_format(&args.format)?;

    let output = match &args.output {
        Some(output) => match extension_of(output) {
            Some(extension) => {
                normalize_format(&extension).context("Error in output filename")?;
                output.clone()
            }
            None => output.with_extension(&format),
        },
        None => convert_output_name(&input, &format),
    };
    ensure_distinct(&input, &output)?;
    warn_if_exists(&output);

    println!("Loading video: {}", input.display());
    let info = MediaInfo::from_ffprobe_file(tools, &input)?;
    info.require_video(&input)?;
    println!("Video duration: {:.2} seconds", info.duration);

    println!("Converting to: {}", output.display());
    ffmpeg::run(tools.convert_command(&input, &output), &output)?;

    println!("Successfully converted video: {}", output.display());
    Ok(())
}
