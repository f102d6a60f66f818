use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::duration::{check_within, format_timestamp, parse_duration};
use crate::ffmpeg::{self, Quality, Tools};
use crate::format::MediaKind;
use crate::io::{
    ensure_distinct, ensure_distinct_outputs, split_output_names, validate_input_file,
    warn_if_exists,
};
use crate::probe::MediaInfo;

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input file
    pub input: String,

    /// Where to split: seconds (300), MM:SS (05:30) or HH:MM:SS (01:05:30)
    #[arg(short, long, allow_hyphen_values = true)]
    pub duration: String,

    /// Output file for part 1 (default: <input>_part1.<ext>)
    #[arg(long)]
    pub output1: Option<PathBuf>,

    /// Output file for part 2 (default: <input>_part2.<ext>)
    #[arg(long)]
    pub output2: Option<PathBuf>,

    /// Output quality preset
    #[arg(short, long, value_enum, default_value_t = Quality::Medium)]
    pub quality: Quality,
}

/// Split one file into `[0, d)` and `[d, end]`
pub fn split(tools: &Tools, kind: MediaKind, args: &SplitArgs) -> Result<()> {
    let input = validate_input_file(&args.input, kind)?;
    let split_at = parse_duration(&args.duration)?;

    let (default_part1, default_part2) = split_output_names(&input);
    let part1 = args.output1.clone().unwrap_or(default_part1);
    let part2 = args.output2.clone().unwrap_or(default_part2);
    ensure_distinct(&input, &part1)?;
    ensure_distinct(&input, &part2)?;
    ensure_distinct_outputs(&part1, &part2)?;
    warn_if_exists(&part1);
    warn_if_exists(&part2);

    let label = match kind {
        MediaKind::Video => "video",
        MediaKind::Audio => "audio",
    };

    println!("Loading {}: {}", label, input.display());
    let info = MediaInfo::from_ffprobe_file(tools, &input)?;
    if kind == MediaKind::Video {
        info.require_video(&input)?;
    }
    println!("Total duration: {:.2} seconds", info.duration);

    let split_at = check_within(split_at, info.duration)?;
    println!(
        "Splitting at: {} ({:.2} seconds)",
        format_timestamp(split_at),
        split_at
    );

    let clip = |start: f64, end: Option<f64>, output: &PathBuf| match kind {
        MediaKind::Video => tools.video_clip_command(&input, start, end, output, args.quality),
        MediaKind::Audio => tools.audio_clip_command(&input, start, end, output, args.quality),
    };

    println!("Creating part 1: {}", part1.display());
    ffmpeg::run(clip(0.0, Some(split_at), &part1), &part1)?;

    println!("Creating part 2: {}", part2.display());
    ffmpeg::run(clip(split_at, None, &part2), &part2)?;

    println!("Successfully split {} into:", label);
    println!("  Part 1: {} (0.00s to {:.2}s)", part1.display(), split_at);
    println!(
        "  Part 2: {} ({:.2}s to {:.2}s)",
        part2.display(),
        split_at,
        info.duration
    );
    Ok(())
}
