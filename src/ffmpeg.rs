use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use crate::format::{audio_codec_for, is_lossless_audio, video_codecs_for};

/// Encoder quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum Quality {
    /// Near-lossless, large files (CRF 18, 192k audio)
    High,
    /// Balanced (CRF 23, 128k audio)
    #[default]
    Medium,
    /// Smaller files (CRF 28, 96k audio)
    Low,
}

impl Quality {
    pub fn crf(self) -> u8 {
        match self {
            Quality::High => 18,
            Quality::Medium => 23,
            Quality::Low => 28,
        }
    }

    pub fn audio_bitrate(self) -> &'static str {
        match self {
            Quality::High => "192k",
            Quality::Medium => "128k",
            Quality::Low => "96k",
        }
    }
}

/// Locations of the ffmpeg and ffprobe executables
#[derive(Debug, Clone)]
pub struct Tools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

#[cfg(test)]
impl Default for Tools {
    fn default() -> Self {
        Tools {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

impl Tools {
    pub fn ffmpeg_command(&self) -> Command {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-loglevel", "warning"]);
        cmd.stdout(Stdio::null());
        cmd
    }

    pub fn ffprobe_command(&self) -> Command {
        let mut cmd = Command::new(&self.ffprobe);
        cmd.args(["-hide_banner", "-loglevel", "warning"]);
        cmd
    }

    /// Re-encode `[start, end)` of a video; `None` runs to the end of the input.
    ///
    /// Seeking before `-i` restarts the output timestamps at zero so the second
    /// part of a split keeps audio and video in sync.
    pub fn video_clip_command(
        &self,
        input: &Path,
        start: f64,
        end: Option<f64>,
        output: &Path,
        quality: Quality,
    ) -> Command {
        let mut cmd = self.ffmpeg_command();
        add_range(&mut cmd, input, start, end);

        let codecs = video_codecs_for(output);
        cmd.args(["-c:v", codecs.video, "-c:a", codecs.audio]);
        add_crf(&mut cmd, codecs.video, quality);

        add_output(&mut cmd, output);
        cmd
    }

    pub fn audio_clip_command(
        &self,
        input: &Path,
        start: f64,
        end: Option<f64>,
        output: &Path,
        quality: Quality,
    ) -> Command {
        let mut cmd = self.ffmpeg_command();
        add_range(&mut cmd, input, start, end);

        let codec = audio_codec_for(output);
        cmd.args(["-vn", "-c:a", codec]);
        if !is_lossless_audio(codec) {
            cmd.args(["-b:a", quality.audio_bitrate()]);
        }

        add_output(&mut cmd, output);
        cmd
    }

    /// Join inputs end to end with the concat filter. Audio is only carried when
    /// every input has an audio stream.
    pub fn concat_command(&self, inputs: &[PathBuf], with_audio: bool, output: &Path) -> Command {
        let mut cmd = self.ffmpeg_command();
        for input in inputs {
            cmd.arg("-i").arg(input);
        }

        cmd.arg("-filter_complex")
            .arg(concat_filter(inputs.len(), with_audio));
        cmd.args(["-map", "[v]"]);

        let codecs = video_codecs_for(output);
        cmd.args(["-c:v", codecs.video]);
        if with_audio {
            cmd.args(["-map", "[a]", "-c:a", codecs.audio]);
        }

        add_output(&mut cmd, output);
        cmd
    }

    pub fn convert_command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = self.ffmpeg_command();
        cmd.arg("-i").arg(input);

        let codecs = video_codecs_for(output);
        cmd.args(["-c:v", codecs.video, "-c:a", codecs.audio]);

        add_output(&mut cmd, output);
        cmd
    }

    pub fn strip_audio_command(&self, input: &Path, output: &Path, quality: Quality) -> Command {
        let mut cmd = self.ffmpeg_command();
        cmd.arg("-i").arg(input);

        let codecs = video_codecs_for(output);
        cmd.args(["-an", "-c:v", codecs.video]);
        add_crf(&mut cmd, codecs.video, quality);

        add_output(&mut cmd, output);
        cmd
    }
}

fn add_range(cmd: &mut Command, input: &Path, start: f64, end: Option<f64>) {
    cmd.arg("-ss").arg(format!("{:.3}", start));
    cmd.arg("-i").arg(input);
    if let Some(end) = end {
        cmd.arg("-t").arg(format!("{:.3}", end - start));
    }
}

// png frames in avi have no rate control
fn add_crf(cmd: &mut Command, video_codec: &str, quality: Quality) {
    if video_codec != "png" {
        cmd.arg("-crf").arg(quality.crf().to_string());
    }
}

fn add_output(cmd: &mut Command, output: &Path) {
    cmd.arg("-y").arg(output);
}

fn concat_filter(count: usize, with_audio: bool) -> String {
    let mut filter = String::new();
    for i in 0..count {
        filter.push_str(&format!("[{}:v:0]", i));
        if with_audio {
            filter.push_str(&format!("[{}:a:0]", i));
        }
    }
    if with_audio {
        filter.push_str(&format!("concat=n={}:v=1:a=1[v][a]", count));
    } else {
        filter.push_str(&format!("concat=n={}:v=1:a=0[v]", count));
    }
    filter
}

/// Run an ffmpeg command that writes `output`
pub fn run(mut cmd: Command, output: &Path) -> Result<()> {
    debug!(command = ?cmd, "running ffmpeg");

    let status = cmd
        .status()
        .with_context(|| format!("Failed to launch {}", cmd.get_program().to_string_lossy()))?;

    if !status.success() {
        return Err(anyhow::anyhow!(
            "ffmpeg failed to write {} ({})",
            output.display(),
            status
        ));
    }

    Ok(())
}
