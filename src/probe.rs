use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::ffmpeg::Tools;

#[derive(Deserialize, Debug)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Deserialize, Debug)]
struct FfprobeStream {
    codec_type: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FfprobeFormat {
    // ffprobe prints numbers as strings
    duration: Option<String>,
}

/// What the commands need to know about an input file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub duration: f64,
    pub has_video: bool,
    pub has_audio: bool,
}

impl MediaInfo {
    pub fn from_ffprobe_file(tools: &Tools, path: &Path) -> Result<Self> {
        let output = tools
            .ffprobe_command()
            .args([
                "-show_entries",
                "format=duration:stream=codec_type",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .with_context(|| {
                format!("Failed to launch {}", tools.ffprobe.display())
            })?;

        if !output.status.success() {
            let error_message = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "ffprobe could not read {}: {}",
                path.display(),
                error_message.trim()
            ));
        }

        let info = Self::from_ffprobe_json(&output.stdout)
            .with_context(|| format!("Unable to determine media duration: {}", path.display()))?;
        debug!(path = %path.display(), ?info, "probed");
        Ok(info)
    }

    pub fn require_video(&self, path: &Path) -> Result<()> {
        if !self.has_video {
            return Err(anyhow!("No video stream found in file: {}", path.display()));
        }
        Ok(())
    }

    pub fn from_ffprobe_json(json: &[u8]) -> Result<Self> {
        let probe: FfprobeOutput = serde_json::from_slice(json)?;

        let duration = probe
            .format
            .and_then(|format| format.duration)
            .ok_or_else(|| anyhow!("ffprobe reported no duration"))?;
        let duration: f64 = duration
            .trim()
            .parse()
            .with_context(|| format!("ffprobe duration is not a number: {}", duration))?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(anyhow!("ffprobe duration is not positive: {}", duration));
        }

        let has_kind = |kind: &str| {
            probe
                .streams
                .iter()
                .any(|stream| stream.codec_type.as_deref() == Some(kind))
        };

        Ok(MediaInfo {
            duration,
            has_video: has_kind("video"),
            has_audio: has_kind("audio"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffprobe_json() {
        let json = br#"{
            "programs": [],
            "streams": [
                { "codec_type": "video" },
                { "codec_type": "audio" }
            ],
            "format": { "duration": "400.016000" }
        }"#;
        let info = MediaInfo::from_ffprobe_json(json).unwrap();
        assert_eq!(info.duration, 400.016);
        assert!(info.has_video);
        assert!(info.has_audio);
    }

    #[test]
    fn test_silent_video() {
        let json = br#"{ "streams": [{ "codec_type": "video" }], "format": { "duration": "12.5" } }"#;
        let info = MediaInfo::from_ffprobe_json(json).unwrap();
        assert!(info.has_video);
        assert!(!info.has_audio);
        assert!(info.require_video(Path::new("in.mp4")).is_ok());

        let json = br#"{ "streams": [{ "codec_type": "audio" }], "format": { "duration": "3" } }"#;
        let info = MediaInfo::from_ffprobe_json(json).unwrap();
        assert!(info.require_video(Path::new("in.mp4")).is_err());
    }

    #[test]
    fn test_missing_or_bad_duration() {
        assert!(MediaInfo::from_ffprobe_json(br#"{ "streams": [] }"#).is_err());
        assert!(MediaInfo::from_ffprobe_json(br#"{ "format": {} }"#).is_err());
        assert!(MediaInfo::from_ffprobe_json(br#"{ "format": { "duration": "N/A" } }"#).is_err());
        assert!(MediaInfo::from_ffprobe_json(br#"{ "format": { "duration": "0.000" } }"#).is_err());
        assert!(MediaInfo::from_ffprobe_json(b"not json").is_err());
    }

    #[test]
    fn test_missing_ffprobe_binary() {
        let tools = Tools {
            ffprobe: "/nonexistent/ffprobe".into(),
            ..Tools::default()
        };
        let err = MediaInfo::from_ffprobe_file(&tools, Path::new("in.mp4")).unwrap_err();
        assert!(err.to_string().contains("Failed to launch"));
    }
}
