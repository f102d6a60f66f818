use std::path::Path;

use thiserror::Error;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "m4v"];
pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "mp3", "wav", "aac", "flac", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => VIDEO_EXTENSIONS,
            MediaKind::Audio => AUDIO_EXTENSIONS,
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            MediaKind::Video => "a video file",
            MediaKind::Audio => "an audio file",
        }
    }

    /// Case-insensitive check of the file extension
    pub fn accepts<P: AsRef<Path>>(self, path: P) -> bool {
        extension_of(path.as_ref())
            .map_or(false, |ext| self.extensions().contains(&ext.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Output format is empty")]
    Empty,
    #[error("Unsupported output format: {0}. Supported: {supported}", supported = VIDEO_EXTENSIONS.join(", "))]
    Unsupported(String),
}

/// Lowercased extension without the dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Accepts "mp4", ".MP4" or " mp4 " and returns "mp4".
pub fn normalize_format(format: &str) -> Result<String, FormatError> {
    let format = format.trim().to_lowercase();
    let format = format.strip_prefix('.').unwrap_or(&format);

    if format.is_empty() {
        return Err(FormatError::Empty);
    }
    if !VIDEO_EXTENSIONS.contains(&format) {
        return Err(FormatError::Unsupported(format.to_string()));
    }
    Ok(format.to_string())
}

/// Video and audio encoders used when writing a video to `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoCodecs {
    pub video: &'static str,
    pub audio: &'static str,
}

pub fn video_codecs_for<P: AsRef<Path>>(output: P) -> VideoCodecs {
    match extension_of(output.as_ref()).as_deref() {
        Some("avi") => VideoCodecs {
            video: "png",
            audio: "aac",
        },
        Some("webm") => VideoCodecs {
            video: "libvpx",
            audio: "libvorbis",
        },
        _ => VideoCodecs {
            video: "libx264",
            audio: "aac",
        },
    }
}

pub fn audio_codec_for<P: AsRef<Path>>(output: P) -> &'static str {
    match extension_of(output.as_ref()).as_deref() {
        Some("mp3") => "libmp3lame",
        Some("wav") => "pcm_s16le",
        Some("flac") => "flac",
        Some("ogg") => "libvorbis",
        _ => "aac",
    }
}

/// Lossless codecs ignore a target bitrate
pub fn is_lossless_audio(codec: &str) -> bool {
    matches!(codec, "pcm_s16le" | "flac")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_extension_case_insensitively() {
        assert!(MediaKind::Video.accepts("video.mp4"));
        assert!(MediaKind::Video.accepts("VIDEO.MOV"));
        assert!(MediaKind::Video.accepts("dir/clip.WebM"));
        assert!(!MediaKind::Video.accepts("song.mp3"));
        assert!(!MediaKind::Video.accepts("no_extension"));
        assert!(MediaKind::Audio.accepts("song.FLAC"));
        assert!(!MediaKind::Audio.accepts("video.mp4"));
    }

    #[test]
    fn test_normalize_format() {
        assert_eq!(normalize_format("mp4"), Ok("mp4".to_string()));
        assert_eq!(normalize_format("MP4"), Ok("mp4".to_string()));
        assert_eq!(normalize_format(".mkv"), Ok("mkv".to_string()));
        assert_eq!(normalize_format(" mov "), Ok("mov".to_string()));
        for format in VIDEO_EXTENSIONS {
            assert!(normalize_format(format).is_ok());
        }
    }

    #[test]
    fn test_normalize_format_rejects() {
        assert_eq!(normalize_format(""), Err(FormatError::Empty));
        assert_eq!(normalize_format("   "), Err(FormatError::Empty));
        assert_eq!(normalize_format("."), Err(FormatError::Empty));
        let err = normalize_format("xyz").unwrap_err();
        assert_eq!(err, FormatError::Unsupported("xyz".to_string()));
        assert!(err.to_string().starts_with("Unsupported output format: xyz. Supported: mp4"));
    }

    #[test]
    fn test_video_codecs() {
        assert_eq!(video_codecs_for("out.mp4").video, "libx264");
        assert_eq!(video_codecs_for("out.mov").audio, "aac");
        assert_eq!(video_codecs_for("out.avi").video, "png");
        assert_eq!(
            video_codecs_for("out.WEBM"),
            VideoCodecs {
                video: "libvpx",
                audio: "libvorbis"
            }
        );
        assert_eq!(video_codecs_for("out.mkv").video, "libx264");
    }

    #[test]
    fn test_audio_codecs() {
        assert_eq!(audio_codec_for("a.m4a"), "aac");
        assert_eq!(audio_codec_for("a.mp3"), "libmp3lame");
        assert_eq!(audio_codec_for("a.wav"), "pcm_s16le");
        assert_eq!(audio_codec_for("a.aac"), "aac");
        assert_eq!(audio_codec_for("a.flac"), "flac");
        assert_eq!(audio_codec_for("a.ogg"), "libvorbis");
        assert_eq!(audio_codec_for("a.unknown"), "aac");
        assert!(is_lossless_audio("flac"));
        assert!(!is_lossless_audio("aac"));
    }
}
