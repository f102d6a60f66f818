use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::format::MediaKind;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input file path is empty")]
    EmptyPath,
    #[error("Input file does not exist: {0}")]
    NotFound(String),
    #[error("Path is not a file: {0}")]
    NotAFile(String),
    #[error("Input file is not readable: {0}")]
    NotReadable(String),
    #[error("File does not appear to be {noun}: {path}")]
    WrongKind { noun: &'static str, path: String },
    #[error("Input and output files are the same: {0}")]
    SameAsOutput(String),
    #[error("Both parts would be written to the same file: {0}")]
    SameOutputs(String),
}

pub fn validate_input_file(path: &str, kind: MediaKind) -> Result<PathBuf, InputError> {
    if path.trim().is_empty() {
        return Err(InputError::EmptyPath);
    }

    let file = Path::new(path);
    let metadata = match fs::metadata(file) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(InputError::NotFound(path.to_string()))
        }
        Err(_) => return Err(InputError::NotReadable(path.to_string())),
    };
    if !metadata.is_file() {
        return Err(InputError::NotAFile(path.to_string()));
    }
    if File::open(file).is_err() {
        return Err(InputError::NotReadable(path.to_string()));
    }
    if !kind.accepts(file) {
        return Err(InputError::WrongKind {
            noun: kind.noun(),
            path: path.to_string(),
        });
    }

    Ok(file.to_path_buf())
}

/// Refuse to write over the file being read
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<(), InputError> {
    if absolute(input) == absolute(output) {
        return Err(InputError::SameAsOutput(output.display().to_string()));
    }
    Ok(())
}

pub fn ensure_distinct_outputs(first: &Path, second: &Path) -> Result<(), InputError> {
    if absolute(first) == absolute(second) {
        return Err(InputError::SameOutputs(second.display().to_string()));
    }
    Ok(())
}

pub fn warn_if_exists(output: &Path) {
    if output.exists() {
        println!(
            "Warning: Output file already exists and will be overwritten: {}",
            output.display()
        );
    }
}

// Lexical only: the output usually does not exist yet, so it can't be canonicalized
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn stem_and_extension(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, extension)
}

fn sibling(path: &Path, file_name: String) -> PathBuf {
    match path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// `dir/video.mp4` -> `dir/video_part1.mp4`, `dir/video_part2.mp4`
pub fn split_output_names(input: &Path) -> (PathBuf, PathBuf) {
    let (stem, extension) = stem_and_extension(input);
    (
        sibling(input, format!("{}_part1{}", stem, extension)),
        sibling(input, format!("{}_part2{}", stem, extension)),
    )
}

/// Named after every input, in the first input's directory with its extension
pub fn concat_output_name(inputs: &[PathBuf]) -> PathBuf {
    let Some(first) = inputs.first() else {
        return PathBuf::new();
    };
    let (_, extension) = stem_and_extension(first);
    let stems: Vec<String> = inputs.iter().map(|p| stem_and_extension(p).0).collect();
    sibling(first, format!("{}{}", stems.join("_concat_"), extension))
}

/// Same stem with the new format as extension; `format` is already normalized
pub fn convert_output_name(input: &Path, format: &str) -> PathBuf {
    let (stem, _) = stem_and_extension(input);
    sibling(input, format!("{}.{}", stem, format))
}

pub fn silent_output_name(input: &Path) -> PathBuf {
    let (stem, extension) = stem_and_extension(input);
    sibling(input, format!("{}_silent{}", stem, extension))
}
