//! Audio file handle passed to transcription backends.

use std::io;
use std::path::Path;

use reqwest::multipart::Part;
use tokio::fs::File;
use tracing::debug;

use crate::{Result, TranscribeError};

const FALLBACK_FILE_NAME: &str = "audio";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An audio file opened for reading.
///
/// The handle stays open until the value is dropped or turned into a
/// request body, and the body drops it once the upload completes or fails.
#[derive(Debug)]
pub struct AudioFile {
    file: File,
    file_name: String,
    len: u64,
    content_type: &'static str,
}

impl AudioFile {
    /// Opens the file at `path` for reading.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        let metadata = file.metadata().await?;

        if metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path is a directory",
            ));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
        let content_type = content_type_for(path);

        debug!(path = ?path, bytes = metadata.len(), content_type, "Opened audio file");

        Ok(Self {
            file,
            file_name,
            len: metadata.len(),
            content_type,
        })
    }

    /// The base name sent to the service as the upload's file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the file in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// MIME type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Converts the file into a streamed multipart part, moving the handle into it.
    pub(crate) fn into_part(self) -> Result<Part> {
        Part::stream_with_length(self.file, self.len)
            .file_name(self.file_name)
            .mime_str(self.content_type)
            .map_err(|e| TranscribeError::InvalidAudioFormat(e.to_string()))
    }
}

/// Maps a file extension to the MIME type the upload is labelled with.
///
/// This only labels the part; the service decides what it accepts.
fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "wav" => "audio/wav",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "mp4" => "audio/mp4",
        "m4a" => "audio/m4a",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
