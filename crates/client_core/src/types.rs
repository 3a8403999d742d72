use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use shared::domain::PDF_MEDIA_TYPE;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Where the bytes of a picked file live until upload.
#[derive(Clone)]
pub enum FileContent {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// A file offered by the picker or a drop gesture, not yet validated.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    /// Media type as declared by the platform, or guessed from the extension.
    pub media_type: String,
    pub size_bytes: u64,
    pub content: FileContent,
}

impl FileCandidate {
    pub fn from_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            media_type: guess_media_type(&path),
            name,
            size_bytes: metadata.len(),
            content: FileContent::Path(path),
        })
    }

    /// Builds a candidate from in-memory bytes. An empty or missing declared
    /// media type falls back to a guess from `name`.
    pub fn from_bytes(
        name: impl Into<String>,
        declared_media_type: Option<&str>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let media_type = match declared_media_type.map(str::trim) {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => guess_media_type(Path::new(&name)),
        };
        Self {
            name,
            media_type,
            size_bytes: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MEDIA_TYPE)
        .to_string()
}

/// A candidate that passed validation. Only [`crate::ReviewSession`] creates these.
#[derive(Debug, Clone)]
pub struct SelectedFile(FileCandidate);

impl SelectedFile {
    pub(crate) fn accept(candidate: FileCandidate) -> Self {
        Self(candidate)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn media_type(&self) -> &str {
        &self.0.media_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.0.size_bytes
    }

    pub fn content(&self) -> &FileContent {
        &self.0.content
    }

    /// Size in kilobytes with two decimals, e.g. `"12.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.0.size_bytes as f64 / 1024.0)
    }

    pub async fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.0.content {
            FileContent::Path(path) => tokio::fs::read(path).await,
            FileContent::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
