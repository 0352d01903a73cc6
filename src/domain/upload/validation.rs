//! Client-side checks run before any upload request is issued

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::knowledge_base::KnowledgeBaseName;
use crate::domain::DomainError;

/// MIME type accepted for uploads
pub const PDF_MIME: &str = "application/pdf";

/// Largest file the client will send (50 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Reasons an upload is refused before reaching the network
#[derive(Debug, Clone, PartialEq)]
pub enum UploadValidationError {
    /// No file given, or it could not be found
    NoFile,
    /// The file exists but has no content
    EmptyFile,
    /// No knowledge base is selected
    NoKnowledgeBase,
    /// File is not a PDF
    NotPdf { mime: String },
    /// File exceeds the size limit
    TooLarge { size: u64, max: u64 },
}

impl fmt::Display for UploadValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFile => write!(f, "Please choose a PDF file"),
            Self::EmptyFile => write!(f, "The selected file is empty"),
            Self::NoKnowledgeBase => write!(f, "Please select a knowledge base first"),
            Self::NotPdf { mime } => {
                write!(f, "Please choose a file in PDF format (got {})", mime)
            }
            Self::TooLarge { max, .. } => {
                write!(f, "File size cannot exceed {}MB", max / (1024 * 1024))
            }
        }
    }
}

impl std::error::Error for UploadValidationError {}

impl From<UploadValidationError> for DomainError {
    fn from(err: UploadValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// Detect the MIME type of a file from its name
pub fn detect_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// A file chosen for upload, described without reading its content
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub size: u64,
}

impl UploadCandidate {
    /// Look up a file on disk. Returns `None` when it is missing or not a
    /// regular file.
    pub async fn inspect(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => {
                debug!(path = %path.display(), "Upload path is not a regular file");
                return None;
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Upload path not readable");
                return None;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        Some(Self {
            path: path.to_path_buf(),
            file_name,
            mime: detect_mime(path),
            size: metadata.len(),
        })
    }
}

/// Validate an upload before any request is issued.
///
/// Checks run in order: file present, knowledge base selected, file not
/// empty, PDF type, size limit.
pub fn validate_upload<'a>(
    candidate: Option<&'a UploadCandidate>,
    selected: Option<&KnowledgeBaseName>,
    max_bytes: u64,
) -> Result<&'a UploadCandidate, UploadValidationError> {
    let candidate = candidate.ok_or(UploadValidationError::NoFile)?;

    if selected.is_none() {
        return Err(UploadValidationError::NoKnowledgeBase);
    }

    if candidate.size == 0 {
        return Err(UploadValidationError::EmptyFile);
    }

    if !candidate.mime.eq_ignore_ascii_case(PDF_MIME) {
        return Err(UploadValidationError::NotPdf {
            mime: candidate.mime.clone(),
        });
    }

    if candidate.size > max_bytes {
        return Err(UploadValidationError::TooLarge {
            size: candidate.size,
            max: max_bytes,
        });
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            path: PathBuf::from(name),
            file_name: name.to_string(),
            mime: detect_mime(Path::new(name)),
            size,
        }
    }

    #[test]
    fn test_detect_mime() {
        assert_eq!(detect_mime(Path::new("notes.pdf")), PDF_MIME);
        assert_eq!(detect_mime(Path::new("NOTES.PDF")), PDF_MIME);
        assert_eq!(detect_mime(Path::new("notes.txt")), "text/plain");
        assert_eq!(detect_mime(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_accepts_pdf_within_limit() {
        let kb = KnowledgeBaseName::from("java");
        let file = candidate("a.pdf", 1024);
        assert!(validate_upload(Some(&file), Some(&kb), MAX_UPLOAD_BYTES).is_ok());

        let exact = candidate("a.pdf", MAX_UPLOAD_BYTES);
        assert!(validate_upload(Some(&exact), Some(&kb), MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejections_in_order() {
        let kb = KnowledgeBaseName::from("java");

        assert_eq!(
            validate_upload(None, Some(&kb), MAX_UPLOAD_BYTES),
            Err(UploadValidationError::NoFile)
        );

        let empty = candidate("a.pdf", 0);
        assert_eq!(
            validate_upload(Some(&empty), None, MAX_UPLOAD_BYTES),
            Err(UploadValidationError::NoKnowledgeBase)
        );
        assert_eq!(
            validate_upload(Some(&empty), Some(&kb), MAX_UPLOAD_BYTES),
            Err(UploadValidationError::EmptyFile)
        );

        let text = candidate("a.txt", 10);
        assert_eq!(
            validate_upload(Some(&text), None, MAX_UPLOAD_BYTES),
            Err(UploadValidationError::NoKnowledgeBase)
        );
        assert_eq!(
            validate_upload(Some(&text), Some(&kb), MAX_UPLOAD_BYTES),
            Err(UploadValidationError::NotPdf {
                mime: "text/plain".to_string()
            })
        );

        let big = candidate("a.pdf", MAX_UPLOAD_BYTES + 1);
        assert_eq!(
            validate_upload(Some(&big), Some(&kb), MAX_UPLOAD_BYTES),
            Err(UploadValidationError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                max: MAX_UPLOAD_BYTES
            })
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = UploadValidationError::TooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            max: MAX_UPLOAD_BYTES,
        };
        assert_eq!(err.to_string(), "File size cannot exceed 50MB");
    }

    #[tokio::test]
    async fn test_inspect_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.pdf");
        tokio::fs::write(&path, b"%PDF-1.4 test").await.unwrap();

        let found = UploadCandidate::inspect(&path).await.unwrap();
        assert_eq!(found.file_name, "guide.pdf");
        assert_eq!(found.mime, PDF_MIME);
        assert_eq!(found.size, 13);

        assert!(UploadCandidate::inspect(dir.path().join("missing.pdf")).await.is_none());
        assert!(UploadCandidate::inspect(dir.path()).await.is_none());
    }
}
