//! PDF upload validation and the upload control state machine

mod state;
mod validation;

pub use state::UploadState;
pub use validation::{
    detect_mime, validate_upload, UploadCandidate, UploadValidationError, MAX_UPLOAD_BYTES,
    PDF_MIME,
};
