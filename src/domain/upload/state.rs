//! Upload control: `Idle -> Uploading -> Idle`

/// State of the upload trigger. While uploading it is disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

impl UploadState {
    /// Move to `Uploading`. Returns `false` if an upload is already running.
    pub fn begin(&mut self) -> bool {
        match self {
            Self::Idle => {
                *self = Self::Uploading;
                true
            }
            Self::Uploading => false,
        }
    }

    /// Return to `Idle`, whatever the outcome
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_uploading(&self) -> bool {
        *self == Self::Uploading
    }
}
