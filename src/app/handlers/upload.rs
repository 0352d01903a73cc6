//! PDF upload into the selected knowledge base

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use crate::app::context::AppContext;
use crate::app::state::AppState;
use crate::app::view::Notification;
use crate::domain::{
    validate_upload, DomainError, ProgressCallback, UploadCandidate, UploadRequest,
    UploadValidationError,
};

const UPLOAD_IN_PROGRESS: &str = "An upload is already in progress";

/// Validate and upload a PDF file.
///
/// Validation failures are reported without touching the network. While
/// the transfer runs the upload state is `Uploading`; it returns to `Idle`
/// on success and on failure.
pub async fn upload_pdf(
    state: &mut AppState,
    ctx: &AppContext,
    path: Option<&Path>,
) -> Result<(), DomainError> {
    if state.upload.is_uploading() {
        ctx.view.notify(&Notification::error(UPLOAD_IN_PROGRESS));
        return Err(DomainError::validation(UPLOAD_IN_PROGRESS));
    }

    let candidate = match path {
        Some(path) => UploadCandidate::inspect(path).await,
        None => None,
    };

    let candidate = match validate_upload(
        candidate.as_ref(),
        state.selected.as_ref(),
        ctx.options.max_upload_bytes,
    ) {
        Ok(candidate) => candidate.clone(),
        Err(e) => return Err(reject(ctx, e)),
    };

    let Some(knowledge_base) = state.selected.clone() else {
        return Err(reject(ctx, UploadValidationError::NoKnowledgeBase));
    };

    let content = match tokio::fs::read(&candidate.path).await {
        Ok(content) => Bytes::from(content),
        Err(e) => {
            let err = DomainError::io(format!("{}: {}", candidate.path.display(), e));
            ctx.view
                .notify(&Notification::error(format!("Failed to upload PDF: {}", err)));
            return Err(err);
        }
    };

    if !state.upload.begin() {
        ctx.view.notify(&Notification::error(UPLOAD_IN_PROGRESS));
        return Err(DomainError::validation(UPLOAD_IN_PROGRESS));
    }

    info!(
        file = %candidate.file_name,
        knowledge_base = %knowledge_base,
        bytes = content.len(),
        "Uploading PDF"
    );

    ctx.view
        .upload_started(&candidate.file_name, &knowledge_base.display_name());
    ctx.view.upload_progress(0);

    let view = Arc::clone(&ctx.view);
    let on_progress: ProgressCallback =
        Arc::new(move |percent: u8| view.upload_progress(percent));

    let request = UploadRequest {
        knowledge_base: knowledge_base.clone(),
        file_name: candidate.file_name.clone(),
        mime: candidate.mime.clone(),
        content,
    };

    let result = ctx.backend.upload_pdf(request, on_progress).await;

    state.upload.finish();
    ctx.view.upload_finished();

    match result {
        Ok(message) => {
            let message = message.unwrap_or_else(|| {
                format!("PDF added to {} knowledge base", knowledge_base.display_name())
            });
            ctx.view.notify(&Notification::success(message));
            Ok(())
        }
        Err(e) => {
            warn!(file = %candidate.file_name, error = %e, "PDF upload failed");
            ctx.view.notify(&Notification::error(upload_failure_message(&e)));
            Err(e)
        }
    }
}

fn reject(ctx: &AppContext, err: UploadValidationError) -> DomainError {
    ctx.view.notify(&Notification::error(err.to_string()));
    err.into()
}

fn upload_failure_message(err: &DomainError) -> String {
    match err {
        DomainError::Backend { message } if !message.is_empty() => message.clone(),
        _ => match err.backend_message().filter(|m| !m.is_empty()) {
            Some(message) => format!("Failed to upload PDF: {}", message),
            None => format!("Failed to upload PDF: {}", err),
        },
    }
}
