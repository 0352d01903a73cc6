//! Upload body that reports how much of it has been handed to the connection

use bytes::Bytes;
use futures::{stream, Stream, StreamExt};

use crate::domain::ProgressCallback;

/// Size of the pieces the upload body is split into
const CHUNK_SIZE: usize = 64 * 1024;

/// Percentage of `total` covered by `sent`, rounded to the nearest integer
pub fn upload_percent(sent: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }

    let percent = (sent as u128 * 100 + total as u128 / 2) / total as u128;
    percent.min(100) as u8
}

/// Split `content` into chunks, calling `on_progress` as each one is pulled
pub fn progress_stream(
    content: Bytes,
    on_progress: ProgressCallback,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let total = content.len();
    let chunks: Vec<Bytes> = (0..total)
        .step_by(CHUNK_SIZE)
        .map(|start| content.slice(start..(start + CHUNK_SIZE).min(total)))
        .collect();

    let mut sent = 0usize;
    stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        on_progress(upload_percent(sent, total));
        Ok(chunk)
    })
}
