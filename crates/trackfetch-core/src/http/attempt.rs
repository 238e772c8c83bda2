//! One endpoint attempt with a deadline.

use std::sync::Arc;

use super::{CancelToken, HttpRequest, HttpResponse, Transport};
use crate::error::AttemptError;

/// Runs `request` on a blocking thread and waits at most `request.timeout`.
///
/// When the deadline passes the transfer's cancel token is set so the worker
/// thread stops at its next progress callback, and the attempt fails with
/// [`AttemptError::Timeout`]. Only this attempt ends; callers move on to
/// their next endpoint.
pub async fn run_attempt<T: Transport>(
    transport: Arc<T>,
    request: HttpRequest,
) -> Result<HttpResponse, AttemptError> {
    let deadline = request.timeout;
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let handle = tokio::task::spawn_blocking(move || transport.execute(&request, &worker_cancel));

    match tokio::time::timeout(deadline, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(AttemptError::Worker(join_err.to_string())),
        Err(_elapsed) => {
            cancel.cancel();
            Err(AttemptError::Timeout(deadline))
        }
    }
}
