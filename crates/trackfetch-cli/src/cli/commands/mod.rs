//! CLI command handlers. Each command is in its own file.

mod check;
mod get;
mod info;

pub use check::run_check;
pub use get::run_get;
pub use info::run_info;

use anyhow::{anyhow, Result};
use std::io;
use std::time::Instant;
use trackfetch_core::http::Transport;
use trackfetch_core::{OperationState, Session, TrackFetcher, TrackMetadata};

use super::input;

/// Reads the link (argument or stdin), validates and resolves it, and records
/// the outcome on `session`. Errors carry only the user-facing message.
pub(crate) async fn lookup<T: Transport>(
    fetcher: &TrackFetcher<T>,
    session: &mut Session,
    link_arg: &str,
) -> Result<TrackMetadata> {
    let text = input::link_text(link_arg, io::stdin().lock(), session).ok_or_else(|| {
        anyhow!(session
            .notice(Instant::now())
            .unwrap_or(input::PASTE_FAILED_NOTICE)
            .to_string())
    })?;

    let link = match fetcher.validate(&text) {
        Ok(link) => link,
        Err(err) => {
            session.reject(&err);
            return Err(err.into());
        }
    };

    let ticket = session.begin_lookup();
    let result = fetcher.resolve(&link).await;
    if let Err(err) = &result {
        if let Some(detail) = err.diagnostic() {
            tracing::info!("lookup failed: {}", detail);
        }
    }
    session.finish_lookup(ticket, result);
    outcome(session)?;
    session
        .metadata()
        .cloned()
        .ok_or_else(|| anyhow!("no track resolved"))
}

/// Turns a `Failed` session state into an error.
pub(crate) fn outcome(session: &Session) -> Result<()> {
    match session.state() {
        OperationState::Failed(reason) => Err(anyhow!(reason.clone())),
        _ => Ok(()),
    }
}

pub(crate) fn print_track(track: &TrackMetadata) {
    println!("Title:     {}", track.title());
    println!("Artist:    {}", track.artist());
    if let Some(album) = track.album() {
        println!("Album:     {}", album);
    }
    if let Some(thumb) = track.thumbnail_url() {
        println!("Thumbnail: {}", thumb);
    }
}
