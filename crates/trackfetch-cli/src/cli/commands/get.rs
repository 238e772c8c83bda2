//! `trackfetch get <link>` – resolve, download and save a track.

use anyhow::{anyhow, Result};
use std::path::Path;
use trackfetch_core::config::FetchConfig;
use trackfetch_core::{FileSink, OperationState, Session, TrackFetcher};

use super::{lookup, outcome, print_track};

pub async fn run_get(cfg: &FetchConfig, link: &str, output_dir: &Path, overwrite: bool) -> Result<()> {
    let fetcher = TrackFetcher::from_config(cfg)?;
    let mut session = Session::new();
    let track = lookup(&fetcher, &mut session, link).await?;
    print_track(&track);

    let ticket = session
        .begin_download()
        .ok_or_else(|| anyhow!("no track resolved"))?;
    println!("Downloading...");

    let sink = FileSink::new(output_dir).overwrite(overwrite);
    let result = fetcher.download(&track, &sink).await;
    let saved = match &result {
        Ok(saved) => Some(saved.clone()),
        Err(err) => {
            if let Some(detail) = err.diagnostic() {
                tracing::info!("download failed: {}", detail);
            }
            None
        }
    };
    session.finish_download(ticket, result);
    outcome(&session)?;

    if let (OperationState::Succeeded, Some(saved)) = (session.state(), saved) {
        println!("Saved {} ({} bytes)", saved.path.display(), saved.bytes);
    }
    Ok(())
}
