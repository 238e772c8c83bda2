//! `trackfetch info <link>` – resolve and print track details.

use anyhow::Result;
use trackfetch_core::config::FetchConfig;
use trackfetch_core::{Session, TrackFetcher};

use super::{lookup, print_track};

pub async fn run_info(cfg: &FetchConfig, link: &str) -> Result<()> {
    let fetcher = TrackFetcher::from_config(cfg)?;
    let mut session = Session::new();
    let track = lookup(&fetcher, &mut session, link).await?;
    print_track(&track);
    Ok(())
}
