//! `trackfetch check <link>` – validate a link offline.

use anyhow::{anyhow, Result};
use std::io;
use trackfetch_core::config::FetchConfig;
use trackfetch_core::{LinkPattern, Session};

use crate::cli::input;

pub fn run_check(cfg: &FetchConfig, link: &str) -> Result<()> {
    let mut session = Session::new();
    let text = input::link_text(link, io::stdin().lock(), &mut session)
        .ok_or_else(|| anyhow!(input::PASTE_FAILED_NOTICE))?;
    let pattern = LinkPattern::with_service_name(&cfg.link_host, &cfg.service_name);
    let link = pattern.validate(&text)?;
    println!("OK: {} {}", link.kind(), link.id());
    Ok(())
}
