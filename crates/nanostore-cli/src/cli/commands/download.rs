//! `nanostore download <uhrp-url>` – retrieve content and save it locally.

use anyhow::Result;
use nanostore_core::config::NanostoreConfig;
use nanostore_core::form::Submission;
use std::path::PathBuf;

use super::{choose_endpoint, incomplete, open_session};

#[derive(Debug)]
pub struct DownloadArgs {
    pub locator: String,
    pub resolver: Option<String>,
    pub output: Option<PathBuf>,
    pub skip_presence_check: bool,
}

pub async fn run_download(cfg: &NanostoreConfig, args: DownloadArgs) -> Result<()> {
    let mut session = open_session(cfg, args.skip_presence_check).await?;
    let result = download(&mut session.app, &args).await;
    session.close().await;
    result
}

async fn download(app: &mut nanostore_core::app::App, args: &DownloadArgs) -> Result<()> {
    let form = app.download_form_mut();
    if let Some(resolver) = &args.resolver {
        choose_endpoint(form.registry_mut(), resolver)?;
    }
    form.set_locator(args.locator.as_str());
    tracing::info!("download {} via {}", args.locator, form.registry().active());

    let outcome = app.download().await;
    if !matches!(outcome, Submission::Done(_)) {
        return Err(incomplete(&outcome, "download"));
    }

    let handle = app
        .displayed()
        .ok_or_else(|| anyhow::anyhow!("download finished without content"))?;
    let dest = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let saved = handle.save_to(&dest)?;
    println!(
        "Saved {} bytes ({}) to {}",
        handle.len(),
        handle.media_type(),
        saved.display()
    );
    Ok(())
}
