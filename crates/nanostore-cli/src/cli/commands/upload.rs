//! `nanostore upload <path>` – publish a file to a storage host.

use anyhow::Result;
use nanostore_core::config::NanostoreConfig;
use nanostore_core::form::Submission;
use nanostore_core::publish::SelectedFile;
use std::path::PathBuf;

use super::{choose_endpoint, incomplete, open_session};

#[derive(Debug)]
pub struct UploadArgs {
    pub path: PathBuf,
    pub retention: Option<u64>,
    pub host: Option<String>,
    pub skip_presence_check: bool,
}

pub async fn run_upload(cfg: &NanostoreConfig, args: UploadArgs) -> Result<()> {
    let file = SelectedFile::read(&args.path)?;
    let mut session = open_session(cfg, args.skip_presence_check).await?;

    let form = session.app.upload_form_mut();
    form.set_file(file);
    if let Some(minutes) = args.retention {
        form.set_retention_minutes(minutes);
    }
    if let Some(host) = &args.host {
        if let Err(e) = choose_endpoint(form.registry_mut(), host) {
            session.close().await;
            return Err(e);
        }
    }

    let outcome = session.app.upload().await;
    session.close().await;

    match outcome {
        Submission::Done(receipt) => {
            println!("Public URL: {}", receipt.public_url);
            if let Some(uhrp) = &receipt.uhrp_url {
                println!("UHRP URL:   {}", uhrp);
            }
            println!("SHA-256:    {}  ({} bytes)", receipt.sha256, receipt.size);
            Ok(())
        }
        other => Err(incomplete(&other, "upload")),
    }
}
