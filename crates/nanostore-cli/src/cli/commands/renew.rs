//! `nanostore renew` – placeholder tab.

use anyhow::Result;
use nanostore_core::app::Tab;

pub fn run_renew() -> Result<()> {
    anyhow::bail!("{} is not available yet", Tab::Renew.label())
}
