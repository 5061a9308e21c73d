//! `nanostore resolvers` – show the configured endpoint lists.

use anyhow::Result;
use nanostore_core::config::NanostoreConfig;
use nanostore_core::registry::ResolverRegistry;

fn print_registry(title: &str, registry: &ResolverRegistry) {
    println!("{title}:");
    for ep in registry.list_endpoints() {
        let marker = if ep == registry.active() { "*" } else { " " };
        println!("  {marker} {ep}");
    }
}

pub fn run_resolvers(cfg: &NanostoreConfig) -> Result<()> {
    print_registry("Resolvers", &ResolverRegistry::new(&cfg.resolvers)?);
    print_registry("Storage hosts", &ResolverRegistry::new(&cfg.publishers)?);
    Ok(())
}
