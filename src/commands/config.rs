//! `bb84 config`: show the effective settings, or write a starter file.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::ai::AiRegistry;
use crate::config::{ensure_parent_dir, resolve_config_path, Settings};

pub fn main(cli_path: &Option<PathBuf>, settings: &Settings, init: bool) -> Result<()> {
    if !init {
        print!("{}", settings.to_toml_string()?);
        let key = if settings.api_key.is_some() { "set" } else { "not set" };
        println!("# CEREBRAS_API_KEY: {key}");
        println!("# providers: {}", providers_line(&AiRegistry::from_settings(settings)));
        return Ok(());
    }

    let Some(path) = resolve_config_path(cli_path) else {
        bail!("no home directory; pass --config FILE");
    };
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    ensure_parent_dir(&path)?;
    std::fs::write(&path, Settings::default().to_toml_string()?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn providers_line(registry: &AiRegistry) -> String {
    let names = registry.list();
    if names.is_empty() { "none (built without ai-cerebras)".to_string() } else { names.join(", ") }
}
