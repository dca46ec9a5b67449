//! Fetch command implementation.

use anyhow::{Context, Result, bail};
use marasi_pulse::{PulseClient, find_dataset};
use std::fs;
use std::path::Path;

/// Fetch raw dataset documents and write them to `<out>/<name>.json`.
pub(crate) async fn fetch_datasets(names: &[String], out: &Path) -> Result<()> {
    if names.is_empty() {
        bail!("no datasets requested; see `marasi datasets` for the list");
    }

    let client = PulseClient::from_env().context("configuring open-data client")?;
    fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    for name in names {
        let Some(info) = find_dataset(name) else {
            bail!("unknown dataset '{name}'; see `marasi datasets`");
        };

        println!("Fetching {} ({})...", info.name, info.resource);
        let raw = client.dataset(&info).await?;

        let path = out.join(format!("{}.json", info.name));
        let body = serde_json::to_string_pretty(&raw.records)?;
        fs::write(&path, body)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("  {} rows -> {}", raw.len(), path.display());
    }

    Ok(())
}
