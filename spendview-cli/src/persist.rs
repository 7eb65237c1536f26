//! Optional JSON persistence for report values.
//!
//! Reports are plain values; callers opt into saving them by invoking this
//! step explicitly after computing the report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `report` as JSON under `dir`. With no explicit `file_name` the
/// report gets a generated one: `report_<kind>_<YYYYmmddHHMMSS>.json`.
/// Returns the written path.
pub fn save_report<T: Serialize>(
    dir: &Path,
    kind: &str,
    file_name: Option<&str>,
    report: &T,
) -> Result<PathBuf> {
    let name = match file_name {
        Some(n) => n.to_string(),
        None => format!(
            "report_{kind}_{}.json",
            chrono::Local::now().format("%Y%m%d%H%M%S")
        ),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "report saved");
    Ok(path)
}
