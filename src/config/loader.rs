//! Config file loading

use crate::domain::{Config, StatisticKind};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SECTION: &str = "dat-merge";

pub fn load_config(search_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let parsed = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))
        .and_then(|content| parse_config(&content, &config_file))
        .and_then(|cfg| validate_config(&cfg).map(|()| cfg));

    match parsed {
        Ok(cfg) => {
            tracing::debug!("loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if !config_path_provided => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Ignoring auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn parse_config(content: &str, config_file: &Path) -> Result<Config> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(content, config_file),
        "yaml" | "yml" => parse_yaml_config(content, config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    }
}

/// Parse TOML config, accepting either top-level keys or a `[dat-merge]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, accepting either top-level keys or a `dat-merge` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

/// Reject values that deserialize fine but cannot drive a run.
pub fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.extension.is_empty() {
        anyhow::bail!("extension must not be empty");
    }
    if cfg.output_file.is_empty() {
        anyhow::bail!("output_file must not be empty");
    }
    if Path::new(&cfg.output_file).components().count() != 1 {
        anyhow::bail!("output_file must be a plain file name, got '{}'", cfg.output_file);
    }
    if cfg.summary.column.is_empty() && !cfg.summary.statistics.is_empty() {
        anyhow::bail!("summary.column must not be empty");
    }
    for stat in &cfg.summary.statistics {
        if stat.kind == StatisticKind::NthDistinct && stat.rank == 0 {
            anyhow::bail!("statistic '{}': rank starts at 1", stat.label);
        }
    }
    Ok(())
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates = ["dat-merge.toml", ".dat-merge.toml", "dat-merge.yml", "dat-merge.yaml"];

    candidates.iter().map(|candidate| search_dir.join(candidate)).find(|path| path.exists())
}
