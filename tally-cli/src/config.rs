use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_tally_home, tally_home};
use tally_ingest::LoadOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    /// Ledger read when no `--ledger` flag is given
    pub path: PathBuf,
    /// Single ASCII field separator
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing filter directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("transactions.csv"),
            delimiter: ',',
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load_options(&self) -> Result<LoadOptions> {
        let d = self.ledger.delimiter;
        if !d.is_ascii() {
            bail!("ledger.delimiter must be a single ASCII character, got {:?}", d);
        }
        Ok(LoadOptions { delimiter: d as u8 })
    }

    /// `--ledger` wins over the configured path
    pub fn ledger_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.ledger.path.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write a default config unless one exists. Returns the path and whether
/// it was created.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let p = ensure_tally_home()?.join("config.toml");
    if p.exists() {
        return Ok((p, false));
    }
    save_config(&Config::default(), &p)?;
    Ok((p, true))
}
