use anyhow::{Context, Result};
use intake_core::{CompletionPolicy, IntakeSettings, SizeLimit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::home::ensure_intake_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub upload: UploadSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    /// Artificial delay of the stub extractor.
    pub delay_ms: u64,
    pub completion_policy: CompletionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSection {
    pub max_size_bytes: u64,
    /// Off by default: the limit is only advertised in the upload hint.
    pub enforce_size_limit: bool,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl Default for UploadSection {
    fn default() -> Self {
        let limit = SizeLimit::default();
        Self {
            max_size_bytes: limit.max_bytes,
            enforce_size_limit: limit.enforced,
        }
    }
}

impl Config {
    pub fn extraction_delay(&self) -> Duration {
        Duration::from_millis(self.extraction.delay_ms)
    }

    pub fn intake_settings(&self) -> IntakeSettings {
        IntakeSettings {
            size_limit: SizeLimit {
                max_bytes: self.upload.max_size_bytes,
                enforced: self.upload.enforce_size_limit,
            },
            completion_policy: self.extraction.completion_policy,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_intake_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.extraction_delay(), Duration::from_millis(2000));

        let settings = cfg.intake_settings();
        assert_eq!(settings.size_limit.max_bytes, 10 * 1024 * 1024);
        assert!(!settings.size_limit.enforced);
        assert_eq!(settings.completion_policy, CompletionPolicy::LastResolvedWins);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[extraction]\ncompletion_policy = \"latest-selection-wins\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(
            cfg.extraction.completion_policy,
            CompletionPolicy::LatestSelectionWins
        );
        assert_eq!(cfg.extraction.delay_ms, 2000);
        assert_eq!(cfg.upload, UploadSection::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.upload.enforce_size_limit = true;
        cfg.upload.max_size_bytes = 1024;
        save_config_to(&path, &cfg).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.intake_settings().size_limit.rejects(1025));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extraction\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }
}
