use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$INTAKE_HOME`, or `~/.statement-intake`.
pub fn intake_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("INTAKE_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".statement-intake"))
}

pub fn ensure_intake_home() -> Result<PathBuf> {
    let dir = intake_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
