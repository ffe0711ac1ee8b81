//! Saved defaults, stored as command-line flags in a plain text file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::page::{PageKind, SyncMode};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub mode: Option<SyncMode>,
    pub page: Option<PageKind>,
    pub debounce_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub minimal: bool,
    pub verbose: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            mode: other.mode.or(self.mode),
            page: other.page.or(self.page),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            timeout_ms: other.timeout_ms.or(self.timeout_ms),
            minimal: self.minimal || other.minimal,
            verbose: self.verbose || other.verbose,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("postview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("postview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("postview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("postview")
                .join("config");
        }
    }

    PathBuf::from(".postviewrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".postviewrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# postview defaults (saved with --save)".to_string());
    if let Some(mode) = flags.mode {
        lines.push(format!("--mode {}", mode.as_str()));
    }
    if let Some(page) = flags.page {
        lines.push(format!("--page {}", page.as_str()));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if let Some(ms) = flags.timeout_ms {
        lines.push(format!("--timeout-ms {ms}"));
    }
    if flags.minimal {
        lines.push("--minimal".to_string());
    }
    if flags.verbose {
        lines.push("--verbose".to_string());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--minimal" {
            flags.minimal = true;
        } else if token == "--verbose" || token == "-v" {
            flags.verbose = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued(&mut flags, name, value);
        } else if is_valued(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_valued(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_valued(name: &str) -> bool {
    matches!(name, "--mode" | "--page" | "--debounce-ms" | "--timeout-ms")
}

fn apply_valued(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--mode" => flags.mode = parse_mode(value),
        "--page" => flags.page = parse_page(value),
        // A zero debounce would sync on every keystroke; keep the default.
        "--debounce-ms" => flags.debounce_ms = value.parse().ok().filter(|ms| *ms > 0),
        "--timeout-ms" => flags.timeout_ms = value.parse().ok().filter(|ms| *ms > 0),
        _ => {}
    }
}

fn parse_mode(s: &str) -> Option<SyncMode> {
    match s {
        "url" => Some(SyncMode::Url),
        "request" => Some(SyncMode::Request),
        _ => None,
    }
}

fn parse_page(s: &str) -> Option<PageKind> {
    match s {
        "post" => Some(PageKind::Post),
        "style" => Some(PageKind::Style),
        _ => None,
    }
}
