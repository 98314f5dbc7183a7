use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults that can be saved to a config file and overridden on the
/// command line. Unset options fall back to built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub url: Option<String>,
    pub dwell_ms: Option<u64>,
    pub scroll_step: Option<u32>,
    pub scroll_interval_ms: Option<u64>,
    pub start_page: Option<String>,
    pub log_file: Option<PathBuf>,
    pub hide_cursor: bool,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins for options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            url: other.url.clone().or_else(|| self.url.clone()),
            dwell_ms: other.dwell_ms.or(self.dwell_ms),
            scroll_step: other.scroll_step.or(self.scroll_step),
            scroll_interval_ms: other.scroll_interval_ms.or(self.scroll_interval_ms),
            start_page: other
                .start_page
                .clone()
                .or_else(|| self.start_page.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            hide_cursor: self.hide_cursor || other.hide_cursor,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gesture-kiosk").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("gesture-kiosk")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("gesture-kiosk").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("gesture-kiosk")
                .join("config");
        }
    }

    PathBuf::from(".kioskrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".kioskrc")
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
    lines.push("# gesture-kiosk defaults (saved with --save)".to_string());
    if let Some(url) = &flags.url {
        lines.push(format!("--url {url}"));
    }
    if let Some(ms) = flags.dwell_ms {
        lines.push(format!("--dwell-ms {ms}"));
    }
    if let Some(step) = flags.scroll_step {
        lines.push(format!("--scroll-step {step}"));
    }
    if let Some(ms) = flags.scroll_interval_ms {
        lines.push(format!("--scroll-interval-ms {ms}"));
    }
    if let Some(page) = &flags.start_page {
        lines.push(format!("--start-page {page}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if flags.hide_cursor {
        lines.push("--hide-cursor".to_string());
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

/// Extract known flags from raw argument tokens, ignoring everything else.
///
/// Accepts both `--flag value` and `--flag=value`. Numeric values that do
/// not parse are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--hide-cursor" {
            flags.hide_cursor = true;
            i += 1;
            continue;
        }

        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        if !VALUE_FLAGS.contains(&name) {
            i += 1;
            continue;
        }
        let value = match inline_value {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).cloned()
            }
        };
        if let Some(value) = value {
            apply_value(&mut flags, name, value);
        }
        i += 1;
    }
    flags
}

const VALUE_FLAGS: [&str; 6] = [
    "--url",
    "--dwell-ms",
    "--scroll-step",
    "--scroll-interval-ms",
    "--start-page",
    "--log-file",
];

fn apply_value(flags: &mut ConfigFlags, name: &str, value: String) {
    match name {
        "--url" => flags.url = Some(value),
        "--dwell-ms" => flags.dwell_ms = value.parse().ok().or(flags.dwell_ms),
        "--scroll-step" => flags.scroll_step = value.parse().ok().or(flags.scroll_step),
        "--scroll-interval-ms" => {
            flags.scroll_interval_ms = value.parse().ok().or(flags.scroll_interval_ms);
        }
        "--start-page" => flags.start_page = Some(value),
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
