use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::entry::CategoryFilter;
use crate::range::Granularity;

const CONFIG_FILE: &str = "vitalog.toml";
const CONFIG_ENV_VAR: &str = "VITALOG_CONFIG";

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    color: Option<bool>,
    view: Option<ViewSection>,
    entries: Option<EntriesSection>,
}

#[derive(Debug, Deserialize, Default)]
struct ViewSection {
    granularity: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct EntriesSection {
    path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub color: bool,
    pub granularity: Granularity,
    pub category: CategoryFilter,
    pub entries_path: Option<PathBuf>,
    pub loaded_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            granularity: Granularity::Week,
            category: CategoryFilter::All,
            entries_path: None,
            loaded_file: None,
        }
    }
}

impl Config {
    /// Loads `vitalog.toml` from an explicit path, `$VITALOG_CONFIG`, or
    /// the user config directory, in that order. A missing file yields
    /// the defaults; a malformed file or an unrecognized granularity or
    /// category tag is an error.
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = resolve_config_path(override_path) else {
            warn!("no config path could be resolved; using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            info!(file = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: RawConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let mut cfg = Self {
            loaded_file: Some(path.clone()),
            ..Self::default()
        };

        if let Some(color) = parsed.color {
            cfg.color = color;
        }

        if let Some(view) = parsed.view {
            if let Some(raw_granularity) = view.granularity {
                cfg.granularity =
                    Granularity::parse(&raw_granularity).ok_or_else(|| {
                        anyhow!(
                            "unrecognized view.granularity in {}: {raw_granularity} \
                             (expected day, week, or month)",
                            path.display()
                        )
                    })?;
            }
            if let Some(raw_category) = view.category {
                cfg.category = CategoryFilter::parse(&raw_category).ok_or_else(|| {
                    anyhow!(
                        "unrecognized view.category in {}: {raw_category}",
                        path.display()
                    )
                })?;
            }
        }

        if let Some(entries) = parsed.entries
            && let Some(raw_path) = entries.path
        {
            cfg.entries_path = Some(expand_tilde(Path::new(raw_path.trim())));
        }

        info!(
            file = %path.display(),
            granularity = %cfg.granularity,
            category = %cfg.category,
            "loaded config"
        );
        Ok(cfg)
    }
}

fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }

    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            debug!(source = CONFIG_ENV_VAR, path = %trimmed, "config path from env");
            return Some(expand_tilde(Path::new(trimmed)));
        }
    }

    dirs::config_dir().map(|dir| dir.join("vitalog").join(CONFIG_FILE))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Config;
    use crate::entry::{Category, CategoryFilter};
    use crate::range::Granularity;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load(Some(&dir.path().join("absent.toml"))).expect("load");
        assert!(cfg.color);
        assert_eq!(cfg.granularity, Granularity::Week);
        assert_eq!(cfg.category, CategoryFilter::All);
        assert!(cfg.entries_path.is_none());
    }

    #[test]
    fn loads_view_section_and_entries_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "color = false\n\n[view]\ngranularity = \"month\"\ncategory = \"meals\"\n\n\
             [entries]\npath = \"/tmp/log.jsonl\""
        )
        .expect("write config");

        let cfg = Config::load(Some(file.path())).expect("load");
        assert!(!cfg.color);
        assert_eq!(cfg.granularity, Granularity::Month);
        assert_eq!(cfg.category, CategoryFilter::Only(Category::Meals));
        assert_eq!(
            cfg.entries_path.as_deref(),
            Some(std::path::Path::new("/tmp/log.jsonl"))
        );
    }

    #[test]
    fn unknown_tags_are_load_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[view]\ncategory = \"naps\"").expect("write config");
        assert!(Config::load(Some(file.path())).is_err());

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "[view]\ngranularity = \"fortnight\"").expect("write config");
        assert!(Config::load(Some(file.path())).is_err());
    }
}
