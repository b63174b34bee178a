//! View configuration.
//!
//! Page sizes and the search debounce interval come from an optional YAML
//! document. Every key is optional; missing keys take the defaults the site
//! ships with.
//!
//! ```yaml
//! search_debounce_ms: 250
//! members:
//!   page_size: 24
//! events:
//!   page_size: 6
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Per-view list settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListConfig {
    pub page_size: usize,
}

impl ListConfig {
    pub const fn with_page_size(page_size: usize) -> Self {
        ListConfig { page_size }
    }
}

fn members_default() -> ListConfig {
    ListConfig::with_page_size(24)
}

fn events_default() -> ListConfig {
    ListConfig::with_page_size(9)
}

fn news_default() -> ListConfig {
    ListConfig::with_page_size(9)
}

fn activities_default() -> ListConfig {
    ListConfig::with_page_size(12)
}

/// A view section as written in the file. Any key may be left out, and a
/// bare `members:` reads as an empty section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListSection {
    page_size: Option<usize>,
}

fn resolve(section: Option<ListSection>, fallback: ListConfig) -> ListConfig {
    match section.and_then(|s| s.page_size) {
        Some(page_size) => ListConfig { page_size },
        None => fallback,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    search_debounce_ms: Option<u64>,
    members: Option<ListSection>,
    events: Option<ListSection>,
    news: Option<ListSection>,
    activities: Option<ListSection>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Config {
            search_debounce_ms: file.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            members: resolve(file.members, members_default()),
            events: resolve(file.events, events_default()),
            news: resolve(file.news, news_default()),
            activities: resolve(file.activities, activities_default()),
        }
    }
}

/// Settings for every list view of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub search_debounce_ms: u64,
    pub members: ListConfig,
    pub events: ListConfig,
    pub news: ListConfig,
    pub activities: ListConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            members: members_default(),
            events: events_default(),
            news: news_default(),
            activities: activities_default(),
        }
    }
}

impl Config {
    /// Parses and validates a YAML document. An empty document yields the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_yaml_str(&text)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let views = [
            ("members", self.members),
            ("events", self.events),
            ("news", self.news),
            ("activities", self.activities),
        ];
        for (view, list) in views {
            if list.page_size == 0 {
                return Err(ConfigError::InvalidPageSize { view });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_site() {
        let config = Config::default();
        assert_eq!(config.members.page_size, 24);
        assert_eq!(config.events.page_size, 9);
        assert_eq!(config.news.page_size, 9);
        assert_eq!(config.activities.page_size, 12);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml_str("events:\n  page_size: 6\nsearch_debounce_ms: 150\n")
            .unwrap();
        assert_eq!(config.events.page_size, 6);
        assert_eq!(config.search_debounce_ms, 150);
        assert_eq!(config.members.page_size, 24);
    }

    #[test]
    fn section_without_page_size_keeps_its_default() {
        let config = Config::from_yaml_str("search_debounce_ms: 100\nmembers: {}\nnews:\n").unwrap();
        assert_eq!(config.search_debounce_ms, 100);
        assert_eq!(config.members.page_size, 24);
        assert_eq!(config.news.page_size, 9);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_yaml_str("news:\n  page_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize { view: "news" }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Config::from_yaml_str("members: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "members:\n  page_size: 12").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.members.page_size, 12);

        let missing = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
