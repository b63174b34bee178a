//! Error types for loading records, driving list views and reading configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::sort::SortKey;

/// Fatal errors raised while normalizing a raw collection.
///
/// Any of these aborts the whole load; the hosting view falls back to an
/// empty collection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} data must be a JSON array")]
    NotAnArray { kind: &'static str },

    #[error("{kind} record is not a JSON object")]
    NotAnObject { kind: &'static str },

    #[error("{kind} record{} is missing required field `{field}`", id_suffix(.id))]
    MissingField {
        kind: &'static str,
        id: Option<String>,
        field: &'static str,
    },

    #[error("{kind} record `{id}` has an unreadable `{field}` timestamp: {value:?}")]
    InvalidTimestamp {
        kind: &'static str,
        id: String,
        field: &'static str,
        value: String,
    },
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref()
        .map(|id| format!(" `{id}`"))
        .unwrap_or_default()
}

/// Errors raised by list-view state changes.
///
/// A rejected change leaves the view untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("{kind} lists have no `{facet}` filter")]
    UnknownFacet { kind: &'static str, facet: String },

    #[error("`{value}` is not a valid value for the `{facet}` filter")]
    InvalidFacetValue { facet: &'static str, value: String },

    #[error("{kind} lists cannot be sorted by `{key}`")]
    UnsupportedSortKey { kind: &'static str, key: SortKey },

    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("page size for `{view}` must be at least 1")]
    InvalidPageSize { view: &'static str },
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
