//! # Vitrine - list views for a student association site
//!
//! Vitrine turns the site's static JSON collections (members, events, news,
//! activities) into the paginated, filtered and sorted lists the pages
//! render. It provides:
//!
//! - Normalization of loosely-typed JSON into typed records
//! - Per-record filter sets (facets, flags, free-text search)
//! - Stable sort keys with diacritics-insensitive title ordering
//! - A debounced, memoizing [`QueryEngine`] per list view
//! - Catalog helpers and facet option lists for everything around the lists
//!
//! The generic matching, ordering and pagination machinery lives in
//! [`vitrine_seeker`]; this crate supplies the domain on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine::{load_json, Config, LoadState, ManualClock, Member, QueryEngine};
//!
//! let data = r#"[
//!     { "id": "1", "firstName": "Ada", "lastName": "Lovelace", "promo": "M2", "skills": ["Python"] },
//!     { "id": "2", "firstName": "Alan", "lastName": "Turing", "promo": "M1" }
//! ]"#;
//!
//! let members = LoadState::from_result(load_json::<Member>(data));
//! let clock = ManualClock::new();
//! let mut view = QueryEngine::new(members, &Config::default(), Rc::new(clock.clone()));
//!
//! view.set_search_term("python");
//! assert_eq!(view.snapshot().result_count, 2); // still debouncing
//!
//! clock.advance_ms(300);
//! view.tick();
//! let page = view.snapshot();
//! assert_eq!(page.result_count, 1);
//! assert_eq!(page.items[0].full_name(), "Ada Lovelace");
//! ```
//!
//! ## Loading
//!
//! Records are loaded all-or-nothing. A missing required field fails the
//! whole collection with a [`LoadError`]; the view then shows an empty list
//! with [`ViewStatus::Failed`]. Unknown enum values are not errors: they are
//! replaced by a default and logged with `tracing::warn!`.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod facets;
pub mod filters;
pub mod normalize;
pub mod records;
pub mod sort;

pub use config::{Config, ListConfig, DEFAULT_SEARCH_DEBOUNCE_MS};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use engine::{ListSnapshot, LoadState, QueryEngine, ViewState, ViewStatus};
pub use error::{ConfigError, LoadError, Result, ViewError};
pub use filters::{
    filter_records, search_clauses, ActivityFilters, EventFilters, FilterSpec, MemberFilters,
    NewsFilters,
};
pub use normalize::{load_collection, load_json, parse_timestamp, Normalize};
pub use records::{
    Activity, ActivityCategory, Author, Cohort, Event, EventStatus, Location, Member, News,
    NewsStatus, UnknownLabel, UNKNOWN_AUTHOR,
};
pub use sort::{sort_records, Listing, SortKey};

pub use vitrine_seeker;
