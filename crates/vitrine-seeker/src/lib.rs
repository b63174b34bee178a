//! Seeker - Generic in-memory query engine for record collections.
//!
//! Seeker filters, orders and pages collections of structs without knowing
//! their shape. Records expose fields through an accessor (usually the
//! [`Seekable`] trait) and the engine does the rest:
//!
//! - Field types: strings, string lists, numbers, timestamps, enums, booleans
//! - Operators: equality, comparison, substring (case-sensitive or not), set membership
//! - Clause groups: AND, OR, NOT with fixed combination semantics
//! - Multi-field stable ordering with diacritics-insensitive string collation
//! - A pure pagination window with clamped page requests
//!
//! # Quick Start
//!
//! ```rust
//! use vitrine_seeker::{paginate, Query, Value};
//!
//! struct Member {
//!     name: String,
//!     skills: Vec<String>,
//!     has_github: bool,
//! }
//!
//! fn accessor<'a>(m: &'a Member, field: &str) -> Value<'a> {
//!     match field {
//!         "name" => Value::String(&m.name),
//!         "skills" => Value::List(&m.skills),
//!         "has_github" => Value::Bool(m.has_github),
//!         _ => Value::None,
//!     }
//! }
//!
//! let members = vec![
//!     Member { name: "Zoé".into(), skills: vec!["Python".into()], has_github: true },
//!     Member { name: "Émile".into(), skills: vec!["Rust".into()], has_github: true },
//!     Member { name: "Bob".into(), skills: vec![], has_github: false },
//! ];
//!
//! let query = Query::new()
//!     .and_eq("has_github", true)
//!     .order_asc("name");
//!
//! let results = query.filter(&members, accessor);
//! assert_eq!(results[0].name, "Émile");
//!
//! let page = paginate(&results, 1, 2);
//! assert_eq!(page.items[0].name, "Zoé");
//! assert_eq!(page.total_pages, 2);
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//!       ∧ (no NOT clause matches)
//! ```
//!
//! # Field Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | String | `Eq`, `Ne`, `StartsWith`, `EndsWith`, `Contains`, `IContains`, `In` |
//! | List | same as String, matched against each element |
//! | Number | `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte` |
//! | Timestamp | `Eq`, `Ne`, `Before`, `After`, `Gt`, `Gte`, `Lt`, `Lte` |
//! | Enum | `Eq`, `Ne`, `In` |
//! | Bool | `Eq`, `Ne`, `Is` |

mod clause;
mod op;
mod ordering;
mod page;
mod query;
mod traits;
mod value;

pub use clause::{Clause, ClauseValue};
pub use op::Op;
pub use ordering::{collate, collation_key, compare_by_orderings, compare_values, Dir, OrderBy};
pub use page::{clamp_page, paginate, total_pages, PageWindow};
pub use query::Query;
pub use traits::{Seekable, SeekerEnum};
pub use value::{Number, Timestamp, Value};
