//! Filter sets, one per record type.
//!
//! A filter set is plain, serializable state. [`FilterSpec::apply`]
//! turns its facet selections into AND clauses of a [`Query`]:
//!
//! - AND across facets
//! - OR within a multi-select facet (one `In` clause per facet)
//! - a flag facet set to `None` adds no clause
//!
//! Free-text search is kept on the filter set as the raw term but applied by the
//! caller through [`search_clauses`], because the query engine debounces it
//! separately from the facets.

use std::fmt::Debug;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vitrine_seeker::{Query, SeekerEnum};

use crate::error::ViewError;
use crate::records::{
    Activity, ActivityCategory, Cohort, Event, EventStatus, Member, News, NewsStatus,
};
use crate::sort::Listing;

/// Facet selections and search text for one kind of list.
pub trait FilterSpec:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned
{
    /// Facet names accepted by [`set_facet`](FilterSpec::set_facet).
    const FACETS: &'static [&'static str];

    fn search(&self) -> &str;

    fn set_search(&mut self, term: String);

    /// Replaces the selection of facet `name`.
    ///
    /// An empty `values` clears the facet. On error the filter set is unchanged.
    fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError>;

    /// `true` when any facet or flag constrains the result.
    fn has_facets(&self) -> bool;

    /// `true` when the filter set is not the identity filter.
    fn is_active(&self) -> bool {
        self.has_facets() || !self.search().trim().is_empty()
    }

    /// Adds the facet and flag clauses to `query`.
    fn apply(&self, query: Query) -> Query;

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Adds the case-insensitive search group for `term` over `fields`.
///
/// A blank term adds nothing.
pub fn search_clauses(query: Query, term: &str, fields: &[&str]) -> Query {
    let term = term.trim();
    if term.is_empty() {
        return query;
    }
    fields
        .iter()
        .fold(query, |query, field| query.or_icontains(field, term))
}

/// The records of `items` matched by `filters`, search included, in input order.
pub fn filter_records<'a, T: Listing>(items: &'a [T], filters: &T::Filters) -> Vec<&'a T> {
    let query = search_clauses(filters.apply(Query::new()), filters.search(), T::SEARCH_FIELDS);
    query.filter(items, T::accessor)
}

fn parse_labels<E, S>(facet: &'static str, values: &[S]) -> Result<Vec<E>, ViewError>
where
    E: FromStr + PartialEq,
    S: AsRef<str>,
{
    let mut parsed = Vec::with_capacity(values.len());
    for value in values {
        let value = value.as_ref();
        let label = value
            .parse::<E>()
            .map_err(|_| ViewError::InvalidFacetValue {
                facet,
                value: value.to_string(),
            })?;
        if !parsed.contains(&label) {
            parsed.push(label);
        }
    }
    Ok(parsed)
}

fn parse_strings<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.as_ref().trim();
        if !value.is_empty() && !parsed.iter().any(|v| v == value) {
            parsed.push(value.to_string());
        }
    }
    parsed
}

/// `true`/`false` selections collapse to one flag; both or neither mean no
/// constraint.
fn parse_flag<S: AsRef<str>>(facet: &'static str, values: &[S]) -> Result<Option<bool>, ViewError> {
    let mut seen_true = false;
    let mut seen_false = false;
    for value in values {
        match value.as_ref().trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => seen_true = true,
            "false" | "no" | "0" => seen_false = true,
            _ => {
                return Err(ViewError::InvalidFacetValue {
                    facet,
                    value: value.as_ref().to_string(),
                })
            }
        }
    }
    Ok(match (seen_true, seen_false) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    })
}

fn discriminants<E: SeekerEnum>(values: &[E]) -> Vec<u32> {
    values.iter().map(SeekerEnum::seeker_discriminant).collect()
}

fn unknown_facet(kind: &'static str, name: &str) -> ViewError {
    ViewError::UnknownFacet {
        kind,
        facet: name.to_string(),
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberFilters {
    pub cohorts: Vec<Cohort>,
    pub skills: Vec<String>,
    pub has_linkedin: Option<bool>,
    pub has_github: Option<bool>,
    pub search: String,
}

impl MemberFilters {
    pub const COHORT: &'static str = "cohort";
    pub const SKILL: &'static str = "skill";
    pub const LINKEDIN: &'static str = "linkedin";
    pub const GITHUB: &'static str = "github";
}

impl FilterSpec for MemberFilters {
    const FACETS: &'static [&'static str] = &[
        MemberFilters::COHORT,
        MemberFilters::SKILL,
        MemberFilters::LINKEDIN,
        MemberFilters::GITHUB,
    ];

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, term: String) {
        self.search = term;
    }

    fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError> {
        match name {
            MemberFilters::COHORT => self.cohorts = parse_labels(MemberFilters::COHORT, values)?,
            MemberFilters::SKILL => self.skills = parse_strings(values),
            MemberFilters::LINKEDIN => {
                self.has_linkedin = parse_flag(MemberFilters::LINKEDIN, values)?
            }
            MemberFilters::GITHUB => self.has_github = parse_flag(MemberFilters::GITHUB, values)?,
            _ => return Err(unknown_facet("member", name)),
        }
        Ok(())
    }

    fn has_facets(&self) -> bool {
        !self.cohorts.is_empty()
            || !self.skills.is_empty()
            || self.has_linkedin.is_some()
            || self.has_github.is_some()
    }

    fn apply(&self, mut query: Query) -> Query {
        if !self.cohorts.is_empty() {
            query = query.and_in(Member::COHORT, discriminants(&self.cohorts));
        }
        if !self.skills.is_empty() {
            query = query.and_any_of(Member::SKILLS, self.skills.iter().cloned());
        }
        if let Some(flag) = self.has_linkedin {
            query = query.and_eq(Member::HAS_LINKEDIN, flag);
        }
        if let Some(flag) = self.has_github {
            query = query.and_eq(Member::HAS_GITHUB, flag);
        }
        query
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilters {
    pub statuses: Vec<EventStatus>,
    pub tags: Vec<String>,
    pub locations: Vec<String>,
    pub search: String,
}

impl EventFilters {
    pub const STATUS: &'static str = "status";
    pub const TAG: &'static str = "tag";
    pub const LOCATION: &'static str = "location";
}

impl FilterSpec for EventFilters {
    const FACETS: &'static [&'static str] = &[
        EventFilters::STATUS,
        EventFilters::TAG,
        EventFilters::LOCATION,
    ];

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, term: String) {
        self.search = term;
    }

    fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError> {
        match name {
            EventFilters::STATUS => self.statuses = parse_labels(EventFilters::STATUS, values)?,
            EventFilters::TAG => self.tags = parse_strings(values),
            EventFilters::LOCATION => self.locations = parse_strings(values),
            _ => return Err(unknown_facet("event", name)),
        }
        Ok(())
    }

    fn has_facets(&self) -> bool {
        !self.statuses.is_empty() || !self.tags.is_empty() || !self.locations.is_empty()
    }

    fn apply(&self, mut query: Query) -> Query {
        if !self.statuses.is_empty() {
            query = query.and_in(Event::STATUS, discriminants(&self.statuses));
        }
        if !self.tags.is_empty() {
            query = query.and_any_of(Event::TAGS, self.tags.iter().cloned());
        }
        if !self.locations.is_empty() {
            query = query.and_any_of(Event::LOCATION, self.locations.iter().cloned());
        }
        query
    }
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsFilters {
    pub statuses: Vec<NewsStatus>,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub search: String,
}

impl NewsFilters {
    pub const STATUS: &'static str = "status";
    pub const TAG: &'static str = "tag";
    pub const AUTHOR: &'static str = "author";
}

impl FilterSpec for NewsFilters {
    const FACETS: &'static [&'static str] =
        &[NewsFilters::STATUS, NewsFilters::TAG, NewsFilters::AUTHOR];

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, term: String) {
        self.search = term;
    }

    fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError> {
        match name {
            NewsFilters::STATUS => self.statuses = parse_labels(NewsFilters::STATUS, values)?,
            NewsFilters::TAG => self.tags = parse_strings(values),
            NewsFilters::AUTHOR => self.authors = parse_strings(values),
            _ => return Err(unknown_facet("news", name)),
        }
        Ok(())
    }

    fn has_facets(&self) -> bool {
        !self.statuses.is_empty() || !self.tags.is_empty() || !self.authors.is_empty()
    }

    fn apply(&self, mut query: Query) -> Query {
        if !self.statuses.is_empty() {
            query = query.and_in(News::STATUS, discriminants(&self.statuses));
        }
        if !self.tags.is_empty() {
            query = query.and_any_of(News::TAGS, self.tags.iter().cloned());
        }
        if !self.authors.is_empty() {
            query = query.and_any_of(News::AUTHOR, self.authors.iter().cloned());
        }
        query
    }
}

// ============================================================================
// Activities
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityFilters {
    pub categories: Vec<ActivityCategory>,
    pub active: Option<bool>,
    pub search: String,
}

impl ActivityFilters {
    pub const CATEGORY: &'static str = "category";
    pub const ACTIVE: &'static str = "active";
}

impl FilterSpec for ActivityFilters {
    const FACETS: &'static [&'static str] = &[ActivityFilters::CATEGORY, ActivityFilters::ACTIVE];

    fn search(&self) -> &str {
        &self.search
    }

    fn set_search(&mut self, term: String) {
        self.search = term;
    }

    fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError> {
        match name {
            ActivityFilters::CATEGORY => {
                self.categories = parse_labels(ActivityFilters::CATEGORY, values)?
            }
            ActivityFilters::ACTIVE => self.active = parse_flag(ActivityFilters::ACTIVE, values)?,
            _ => return Err(unknown_facet("activity", name)),
        }
        Ok(())
    }

    fn has_facets(&self) -> bool {
        !self.categories.is_empty() || self.active.is_some()
    }

    fn apply(&self, mut query: Query) -> Query {
        if !self.categories.is_empty() {
            query = query.and_in(Activity::CATEGORY, discriminants(&self.categories));
        }
        if let Some(active) = self.active {
            query = query.and_eq(Activity::ACTIVE, active);
        }
        query
    }
}
