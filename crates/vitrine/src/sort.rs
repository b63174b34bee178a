//! Sort keys and the per-record listing description.
//!
//! Every ordering is stable: records that tie on the key keep their order in
//! the source collection. Titles and names compare diacritics-insensitively
//! ("Élodie" sorts with "Elodie"); absent dates sort last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vitrine_seeker::{OrderBy, Query, Seekable};

use crate::config::{Config, ListConfig};
use crate::error::ViewError;
use crate::filters::{ActivityFilters, EventFilters, FilterSpec, MemberFilters, NewsFilters};
use crate::normalize::Normalize;
use crate::records::{Activity, Event, Member, News};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    DateDesc,
    TitleAsc,
    TitleDesc,
    ParticipantsDesc,
}

impl SortKey {
    pub const ALL: &'static [SortKey] = &[
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::ParticipantsDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::ParticipantsDesc => "participants-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ViewError::UnknownSortKey(s.to_string()))
    }
}

/// Describes how one record type is listed: what it searches, how it sorts,
/// and which configuration section it reads.
pub trait Listing: Seekable + Normalize + Sized {
    type Filters: FilterSpec;

    /// Fields matched by free-text search, OR-ed together.
    const SEARCH_FIELDS: &'static [&'static str];
    const SORT_KEYS: &'static [SortKey];
    const DEFAULT_SORT: SortKey;

    /// Orderings for `key`; only called with keys from [`SORT_KEYS`](Listing::SORT_KEYS).
    fn orderings(key: SortKey) -> Vec<OrderBy>;

    fn list_config(config: &Config) -> ListConfig;

    fn supports(key: SortKey) -> bool {
        Self::SORT_KEYS.contains(&key)
    }

    /// Rejects keys this record type cannot be sorted by.
    fn check_sort(key: SortKey) -> Result<(), ViewError> {
        if Self::supports(key) {
            Ok(())
        } else {
            Err(ViewError::UnsupportedSortKey {
                kind: Self::KIND,
                key,
            })
        }
    }
}

/// A new list of `items` ordered by `key`. The input is left as is.
pub fn sort_records<T: Listing>(items: &[T], key: SortKey) -> Result<Vec<&T>, ViewError> {
    T::check_sort(key)?;
    Ok(Query::new().ordered(T::orderings(key)).filter(items, T::accessor))
}

fn by_title(key: SortKey, title: &str) -> Option<OrderBy> {
    match key {
        SortKey::TitleAsc => Some(OrderBy::asc(title)),
        SortKey::TitleDesc => Some(OrderBy::desc(title)),
        _ => None,
    }
}

fn by_date(key: SortKey, date: &str) -> Option<OrderBy> {
    match key {
        SortKey::DateAsc => Some(OrderBy::asc(date)),
        SortKey::DateDesc => Some(OrderBy::desc(date)),
        _ => None,
    }
}

impl Listing for Member {
    type Filters = MemberFilters;

    const SEARCH_FIELDS: &'static [&'static str] = &[Member::FULL_NAME, Member::SKILLS];
    const SORT_KEYS: &'static [SortKey] = &[
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
    ];
    const DEFAULT_SORT: SortKey = SortKey::TitleAsc;

    fn orderings(key: SortKey) -> Vec<OrderBy> {
        by_title(key, Member::FULL_NAME)
            .or_else(|| by_date(key, Member::JOIN_DATE))
            .into_iter()
            .collect()
    }

    fn list_config(config: &Config) -> ListConfig {
        config.members
    }
}

impl Listing for Event {
    type Filters = EventFilters;

    const SEARCH_FIELDS: &'static [&'static str] = &[
        Event::TITLE,
        Event::DESCRIPTION,
        Event::ORGANIZER,
        Event::LOCATION,
    ];
    const SORT_KEYS: &'static [SortKey] = SortKey::ALL;
    const DEFAULT_SORT: SortKey = SortKey::DateAsc;

    fn orderings(key: SortKey) -> Vec<OrderBy> {
        match key {
            SortKey::ParticipantsDesc => vec![OrderBy::desc(Event::PARTICIPANTS)],
            _ => by_title(key, Event::TITLE)
                .or_else(|| by_date(key, Event::STARTS_AT))
                .into_iter()
                .collect(),
        }
    }

    fn list_config(config: &Config) -> ListConfig {
        config.events
    }
}

impl Listing for News {
    type Filters = NewsFilters;

    const SEARCH_FIELDS: &'static [&'static str] = &[News::TITLE, News::EXCERPT, News::CONTENT];
    const SORT_KEYS: &'static [SortKey] = &[
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];
    const DEFAULT_SORT: SortKey = SortKey::DateDesc;

    fn orderings(key: SortKey) -> Vec<OrderBy> {
        by_title(key, News::TITLE)
            .or_else(|| by_date(key, News::PUBLISHED_AT))
            .into_iter()
            .collect()
    }

    fn list_config(config: &Config) -> ListConfig {
        config.news
    }
}

impl Listing for Activity {
    type Filters = ActivityFilters;

    const SEARCH_FIELDS: &'static [&'static str] = &[
        Activity::NAME,
        Activity::DESCRIPTION,
        Activity::TECHNOLOGIES,
    ];
    const SORT_KEYS: &'static [SortKey] = SortKey::ALL;
    const DEFAULT_SORT: SortKey = SortKey::TitleAsc;

    fn orderings(key: SortKey) -> Vec<OrderBy> {
        match key {
            SortKey::ParticipantsDesc => vec![OrderBy::desc(Activity::PARTICIPANTS)],
            _ => by_title(key, Activity::NAME)
                .or_else(|| by_date(key, Activity::NEXT_SESSION))
                .into_iter()
                .collect(),
        }
    }

    fn list_config(config: &Config) -> ListConfig {
        config.activities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Cohort;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, title: &str, day: u32, participants: Option<u32>) -> Event {
        let mut event = Event::new(id, title, Utc.with_ymd_and_hms(2024, 6, day, 18, 0, 0).unwrap());
        event.current_participants = participants;
        event
    }

    fn ids<T: Seekable>(items: &[&T]) -> Vec<String> {
        items
            .iter()
            .filter_map(|item| item.seeker_field_value("id").as_str().map(str::to_string))
            .collect()
    }

    #[test]
    fn sort_key_labels() {
        assert_eq!("participants-desc".parse::<SortKey>(), Ok(SortKey::ParticipantsDesc));
        assert_eq!(" Date-Asc ".parse::<SortKey>(), Ok(SortKey::DateAsc));
        assert_eq!(
            "newest".parse::<SortKey>(),
            Err(ViewError::UnknownSortKey("newest".into()))
        );
        assert_eq!(
            serde_json::to_string(&SortKey::TitleDesc).unwrap(),
            "\"title-desc\""
        );
    }

    #[test]
    fn date_ties_keep_source_order() {
        let events = vec![
            event("a", "Gala", 3, None),
            event("b", "Afterwork", 1, None),
            event("c", "Forum", 3, None),
        ];
        let asc = sort_records(&events, SortKey::DateAsc).unwrap();
        assert_eq!(ids(&asc), vec!["b", "a", "c"]);

        let desc = sort_records(&events, SortKey::DateDesc).unwrap();
        assert_eq!(ids(&desc), vec!["a", "c", "b"]);
        assert_eq!(events[0].id, "a");
    }

    #[test]
    fn participants_absent_counts_as_zero() {
        let events = vec![
            event("a", "A", 1, None),
            event("b", "B", 2, Some(30)),
            event("c", "C", 3, Some(0)),
            event("d", "D", 4, Some(12)),
        ];
        let sorted = sort_records(&events, SortKey::ParticipantsDesc).unwrap();
        assert_eq!(ids(&sorted), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn titles_ignore_case_and_diacritics() {
        let events = vec![
            event("1", "zumba", 1, None),
            event("2", "Éco-conception", 1, None),
            event("3", "atelier", 1, None),
            event("4", "eco-conception", 1, None),
        ];
        let sorted = sort_records(&events, SortKey::TitleAsc).unwrap();
        assert_eq!(ids(&sorted), vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn members_cannot_sort_by_participants() {
        let members = vec![Member::new("1", "Ada", "Lovelace", Cohort::M2)];
        assert_eq!(
            sort_records(&members, SortKey::ParticipantsDesc).unwrap_err(),
            ViewError::UnsupportedSortKey {
                kind: "member",
                key: SortKey::ParticipantsDesc
            }
        );
    }

    #[test]
    fn members_without_join_date_sort_last() {
        let join = |y| Utc.with_ymd_and_hms(y, 9, 1, 0, 0, 0).unwrap();
        let members = vec![
            Member::new("1", "A", "A", Cohort::L3),
            Member::new("2", "B", "B", Cohort::L3).with_join_date(join(2023)),
            Member::new("3", "C", "C", Cohort::L3).with_join_date(join(2021)),
        ];
        let asc = sort_records(&members, SortKey::DateAsc).unwrap();
        assert_eq!(ids(&asc), vec!["3", "2", "1"]);
        let desc = sort_records(&members, SortKey::DateDesc).unwrap();
        assert_eq!(ids(&desc), vec!["2", "3", "1"]);
    }

    #[test]
    fn defaults_are_supported() {
        assert!(Member::supports(Member::DEFAULT_SORT));
        assert!(Event::supports(Event::DEFAULT_SORT));
        assert!(News::supports(News::DEFAULT_SORT));
        assert!(Activity::supports(Activity::DEFAULT_SORT));
    }
}
