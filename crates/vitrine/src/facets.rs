//! Option lists for the filter menus, built from the loaded records.
//!
//! Lists are de-duplicated and sorted with the same diacritics-insensitive
//! collation the list views use.

use std::collections::BTreeMap;

use vitrine_seeker::collate;

use crate::records::{Cohort, Event, Member, News};

fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen.sort_by(|a, b| collate(a, b).then_with(|| a.cmp(b)));
    seen
}

pub fn available_event_tags(events: &[Event]) -> Vec<String> {
    distinct(events.iter().flat_map(|e| e.tags.iter().map(String::as_str)))
}

pub fn available_news_tags(news: &[News]) -> Vec<String> {
    distinct(news.iter().flat_map(|n| n.tags.iter().map(String::as_str)))
}

pub fn available_locations(events: &[Event]) -> Vec<String> {
    distinct(events.iter().filter_map(Event::location_name))
}

pub fn available_authors(news: &[News]) -> Vec<String> {
    distinct(news.iter().map(|n| n.author.name.as_str()))
}

pub fn available_skills(members: &[Member]) -> Vec<String> {
    distinct(members.iter().flat_map(|m| m.skills.iter().map(String::as_str)))
}

/// Member count per cohort; cohorts without members are omitted.
pub fn cohort_counts(members: &[Member]) -> BTreeMap<Cohort, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        *counts.entry(member.cohort).or_insert(0) += 1;
    }
    counts
}
