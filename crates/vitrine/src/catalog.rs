//! Fixed selections over loaded collections: what the home page, detail
//! pages and statistics blocks show outside of the interactive list views.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use vitrine_seeker::{ClauseValue, Op, Query, Seekable, SeekerEnum};

use crate::records::{
    ts, Activity, Cohort, Event, EventStatus, Member, News, NewsStatus,
};

fn limited<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

fn status_is<E: SeekerEnum>(status: E) -> ClauseValue {
    ClauseValue::EnumSet(vec![status.seeker_discriminant()])
}

/// Published news, newest first.
pub fn published_news(news: &[News]) -> Vec<&News> {
    Query::new()
        .and(News::STATUS, Op::In, status_is(NewsStatus::Published))
        .order_desc(News::PUBLISHED_AT)
        .filter(news, News::accessor)
}

/// The `limit` most recent published news.
pub fn recent_news(news: &[News], limit: usize) -> Vec<&News> {
    limited(published_news(news), Some(limit))
}

/// Upcoming events starting after `now`, soonest first.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Event> {
    let query = Query::new()
        .and_after(Event::STARTS_AT, ts(&now))
        .and(Event::STATUS, Op::In, status_is(EventStatus::Upcoming))
        .order_asc(Event::STARTS_AT);
    limited(query.filter(events, Event::accessor), limit)
}

/// Events that are over (ended before `now`, or marked completed), most
/// recent first.
pub fn past_events(events: &[Event], now: DateTime<Utc>, limit: Option<usize>) -> Vec<&Event> {
    let query = Query::new()
        .or_before(Event::ENDS_AT, ts(&now))
        .or(Event::STATUS, Op::In, status_is(EventStatus::Completed))
        .order_desc(Event::STARTS_AT);
    limited(query.filter(events, Event::accessor), limit)
}

pub fn find_event_by_slug<'a>(events: &'a [Event], slug: &str) -> Option<&'a Event> {
    Query::new()
        .and_eq(Event::SLUG, slug)
        .find(events, Event::accessor)
}

pub fn find_news_by_slug<'a>(news: &'a [News], slug: &str) -> Option<&'a News> {
    Query::new().and_eq(News::SLUG, slug).find(news, News::accessor)
}

pub fn find_member<'a>(members: &'a [Member], id: &str) -> Option<&'a Member> {
    members.iter().find(|member| member.id == id)
}

pub fn find_activity<'a>(activities: &'a [Activity], id: &str) -> Option<&'a Activity> {
    activities.iter().find(|activity| activity.id == id)
}

pub fn active_activities(activities: &[Activity]) -> Vec<&Activity> {
    Query::new()
        .and_eq(Activity::ACTIVE, true)
        .filter(activities, Activity::accessor)
}

pub fn members_in_cohort(members: &[Member], cohort: Cohort) -> Vec<&Member> {
    Query::new()
        .and_in(Member::COHORT, [cohort.seeker_discriminant()])
        .filter(members, Member::accessor)
}

/// Members grouped by cohort, every cohort present, input order kept within a group.
pub fn group_by_cohort(members: &[Member]) -> BTreeMap<Cohort, Vec<&Member>> {
    let mut groups: BTreeMap<Cohort, Vec<&Member>> =
        Cohort::ALL.iter().map(|&cohort| (cohort, Vec::new())).collect();
    for member in members {
        groups.entry(member.cohort).or_default().push(member);
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub count: usize,
    /// Rounded to the nearest integer; 0 when there is nothing to count.
    pub percentage: u32,
}

impl Share {
    pub fn of(count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (count as f64 * 100.0 / total as f64).round() as u32
        };
        Share { count, percentage }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CohortShare {
    pub cohort: Cohort,
    #[serde(flatten)]
    pub share: Share,
}

/// Directory statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub total: usize,
    /// One entry per cohort, in [`Cohort::ALL`] order.
    pub by_cohort: Vec<CohortShare>,
    pub linkedin: Share,
    pub github: Share,
}

pub fn member_stats(members: &[Member]) -> MemberStats {
    let total = members.len();
    let groups = group_by_cohort(members);
    let by_cohort = Cohort::ALL
        .iter()
        .map(|&cohort| CohortShare {
            cohort,
            share: Share::of(groups.get(&cohort).map_or(0, Vec::len), total),
        })
        .collect();
    let linkedin = members.iter().filter(|m| m.has_linkedin()).count();
    let github = members.iter().filter(|m| m.has_github()).count();

    MemberStats {
        total,
        by_cohort,
        linkedin: Share::of(linkedin, total),
        github: Share::of(github, total),
    }
}

/// Headline numbers for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_members: usize,
    pub published_news: usize,
    pub total_events: usize,
    pub upcoming_events: usize,
    pub active_activities: usize,
    pub members_with_linkedin: usize,
    pub members_with_github: usize,
}

pub fn site_stats(
    members: &[Member],
    news: &[News],
    events: &[Event],
    activities: &[Activity],
    now: DateTime<Utc>,
) -> SiteStats {
    SiteStats {
        total_members: members.len(),
        published_news: published_news(news).len(),
        total_events: events.len(),
        upcoming_events: upcoming_events(events, now, None).len(),
        active_activities: active_activities(activities).len(),
        members_with_linkedin: members.iter().filter(|m| m.has_linkedin()).count(),
        members_with_github: members.iter().filter(|m| m.has_github()).count(),
    }
}

/// The value of field `field` on `item`, for hosts rendering arbitrary columns.
pub fn field_text<'a, T: Seekable>(item: &'a T, field: &str) -> Option<&'a str> {
    item.seeker_field_value(field).as_str()
}
