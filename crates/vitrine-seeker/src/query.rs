//! Query builder and executor.
//!
//! The [`Query`] struct provides a fluent builder API for constructing queries
//! and methods for executing them against collections.

use crate::clause::{Clause, ClauseValue};
use crate::op::Op;
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::value::{Timestamp, Value};

/// A query for filtering and ordering collections.
///
/// Queries consist of three clause groups:
/// - **AND**: All clauses must match
/// - **OR**: At least one clause must match (or none if empty)
/// - **NOT**: No clause may match
///
/// ```text
/// match = (all AND clauses match)
///       ∧ (at least one OR clause matches, OR no OR clauses exist)
///       ∧ (no NOT clause matches)
/// ```
///
/// A multi-select facet is a single AND clause with `Op::In`, so selecting two
/// values matches records carrying either one, while distinct facets still
/// combine by AND. Free-text search over several fields is the OR group.
///
/// # Example
///
/// ```
/// use vitrine_seeker::Query;
///
/// let query = Query::new()
///     .and_in("cohort", [1u32, 2])
///     .and_eq("has_github", true)
///     .or_icontains("full_name", "ada")
///     .or_icontains("skills", "ada")
///     .order_asc("full_name");
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    orderings: Vec<OrderBy>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items and keeps their order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Generic clause builders
    // ========================================================================

    /// Adds an AND clause.
    pub fn and(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.and_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds an OR clause.
    pub fn or(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.or_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds a NOT clause.
    pub fn not(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.not_clauses.push(Clause::new(field, op, value));
        self
    }

    // ========================================================================
    // AND shorthand methods
    // ========================================================================

    pub fn and_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Eq, value)
    }

    pub fn and_ne(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Ne, value)
    }

    pub fn and_gt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gt, value)
    }

    pub fn and_gte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gte, value)
    }

    pub fn and_lt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lt, value)
    }

    pub fn and_contains(self, field: &str, value: &str) -> Self {
        self.and(field, Op::Contains, value)
    }

    /// Adds an AND case-insensitive substring clause.
    pub fn and_icontains(self, field: &str, value: &str) -> Self {
        self.and(field, Op::IContains, value)
    }

    /// Adds an AND in-set clause for enum discriminants.
    pub fn and_in<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let set: Vec<u32> = values.into_iter().collect();
        self.and(field, Op::In, ClauseValue::EnumSet(set))
    }

    /// Adds an AND in-set clause for strings.
    ///
    /// On a list field the clause matches when any element is in the set.
    pub fn and_any_of<I, S>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: Vec<String> = values.into_iter().map(Into::into).collect();
        self.and(field, Op::In, ClauseValue::StringSet(set))
    }

    pub fn and_before(self, field: &str, ts: Timestamp) -> Self {
        self.and(field, Op::Before, ts)
    }

    pub fn and_after(self, field: &str, ts: Timestamp) -> Self {
        self.and(field, Op::After, ts)
    }

    // ========================================================================
    // OR shorthand methods
    // ========================================================================

    pub fn or_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Eq, value)
    }

    pub fn or_contains(self, field: &str, value: &str) -> Self {
        self.or(field, Op::Contains, value)
    }

    /// Adds an OR case-insensitive substring clause.
    pub fn or_icontains(self, field: &str, value: &str) -> Self {
        self.or(field, Op::IContains, value)
    }

    pub fn or_before(self, field: &str, ts: Timestamp) -> Self {
        self.or(field, Op::Before, ts)
    }

    // ========================================================================
    // NOT shorthand methods
    // ========================================================================

    pub fn not_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.not(field, Op::Eq, value)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Adds an ordering clause. Earlier clauses take precedence.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Appends several ordering clauses at once.
    pub fn ordered(mut self, orderings: impl IntoIterator<Item = OrderBy>) -> Self {
        self.orderings.extend(orderings);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    pub fn or_clauses(&self) -> &[Clause] {
        &self.or_clauses
    }

    pub fn not_clauses(&self) -> &[Clause] {
        &self.not_clauses
    }

    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns `true` if this query has no clauses (matches everything).
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single item matches this query.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let and_pass = self
            .and_clauses
            .iter()
            .all(|clause| clause.matches(&accessor(item, &clause.field)));

        if !and_pass {
            return false;
        }

        let or_pass = self.or_clauses.is_empty()
            || self
                .or_clauses
                .iter()
                .any(|clause| clause.matches(&accessor(item, &clause.field)));

        if !or_pass {
            return false;
        }

        self.not_clauses
            .iter()
            .all(|clause| !clause.matches(&accessor(item, &clause.field)))
    }

    /// Filters a slice, returning references to matching items in query order.
    ///
    /// The sort is stable: items that compare equal on every ordering keep
    /// their relative input order. The input is never reordered.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.filter_indices(items, accessor)
            .into_iter()
            .map(|index| &items[index])
            .collect()
    }

    /// Like [`filter`](Self::filter) but returns positions into `items`.
    ///
    /// Useful when the caller holds the collection behind a shared pointer
    /// and wants a result that outlives the borrow.
    pub fn filter_indices<T, F>(&self, items: &[T], accessor: F) -> Vec<usize>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        let mut results: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(*item, &accessor))
            .map(|(index, _)| index)
            .collect();

        if !self.orderings.is_empty() {
            results.sort_by(|a, b| {
                compare_by_orderings(&items[*a], &items[*b], &self.orderings, &accessor)
            });
        }

        results
    }

    /// Counts the number of matching items.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items
            .iter()
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    /// Returns `true` if any item matches.
    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        items.iter().any(|item| self.matches(item, &accessor))
    }

    /// Finds the first matching item in input order.
    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        items.iter().find(|item| self.matches(*item, &accessor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[derive(Debug, Clone, PartialEq)]
    struct Event {
        title: String,
        seats: i64,
        status: u32,
        tags: Vec<String>,
        online: bool,
    }

    fn accessor<'a>(event: &'a Event, field: &str) -> Value<'a> {
        match field {
            "title" => Value::String(&event.title),
            "seats" => Value::Number(Number::I64(event.seats)),
            "status" => Value::Enum(event.status),
            "tags" => Value::List(&event.tags),
            "online" => Value::Bool(event.online),
            _ => Value::None,
        }
    }

    fn event(title: &str, seats: i64, status: u32, tags: &[&str], online: bool) -> Event {
        Event {
            title: title.to_string(),
            seats,
            status,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            online,
        }
    }

    fn sample_events() -> Vec<Event> {
        vec![
            event("Rust workshop", 20, 0, &["rust", "workshop"], false),
            event("Python night", 40, 0, &["python"], true),
            event("Hackathon", 40, 1, &["rust", "python"], false),
            event("Alumni dinner", 0, 2, &[], false),
            event("Career fair", 100, 3, &["career"], true),
        ]
    }

    fn titles(results: &[&Event]) -> Vec<String> {
        results.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let events = sample_events();
        let results = Query::new().filter(&events, accessor);
        assert_eq!(results.len(), events.len());
        assert_eq!(
            titles(&results),
            events.iter().map(|e| e.title.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn and_clauses_all_must_match() {
        let events = sample_events();
        let query = Query::new().and_gte("seats", 40i64).and_eq("online", false);
        assert_eq!(titles(&query.filter(&events, accessor)), vec!["Hackathon"]);
    }

    #[test]
    fn or_group_is_any_field() {
        let events = sample_events();
        let query = Query::new()
            .or_icontains("title", "PYTHON")
            .or_icontains("tags", "python");
        assert_eq!(
            titles(&query.filter(&events, accessor)),
            vec!["Python night", "Hackathon"]
        );
    }

    #[test]
    fn facet_in_is_or_within_and_across() {
        let events = sample_events();
        let query = Query::new()
            .and_in("status", [0u32, 1])
            .and_any_of("tags", ["rust"]);
        assert_eq!(
            titles(&query.filter(&events, accessor)),
            vec!["Rust workshop", "Hackathon"]
        );
    }

    #[test]
    fn not_clauses_exclude() {
        let events = sample_events();
        let query = Query::new().not("status", Op::In, vec![2u32, 3]);
        assert_eq!(query.count(&events, accessor), 3);

        let offline = Query::new().not_eq("online", true);
        assert!(offline.filter(&events, accessor).iter().all(|e| !e.online));
    }

    #[test]
    fn ordering_is_stable_for_ties() {
        let events = sample_events();
        let query = Query::new().order_desc("seats");
        // Python night and Hackathon tie on 40 seats and keep input order.
        assert_eq!(
            titles(&query.filter(&events, accessor)),
            vec![
                "Career fair",
                "Python night",
                "Hackathon",
                "Rust workshop",
                "Alumni dinner"
            ]
        );
    }

    #[test]
    fn ordering_by_title_uses_collation() {
        let mut events = sample_events();
        events.push(event("école d'été", 5, 0, &[], false));
        let query = Query::new().order_asc("title");
        let ordered = titles(&query.filter(&events, accessor));
        assert_eq!(ordered[0], "Alumni dinner");
        assert_eq!(ordered[1], "Career fair");
        assert_eq!(ordered[2], "école d'été");
    }

    #[test]
    fn filter_indices_point_into_input() {
        let events = sample_events();
        let query = Query::new().and_eq("online", true).order_desc("seats");
        assert_eq!(query.filter_indices(&events, accessor), vec![4, 1]);
    }

    #[test]
    fn filter_does_not_mutate_input() {
        let events = sample_events();
        let before = events.clone();
        let _ = Query::new().order_asc("title").filter(&events, accessor);
        assert_eq!(events, before);
    }

    #[test]
    fn find_returns_the_first_match() {
        let events = sample_events();
        let found = Query::new().and_contains("title", "fair").find(&events, accessor);
        assert_eq!(found.map(|e| e.seats), Some(100));
    }

    #[test]
    fn introspection() {
        let query = Query::new()
            .and_eq("a", "1")
            .or_eq("b", "2")
            .not_eq("c", "3")
            .ordered([OrderBy::asc("d"), OrderBy::desc("e")]);

        assert_eq!(query.and_clauses().len(), 1);
        assert_eq!(query.or_clauses().len(), 1);
        assert_eq!(query.not_clauses().len(), 1);
        assert_eq!(query.orderings().len(), 2);
        assert!(!query.is_empty());
        assert!(Query::new().order_asc("x").is_empty());
    }
}
