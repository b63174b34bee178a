//! Property-based tests for seeker using proptest.

use proptest::prelude::*;
use vitrine_seeker::{paginate, total_pages, Number, Query, Value};

#[derive(Debug, Clone)]
struct Row {
    id: usize,
    group: u32,
    name: String,
    tags: Vec<String>,
    score: i64,
}

fn accessor<'a>(row: &'a Row, field: &str) -> Value<'a> {
    match field {
        "group" => Value::Enum(row.group),
        "name" => Value::String(&row.name),
        "tags" => Value::List(&row.tags),
        "score" => Value::Number(Number::I64(row.score)),
        _ => Value::None,
    }
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            0u32..4,
            "[a-cA-C]{1,6}",
            prop::collection::vec("[a-c]{1,3}", 0..3),
            -5i64..5,
        ),
        0..60,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(id, (group, name, tags, score))| Row {
                id,
                group,
                name,
                tags,
                score,
            })
            .collect()
    })
}

fn ids(rows: &[&Row]) -> Vec<usize> {
    rows.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn identity_filter_keeps_everything_in_order(rows in rows_strategy()) {
        let results = Query::new().filter(&rows, accessor);
        prop_assert_eq!(ids(&results), (0..rows.len()).collect::<Vec<_>>());
    }

    #[test]
    fn two_facet_values_yield_the_union(rows in rows_strategy(), a in 0u32..4, b in 0u32..4) {
        prop_assume!(a != b);
        let both = ids(&Query::new().and_in("group", [a, b]).filter(&rows, accessor));
        let only_a = ids(&Query::new().and_in("group", [a]).filter(&rows, accessor));
        let only_b = ids(&Query::new().and_in("group", [b]).filter(&rows, accessor));

        let mut union: Vec<usize> = only_a.into_iter().chain(only_b).collect();
        union.sort_unstable();
        prop_assert_eq!(both, union);
    }

    #[test]
    fn search_partitions_the_collection(rows in rows_strategy(), term in "[a-cA-C]{1,2}") {
        let query = Query::new()
            .or_icontains("name", &term)
            .or_icontains("tags", &term);
        let needle = term.to_lowercase();
        let hit = |row: &Row| {
            row.name.to_lowercase().contains(&needle)
                || row.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        };

        let matched = ids(&query.filter(&rows, accessor));
        for row in &rows {
            prop_assert_eq!(matched.contains(&row.id), hit(row));
        }
    }

    #[test]
    fn sorting_is_idempotent(rows in rows_strategy()) {
        let query = Query::new().order_desc("score").order_asc("name");
        let once: Vec<Row> = query.filter(&rows, accessor).into_iter().cloned().collect();
        let twice: Vec<Row> = query.filter(&once, accessor).into_iter().cloned().collect();
        prop_assert_eq!(
            once.iter().map(|r| r.id).collect::<Vec<_>>(),
            twice.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn sorting_is_stable(rows in rows_strategy()) {
        let sorted = Query::new().order_asc("score").filter(&rows, accessor);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn total_pages_formula(count in 0usize..500, page_size in 1usize..50) {
        let expected = std::cmp::max(1, count.div_ceil(page_size));
        prop_assert_eq!(total_pages(count, page_size), expected);
    }

    #[test]
    fn windows_cover_the_list_exactly_once(len in 0usize..120, page_size in 1usize..30) {
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(len, page_size);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let window = paginate(&items, page_size, page);
            prop_assert_eq!(window.current_page, page);
            prop_assert!(window.items.len() <= page_size);
            seen.extend_from_slice(window.items);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn out_of_range_pages_clamp(len in 0usize..60, page_size in 1usize..10, requested in 0usize..100) {
        let items: Vec<usize> = (0..len).collect();
        let window = paginate(&items, page_size, requested);
        prop_assert!(window.current_page >= 1);
        prop_assert!(window.current_page <= window.total_pages);
        prop_assert_eq!(window.has_next, window.current_page < window.total_pages);
        prop_assert_eq!(window.has_previous, window.current_page > 1);
    }
}
