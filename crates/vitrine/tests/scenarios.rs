//! End-to-end list view scenarios over JSON collections.

use std::rc::Rc;

use serde_json::{json, Value};
use vitrine::{
    load_collection, Config, Event, LoadError, LoadState, ManualClock, Member, News, QueryEngine,
    SortKey, ViewStatus,
};

fn member_json(i: usize, promo: &str, skills: &[&str]) -> Value {
    json!({
        "id": format!("m{i:02}"),
        "firstName": format!("Prénom{i:02}"),
        "lastName": "Dupont",
        "promo": promo,
        "skills": skills,
    })
}

/// `n` members; the first five are M2, the rest L3.
fn members(n: usize) -> Vec<Member> {
    let raw: Vec<Value> = (0..n)
        .map(|i| member_json(i, if i < 5 { "M2" } else { "L3" }, &[]))
        .collect();
    load_collection(&raw).unwrap()
}

fn member_view(records: Vec<Member>) -> (QueryEngine<Member>, ManualClock) {
    let clock = ManualClock::new();
    let view = QueryEngine::new(
        LoadState::Ready(records.into()),
        &Config::default(),
        Rc::new(clock.clone()),
    );
    (view, clock)
}

#[test]
fn twenty_four_members_fit_on_one_page() {
    let (view, _) = member_view(members(24));
    let page = view.snapshot();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 24);
    assert!(!page.has_next);
    assert!(!page.has_previous);
}

#[test]
fn twenty_five_members_need_two_pages() {
    let (mut view, _) = member_view(members(25));
    assert_eq!(view.snapshot().total_pages, 2);

    view.set_page(2);
    let page = view.snapshot();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.items.len(), 1);
    assert!(!page.has_next);
    assert!(page.has_previous);
}

#[test]
fn cohort_filter_shrinks_to_one_page_and_clamps() {
    let (mut view, _) = member_view(members(25));
    view.set_page(2);

    view.set_facet("cohort", &["M2"]).unwrap();
    let page = view.snapshot();
    assert_eq!(page.result_count, 5);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);

    view.set_page(2);
    assert_eq!(view.snapshot().current_page, 1);
    assert_eq!(view.snapshot().items.len(), 5);
}

#[test]
fn python_search_matches_names_and_skills() {
    let raw = vec![
        member_json(0, "M1", &["Python", "SQL"]),
        member_json(1, "M1", &["Rust"]),
        member_json(2, "L3", &["data science", "pythonic APIs"]),
        json!({ "id": "m03", "firstName": "Monty", "lastName": "Python", "promo": "Alumni" }),
        member_json(4, "M2", &[]),
    ];
    let (mut view, clock) = member_view(load_collection(&raw).unwrap());

    view.set_search_term("python");
    clock.advance_ms(300);
    assert!(view.tick());

    let mut ids: Vec<&str> = view.snapshot().items.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["m00", "m02", "m03"]);
}

#[test]
fn rapid_typing_applies_only_the_final_term() {
    let (mut view, clock) = member_view(members(25));
    let start = view.revision();

    for term in ["p", "pr", "pré", "prénom0", "prénom01"] {
        view.set_search_term(term);
        clock.advance_ms(120);
        view.tick();
    }
    assert_eq!(view.revision(), start);
    assert_eq!(view.snapshot().result_count, 25);

    clock.advance_ms(300);
    view.tick();
    assert_eq!(view.revision(), start + 1);
    let page = view.snapshot();
    assert_eq!(page.result_count, 1);
    assert_eq!(page.items[0].id, "m01");
}

#[test]
fn clear_filters_restores_the_full_list() {
    let (mut view, _) = member_view(members(25));
    view.set_facet("cohort", &["M2"]).unwrap();
    view.set_search_term("prénom03");
    view.flush_search();
    assert_eq!(view.snapshot().status, ViewStatus::Results);
    assert_eq!(view.snapshot().result_count, 1);

    view.set_search_term("nobody");
    view.flush_search();
    let page = view.snapshot();
    assert_eq!(page.status, ViewStatus::NoResults);
    assert!(page.has_active_filters);

    view.clear_filters();
    let page = view.snapshot();
    assert_eq!(page.result_count, 25);
    assert!(!page.has_active_filters);
    assert_eq!(view.state().filters.search, "");
}

#[test]
fn invalid_record_fails_the_whole_event_load() {
    let raw = vec![
        json!({ "id": "e1", "title": "Forum", "startDate": "2024-10-10T09:00:00Z" }),
        json!({ "id": "e2", "title": "Gala" }),
    ];
    let result = load_collection::<Event>(&raw);
    assert!(matches!(
        result,
        Err(LoadError::MissingField { field: "startDate", .. })
    ));

    let view = QueryEngine::new(
        LoadState::from_result(result),
        &Config::default(),
        Rc::new(ManualClock::new()),
    );
    let page = view.snapshot();
    assert_eq!(page.status, ViewStatus::Failed);
    assert_eq!(page.result_count, 0);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn events_filter_by_status_and_tag_then_sort_by_participants() {
    let raw = vec![
        json!({ "id": "e1", "title": "Forum", "startDate": "2024-10-10", "status": "upcoming",
                "tags": ["career"], "currentParticipants": 40 }),
        json!({ "id": "e2", "title": "Hackathon", "startDate": "2024-11-02", "status": "upcoming",
                "tags": ["code", "career"] }),
        json!({ "id": "e3", "title": "Gala", "startDate": "2024-06-01", "status": "completed",
                "tags": ["party"], "currentParticipants": 120 }),
        json!({ "id": "e4", "title": "Meetup", "startDate": "2024-10-20", "status": "weird",
                "tags": ["code"], "currentParticipants": 15 }),
    ];
    let mut view = QueryEngine::new(
        LoadState::from_result(load_collection::<Event>(&raw)),
        &Config::default(),
        Rc::new(ManualClock::new()),
    );
    let ids = |view: &QueryEngine<Event>| -> Vec<String> {
        view.snapshot().items.iter().map(|e| e.id.clone()).collect()
    };

    assert_eq!(ids(&view), vec!["e3", "e1", "e4", "e2"]);

    view.set_facet("status", &["upcoming"]).unwrap();
    assert_eq!(ids(&view), vec!["e1", "e4", "e2"]);

    view.set_facet("tag", &["code", "party"]).unwrap();
    assert_eq!(ids(&view), vec!["e4", "e2"]);

    view.set_sort_key(SortKey::ParticipantsDesc).unwrap();
    assert_eq!(ids(&view), vec!["e4", "e2"]);

    view.set_facet::<&str>("tag", &[]).unwrap();
    assert_eq!(ids(&view), vec!["e1", "e4", "e2"]);
}

#[test]
fn events_search_location_and_organizer() {
    let raw = vec![
        json!({ "id": "e1", "title": "Forum", "startDate": "2024-10-10", "status": "upcoming",
                "location": { "name": "Amphi Turing" } }),
        json!({ "id": "e2", "title": "Gala", "startDate": "2024-12-10", "status": "upcoming",
                "organizer": "BDE Informatique" }),
    ];
    let mut view = QueryEngine::new(
        LoadState::from_result(load_collection::<Event>(&raw)),
        &Config::default(),
        Rc::new(ManualClock::new()),
    );
    view.set_search_term("turing");
    view.flush_search();
    assert_eq!(view.snapshot().items[0].id, "e1");

    view.set_search_term("informatique");
    view.flush_search();
    assert_eq!(view.snapshot().items[0].id, "e2");
    assert_eq!(view.snapshot().result_count, 1);
}

#[test]
fn news_default_to_newest_first_and_filter_by_author() {
    let raw = vec![
        json!({ "id": "n1", "title": "Rentrée", "content": "…", "publishedAt": "2024-09-01",
                "author": { "name": "Bureau" } }),
        json!({ "id": "n2", "title": "Élections", "content": "…", "publishedAt": "2024-10-01" }),
        json!({ "id": "n3", "title": "Afterwork", "content": "…", "publishedAt": "2024-09-15",
                "author": { "name": "Bureau" } }),
    ];
    let mut view = QueryEngine::new(
        LoadState::from_result(load_collection::<News>(&raw)),
        &Config::default(),
        Rc::new(ManualClock::new()),
    );
    let ids = |view: &QueryEngine<News>| -> Vec<String> {
        view.snapshot().items.iter().map(|n| n.id.clone()).collect()
    };
    assert_eq!(ids(&view), vec!["n2", "n3", "n1"]);

    view.set_sort_key(SortKey::TitleAsc).unwrap();
    assert_eq!(ids(&view), vec!["n3", "n2", "n1"]);

    view.set_facet("author", &["Bureau"]).unwrap();
    assert_eq!(ids(&view), vec!["n3", "n1"]);
}

#[test]
fn configured_page_size_applies() {
    let config = Config::from_yaml_str("members:\n  page_size: 10\n").unwrap();
    let view = QueryEngine::new(
        LoadState::Ready(members(25).into()),
        &config,
        Rc::new(ManualClock::new()),
    );
    let page = view.snapshot();
    assert_eq!(page.page_size, 10);
    assert_eq!(page.total_pages, 3);
}
