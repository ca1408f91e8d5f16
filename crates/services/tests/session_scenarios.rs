use std::sync::Arc;

use playground_core::model::PredictionCase;
use playground_core::{Case, CaseId, CaseList, Catalog, Topic, Verdict};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{QuizSession, SessionKeys};
use storage::{InMemoryStore, JsonFileStore, KeyValueStore, UnavailableStore};

#[derive(Debug, Clone, PartialEq)]
struct Letter(CaseId);

impl Case for Letter {
    type Answer = &'static str;

    fn id(&self) -> &CaseId {
        &self.0
    }

    fn title(&self) -> &str {
        self.0.as_str()
    }

    fn grade(&self, answer: &&'static str) -> Option<Verdict> {
        Some(Verdict::from_bool(*answer == self.0.as_str()))
    }
}

fn letters(ids: &[&str]) -> CaseList<Letter> {
    let cases = ids.iter().map(|id| Letter(CaseId::new(*id))).collect();
    CaseList::new(Topic::BugSpotting, cases).unwrap()
}

fn open(ids: &[&str], store: &InMemoryStore, seed: u64) -> QuizSession<Letter> {
    QuizSession::initialize_with_rng(letters(ids), Arc::new(store.clone()), StdRng::seed_from_u64(seed))
}

fn current(session: &QuizSession<Letter>) -> Option<String> {
    session.current().case().map(|case| case.0.to_string())
}

fn ids(list: Vec<&CaseId>) -> Vec<String> {
    list.into_iter().map(ToString::to_string).collect()
}

fn sorted(mut list: Vec<String>) -> Vec<String> {
    list.sort();
    list
}

#[test]
fn fresh_start_shuffles_the_whole_list() {
    let store = InMemoryStore::new();
    let session = open(&["A", "B", "C"], &store, 1);

    assert_eq!(sorted(ids(session.order())), ["A", "B", "C"]);
    assert_eq!(session.position(), 0);
    assert!(session.shown_ids().is_empty());
    assert!(!session.is_revealed());
    assert_eq!(session.remaining(), 3);
}

#[test]
fn full_cycle_then_completion() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B", "C"], &store, 2);

    for _ in 0..3 {
        assert!(!session.current().is_complete());
        session.reveal("A");
        session.advance();
    }

    assert!(session.current().is_complete());
    assert!(session.view().is_complete());
    assert_eq!(sorted(ids(session.shown_ids())), ["A", "B", "C"]);
}

#[test]
fn restart_resets_and_rewrites_storage() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B", "C"], &store, 3);
    while !session.current().is_complete() {
        session.reveal("B");
        session.advance();
    }

    let keys = SessionKeys::for_topic(Topic::BugSpotting);
    store.set(&keys.shuffled_order, "sentinel").unwrap();

    session.restart();

    assert!(session.shown_ids().is_empty());
    assert_eq!(session.position(), 0);
    let stored: Vec<String> =
        serde_json::from_str(&store.get(&keys.shuffled_order).unwrap().unwrap()).unwrap();
    assert_eq!(stored, ids(session.order()));
}

#[test]
fn reload_after_reveal_resumes_same_case_unrevealed() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B", "C"], &store, 4);
    let first = current(&session).unwrap();
    session.reveal("C");
    drop(session);

    // Different seed: a reshuffle would almost certainly show up.
    let reloaded = open(&["A", "B", "C"], &store, 99);

    assert_eq!(current(&reloaded).as_deref(), Some(first.as_str()));
    assert_eq!(ids(reloaded.shown_ids()), [first]);
    // The re-presented case is still the first of the cycle.
    assert_eq!(reloaded.view().number, 1);
    assert!(!reloaded.is_revealed());
    assert_eq!(reloaded.selected_answer(), None);
}

#[test]
fn resume_is_idempotent() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B", "C", "D", "E"], &store, 5);
    session.reveal("A");
    session.advance();
    session.reveal("A");
    session.advance();

    let order = ids(session.order());
    let position = session.position();
    let shown = ids(session.shown_ids());

    for seed in [10, 11, 12] {
        let reloaded = open(&["A", "B", "C", "D", "E"], &store, seed);
        assert_eq!(ids(reloaded.order()), order);
        assert_eq!(reloaded.position(), position);
        assert_eq!(ids(reloaded.shown_ids()), shown);
    }
}

#[test]
fn state_for_a_changed_list_is_discarded() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B", "C"], &store, 6);
    session.reveal("A");
    session.advance();
    drop(session);

    let changed = open(&["A", "B", "D"], &store, 7);

    assert_eq!(sorted(ids(changed.order())), ["A", "B", "D"]);
    assert_eq!(changed.position(), 0);
    assert!(changed.shown_ids().is_empty());

    let keys = SessionKeys::for_topic(Topic::BugSpotting);
    let stored: Vec<String> =
        serde_json::from_str(&store.get(&keys.shuffled_order).unwrap().unwrap()).unwrap();
    assert_eq!(stored, ids(changed.order()));
    assert_eq!(store.get(&keys.shown_ids).unwrap().as_deref(), Some("[]"));
}

#[test]
fn finished_cycle_starts_over_on_next_load() {
    let store = InMemoryStore::new();
    let mut session = open(&["A", "B"], &store, 8);
    while !session.current().is_complete() {
        session.reveal("A");
        session.advance();
    }
    drop(session);

    let next = open(&["A", "B"], &store, 9);
    assert!(!next.current().is_complete());
    assert!(next.shown_ids().is_empty());
    assert_eq!(next.position(), 0);
}

#[test]
fn disabled_storage_never_panics() {
    let mut session: QuizSession<Letter> = QuizSession::initialize_with_rng(
        letters(&["A", "B", "C"]),
        Arc::new(UnavailableStore),
        StdRng::seed_from_u64(10),
    );
    assert!(!session.is_persistent());

    while !session.current().is_complete() {
        assert!(session.reveal("A"));
        assert!(session.advance());
    }
    session.restart();
    assert_eq!(session.remaining(), 3);
}

#[test]
fn works_with_catalog_cases() {
    let catalog = Catalog::builtin().unwrap();
    let store = InMemoryStore::new();
    let mut session: QuizSession<PredictionCase> =
        QuizSession::initialize(catalog.prediction, Arc::new(store.clone()));

    let case = session.current().case().unwrap().clone();
    let right = case.options.iter().find(|o| o.is_correct).unwrap().id.clone();
    session.reveal(right);

    let view = session.view();
    assert_eq!(view.case, Some(&case));
    assert_eq!(view.verdict, Some(Verdict::Correct));
    assert_eq!(view.progress.total, 10);
}

#[test]
fn failing_writes_mid_session_fall_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("progress");
    std::fs::create_dir(&nested).unwrap();
    let store = JsonFileStore::open(nested.join("store.json")).unwrap();

    let mut session = QuizSession::initialize_with_rng(
        letters(&["A", "B", "C"]),
        Arc::new(store),
        StdRng::seed_from_u64(9),
    );
    assert!(session.is_persistent());

    // Reads still come from the cache; writes now have nowhere to go.
    std::fs::remove_dir_all(&nested).unwrap();

    let first = current(&session).unwrap();
    assert!(session.reveal("A"));
    assert!(!session.is_persistent());
    assert_eq!(session.shown_count(), 1);

    assert!(session.advance());
    let second = current(&session).unwrap();
    assert_ne!(first, second);
    assert!(session.reveal("B"));
    assert!(session.advance());
    assert!(session.reveal("C"));
    assert!(session.advance());
    assert!(session.is_complete());
    assert!(session.current().is_complete());
}
