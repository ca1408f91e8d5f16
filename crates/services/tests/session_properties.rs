use std::collections::HashSet;
use std::sync::Arc;

use playground_core::{Case, CaseId, CaseList, Topic, Verdict};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::QuizSession;
use storage::InMemoryStore;

#[derive(Debug, Clone, PartialEq)]
struct Numbered(CaseId);

impl Case for Numbered {
    type Answer = ();

    fn id(&self) -> &CaseId {
        &self.0
    }

    fn title(&self) -> &str {
        self.0.as_str()
    }

    fn grade(&self, _answer: &()) -> Option<Verdict> {
        None
    }
}

fn numbered(n: usize) -> CaseList<Numbered> {
    let cases = (0..n).map(|i| Numbered(CaseId::new(format!("case-{i}")))).collect();
    CaseList::new(Topic::Prediction, cases).unwrap()
}

fn expected_ids(n: usize) -> HashSet<String> {
    (0..n).map(|i| format!("case-{i}")).collect()
}

fn assert_permutation(session: &QuizSession<Numbered>, n: usize) {
    let order: Vec<String> = session.order().iter().map(ToString::to_string).collect();
    assert_eq!(order.len(), n);
    let unique: HashSet<String> = order.into_iter().collect();
    assert_eq!(unique, expected_ids(n));
}

proptest! {
    #[test]
    fn order_is_a_permutation_after_initialize_and_restart(n in 0usize..40, seed in any::<u64>()) {
        let store = InMemoryStore::new();
        let mut session = QuizSession::initialize_with_rng(
            numbered(n),
            Arc::new(store),
            StdRng::seed_from_u64(seed),
        );
        assert_permutation(&session, n);

        session.restart();
        assert_permutation(&session, n);
    }

    /// Random interleavings of reveal/advance (including misuse) never show a
    /// case twice before the cycle is complete.
    #[test]
    fn no_case_repeats_within_a_cycle(
        n in 1usize..15,
        seed in any::<u64>(),
        actions in proptest::collection::vec(any::<bool>(), 0..80),
        reload_every in 1usize..10,
    ) {
        let store = InMemoryStore::new();
        let mut session = QuizSession::initialize_with_rng(
            numbered(n),
            Arc::new(store.clone()),
            StdRng::seed_from_u64(seed),
        );
        let mut presented: Vec<String> = Vec::new();

        for (step, reveal) in actions.into_iter().enumerate() {
            if reveal {
                let id = session.current().case().map(|c| c.0.to_string());
                let before = session.shown_count();
                // After a reload the last revealed case is presented again
                // unrevealed; only a growing shown set counts as a new showing.
                if session.reveal(()) && session.shown_count() > before {
                    let id = id.unwrap();
                    prop_assert!(!presented.contains(&id), "{id} shown twice");
                    presented.push(id);
                }
            } else {
                session.advance();
            }

            let shown: Vec<String> = session.shown_ids().iter().map(ToString::to_string).collect();
            let unique: HashSet<&String> = shown.iter().collect();
            prop_assert_eq!(unique.len(), shown.len());
            prop_assert!(shown.len() <= n);

            if session.is_complete() {
                prop_assert_eq!(presented.len(), n);
                break;
            }
            if step % reload_every == 0 {
                session = QuizSession::initialize_with_rng(
                    numbered(n),
                    Arc::new(store.clone()),
                    StdRng::seed_from_u64(seed.wrapping_add(step as u64)),
                );
            }
        }
    }

    #[test]
    fn completed_state_ignores_everything_but_restart(n in 0usize..12, seed in any::<u64>()) {
        let store = InMemoryStore::new();
        let mut session = QuizSession::initialize_with_rng(
            numbered(n),
            Arc::new(store),
            StdRng::seed_from_u64(seed),
        );
        while !session.current().is_complete() {
            session.reveal(());
            session.advance();
        }
        prop_assert_eq!(session.shown_count(), n);

        prop_assert!(!session.reveal(()));
        prop_assert!(!session.advance());
        prop_assert!(session.current().is_complete());

        session.restart();
        prop_assert_eq!(session.shown_count(), 0);
        prop_assert_eq!(session.current().is_complete(), n == 0);
    }
}
