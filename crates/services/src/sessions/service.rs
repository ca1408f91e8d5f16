use std::sync::Arc;

use playground_core::{Case, CaseId, CaseList, Topic};
use rand::SeedableRng;
use rand::rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use storage::KeyValueStore;

use super::persist::{Loaded, Persistence};
use super::progress::SessionProgress;
use super::view::SessionView;

//
// ─── CURRENT CASE ──────────────────────────────────────────────────────────────
//

/// What a session is presenting right now.
#[derive(Debug, PartialEq)]
pub enum Current<'a, C> {
    Case(&'a C),
    /// Every case has been shown this cycle; only a restart moves on.
    Complete,
}

impl<C> Clone for Current<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Current<'_, C> {}

impl<'a, C> Current<'a, C> {
    #[must_use]
    pub fn case(self) -> Option<&'a C> {
        match self {
            Current::Case(case) => Some(case),
            Current::Complete => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Current::Complete)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Shuffle-and-resume quiz session for one topic.
///
/// Walks every case of the list exactly once per cycle in a random order.
/// Order, position and the shown set are written to the store as they change
/// so a new session over the same store resumes where the last one stopped.
/// Nothing here fails: storage problems degrade the session to memory-only
/// and bad persisted state is replaced by a fresh cycle.
pub struct QuizSession<C: Case> {
    cases: CaseList<C>,
    persistence: Persistence,
    rng: StdRng,
    order: Vec<usize>,
    position: usize,
    shown: Vec<usize>,
    revealed: bool,
    selected: Option<C::Answer>,
}

impl<C: Case> QuizSession<C> {
    /// Restore the topic's session from `store`, or start a fresh cycle.
    #[must_use]
    pub fn initialize(cases: CaseList<C>, store: Arc<dyn KeyValueStore>) -> Self {
        Self::initialize_with_rng(cases, store, StdRng::from_rng(&mut rng()))
    }

    /// Like [`QuizSession::initialize`], shuffling with the given generator.
    #[must_use]
    pub fn initialize_with_rng(
        cases: CaseList<C>,
        store: Arc<dyn KeyValueStore>,
        rng: StdRng,
    ) -> Self {
        let persistence = Persistence::new(cases.topic(), store);
        let mut session = Self {
            cases,
            persistence,
            rng,
            order: Vec::new(),
            position: 0,
            shown: Vec::new(),
            revealed: false,
            selected: None,
        };

        if session.cases.is_empty() {
            return session;
        }

        let topic = session.topic();
        match session.persistence.load(&session.cases) {
            Loaded::Absent => {
                tracing::debug!(topic = %topic, "no saved session; starting a new cycle");
                session.start_cycle();
            }
            Loaded::Valid(snapshot) if snapshot.shown.len() == session.cases.len() => {
                tracing::debug!(topic = %topic, "saved cycle already finished; starting a new cycle");
                session.start_cycle();
            }
            Loaded::Valid(snapshot) => {
                tracing::debug!(
                    topic = %topic,
                    position = snapshot.position,
                    shown = snapshot.shown.len(),
                    "resuming saved session"
                );
                session.order = snapshot.order;
                session.position = snapshot.position;
                session.shown = snapshot.shown;
            }
            Loaded::Invalid(reason) => {
                tracing::warn!(topic = %topic, %reason, "discarding saved session");
                session.persistence.clear();
                session.start_cycle();
            }
        }
        session
    }

    /// The case on screen, or `Complete` once the cycle is over.
    ///
    /// The last case of a cycle stays current while its explanation is
    /// revealed; the session reports `Complete` from the following `advance`.
    #[must_use]
    pub fn current(&self) -> Current<'_, C> {
        if self.is_complete() && !self.revealed {
            return Current::Complete;
        }
        match self.order.get(self.position) {
            Some(&index) => Current::Case(&self.cases[index]),
            None => Current::Complete,
        }
    }

    /// Record the answer and reveal the explanation for the current case.
    ///
    /// Returns `false` without changing anything when the case is already
    /// revealed or the cycle is complete.
    pub fn reveal(&mut self, answer: C::Answer) -> bool {
        if self.revealed || self.is_complete() {
            return false;
        }
        let Some(&index) = self.order.get(self.position) else {
            return false;
        };

        self.selected = Some(answer);
        self.revealed = true;
        if !self.shown.contains(&index) {
            self.shown.push(index);
            let ids = ids_at(&self.cases, &self.shown);
            self.persistence.save_shown(&ids);
        }
        true
    }

    /// Move to the next case not yet shown this cycle.
    ///
    /// Only valid after [`QuizSession::reveal`]; otherwise returns `false` and
    /// leaves the session untouched. When no unshown case remains the
    /// position moves past the end and the cycle is complete.
    pub fn advance(&mut self) -> bool {
        if !self.revealed {
            tracing::debug!(topic = %self.topic(), "advance ignored; current case not revealed");
            return false;
        }
        self.clear_transients();

        let len = self.order.len();
        let forward = self.position + 1..len;
        // Cases behind the position can only be unshown after an interrupted
        // write; pick them up rather than finishing the cycle without them.
        let behind = 0..self.position.min(len);
        let next = forward
            .chain(behind)
            .find(|&p| !self.shown.contains(&self.order[p]));

        self.position = next.unwrap_or(len);
        self.persistence.save_position(self.position);
        if next.is_none() {
            tracing::debug!(topic = %self.topic(), total = len, "cycle complete");
        }
        true
    }

    /// Throw away all progress and start a freshly shuffled cycle.
    pub fn restart(&mut self) {
        if self.cases.is_empty() {
            self.clear_transients();
            return;
        }
        tracing::debug!(topic = %self.topic(), "restarting cycle");
        self.persistence.clear();
        self.start_cycle();
    }

    fn start_cycle(&mut self) {
        self.order = (0..self.cases.len()).collect();
        self.order.shuffle(&mut self.rng);
        self.position = 0;
        self.shown.clear();
        self.clear_transients();

        if self.cases.is_empty() {
            return;
        }
        let order = ids_at(&self.cases, &self.order);
        self.persistence.save_order(&order);
        self.persistence.save_position(self.position);
        self.persistence.save_shown(&[]);
    }

    fn clear_transients(&mut self) {
        self.revealed = false;
        self.selected = None;
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.cases.topic()
    }

    #[must_use]
    pub fn cases(&self) -> &CaseList<C> {
        &self.cases
    }

    /// Current presentation order as case ids.
    #[must_use]
    pub fn order(&self) -> Vec<&CaseId> {
        ids_at(&self.cases, &self.order)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Ids revealed this cycle, in the order they were revealed.
    #[must_use]
    pub fn shown_ids(&self) -> Vec<&CaseId> {
        ids_at(&self.cases, &self.shown)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    /// Cases from the current position to the end of the order.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.position)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shown.len() == self.cases.len()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&C::Answer> {
        self.selected.as_ref()
    }

    /// False once a storage failure has turned this into a memory-only session.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_available()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            shown: self.shown_count(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_, C> {
        SessionView::from_session(self)
    }
}

fn ids_at<'a, C: Case>(cases: &'a CaseList<C>, indices: &[usize]) -> Vec<&'a CaseId> {
    indices.iter().map(|&i| cases[i].id()).collect()
}
