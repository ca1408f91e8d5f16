use playground_core::{Case, Topic, Verdict};

use super::progress::SessionProgress;
use super::service::QuizSession;

/// Everything a front-end needs to draw one playground.
///
/// Presentation-agnostic: no formatted strings, the renderer decides how to
/// show counts and verdicts.
#[derive(Debug)]
pub struct SessionView<'a, C: Case> {
    pub topic: Topic,
    /// `None` once the cycle is complete.
    pub case: Option<&'a C>,
    /// How many cases of this cycle the current one makes, counting it once
    /// whether or not it has been revealed; 0 when complete.
    pub number: usize,
    pub progress: SessionProgress,
    pub revealed: bool,
    pub selected: Option<&'a C::Answer>,
    /// Set only after reveal, and only for gradable cases.
    pub verdict: Option<Verdict>,
}

impl<'a, C: Case> SessionView<'a, C> {
    #[must_use]
    pub fn from_session(session: &'a QuizSession<C>) -> Self {
        let case = session.current().case();
        let selected = session.selected_answer();
        let verdict = match (case, selected) {
            (Some(case), Some(answer)) if session.is_revealed() => case.grade(answer),
            _ => None,
        };
        let number = match case {
            Some(case) => {
                let already_shown = session.shown_ids().contains(&case.id());
                session.shown_count() + usize::from(!already_shown)
            }
            None => 0,
        };
        Self {
            topic: session.topic(),
            case,
            number,
            progress: session.progress(),
            revealed: session.is_revealed(),
            selected,
            verdict,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.case.is_none()
    }
}
