use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use thiserror::Error;

use crate::model::ids::CaseId;
use crate::model::topic::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaseListError {
    #[error("{topic}: case id cannot be blank")]
    BlankId { topic: Topic },

    #[error("{topic}: duplicate case id {id}")]
    DuplicateId { topic: Topic, id: CaseId },
}

//
// ─── CASE ──────────────────────────────────────────────────────────────────────
//

/// Outcome of checking a selected answer against a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub fn from_bool(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Incorrect }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// A single quiz item.
///
/// Session bookkeeping only ever looks at [`Case::id`]; the rest of the trait
/// exists for rendering.
pub trait Case {
    /// What the user selects when answering this kind of case.
    type Answer: Clone + fmt::Debug + PartialEq;

    fn id(&self) -> &CaseId;

    fn title(&self) -> &str;

    /// Grades an answer. `None` means the case is not gradable.
    fn grade(&self, answer: &Self::Answer) -> Option<Verdict>;
}

//
// ─── CASE LIST ─────────────────────────────────────────────────────────────────
//

/// Ordered, immutable list of cases for one topic with unique, non-blank ids.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseList<C> {
    topic: Topic,
    cases: Vec<C>,
}

impl<C: Case> CaseList<C> {
    /// Builds a case list, validating ids.
    ///
    /// # Errors
    ///
    /// Returns `CaseListError` when an id is blank or appears more than once.
    pub fn new(topic: Topic, cases: Vec<C>) -> Result<Self, CaseListError> {
        let mut seen = HashSet::with_capacity(cases.len());
        for case in &cases {
            let id = case.id();
            if id.is_blank() {
                return Err(CaseListError::BlankId { topic });
            }
            if !seen.insert(id) {
                return Err(CaseListError::DuplicateId {
                    topic,
                    id: id.clone(),
                });
            }
        }
        Ok(Self { topic, cases })
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Ids in list order.
    pub fn ids(&self) -> impl Iterator<Item = &CaseId> {
        self.cases.iter().map(Case::id)
    }

    /// Index of the case with the given id.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|case| case.id().as_str() == id)
    }
}

impl<C> Deref for CaseList<C> {
    type Target = [C];

    fn deref(&self) -> &Self::Target {
        &self.cases
    }
}
