use serde::{Deserialize, Serialize};

use crate::model::case::{Case, Verdict};
use crate::model::ids::CaseId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOption {
    pub id: String,
    pub label: String,
    pub is_correct: bool,
}

/// "What will happen if...?" scenario with one or more correct outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionCase {
    pub id: CaseId,
    pub title: String,
    pub scenario: String,
    pub options: Vec<PredictionOption>,
    pub explanation: String,
    pub impact: String,
    pub best_practice: Vec<String>,
    pub teaching_highlight: String,
}

impl PredictionCase {
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&PredictionOption> {
        self.options.iter().find(|option| option.id == id)
    }
}

impl Case for PredictionCase {
    type Answer = String;

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn grade(&self, answer: &String) -> Option<Verdict> {
        // An id that matches no option counts as wrong rather than ungraded.
        let correct = self.option(answer).is_some_and(|option| option.is_correct);
        Some(Verdict::from_bool(correct))
    }
}
