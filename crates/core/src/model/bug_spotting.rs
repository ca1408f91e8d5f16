use serde::{Deserialize, Serialize};

use crate::model::case::{Case, Verdict};
use crate::model::ids::CaseId;

/// Lettered choice shown under a bug spotting screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugExplanation {
    pub summary: String,
    pub details: String,
    pub severity: String,
    pub priority: String,
    pub why_it_matters: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugMeta {
    pub bug_type: String,
    pub skills: Vec<String>,
}

/// A screen with something (possibly nothing) wrong in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugSpottingCase {
    pub id: CaseId,
    pub title: String,
    /// Text rendering of the UI under test, one element per line.
    pub screen: Vec<String>,
    pub question: String,
    pub options: Vec<ChoiceOption>,
    pub correct_answer: String,
    pub explanation: BugExplanation,
    pub meta: BugMeta,
}

impl BugSpottingCase {
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.id == id)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&ChoiceOption> {
        self.option(&self.correct_answer)
    }
}

impl Case for BugSpottingCase {
    type Answer = String;

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn grade(&self, answer: &String) -> Option<Verdict> {
        Some(Verdict::from_bool(*answer == self.correct_answer))
    }
}
