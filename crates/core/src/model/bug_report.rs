use serde::{Deserialize, Serialize};

use crate::model::case::{Case, Verdict};
use crate::model::ids::CaseId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovedReport {
    pub title: String,
    pub steps: Vec<String>,
    pub expected: String,
    pub actual: String,
    pub impact: String,
}

/// Why each part of the improved report is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingExplanation {
    pub title: String,
    pub steps: String,
    pub impact: String,
}

/// A vague complaint and the actionable report it should have been.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReportCase {
    pub id: CaseId,
    pub title: String,
    pub bad_report: String,
    pub improved_report: ImprovedReport,
    pub teaching_explanation: TeachingExplanation,
}

impl Case for BugReportCase {
    // Revealing is just "show the improved version"; nothing is chosen.
    type Answer = ();

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn grade(&self, _answer: &()) -> Option<Verdict> {
        None
    }
}
