use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::case::{Case, Verdict};
use crate::model::ids::CaseId;

/// How a learner judges an API exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVerdict {
    Correct,
    Incorrect,
    Partially,
}

impl ApiVerdict {
    pub const ALL: [ApiVerdict; 3] = [
        ApiVerdict::Correct,
        ApiVerdict::Incorrect,
        ApiVerdict::Partially,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVerdict::Correct => "correct",
            ApiVerdict::Incorrect => "incorrect",
            ApiVerdict::Partially => "partially",
        }
    }
}

impl fmt::Display for ApiVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ApiVerdict::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("expected one of correct, incorrect, partially; got {needle}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: String,
    pub endpoint: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// A request/response pair to be judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCase {
    pub id: CaseId,
    pub title: String,
    pub request: ApiRequest,
    pub response: ApiResponse,
    pub question: String,
    pub correct_answer: ApiVerdict,
    pub explanation: String,
    pub correct_behavior: ApiResponse,
    pub teaching_note: String,
}

impl Case for ApiCase {
    type Answer = ApiVerdict;

    fn id(&self) -> &CaseId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn grade(&self, answer: &ApiVerdict) -> Option<Verdict> {
        Some(Verdict::from_bool(*answer == self.correct_answer))
    }
}
