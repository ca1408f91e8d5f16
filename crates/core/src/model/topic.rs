use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four playground categories.
///
/// Each topic owns an independent case list and session state. The slug is
/// stable: it addresses persisted progress, so renaming one orphans saved
/// sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    BugSpotting,
    Prediction,
    ApiDecoder,
    BugReport,
}

impl Topic {
    /// All topics in the order the playgrounds are presented.
    pub const ALL: [Topic; 4] = [
        Topic::BugSpotting,
        Topic::Prediction,
        Topic::ApiDecoder,
        Topic::BugReport,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Topic::BugSpotting => "bug-spotting",
            Topic::Prediction => "prediction",
            Topic::ApiDecoder => "api-decoder",
            Topic::BugReport => "bug-report",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Topic::BugSpotting => "Bug Spotting Board",
            Topic::Prediction => "What Will Happen If...?",
            Topic::ApiDecoder => "API Response Decoder",
            Topic::BugReport => "Write the Better Bug",
        }
    }

    /// Short label for the learning step this playground trains.
    #[must_use]
    pub fn step(self) -> &'static str {
        match self {
            Topic::BugSpotting => "1. Observe",
            Topic::Prediction => "2. Predict",
            Topic::ApiDecoder => "3. Analyze",
            Topic::BugReport => "4. Communicate",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Topic::BugSpotting => {
                "A visual observation playground. Look carefully at the UI and identify what's wrong."
            }
            Topic::Prediction => {
                "A prediction-based thinking simulator. Think like a real user and predict system behavior."
            }
            Topic::ApiDecoder => {
                "A logic-analysis playground. Check if API behavior is correct, no tools needed."
            }
            Topic::BugReport => {
                "A communication improvement playground. Convert vague complaints into actionable bug reports."
            }
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a string does not name a known topic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown playground: {raw}")]
pub struct TopicParseError {
    pub raw: String,
}

impl FromStr for Topic {
    type Err = TopicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Topic::ALL
            .into_iter()
            .find(|topic| topic.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TopicParseError { raw: s.to_owned() })
    }
}
