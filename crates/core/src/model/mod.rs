mod api_decoder;
mod bug_report;
mod bug_spotting;
mod case;
mod ids;
mod prediction;
mod topic;

pub use ids::CaseId;
pub use topic::{Topic, TopicParseError};

pub use api_decoder::{ApiCase, ApiRequest, ApiResponse, ApiVerdict};
pub use bug_report::{BugReportCase, ImprovedReport, TeachingExplanation};
pub use bug_spotting::{BugExplanation, BugMeta, BugSpottingCase, ChoiceOption};
pub use case::{Case, CaseList, CaseListError, Verdict};
pub use prediction::{PredictionCase, PredictionOption};
