//! Built-in case lists for the four playgrounds.
//!
//! The cases ship inside the binary as JSON documents and are parsed once at
//! startup.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{
    ApiCase, BugReportCase, BugSpottingCase, Case, CaseList, CaseListError, PredictionCase, Topic,
};

const BUG_SPOTTING_JSON: &str = include_str!("../data/bug_spotting.json");
const PREDICTION_JSON: &str = include_str!("../data/prediction.json");
const API_DECODER_JSON: &str = include_str!("../data/api_decoder.json");
const BUG_REPORT_JSON: &str = include_str!("../data/bug_report.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("{topic}: malformed case data: {source}")]
    Parse {
        topic: Topic,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    CaseList(#[from] CaseListError),
}

/// Case lists for every topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub bug_spotting: CaseList<BugSpottingCase>,
    pub prediction: CaseList<PredictionCase>,
    pub api_decoder: CaseList<ApiCase>,
    pub bug_report: CaseList<BugReportCase>,
}

impl Catalog {
    /// Parses the catalog compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an embedded document is malformed or has
    /// duplicate ids.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self {
            bug_spotting: parse_list(Topic::BugSpotting, BUG_SPOTTING_JSON)?,
            prediction: parse_list(Topic::Prediction, PREDICTION_JSON)?,
            api_decoder: parse_list(Topic::ApiDecoder, API_DECODER_JSON)?,
            bug_report: parse_list(Topic::BugReport, BUG_REPORT_JSON)?,
        })
    }

    /// Number of cases available for a topic.
    #[must_use]
    pub fn len(&self, topic: Topic) -> usize {
        match topic {
            Topic::BugSpotting => self.bug_spotting.len(),
            Topic::Prediction => self.prediction.len(),
            Topic::ApiDecoder => self.api_decoder.len(),
            Topic::BugReport => self.bug_report.len(),
        }
    }
}

/// Parses one topic's JSON array into a validated case list.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for malformed JSON and
/// `CatalogError::CaseList` for id violations.
pub fn parse_list<C>(topic: Topic, json: &str) -> Result<CaseList<C>, CatalogError>
where
    C: Case + DeserializeOwned,
{
    let cases: Vec<C> =
        serde_json::from_str(json).map_err(|source| CatalogError::Parse { topic, source })?;
    Ok(CaseList::new(topic, cases)?)
}
