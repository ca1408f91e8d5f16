use std::sync::Arc;

use playground_core::model::{ApiCase, BugReportCase, BugSpottingCase, PredictionCase};
use playground_core::{Case, CaseList, Catalog, Topic};
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::KeyValueStore;

use crate::error::PlaygroundsError;
use crate::sessions::{QuizSession, SessionProgress};

/// Topic-independent handle on a session, for code that treats all
/// playgrounds alike.
pub trait TopicSession {
    fn topic(&self) -> Topic;
    fn progress(&self) -> SessionProgress;
    fn restart(&mut self);
    fn is_persistent(&self) -> bool;
}

impl<C: Case> TopicSession for QuizSession<C> {
    fn topic(&self) -> Topic {
        QuizSession::topic(self)
    }

    fn progress(&self) -> SessionProgress {
        QuizSession::progress(self)
    }

    fn restart(&mut self) {
        QuizSession::restart(self);
    }

    fn is_persistent(&self) -> bool {
        QuizSession::is_persistent(self)
    }
}

/// One row of the playground index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundSummary {
    pub topic: Topic,
    pub title: &'static str,
    pub step: &'static str,
    pub description: &'static str,
    pub progress: SessionProgress,
}

/// The four playground sessions over one shared store.
pub struct Playgrounds {
    bug_spotting: QuizSession<BugSpottingCase>,
    prediction: QuizSession<PredictionCase>,
    api_decoder: QuizSession<ApiCase>,
    bug_report: QuizSession<BugReportCase>,
}

impl Playgrounds {
    /// Open every playground with the built-in cases.
    ///
    /// # Errors
    ///
    /// Returns `PlaygroundsError::Catalog` if the embedded case data is invalid.
    pub fn open_builtin(store: Arc<dyn KeyValueStore>) -> Result<Self, PlaygroundsError> {
        Ok(Self::open(Catalog::builtin()?, store))
    }

    /// Restore (or start) a session per topic from `store`.
    #[must_use]
    pub fn open(catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            bug_spotting: QuizSession::initialize(catalog.bug_spotting, Arc::clone(&store)),
            prediction: QuizSession::initialize(catalog.prediction, Arc::clone(&store)),
            api_decoder: QuizSession::initialize(catalog.api_decoder, Arc::clone(&store)),
            bug_report: QuizSession::initialize(catalog.bug_report, store),
        }
    }

    /// Deterministic variant of [`Playgrounds::open`]; each topic gets its own
    /// generator derived from `seed`.
    #[must_use]
    pub fn open_seeded(catalog: Catalog, store: Arc<dyn KeyValueStore>, seed: u64) -> Self {
        fn seeded<C: Case>(
            cases: CaseList<C>,
            store: &Arc<dyn KeyValueStore>,
            seed: u64,
        ) -> QuizSession<C> {
            QuizSession::initialize_with_rng(cases, Arc::clone(store), StdRng::seed_from_u64(seed))
        }

        Self {
            bug_spotting: seeded(catalog.bug_spotting, &store, seed),
            prediction: seeded(catalog.prediction, &store, seed.wrapping_add(1)),
            api_decoder: seeded(catalog.api_decoder, &store, seed.wrapping_add(2)),
            bug_report: seeded(catalog.bug_report, &store, seed.wrapping_add(3)),
        }
    }

    #[must_use]
    pub fn bug_spotting(&self) -> &QuizSession<BugSpottingCase> {
        &self.bug_spotting
    }

    pub fn bug_spotting_mut(&mut self) -> &mut QuizSession<BugSpottingCase> {
        &mut self.bug_spotting
    }

    pub fn prediction_mut(&mut self) -> &mut QuizSession<PredictionCase> {
        &mut self.prediction
    }

    pub fn api_decoder_mut(&mut self) -> &mut QuizSession<ApiCase> {
        &mut self.api_decoder
    }

    pub fn bug_report_mut(&mut self) -> &mut QuizSession<BugReportCase> {
        &mut self.bug_report
    }

    #[must_use]
    pub fn session(&self, topic: Topic) -> &dyn TopicSession {
        match topic {
            Topic::BugSpotting => &self.bug_spotting,
            Topic::Prediction => &self.prediction,
            Topic::ApiDecoder => &self.api_decoder,
            Topic::BugReport => &self.bug_report,
        }
    }

    pub fn session_mut(&mut self, topic: Topic) -> &mut dyn TopicSession {
        match topic {
            Topic::BugSpotting => &mut self.bug_spotting,
            Topic::Prediction => &mut self.prediction,
            Topic::ApiDecoder => &mut self.api_decoder,
            Topic::BugReport => &mut self.bug_report,
        }
    }

    #[must_use]
    pub fn summary(&self, topic: Topic) -> PlaygroundSummary {
        PlaygroundSummary {
            topic,
            title: topic.title(),
            step: topic.step(),
            description: topic.description(),
            progress: self.session(topic).progress(),
        }
    }

    /// One summary per topic, in presentation order.
    #[must_use]
    pub fn summaries(&self) -> Vec<PlaygroundSummary> {
        Topic::ALL.into_iter().map(|topic| self.summary(topic)).collect()
    }

    pub fn restart(&mut self, topic: Topic) {
        self.session_mut(topic).restart();
    }

    pub fn restart_all(&mut self) {
        for topic in Topic::ALL {
            self.restart(topic);
        }
    }

    /// False if any topic fell back to memory-only storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        Topic::ALL
            .into_iter()
            .all(|topic| self.session(topic).is_persistent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryStore;

    fn open(store: &InMemoryStore) -> Playgrounds {
        Playgrounds::open_seeded(Catalog::builtin().unwrap(), Arc::new(store.clone()), 7)
    }

    #[test]
    fn summaries_follow_presentation_order() {
        let playgrounds = open(&InMemoryStore::new());
        let summaries = playgrounds.summaries();

        let topics: Vec<Topic> = summaries.iter().map(|s| s.topic).collect();
        assert_eq!(topics, Topic::ALL);
        assert!(summaries.iter().all(|s| s.progress.total == 10));
        assert!(summaries.iter().all(|s| s.progress.shown == 0));
        assert_eq!(summaries[2].step, "3. Analyze");
    }

    #[test]
    fn topics_progress_independently() {
        let store = InMemoryStore::new();
        let mut playgrounds = open(&store);

        let answer = playgrounds
            .bug_spotting()
            .current()
            .case()
            .map(|case| case.correct_answer.clone())
            .unwrap();
        playgrounds.bug_spotting_mut().reveal(answer);
        playgrounds.bug_report_mut().reveal(());

        assert_eq!(playgrounds.summary(Topic::BugSpotting).progress.shown, 1);
        assert_eq!(playgrounds.summary(Topic::BugReport).progress.shown, 1);
        assert_eq!(playgrounds.summary(Topic::Prediction).progress.shown, 0);

        playgrounds.restart(Topic::BugSpotting);
        assert_eq!(playgrounds.summary(Topic::BugSpotting).progress.shown, 0);
        assert_eq!(playgrounds.summary(Topic::BugReport).progress.shown, 1);
    }

    #[test]
    fn every_topic_persists_three_keys() {
        let store = InMemoryStore::new();
        let playgrounds = open(&store);
        assert!(playgrounds.is_persistent());
        assert_eq!(store.keys().unwrap().len(), 12);
    }

    #[test]
    fn restart_all_clears_progress() {
        let store = InMemoryStore::new();
        let mut playgrounds = open(&store);
        playgrounds.prediction_mut().reveal("charged-twice".to_owned());
        playgrounds.bug_report_mut().reveal(());

        playgrounds.restart_all();

        assert!(playgrounds.summaries().iter().all(|s| s.progress.shown == 0));
    }
}
