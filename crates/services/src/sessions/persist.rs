use std::sync::Arc;

use playground_core::{Case, CaseId, CaseList, Topic};
use storage::{KeyValueStore, StorageError};
use thiserror::Error;

use super::keys::SessionKeys;

/// Why persisted state was rejected. Any of these discards all three keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InvalidState {
    #[error("key {0} is missing while the others are present")]
    MissingKey(String),

    #[error("value under {key} is not a JSON id array: {reason}")]
    Malformed { key: String, reason: String },

    #[error("position {0:?} is not a non-negative integer")]
    BadPosition(String),

    #[error("case {0} is not in the current case list")]
    UnknownId(CaseId),

    #[error("case {0} appears more than once")]
    DuplicateId(CaseId),

    #[error("stored order has {stored} cases, list has {expected}")]
    OrderLength { stored: usize, expected: usize },

    #[error("position {position} is past the end of {len} cases")]
    PositionOutOfBounds { position: usize, len: usize },
}

/// Validated session state, as indices into the case list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub order: Vec<usize>,
    pub position: usize,
    pub shown: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Loaded {
    Absent,
    Invalid(InvalidState),
    Valid(Snapshot),
}

/// A topic's view of the shared store.
///
/// The first storage failure flips the session to memory-only for the rest
/// of its life; later writes are skipped instead of failing again.
pub(crate) struct Persistence {
    topic: Topic,
    keys: SessionKeys,
    store: Arc<dyn KeyValueStore>,
    available: bool,
}

impl Persistence {
    pub fn new(topic: Topic, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            topic,
            keys: SessionKeys::for_topic(topic),
            store,
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn load<C: Case>(&mut self, cases: &CaseList<C>) -> Loaded {
        if !self.available {
            return Loaded::Absent;
        }
        match self.read_raw() {
            Ok(raw) => validate(&self.keys, raw, cases),
            Err(err) => {
                self.degrade(&err);
                Loaded::Absent
            }
        }
    }

    fn read_raw(&self) -> Result<RawState, StorageError> {
        Ok(RawState {
            order: self.store.get(&self.keys.shuffled_order)?,
            position: self.store.get(&self.keys.position)?,
            shown: self.store.get(&self.keys.shown_ids)?,
        })
    }

    pub fn save_order(&mut self, ids: &[&CaseId]) {
        let Some(raw) = self.encode(ids) else { return };
        if self.available {
            let result = self.store.set(&self.keys.shuffled_order, &raw);
            self.check(result);
        }
    }

    pub fn save_position(&mut self, position: usize) {
        if self.available {
            let result = self.store.set(&self.keys.position, &position.to_string());
            self.check(result);
        }
    }

    pub fn save_shown(&mut self, ids: &[&CaseId]) {
        let Some(raw) = self.encode(ids) else { return };
        if self.available {
            let result = self.store.set(&self.keys.shown_ids, &raw);
            self.check(result);
        }
    }

    /// Removes all three keys for the topic.
    pub fn clear(&mut self) {
        let keys = self.keys.clone();
        for key in keys.all() {
            if !self.available {
                return;
            }
            let result = self.store.remove(key);
            self.check(result);
        }
    }

    fn encode(&self, ids: &[&CaseId]) -> Option<String> {
        match serde_json::to_string(ids) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::warn!(topic = %self.topic, error = %err, "could not encode case ids");
                None
            }
        }
    }

    fn check(&mut self, result: Result<(), StorageError>) {
        if let Err(err) = result {
            self.degrade(&err);
        }
    }

    fn degrade(&mut self, err: &StorageError) {
        self.available = false;
        tracing::warn!(
            topic = %self.topic,
            error = %err,
            "storage unavailable; progress will not survive a reload"
        );
    }
}

struct RawState {
    order: Option<String>,
    position: Option<String>,
    shown: Option<String>,
}

fn validate<C: Case>(keys: &SessionKeys, raw: RawState, cases: &CaseList<C>) -> Loaded {
    match (raw.order, raw.position, raw.shown) {
        (None, None, None) => Loaded::Absent,
        (Some(order), Some(position), Some(shown)) => {
            match parse_snapshot(keys, &order, &position, &shown, cases) {
                Ok(snapshot) => Loaded::Valid(snapshot),
                Err(reason) => Loaded::Invalid(reason),
            }
        }
        (order, position, _) => {
            let missing = if order.is_none() {
                &keys.shuffled_order
            } else if position.is_none() {
                &keys.position
            } else {
                &keys.shown_ids
            };
            Loaded::Invalid(InvalidState::MissingKey(missing.clone()))
        }
    }
}

fn parse_snapshot<C: Case>(
    keys: &SessionKeys,
    order: &str,
    position: &str,
    shown: &str,
    cases: &CaseList<C>,
) -> Result<Snapshot, InvalidState> {
    let order = parse_ids(&keys.shuffled_order, order, cases)?;
    if order.len() != cases.len() {
        return Err(InvalidState::OrderLength {
            stored: order.len(),
            expected: cases.len(),
        });
    }
    let shown = parse_ids(&keys.shown_ids, shown, cases)?;
    let position: usize = position
        .trim()
        .parse()
        .map_err(|_| InvalidState::BadPosition(position.to_owned()))?;

    // A finished cycle may legitimately sit one past the end.
    let finished = shown.len() == cases.len();
    if position > cases.len() || (position == cases.len() && !finished) {
        return Err(InvalidState::PositionOutOfBounds {
            position,
            len: cases.len(),
        });
    }

    Ok(Snapshot {
        order,
        position,
        shown,
    })
}

/// Parses a JSON id array into list indices, rejecting unknown and repeated ids.
fn parse_ids<C: Case>(
    key: &str,
    raw: &str,
    cases: &CaseList<C>,
) -> Result<Vec<usize>, InvalidState> {
    let ids: Vec<CaseId> = serde_json::from_str(raw).map_err(|e| InvalidState::Malformed {
        key: key.to_owned(),
        reason: e.to_string(),
    })?;

    let mut seen = vec![false; cases.len()];
    let mut indices = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(index) = cases.position_of(id.as_str()) else {
            return Err(InvalidState::UnknownId(id));
        };
        if seen[index] {
            return Err(InvalidState::DuplicateId(id));
        }
        seen[index] = true;
        indices.push(index);
    }
    Ok(indices)
}
