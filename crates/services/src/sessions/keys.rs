use playground_core::Topic;

/// Prefix shared by every persisted playground key.
pub const KEY_PREFIX: &str = "qa-playground";

/// Storage keys for one topic's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeys {
    /// JSON array of case ids revealed in the current cycle.
    pub shown_ids: String,
    /// Decimal index into the shuffled order.
    pub position: String,
    /// JSON array of case ids in presentation order.
    pub shuffled_order: String,
}

impl SessionKeys {
    #[must_use]
    pub fn for_topic(topic: Topic) -> Self {
        let slug = topic.slug();
        Self {
            shown_ids: format!("{KEY_PREFIX}:{slug}:shown-ids"),
            position: format!("{KEY_PREFIX}:{slug}:position"),
            shuffled_order: format!("{KEY_PREFIX}:{slug}:shuffled-order"),
        }
    }

    #[must_use]
    pub fn all(&self) -> [&str; 3] {
        [&self.shown_ids, &self.position, &self.shuffled_order]
    }
}
