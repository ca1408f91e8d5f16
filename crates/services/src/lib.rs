#![forbid(unsafe_code)]

pub mod error;
pub mod playgrounds;
pub mod sessions;

pub use error::PlaygroundsError;
pub use playgrounds::{PlaygroundSummary, Playgrounds, TopicSession};
pub use sessions::{Current, QuizSession, SessionKeys, SessionProgress, SessionView};
