mod keys;
mod persist;
mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use keys::{KEY_PREFIX, SessionKeys};
pub use progress::SessionProgress;
pub use service::{Current, QuizSession};
pub use view::SessionView;
