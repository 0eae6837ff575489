mod progress;
mod shared;
mod state;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use shared::{LoadOutcome, SharedSession};
pub use state::QuizSession;
pub use workflow::QuizLoopService;
