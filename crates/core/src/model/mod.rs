mod question;
mod session;
mod snapshot;

pub use question::{Question, QuestionBank};
pub use session::{QuizSession, Score, TickOutcome, TIMER_LIMIT_SECS};
pub use snapshot::{SessionSnapshot, SnapshotError};
