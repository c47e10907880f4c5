#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    Question, QuestionBank, QuizSession, Score, SessionSnapshot, SnapshotError, TickOutcome,
    TIMER_LIMIT_SECS,
};
