#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod loader;
pub mod session_view;
pub mod ticker;

pub use engine::{SessionEngine, QUIZ_STATE_KEY};
pub use error::{EngineError, LoadError};
pub use loader::QuestionLoader;
pub use session_view::QuizView;
pub use ticker::{SessionTicker, Tick};
