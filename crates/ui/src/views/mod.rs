mod quiz;
mod shell;
mod state;

pub use quiz::QuizRunner;
pub use shell::QuizShell;
pub use state::{view_state_from_resource, ViewError, ViewState};
