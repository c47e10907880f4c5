#![forbid(unsafe_code)]

pub mod app;
pub mod context;
pub mod platform;
pub mod views;

pub use app::App;
pub use context::{build_app_context, AppContext, UiApp};
