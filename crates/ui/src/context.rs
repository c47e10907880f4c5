use std::sync::Arc;

use services::QuestionLoader;
use storage::KeyValueStore;

/// Capabilities the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn storage(&self) -> Arc<dyn KeyValueStore>;
    fn question_loader(&self) -> Arc<QuestionLoader>;
}

#[derive(Clone)]
pub struct AppContext {
    storage: Arc<dyn KeyValueStore>,
    question_loader: Arc<QuestionLoader>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            storage: app.storage(),
            question_loader: app.question_loader(),
        }
    }

    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.storage)
    }

    #[must_use]
    pub fn question_loader(&self) -> Arc<QuestionLoader> {
        Arc::clone(&self.question_loader)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
