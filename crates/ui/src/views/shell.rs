use std::sync::Arc;
use std::time::Duration;

use dioxus::desktop::use_window;
use dioxus::prelude::*;
use storage::KeyValueStore;

use crate::context::AppContext;
use crate::platform::{DesktopFullscreenHost, FullscreenHostRef};
use crate::views::{view_state_from_resource, QuizRunner, ViewError, ViewState};

/// Storage key for the persisted fullscreen flag.
pub const FULLSCREEN_KEY: &str = "isFullscreen";

/// How often the shell reconciles its flag with the actual host state.
const FULLSCREEN_SYNC_INTERVAL: Duration = Duration::from_millis(500);

/// Persist the flag, reporting whether the write landed.
async fn persist_flag(store: &Arc<dyn KeyValueStore>, enabled: bool) -> bool {
    store
        .set(FULLSCREEN_KEY, if enabled { "true" } else { "false" })
        .await
        .is_ok()
}

/// Presentation shell: loads the question bank once and gates the quiz
/// behind the fullscreen flag.
#[component]
pub fn QuizShell() -> Element {
    let ctx = use_context::<AppContext>();
    let window = use_window();
    let host: FullscreenHostRef =
        use_hook(|| std::rc::Rc::new(DesktopFullscreenHost::new(window)));
    let mut fullscreen = use_signal(|| false);
    let mut flag_save_failed = use_signal(|| false);

    // Restore the persisted flag; `true` re-enters fullscreen on launch.
    use_future({
        let store = ctx.storage();
        let host = host.clone();
        move || {
            let store = store.clone();
            let host = host.clone();
            async move {
                if let Ok(Some(text)) = store.get(FULLSCREEN_KEY).await {
                    if serde_json::from_str::<bool>(&text).unwrap_or(false) {
                        host.set_fullscreen(true);
                        fullscreen.set(true);
                    }
                }
            }
        }
    });

    // The host can leave fullscreen on its own; reconcile flag and
    // storage with what it actually reports, persisting every change.
    use_future({
        let store = ctx.storage();
        let host = host.clone();
        move || {
            let store = store.clone();
            let host = host.clone();
            async move {
                loop {
                    tokio::time::sleep(FULLSCREEN_SYNC_INTERVAL).await;
                    let actual = host.is_fullscreen();
                    if actual != fullscreen() {
                        fullscreen.set(actual);
                        flag_save_failed.set(!persist_flag(&store, actual).await);
                    }
                }
            }
        }
    });

    let on_toggle = {
        let ctx = ctx.clone();
        let host = host.clone();
        move |_| {
            let next = !fullscreen();
            host.set_fullscreen(next);
            fullscreen.set(next);
            let store = ctx.storage();
            spawn(async move {
                flag_save_failed.set(!persist_flag(&store, next).await);
            });
        }
    };

    // One fetch for the lifetime of the shell; failure is permanent and
    // recovery is a manual restart.
    let questions = use_resource({
        let loader = ctx.question_loader();
        move || {
            let loader = loader.clone();
            async move {
                loader
                    .load()
                    .await
                    .map_err(|err| ViewError::new(err.to_string()))
            }
        }
    });

    rsx! {
        div { class: "shell",
            button { class: "fullscreen-toggle", onclick: on_toggle,
                if fullscreen() { "Exit Fullscreen" } else { "Enter Fullscreen" }
            }
            if flag_save_failed() {
                p { class: "error",
                    "Could not save the fullscreen preference. It may not survive a restart."
                }
            }
            match view_state_from_resource(questions) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "status", "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "Error loading questions: {err.message()}" }
                },
                ViewState::Ready(bank) => rsx! {
                    if !fullscreen() {
                        p { class: "status", "Please enable fullscreen mode to start the quiz." }
                    } else if bank.is_empty() {
                        p { class: "status", "No questions available." }
                    } else {
                        QuizRunner { questions: bank.clone() }
                    }
                },
            }
        }
    }
}
