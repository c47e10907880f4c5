use dioxus::prelude::*;
use futures_util::StreamExt;

use quiz_core::Question;
use services::{QuizView, SessionEngine, Tick};

use crate::context::AppContext;

/// User-driven operations on the running session. Timer ticks arrive on
/// their own channel; both are serialized through one coroutine so every
/// operation is atomic with respect to the others.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QuizIntent {
    Select(String),
    Next,
    Previous,
    Submit,
}

fn format_timer(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("Time Remaining: {minutes}:{remainder:02}")
}

/// What the runner renders. A failed start is terminal and takes
/// precedence over the not-yet-ready state, so the UI never sits on the
/// preparing message after the session is known dead.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RunnerPhase {
    StartFailed,
    Preparing,
    Active(QuizView),
}

fn runner_phase(start_failed: bool, view: Option<QuizView>) -> RunnerPhase {
    if start_failed {
        return RunnerPhase::StartFailed;
    }
    match view {
        None => RunnerPhase::Preparing,
        Some(view) => RunnerPhase::Active(view),
    }
}

#[component]
pub fn QuizRunner(questions: Vec<Question>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut view = use_signal(|| None::<QuizView>);
    let mut start_failed = use_signal(|| false);
    let mut storage_failed = use_signal(|| false);

    // The coroutine owns the engine (and through it the countdown task).
    // Dropping it on unmount drops the engine, so no tick outlives the view.
    let intents = use_coroutine({
        let store = ctx.storage();
        move |mut rx: UnboundedReceiver<QuizIntent>| {
            let store = store.clone();
            let questions = questions.clone();
            async move {
                let mut engine = match SessionEngine::start(questions, store).await {
                    Ok(engine) => engine,
                    Err(_) => {
                        start_failed.set(true);
                        return;
                    }
                };
                let mut ticks = engine.start_ticker();
                view.set(Some(engine.view()));

                loop {
                    let result = tokio::select! {
                        intent = rx.next() => match intent {
                            Some(QuizIntent::Select(choice)) => {
                                engine.select_answer(&choice).await
                            }
                            Some(QuizIntent::Next) => engine.next_question().await,
                            Some(QuizIntent::Previous) => engine.previous_question().await,
                            Some(QuizIntent::Submit) => engine.submit().await,
                            None => break,
                        },
                        Some(Tick) = ticks.recv() => engine.tick().await.map(|_| ()),
                    };
                    if result.is_err() {
                        storage_failed.set(true);
                    }
                    view.set(Some(engine.view()));
                }
            }
        }
    });

    rsx! {
        section { class: "quiz",
            if storage_failed() {
                p { class: "error",
                    "Could not save your progress. Answers may not survive a restart."
                }
            }
            match runner_phase(start_failed(), view.read().clone()) {
                RunnerPhase::StartFailed => rsx! {
                    p { class: "error",
                        "Could not open the saved session. Restart the app to try again."
                    }
                },
                RunnerPhase::Preparing => rsx! {
                    p { class: "status", "Preparing your session..." }
                },
                RunnerPhase::Active(v) if v.submitted => {
                    let correct = v.score.map_or(0, |s| s.correct);
                    let total = v.score.map_or(v.total, |s| s.total);
                    rsx! {
                        div { class: "result",
                            h2 { "Quiz complete" }
                            p { class: "score", "You scored {correct} out of {total}." }
                            p { "Restart the app to try again." }
                        }
                    }
                }
                RunnerPhase::Active(v) => {
                    let number = v.current_index + 1;
                    let prompt = v.prompt.clone().unwrap_or_default();
                    rsx! {
                        div { class: "question-card",
                            p { class: "timer", "{format_timer(v.remaining_secs)}" }
                            p { class: "progress", "Question {number} of {v.total}" }
                            h2 { class: "prompt", "{prompt}" }
                            ul { class: "choices",
                                for (i, choice) in v.choices.iter().enumerate() {
                                    li { key: "{i}",
                                        label {
                                            input {
                                                r#type: "radio",
                                                name: "choice",
                                                value: "{choice}",
                                                checked: v.selected.as_deref() == Some(choice.as_str()),
                                                onchange: {
                                                    let choice = choice.clone();
                                                    move |_| intents.send(QuizIntent::Select(choice.clone()))
                                                },
                                            }
                                            "{choice}"
                                        }
                                    }
                                }
                            }
                            div { class: "nav",
                                button {
                                    disabled: v.is_first,
                                    onclick: move |_| intents.send(QuizIntent::Previous),
                                    "Previous"
                                }
                                if v.is_last {
                                    button {
                                        class: "submit",
                                        onclick: move |_| intents.send(QuizIntent::Submit),
                                        "Submit"
                                    }
                                } else {
                                    button {
                                        onclick: move |_| intents.send(QuizIntent::Next),
                                        "Next"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
