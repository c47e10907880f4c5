use std::sync::Arc;
use std::time::Duration;

use quiz_core::{QuestionBank, QuizSession, Score, SessionSnapshot, TickOutcome};
use storage::KeyValueStore;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::EngineError;
use crate::session_view::QuizView;
use crate::ticker::{SessionTicker, Tick};

/// Storage key for the persisted session snapshot.
pub const QUIZ_STATE_KEY: &str = "quizState";

/// Countdown granularity.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns one quiz attempt and mirrors it into durable storage.
///
/// Wraps the pure [`QuizSession`] state machine: after every operation
/// that actually changed state (and while not submitted) the full
/// snapshot is written under [`QUIZ_STATE_KEY`]; the record is deleted
/// the instant the session submits, by user action or timeout, so a
/// restart after submission begins a fresh attempt.
pub struct SessionEngine {
    session: QuizSession,
    store: Arc<dyn KeyValueStore>,
    ticker: Option<SessionTicker>,
}

impl SessionEngine {
    /// Begin a session, restoring a previously persisted snapshot when
    /// one is present and well-formed.
    ///
    /// Restore is validate-then-replace-wholesale: a snapshot that fails
    /// to parse or validate is treated as absent and the defaults stand.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when the store cannot be read.
    pub async fn start(
        questions: QuestionBank,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, EngineError> {
        let restored = store
            .get(QUIZ_STATE_KEY)
            .await?
            .and_then(|text| serde_json::from_str::<SessionSnapshot>(&text).ok())
            .filter(|snapshot| snapshot.validate(questions.len()).is_ok());

        let session = match restored {
            Some(snapshot) => QuizSession::from_snapshot(questions, snapshot),
            None => QuizSession::new(questions),
        };

        Ok(Self {
            session,
            store,
            ticker: None,
        })
    }

    /// Start the one-second countdown task.
    ///
    /// The task's lifetime belongs to this engine: submission (either
    /// path) stops it, and dropping the engine aborts it, so no tick can
    /// fire once the session is gone. Starting again replaces any
    /// previous task.
    pub fn start_ticker(&mut self) -> UnboundedReceiver<Tick> {
        self.start_ticker_every(TICK_PERIOD)
    }

    /// As [`start_ticker`](Self::start_ticker) with an explicit period,
    /// for tests that cannot wait out real seconds.
    pub fn start_ticker_every(&mut self, period: Duration) -> UnboundedReceiver<Tick> {
        let (ticker, ticks) = SessionTicker::start(period);
        self.ticker = Some(ticker);
        ticks
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.session.is_submitted()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.session.score()
    }

    /// Presentation-agnostic view of the current state.
    #[must_use]
    pub fn view(&self) -> QuizView {
        QuizView::from_session(&self.session)
    }

    /// Record an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when persisting the snapshot fails.
    pub async fn select_answer(&mut self, choice: &str) -> Result<(), EngineError> {
        if self.session.select_answer(choice) {
            self.persist().await?;
        }
        Ok(())
    }

    /// Move to the next question; a rejected move writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when persisting the snapshot fails.
    pub async fn next_question(&mut self) -> Result<(), EngineError> {
        if self.session.next_question() {
            self.persist().await?;
        }
        Ok(())
    }

    /// Move to the previous question; a rejected move writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when persisting the snapshot fails.
    pub async fn previous_question(&mut self) -> Result<(), EngineError> {
        if self.session.previous_question() {
            self.persist().await?;
        }
        Ok(())
    }

    /// Submit the attempt and delete the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when the snapshot cannot be removed.
    pub async fn submit(&mut self) -> Result<(), EngineError> {
        if self.session.submit() {
            self.stop_ticker();
            self.clear().await?;
        }
        Ok(())
    }

    /// Count down one second.
    ///
    /// A running tick persists the snapshot (the timer is part of the
    /// mirrored state); the tick that reaches zero auto-submits and
    /// deletes the snapshot instead. Ticks after submission do nothing.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` when the store write fails.
    pub async fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Running => self.persist().await?,
            TickOutcome::AutoSubmitted => {
                self.stop_ticker();
                self.clear().await?;
            }
            TickOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    async fn persist(&self) -> Result<(), EngineError> {
        let text = serde_json::to_string(&self.session.snapshot())
            .map_err(|e| storage::StorageError::Serialization(e.to_string()))?;
        self.store.set(QUIZ_STATE_KEY, &text).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), EngineError> {
        self.store.remove(QUIZ_STATE_KEY).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{Question, TIMER_LIMIT_SECS};
    use storage::InMemoryStore;

    fn bank(len: usize) -> QuestionBank {
        (0..len)
            .map(|n| {
                Question::new(
                    format!("Q{n}"),
                    vec!["a".into(), "b".into()],
                    "a",
                )
            })
            .collect()
    }

    async fn stored_snapshot(store: &InMemoryStore) -> Option<SessionSnapshot> {
        store
            .get(QUIZ_STATE_KEY)
            .await
            .unwrap()
            .map(|text| serde_json::from_str(&text).unwrap())
    }

    #[tokio::test]
    async fn persists_after_each_mutation() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(3), Arc::new(store.clone()))
            .await
            .unwrap();

        engine.select_answer("b").await.unwrap();
        let snap = stored_snapshot(&store).await.unwrap();
        assert_eq!(snap.answers.get(&0).map(String::as_str), Some("b"));

        engine.next_question().await.unwrap();
        let snap = stored_snapshot(&store).await.unwrap();
        assert_eq!(snap.current_question, 1);

        engine.tick().await.unwrap();
        let snap = stored_snapshot(&store).await.unwrap();
        assert_eq!(snap.timer, TIMER_LIMIT_SECS - 1);
    }

    #[tokio::test]
    async fn rejected_navigation_writes_nothing() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(2), Arc::new(store.clone()))
            .await
            .unwrap();

        engine.previous_question().await.unwrap();
        assert!(stored_snapshot(&store).await.is_none());
    }

    #[tokio::test]
    async fn submit_clears_the_snapshot() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(1), Arc::new(store.clone()))
            .await
            .unwrap();

        engine.select_answer("a").await.unwrap();
        assert!(stored_snapshot(&store).await.is_some());

        engine.submit().await.unwrap();
        assert!(stored_snapshot(&store).await.is_none());
        assert_eq!(engine.score(), Score { correct: 1, total: 1 });
    }

    #[tokio::test]
    async fn timeout_clears_the_snapshot_and_submits_once() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(1), Arc::new(store.clone()))
            .await
            .unwrap();

        for _ in 0..TIMER_LIMIT_SECS - 1 {
            assert_eq!(engine.tick().await.unwrap(), TickOutcome::Running);
        }
        assert_eq!(engine.tick().await.unwrap(), TickOutcome::AutoSubmitted);

        assert!(engine.is_submitted());
        assert!(stored_snapshot(&store).await.is_none());

        // A stray tick after timeout neither resubmits nor resurrects the record.
        assert_eq!(engine.tick().await.unwrap(), TickOutcome::Ignored);
        assert!(stored_snapshot(&store).await.is_none());
    }

    #[tokio::test]
    async fn restores_a_well_formed_snapshot_wholesale() {
        let store = InMemoryStore::new();
        store
            .set(
                QUIZ_STATE_KEY,
                r#"{"currentQuestion":1,"answers":{"0":"x"},"timer":450,"quizSubmitted":false}"#,
            )
            .await
            .unwrap();

        let engine = SessionEngine::start(bank(3), Arc::new(store)).await.unwrap();
        let session = engine.session();

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.answer_for(0), Some("x"));
        assert_eq!(session.remaining_seconds(), 450);
        assert!(!session.is_submitted());
    }

    #[tokio::test]
    async fn malformed_snapshot_is_treated_as_absent() {
        let store = InMemoryStore::new();
        store.set(QUIZ_STATE_KEY, "{ not json").await.unwrap();

        let engine = SessionEngine::start(bank(2), Arc::new(store)).await.unwrap();

        assert_eq!(engine.session().current_index(), 0);
        assert_eq!(engine.session().remaining_seconds(), TIMER_LIMIT_SECS);
    }

    #[tokio::test]
    async fn out_of_range_snapshot_is_treated_as_absent() {
        let store = InMemoryStore::new();
        store
            .set(
                QUIZ_STATE_KEY,
                r#"{"currentQuestion":9,"answers":{},"timer":450,"quizSubmitted":false}"#,
            )
            .await
            .unwrap();

        let engine = SessionEngine::start(bank(2), Arc::new(store)).await.unwrap();

        assert_eq!(engine.session().current_index(), 0);
        assert_eq!(engine.session().remaining_seconds(), TIMER_LIMIT_SECS);
    }

    #[tokio::test]
    async fn submitted_snapshot_starts_a_fresh_session() {
        let store = InMemoryStore::new();
        store
            .set(
                QUIZ_STATE_KEY,
                r#"{"currentQuestion":0,"answers":{"0":"a"},"timer":0,"quizSubmitted":true}"#,
            )
            .await
            .unwrap();

        let engine = SessionEngine::start(bank(2), Arc::new(store)).await.unwrap();

        assert!(!engine.is_submitted());
        assert_eq!(engine.session().answered_count(), 0);
    }

    #[tokio::test]
    async fn submission_stops_the_countdown_task() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(1), Arc::new(store))
            .await
            .unwrap();
        let mut ticks = engine.start_ticker_every(Duration::from_millis(5));

        assert_eq!(ticks.recv().await, Some(Tick));

        engine.submit().await.unwrap();

        // The aborted task lets the channel drain and close.
        while ticks.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn submitted_engine_ignores_further_operations() {
        let store = InMemoryStore::new();
        let mut engine = SessionEngine::start(bank(2), Arc::new(store.clone()))
            .await
            .unwrap();

        engine.submit().await.unwrap();

        engine.select_answer("a").await.unwrap();
        engine.next_question().await.unwrap();
        engine.tick().await.unwrap();

        assert_eq!(engine.session().answered_count(), 0);
        assert_eq!(engine.session().current_index(), 0);
        assert!(stored_snapshot(&store).await.is_none());
    }
}
