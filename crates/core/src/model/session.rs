use std::collections::HashMap;
use std::fmt;

use crate::model::{Question, QuestionBank, SessionSnapshot};

/// Countdown allotted to one attempt, in seconds.
pub const TIMER_LIMIT_SECS: u32 = 600;

/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown decreased and the session is still in progress.
    Running,
    /// The countdown reached zero on this tick and the session auto-submitted.
    AutoSubmitted,
    /// The session was already submitted; nothing changed.
    Ignored,
}

/// Final tally for an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// One attempt at the quiz: position, selections, countdown, submission.
///
/// `NotStarted -> InProgress -> Submitted`, with `Submitted` terminal.
/// Every mutating operation is a no-op once `submitted` is true; callers
/// can rely on the return values to know whether anything changed.
pub struct QuizSession {
    questions: QuestionBank,
    current: usize,
    answers: HashMap<usize, String>,
    remaining_secs: u32,
    submitted: bool,
}

impl QuizSession {
    /// Fresh session over the given bank. An empty bank is accepted; the
    /// session is then degenerate but total (no operation panics).
    #[must_use]
    pub fn new(questions: QuestionBank) -> Self {
        Self {
            questions,
            current: 0,
            answers: HashMap::new(),
            remaining_secs: TIMER_LIMIT_SECS,
            submitted: false,
        }
    }

    /// Rehydrate a session from a validated snapshot.
    ///
    /// The snapshot replaces the defaults wholesale. Callers must run
    /// [`SessionSnapshot::validate`] first; this constructor trusts its
    /// input beyond clamping nothing.
    #[must_use]
    pub fn from_snapshot(questions: QuestionBank, snapshot: SessionSnapshot) -> Self {
        Self {
            questions,
            current: snapshot.current_question,
            answers: snapshot.answers,
            remaining_secs: snapshot.timer,
            submitted: snapshot.quiz_submitted,
        }
    }

    /// Snapshot of the full mutable state, in the persisted wire shape.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_question: self.current,
            answers: self.answers.clone(),
            timer: self.remaining_secs,
            quiz_submitted: self.submitted,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// The recorded answer for a question index, if any.
    #[must_use]
    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Record `choice` for the current question, overwriting any prior
    /// selection. The choice string is taken as-is; membership in the
    /// question's choice list is deliberately not checked.
    ///
    /// Returns `false` (unchanged) after submission or on an empty bank.
    pub fn select_answer(&mut self, choice: impl Into<String>) -> bool {
        if self.submitted || self.questions.is_empty() {
            return false;
        }
        self.answers.insert(self.current, choice.into());
        true
    }

    /// Advance to the next question. Rejected at the last index.
    pub fn next_question(&mut self) -> bool {
        if self.submitted || self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step back to the previous question. Rejected at index 0.
    pub fn previous_question(&mut self) -> bool {
        if self.submitted || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Finish the attempt. Allowed from any position and with unanswered
    /// questions; the UI, not the engine, gates this to the last question.
    ///
    /// Returns `false` if the session was already submitted.
    pub fn submit(&mut self) -> bool {
        if self.submitted {
            return false;
        }
        self.submitted = true;
        true
    }

    /// Count down one second. At zero the session auto-submits; this is
    /// the only path to `Submitted` without an explicit user action and it
    /// fires exactly once. Further ticks report [`TickOutcome::Ignored`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.submitted {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.submitted = true;
            return TickOutcome::AutoSubmitted;
        }
        TickOutcome::Running
    }

    /// Tally answers against the bank: exact, case-sensitive string
    /// equality, no trimming. Unanswered indices never count as correct.
    #[must_use]
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answer_for(*i) == Some(q.correct_answer()))
            .count();
        Score {
            correct,
            total: self.questions.len(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("remaining_secs", &self.remaining_secs)
            .field("submitted", &self.submitted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arithmetic_bank() -> QuestionBank {
        vec![Question::new("2+2?", vec!["3".into(), "4".into()], "4")]
    }

    fn three_question_bank() -> QuestionBank {
        (1..=3)
            .map(|n| {
                Question::new(
                    format!("Q{n}"),
                    vec!["a".into(), "b".into()],
                    "a",
                )
            })
            .collect()
    }

    #[test]
    fn answered_then_submitted_scores_full_marks() {
        let mut session = QuizSession::new(arithmetic_bank());
        assert!(session.select_answer("4"));
        assert!(session.submit());

        assert_eq!(session.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn unanswered_question_scores_zero() {
        let mut session = QuizSession::new(arithmetic_bank());
        assert!(session.submit());

        assert_eq!(session.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn scoring_is_exact_and_case_sensitive() {
        let bank = vec![Question::new("Color?", vec!["Red".into()], "Red")];
        let mut session = QuizSession::new(bank);
        session.select_answer("red");

        assert_eq!(session.score().correct, 0);

        session.select_answer("Red ");
        assert_eq!(session.score().correct, 0);

        session.select_answer("Red");
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn select_answer_accepts_strings_outside_the_choice_list() {
        let mut session = QuizSession::new(arithmetic_bank());
        assert!(session.select_answer("not a choice"));
        assert_eq!(session.answer_for(0), Some("not a choice"));
    }

    #[test]
    fn last_write_wins_per_index() {
        let mut session = QuizSession::new(arithmetic_bank());
        session.select_answer("3");
        session.select_answer("4");

        assert_eq!(session.answer_for(0), Some("4"));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut session = QuizSession::new(three_question_bank());

        assert!(!session.previous_question());
        assert_eq!(session.current_index(), 0);

        assert!(session.next_question());
        assert!(session.next_question());
        assert_eq!(session.current_index(), 2);

        assert!(!session.next_question());
        assert_eq!(session.current_index(), 2);

        assert!(session.previous_question());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn timer_counts_down_and_auto_submits_once() {
        let mut session = QuizSession::new(arithmetic_bank());
        assert_eq!(session.remaining_seconds(), TIMER_LIMIT_SECS);

        for _ in 0..TIMER_LIMIT_SECS - 1 {
            assert_eq!(session.tick(), TickOutcome::Running);
        }
        assert_eq!(session.remaining_seconds(), 1);

        assert_eq!(session.tick(), TickOutcome::AutoSubmitted);
        assert!(session.is_submitted());
        assert_eq!(session.remaining_seconds(), 0);

        // Stray ticks after timeout must not go negative or re-trigger.
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.remaining_seconds(), 0);
        assert!(session.is_submitted());
    }

    #[test]
    fn submitted_session_ignores_all_mutation() {
        let mut session = QuizSession::new(three_question_bank());
        session.select_answer("a");
        assert!(session.submit());

        assert!(!session.submit());
        assert!(!session.select_answer("b"));
        assert!(!session.next_question());
        assert!(!session.previous_question());
        assert_eq!(session.tick(), TickOutcome::Ignored);

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answer_for(0), Some("a"));
        assert_eq!(session.remaining_seconds(), TIMER_LIMIT_SECS);
    }

    #[test]
    fn empty_bank_is_degenerate_but_total() {
        let mut session = QuizSession::new(Vec::new());

        assert!(session.current_question().is_none());
        assert!(!session.select_answer("x"));
        assert!(!session.next_question());
        assert!(!session.previous_question());
        assert_eq!(session.score(), Score { correct: 0, total: 0 });

        assert!(session.submit());
        assert!(session.is_submitted());
    }

    #[test]
    fn snapshot_round_trips_through_restore() {
        let mut session = QuizSession::new(three_question_bank());
        session.select_answer("b");
        session.next_question();
        session.tick();
        session.tick();

        let snapshot = session.snapshot();
        let restored = QuizSession::from_snapshot(three_question_bank(), snapshot);

        assert_eq!(restored.current_index(), 1);
        assert_eq!(restored.answer_for(0), Some("b"));
        assert_eq!(restored.remaining_seconds(), TIMER_LIMIT_SECS - 2);
        assert!(!restored.is_submitted());
    }
}
