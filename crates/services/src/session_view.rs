use quiz_core::{QuizSession, Score};

/// Presentation-agnostic view of one quiz attempt.
///
/// This is intentionally **not** a UI view-model: no pre-formatted
/// strings, no layout assumptions. The UI formats the timer and score as
/// it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub current_index: usize,
    pub total: usize,
    pub prompt: Option<String>,
    pub choices: Vec<String>,
    pub selected: Option<String>,
    pub answered: usize,
    pub remaining_secs: u32,
    pub is_first: bool,
    pub is_last: bool,
    pub submitted: bool,
    /// Present only after submission.
    pub score: Option<Score>,
}

impl QuizView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let current_index = session.current_index();
        let total = session.total_questions();
        let question = session.current_question();
        let submitted = session.is_submitted();

        Self {
            current_index,
            total,
            prompt: question.map(|q| q.prompt().to_owned()),
            choices: question.map(|q| q.choices().to_vec()).unwrap_or_default(),
            selected: session.answer_for(current_index).map(str::to_owned),
            answered: session.answered_count(),
            remaining_secs: session.remaining_seconds(),
            is_first: current_index == 0,
            is_last: total != 0 && current_index + 1 == total,
            submitted,
            score: submitted.then(|| session.score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::Question;

    fn bank() -> Vec<Question> {
        vec![
            Question::new("Q1", vec!["a".into(), "b".into()], "a"),
            Question::new("Q2", vec!["c".into(), "d".into()], "d"),
        ]
    }

    #[test]
    fn mirrors_in_progress_state() {
        let mut session = QuizSession::new(bank());
        session.select_answer("b");
        session.next_question();

        let view = QuizView::from_session(&session);

        assert_eq!(view.current_index, 1);
        assert_eq!(view.total, 2);
        assert_eq!(view.prompt.as_deref(), Some("Q2"));
        assert_eq!(view.choices, ["c", "d"]);
        assert_eq!(view.selected, None);
        assert_eq!(view.answered, 1);
        assert!(!view.is_first);
        assert!(view.is_last);
        assert!(!view.submitted);
        assert_eq!(view.score, None);
    }

    #[test]
    fn exposes_score_only_after_submission() {
        let mut session = QuizSession::new(bank());
        session.select_answer("a");
        session.submit();

        let view = QuizView::from_session(&session);

        assert!(view.submitted);
        assert_eq!(view.score, Some(Score { correct: 1, total: 2 }));
    }

    #[test]
    fn empty_bank_has_no_prompt_and_no_last() {
        let view = QuizView::from_session(&QuizSession::new(Vec::new()));

        assert_eq!(view.prompt, None);
        assert!(view.choices.is_empty());
        assert!(view.is_first);
        assert!(!view.is_last);
    }
}
