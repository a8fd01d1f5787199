//! Knowledge-gate quiz: answer normalization and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A question with the answers it accepts. Answers are stored as written in
/// configuration and normalized at comparison time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question shown to the user.
    pub prompt: String,
    /// Accepted answers, before normalization.
    pub accepted_answers: Vec<String>,
}

impl QuizQuestion {
    /// Creates a question from a prompt and its accepted answers.
    #[must_use]
    pub fn new(prompt: impl Into<String>, accepted_answers: &[&str]) -> Self {
        Self {
            prompt: prompt.into(),
            accepted_answers: accepted_answers.iter().map(|&a| a.to_owned()).collect(),
        }
    }
}

/// Why a submitted answer was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum QuizError {
    /// Nothing left after normalization.
    #[error("answer is empty")]
    EmptyInput,
    /// The answer matched none of the accepted answers.
    #[error("answer does not match")]
    NoMatch,
}

/// Proof that the current question was answered correctly. Only
/// [`validate`] produces it; [`QuizProgress::advance`] consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Advance(());

/// Where the quiz goes after a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// Another question follows, at this index.
    NextQuestion(usize),
    /// That was the last question.
    Completed,
}

/// Per-episode quiz state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    /// Index of the question being asked.
    pub current_question_index: usize,
    /// Text currently typed in the answer box.
    pub pending_input: String,
    /// Error from the last rejected submission, cleared on edit or success.
    pub last_error: Option<QuizError>,
}

impl QuizProgress {
    /// Replaces the pending input and clears any shown error.
    pub fn edit(&mut self, text: String) {
        self.pending_input = text;
        self.last_error = None;
    }

    /// Records a rejected submission. The index and input are untouched.
    pub fn reject(&mut self, error: QuizError) {
        self.last_error = Some(error);
    }

    /// Applies a correct answer: clears input and error, then moves to the
    /// next question or reports completion. The index never reaches
    /// `question_count`.
    pub fn advance(&mut self, _proof: Advance, question_count: usize) -> QuizOutcome {
        self.pending_input.clear();
        self.last_error = None;
        if self.current_question_index + 1 < question_count {
            self.current_question_index += 1;
            QuizOutcome::NextQuestion(self.current_question_index)
        } else {
            QuizOutcome::Completed
        }
    }
}

/// Canonicalizes free text for comparison: trims, lower-cases, strips
/// diacritics, and collapses interior whitespace runs to one space.
#[must_use]
pub fn normalize(s: &str) -> String {
    let folded: String = s
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Checks `raw_input` against the question's accepted answers.
///
/// # Errors
///
/// Returns `QuizError::EmptyInput` if the input normalizes to nothing and
/// `QuizError::NoMatch` if it equals no normalized accepted answer.
pub fn validate(question: &QuizQuestion, raw_input: &str) -> Result<Advance, QuizError> {
    let answer = normalize(raw_input);
    if answer.is_empty() {
        return Err(QuizError::EmptyInput);
    }
    if question
        .accepted_answers
        .iter()
        .any(|accepted| normalize(accepted) == answer)
    {
        Ok(Advance(()))
    } else {
        Err(QuizError::NoMatch)
    }
}
