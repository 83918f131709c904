// src/engine/grader.rs

use std::fmt;

use crate::models::exam::{Exam, Question, QuestionKind};
use crate::models::result::{GradedAnswer, SubmitTestRequest};

/// Why a submission could not be graded.
///
/// Any of these aborts grading entirely; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingError {
    /// The submission targets a different exam than the supplied definition.
    ExamIdMismatch { expected: i64, submitted: i64 },
    /// A required question has no affirmative answer. A missing entry and
    /// `answered = false` are treated identically.
    RequiredQuestionUnanswered {
        position: usize,
        display_name: String,
    },
    /// A submission entry references a position outside the question list.
    UnknownQuestionPosition { position: usize },
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingError::ExamIdMismatch {
                expected,
                submitted,
            } => {
                write!(
                    f,
                    "Exam ID mismatch: submission targets exam {} but the definition is exam {}",
                    submitted, expected
                )
            }
            GradingError::RequiredQuestionUnanswered {
                position,
                display_name,
            } => {
                write!(
                    f,
                    "Required question \"{}\" (index {}) was not answered",
                    display_name, position
                )
            }
            GradingError::UnknownQuestionPosition { position } => {
                write!(f, "Question with index {} not found", position)
            }
        }
    }
}

impl std::error::Error for GradingError {}

/// Output of the grader: per-answer correctness plus the aggregate score.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedSubmission {
    /// Submitted entries in submission order, followed by implicit
    /// `answered = false` entries for uncovered positions in position order.
    pub answers: Vec<GradedAnswer>,
    pub score_points: f64,
    pub total_point: f64,
}

impl GradedSubmission {
    /// Derived, never stored.
    pub fn percentage(&self) -> f64 {
        percentage(self.score_points, self.total_point)
    }
}

/// `score / total * 100`, rounded half-up to 2 decimals.
pub fn percentage(score_points: f64, total_point: f64) -> f64 {
    if total_point <= 0.0 {
        return 0.0;
    }
    (score_points / total_point * 100.0 * 100.0).round() / 100.0
}

/// Grades a submission against an already-validated exam definition.
///
/// The definition is trusted: structure is not re-checked, only correctness
/// is re-derived. Pure and synchronous; safe to call from any context.
///
/// Choice questions carry a single `answered` boolean, which cannot encode
/// which options were picked. The policy here: an affirmative answer counts
/// as correct whenever the question has at least one correct option, which
/// the validator guarantees it does.
pub fn grade_submission(
    exam: &Exam,
    submission: &SubmitTestRequest,
) -> Result<GradedSubmission, GradingError> {
    if submission.exam_id != exam.id {
        return Err(GradingError::ExamIdMismatch {
            expected: exam.id,
            submitted: submission.exam_id,
        });
    }

    let questions: &[Question] = &exam.questions;

    // Every required question needs an affirmative entry, checked in
    // position order.
    for (position, question) in questions.iter().enumerate() {
        if !question.is_required {
            continue;
        }
        let answered = submission
            .answers
            .iter()
            .find(|a| a.question_position == position)
            .is_some_and(|a| a.answered);
        if !answered {
            return Err(GradingError::RequiredQuestionUnanswered {
                position,
                display_name: question.display_name.clone(),
            });
        }
    }

    // Out-of-range positions are rejected, never silently zero-scored.
    if let Some(entry) = submission
        .answers
        .iter()
        .find(|a| a.question_position >= questions.len())
    {
        return Err(GradingError::UnknownQuestionPosition {
            position: entry.question_position,
        });
    }

    let mut graded_positions = vec![false; questions.len()];
    let mut answers = Vec::with_capacity(questions.len());
    let mut score_points = 0.0;

    for entry in &submission.answers {
        let position = entry.question_position;
        // The first entry for a position wins; duplicates are ignored so a
        // position is never scored twice.
        if graded_positions[position] {
            continue;
        }
        graded_positions[position] = true;

        let question = &questions[position];
        let is_correct = accepts(question, entry.answered);
        if is_correct {
            score_points += question.point;
        }
        answers.push(GradedAnswer {
            question_position: position,
            answered: entry.answered,
            is_correct,
        });
    }

    // Optional questions with no entry are graded as an implicit `false`,
    // under the same rule (a TRUE_FALSE key of `false` scores correct).
    for (position, question) in questions.iter().enumerate() {
        if graded_positions[position] {
            continue;
        }
        let is_correct = accepts(question, false);
        if is_correct {
            score_points += question.point;
        }
        answers.push(GradedAnswer {
            question_position: position,
            answered: false,
            is_correct,
        });
    }

    Ok(GradedSubmission {
        answers,
        score_points,
        total_point: exam.total_point,
    })
}

/// Single-bit correctness check for one question.
fn accepts(question: &Question, answered: bool) -> bool {
    match &question.kind {
        QuestionKind::TrueFalse { correct_answer } => answered == *correct_answer,
        QuestionKind::SingleChoice { answers } | QuestionKind::MultipleChoice { answers } => {
            answered && answers.iter().any(|a| a.is_correct)
        }
    }
}
