// src/engine/validator.rs

use std::fmt;

use crate::models::dictionary::QuestionCategory;
use crate::models::exam::{AnswerOption, Question, QuestionDraft, QuestionKind};

/// Why an exam definition was rejected.
///
/// Positions and answer indices are zero-based internally; `Display` renders
/// them 1-based for the payload author. Rules are checked in a fixed
/// precedence order and the first violation is the whole error payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ExamValidationError {
    /// The question list is empty.
    EmptyExam,
    /// `displayName` is missing or empty.
    MissingDisplayName { position: usize },
    /// `category` is missing or not one of the three known values.
    MissingCategory { position: usize },
    /// `point` is missing, zero or negative.
    InvalidPoint { position: usize },
    /// TRUE_FALSE question without a boolean `correctAnswer`.
    InvalidCorrectAnswerType { position: usize },
    /// TRUE_FALSE question carrying a non-empty option list.
    UnexpectedAnswers { position: usize },
    /// Choice question without an option list.
    MissingAnswers {
        position: usize,
        category: QuestionCategory,
    },
    /// Choice question where no option is marked correct.
    NoCorrectAnswer { position: usize },
    /// An option with empty text or a missing `isCorrect` flag.
    InvalidAnswer {
        position: usize,
        answer_index: usize,
    },
    /// Choice question carrying a TRUE_FALSE-style `correctAnswer`.
    UnexpectedCorrectAnswer {
        position: usize,
        category: QuestionCategory,
    },
    /// Sum of question points differs from the declared exam total.
    TotalPointMismatch { expected: f64, declared: f64 },
}

impl fmt::Display for ExamValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamValidationError::EmptyExam => {
                write!(f, "Exam must have at least one question")
            }
            ExamValidationError::MissingDisplayName { position } => {
                write!(f, "Question {}: displayName is required", position + 1)
            }
            ExamValidationError::MissingCategory { position } => {
                write!(f, "Question {}: category is required", position + 1)
            }
            ExamValidationError::InvalidPoint { position } => {
                write!(f, "Question {}: point must be a positive number", position + 1)
            }
            ExamValidationError::InvalidCorrectAnswerType { position } => {
                write!(
                    f,
                    "Question {}: correctAnswer must be a boolean (true/false) for TRUE_FALSE category",
                    position + 1
                )
            }
            ExamValidationError::UnexpectedAnswers { position } => {
                write!(
                    f,
                    "Question {}: answers array should not be provided for TRUE_FALSE category",
                    position + 1
                )
            }
            ExamValidationError::MissingAnswers { position, category } => {
                write!(
                    f,
                    "Question {}: answers array is required for {} category",
                    position + 1,
                    category
                )
            }
            ExamValidationError::NoCorrectAnswer { position } => {
                write!(
                    f,
                    "Question {}: at least one answer must be marked as correct",
                    position + 1
                )
            }
            ExamValidationError::InvalidAnswer {
                position,
                answer_index,
            } => {
                write!(
                    f,
                    "Question {}, Answer {}: text is required and isCorrect must be a boolean",
                    position + 1,
                    answer_index + 1
                )
            }
            ExamValidationError::UnexpectedCorrectAnswer { position, category } => {
                write!(
                    f,
                    "Question {}: correctAnswer should not be provided for {} category",
                    position + 1,
                    category
                )
            }
            ExamValidationError::TotalPointMismatch { expected, declared } => {
                write!(
                    f,
                    "Total points mismatch: Sum of question points ({}) must equal totalPoint ({})",
                    expected, declared
                )
            }
        }
    }
}

impl std::error::Error for ExamValidationError {}

/// Validates a drafted question list against the declared exam total.
///
/// Pure and total: no state, no side effects, re-run on every create and
/// every update that touches questions. On success returns the strict
/// question representation the grader and the database operate on, so the
/// category-conditional invariants cannot be violated downstream.
pub fn validate_exam(
    questions: &[QuestionDraft],
    total_point: f64,
) -> Result<Vec<Question>, ExamValidationError> {
    if questions.is_empty() {
        return Err(ExamValidationError::EmptyExam);
    }

    let mut validated = Vec::with_capacity(questions.len());
    for (position, draft) in questions.iter().enumerate() {
        validated.push(validate_question(position, draft)?);
    }

    let expected: f64 = validated.iter().map(|q| q.point).sum();
    // Exact comparison is deliberate: the contract declares no tolerance.
    #[allow(clippy::float_cmp)]
    if expected != total_point {
        return Err(ExamValidationError::TotalPointMismatch {
            expected,
            declared: total_point,
        });
    }

    Ok(validated)
}

fn validate_question(
    position: usize,
    draft: &QuestionDraft,
) -> Result<Question, ExamValidationError> {
    let display_name = match draft.display_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => return Err(ExamValidationError::MissingDisplayName { position }),
    };

    let category = draft
        .category
        .as_deref()
        .and_then(QuestionCategory::parse)
        .ok_or(ExamValidationError::MissingCategory { position })?;

    let point = match draft.point {
        Some(point) if point > 0.0 => point,
        _ => return Err(ExamValidationError::InvalidPoint { position }),
    };

    let kind = match category {
        QuestionCategory::TrueFalse => {
            let correct_answer = draft
                .correct_answer
                .ok_or(ExamValidationError::InvalidCorrectAnswerType { position })?;

            if draft.answers.as_ref().is_some_and(|a| !a.is_empty()) {
                return Err(ExamValidationError::UnexpectedAnswers { position });
            }

            QuestionKind::TrueFalse { correct_answer }
        }
        QuestionCategory::SingleChoice | QuestionCategory::MultipleChoice => {
            let drafts = match draft.answers.as_deref() {
                Some(answers) if !answers.is_empty() => answers,
                _ => return Err(ExamValidationError::MissingAnswers { position, category }),
            };

            if !drafts.iter().any(|a| a.is_correct == Some(true)) {
                return Err(ExamValidationError::NoCorrectAnswer { position });
            }

            let mut answers = Vec::with_capacity(drafts.len());
            for (answer_index, answer) in drafts.iter().enumerate() {
                let text = match answer.text.as_deref() {
                    Some(text) if !text.is_empty() => text.to_owned(),
                    _ => {
                        return Err(ExamValidationError::InvalidAnswer {
                            position,
                            answer_index,
                        });
                    }
                };
                let is_correct = answer.is_correct.ok_or(ExamValidationError::InvalidAnswer {
                    position,
                    answer_index,
                })?;
                answers.push(AnswerOption { text, is_correct });
            }

            if draft.correct_answer.is_some() {
                return Err(ExamValidationError::UnexpectedCorrectAnswer { position, category });
            }

            match category {
                QuestionCategory::SingleChoice => QuestionKind::SingleChoice { answers },
                _ => QuestionKind::MultipleChoice { answers },
            }
        }
    };

    Ok(Question {
        display_name,
        point,
        is_required: draft.is_required.unwrap_or(false),
        kind,
    })
}
