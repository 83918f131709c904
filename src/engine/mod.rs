// src/engine/mod.rs
//
// The exam engine: pure, synchronous validation and grading. Everything
// else in this crate is transport and persistence around these two
// functions.

pub mod grader;
pub mod validator;

pub use grader::{GradedSubmission, GradingError, grade_submission};
pub use validator::{ExamValidationError, validate_exam};
