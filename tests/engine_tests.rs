// tests/engine_tests.rs
//
// Pure engine coverage: no database, no server.

use exam_backend::engine::{
    ExamValidationError, GradingError, grade_submission, validate_exam,
};
use exam_backend::models::dictionary::QuestionCategory;
use exam_backend::models::exam::{
    AnswerOptionDraft, Exam, Question, QuestionDraft, QuestionKind,
};
use exam_backend::models::result::{AnsweredQuestion, SubmitTestRequest};
use sqlx::types::Json;

fn tf_draft(point: f64, correct: bool, required: bool) -> QuestionDraft {
    QuestionDraft {
        display_name: Some("Is JavaScript a compiled language?".to_string()),
        category: Some("TRUE_FALSE".to_string()),
        point: Some(point),
        is_required: Some(required),
        correct_answer: Some(correct),
        answers: None,
    }
}

fn option_draft(text: &str, correct: bool) -> AnswerOptionDraft {
    AnswerOptionDraft {
        text: Some(text.to_string()),
        is_correct: Some(correct),
    }
}

fn choice_draft(
    category: &str,
    point: f64,
    options: Vec<AnswerOptionDraft>,
    required: bool,
) -> QuestionDraft {
    QuestionDraft {
        display_name: Some("What is the correct syntax for an arrow function?".to_string()),
        category: Some(category.to_string()),
        point: Some(point),
        is_required: Some(required),
        correct_answer: None,
        answers: Some(options),
    }
}

/// The exam from the reference scenario: a required TRUE_FALSE worth 10
/// (key: false) and an optional SINGLE_CHOICE worth 90 (option 0 correct).
fn scenario_drafts() -> Vec<QuestionDraft> {
    vec![
        tf_draft(10.0, false, true),
        choice_draft(
            "SINGLE_CHOICE",
            90.0,
            vec![option_draft("() => {}", true), option_draft("-> {}", false)],
            false,
        ),
    ]
}

fn exam_with(questions: Vec<Question>, total_point: f64) -> Exam {
    Exam {
        id: 1,
        exam_name: "JavaScript Fundamentals Quiz".to_string(),
        exam_duration: 60,
        total_point,
        category: "JAVASCRIPT".to_string(),
        difficulty: "EASY".to_string(),
        questions: Json(questions),
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn submission(exam_id: i64, pairs: &[(usize, bool)]) -> SubmitTestRequest {
    SubmitTestRequest {
        exam_id,
        answers: pairs
            .iter()
            .map(|&(question_position, answered)| AnsweredQuestion {
                question_position,
                answered,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------- validator

#[test]
fn accepts_mixed_exam_and_produces_strict_questions() {
    let questions = validate_exam(&scenario_drafts(), 100.0).expect("exam should be valid");

    assert_eq!(questions.len(), 2);
    assert_eq!(
        questions[0].kind,
        QuestionKind::TrueFalse {
            correct_answer: false
        }
    );
    assert!(questions[0].is_required);
    assert_eq!(questions[1].kind.category(), QuestionCategory::SingleChoice);
    assert_eq!(
        questions[1].kind.answers().map(|a| a.len()),
        Some(2)
    );
}

#[test]
fn validator_is_pure() {
    let drafts = scenario_drafts();
    assert_eq!(validate_exam(&drafts, 100.0), validate_exam(&drafts, 100.0));
    assert_eq!(validate_exam(&drafts, 99.0), validate_exam(&drafts, 99.0));
}

#[test]
fn rejects_empty_exam() {
    assert_eq!(validate_exam(&[], 0.0), Err(ExamValidationError::EmptyExam));
}

#[test]
fn rejects_missing_or_empty_display_name() {
    let mut draft = tf_draft(10.0, true, false);
    draft.display_name = None;
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::MissingDisplayName { position: 0 })
    );

    let mut draft = tf_draft(10.0, true, false);
    draft.display_name = Some(String::new());
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::MissingDisplayName { position: 0 })
    );
}

#[test]
fn rejects_missing_or_unknown_category() {
    let mut draft = tf_draft(10.0, true, false);
    draft.category = None;
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::MissingCategory { position: 0 })
    );

    let mut draft = tf_draft(10.0, true, false);
    draft.category = Some("ESSAY".to_string());
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::MissingCategory { position: 0 })
    );
}

#[test]
fn rejects_non_positive_or_missing_point() {
    for point in [Some(0.0), Some(-5.0), None] {
        let mut draft = tf_draft(10.0, true, false);
        draft.point = point;
        assert_eq!(
            validate_exam(&[draft], 10.0),
            Err(ExamValidationError::InvalidPoint { position: 0 })
        );
    }
}

#[test]
fn rejects_true_false_without_boolean_key() {
    let mut draft = tf_draft(10.0, true, false);
    draft.correct_answer = None;
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::InvalidCorrectAnswerType { position: 0 })
    );
}

#[test]
fn rejects_true_false_with_option_list() {
    // Scenario E: a TRUE_FALSE question carrying answers.
    let mut draft = tf_draft(10.0, true, false);
    draft.answers = Some(vec![option_draft("x", true)]);
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::UnexpectedAnswers { position: 0 })
    );

    // An empty answers array is tolerated.
    let mut draft = tf_draft(10.0, true, false);
    draft.answers = Some(vec![]);
    assert!(validate_exam(&[draft], 10.0).is_ok());
}

#[test]
fn rejects_choice_without_options() {
    for answers in [None, Some(vec![])] {
        let mut draft = choice_draft("MULTIPLE_CHOICE", 10.0, vec![], false);
        draft.answers = answers;
        assert_eq!(
            validate_exam(&[draft], 10.0),
            Err(ExamValidationError::MissingAnswers {
                position: 0,
                category: QuestionCategory::MultipleChoice
            })
        );
    }
}

#[test]
fn rejects_choice_without_correct_option() {
    let draft = choice_draft(
        "SINGLE_CHOICE",
        10.0,
        vec![option_draft("a", false), option_draft("b", false)],
        false,
    );
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::NoCorrectAnswer { position: 0 })
    );
}

#[test]
fn rejects_malformed_option_with_its_index() {
    let draft = choice_draft(
        "SINGLE_CHOICE",
        10.0,
        vec![option_draft("a", true), option_draft("", false)],
        false,
    );
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::InvalidAnswer {
            position: 0,
            answer_index: 1
        })
    );

    let mut missing_flag = option_draft("b", false);
    missing_flag.is_correct = None;
    let draft = choice_draft(
        "SINGLE_CHOICE",
        10.0,
        vec![option_draft("a", true), missing_flag],
        false,
    );
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::InvalidAnswer {
            position: 0,
            answer_index: 1
        })
    );
}

#[test]
fn rejects_choice_with_true_false_key() {
    let mut draft = choice_draft(
        "MULTIPLE_CHOICE",
        10.0,
        vec![option_draft("a", true)],
        false,
    );
    // Even a falsy boolean is rejected; only absence is legal.
    draft.correct_answer = Some(false);
    assert_eq!(
        validate_exam(&[draft], 10.0),
        Err(ExamValidationError::UnexpectedCorrectAnswer {
            position: 0,
            category: QuestionCategory::MultipleChoice
        })
    );
}

#[test]
fn rejects_total_point_mismatch() {
    // Scenario D: 10 + 20 declared as 25.
    let drafts = vec![tf_draft(10.0, true, false), tf_draft(20.0, false, false)];
    assert_eq!(
        validate_exam(&drafts, 25.0),
        Err(ExamValidationError::TotalPointMismatch {
            expected: 30.0,
            declared: 25.0
        })
    );
}

#[test]
fn reports_first_violation_only() {
    // Question 0 has two problems; the display name rule wins.
    let mut draft = tf_draft(0.0, true, false);
    draft.display_name = None;
    // Question 1 is broken too, but position 0 is reported.
    let mut second = tf_draft(10.0, true, false);
    second.category = None;
    assert_eq!(
        validate_exam(&[draft, second], 10.0),
        Err(ExamValidationError::MissingDisplayName { position: 0 })
    );
}

#[test]
fn positions_render_one_based() {
    let err = ExamValidationError::InvalidPoint { position: 2 };
    assert_eq!(err.to_string(), "Question 3: point must be a positive number");

    let err = ExamValidationError::TotalPointMismatch {
        expected: 30.0,
        declared: 25.0,
    };
    assert_eq!(
        err.to_string(),
        "Total points mismatch: Sum of question points (30) must equal totalPoint (25)"
    );
}

#[test]
fn validated_question_serializes_with_category_tag() {
    let questions = validate_exam(&scenario_drafts(), 100.0).unwrap();

    let tf = serde_json::to_value(&questions[0]).unwrap();
    assert_eq!(tf["category"], "TRUE_FALSE");
    assert_eq!(tf["correctAnswer"], false);
    assert!(tf.get("answers").is_none());

    let choice = serde_json::to_value(&questions[1]).unwrap();
    assert_eq!(choice["category"], "SINGLE_CHOICE");
    assert_eq!(choice["answers"][0]["isCorrect"], true);
    assert!(choice.get("correctAnswer").is_none());
}

// ------------------------------------------------------------------- grader

#[test]
fn grades_full_marks_for_correct_submission() {
    // Scenario B: implicit-false TRUE_FALSE key matched, choice affirmed.
    let questions = validate_exam(&scenario_drafts(), 100.0).unwrap();
    let exam = exam_with(questions, 100.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, false), (1, true)]))
        .expect("submission should grade");

    assert_eq!(graded.score_points, 100.0);
    assert_eq!(graded.total_point, 100.0);
    assert_eq!(graded.percentage(), 100.0);
    assert_eq!(graded.answers.len(), 2);
    assert!(graded.answers.iter().all(|a| a.is_correct));
}

#[test]
fn rejects_required_question_answered_false() {
    // Scenario C: position 0 is required and answered=false.
    let questions = validate_exam(&scenario_drafts(), 100.0).unwrap();
    let exam = exam_with(questions, 100.0);

    let err = grade_submission(&exam, &submission(1, &[(0, false), (1, false)]));
    assert!(matches!(
        err,
        Err(GradingError::RequiredQuestionUnanswered { position: 0, .. })
    ));
}

#[test]
fn missing_entry_counts_as_unanswered_for_required() {
    let questions = validate_exam(&scenario_drafts(), 100.0).unwrap();
    let exam = exam_with(questions, 100.0);

    let err = grade_submission(&exam, &submission(1, &[(1, true)]));
    assert!(matches!(
        err,
        Err(GradingError::RequiredQuestionUnanswered { position: 0, .. })
    ));
}

#[test]
fn rejects_exam_id_mismatch_regardless_of_answers() {
    let questions = validate_exam(&scenario_drafts(), 100.0).unwrap();
    let exam = exam_with(questions, 100.0);

    assert_eq!(
        grade_submission(&exam, &submission(2, &[(0, false), (1, true)])),
        Err(GradingError::ExamIdMismatch {
            expected: 1,
            submitted: 2
        })
    );
}

#[test]
fn rejects_out_of_range_position() {
    let questions = validate_exam(&[tf_draft(10.0, true, false)], 10.0).unwrap();
    let exam = exam_with(questions, 10.0);

    assert_eq!(
        grade_submission(&exam, &submission(1, &[(0, true), (5, true)])),
        Err(GradingError::UnknownQuestionPosition { position: 5 })
    );
}

#[test]
fn omitted_optional_question_is_graded_as_implicit_false() {
    // TRUE_FALSE with key=false scores correct on the implicit false.
    let drafts = vec![tf_draft(10.0, true, true), tf_draft(5.0, false, false)];
    let questions = validate_exam(&drafts, 15.0).unwrap();
    let exam = exam_with(questions, 15.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, true)])).unwrap();

    assert_eq!(graded.score_points, 15.0);
    assert_eq!(graded.answers.len(), 2);
    let implicit = &graded.answers[1];
    assert_eq!(implicit.question_position, 1);
    assert!(!implicit.answered);
    assert!(implicit.is_correct);
}

#[test]
fn omitted_optional_choice_question_scores_zero() {
    let drafts = vec![
        tf_draft(10.0, true, true),
        choice_draft("MULTIPLE_CHOICE", 20.0, vec![option_draft("a", true)], false),
    ];
    let questions = validate_exam(&drafts, 30.0).unwrap();
    let exam = exam_with(questions, 30.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, true)])).unwrap();

    assert_eq!(graded.score_points, 10.0);
    assert!(!graded.answers[1].is_correct);
}

#[test]
fn choice_answered_false_is_incorrect() {
    let drafts = vec![choice_draft(
        "SINGLE_CHOICE",
        10.0,
        vec![option_draft("a", true)],
        false,
    )];
    let questions = validate_exam(&drafts, 10.0).unwrap();
    let exam = exam_with(questions, 10.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, false)])).unwrap();
    assert_eq!(graded.score_points, 0.0);
    assert!(!graded.answers[0].is_correct);
}

#[test]
fn true_false_comparison_is_strict() {
    let questions = validate_exam(&[tf_draft(10.0, false, false)], 10.0).unwrap();
    let exam = exam_with(questions, 10.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, true)])).unwrap();
    assert_eq!(graded.score_points, 0.0);
}

#[test]
fn duplicate_entries_score_once_and_first_wins() {
    let questions = validate_exam(&[tf_draft(10.0, true, false)], 10.0).unwrap();
    let exam = exam_with(questions, 10.0);

    let graded = grade_submission(&exam, &submission(1, &[(0, true), (0, false)])).unwrap();

    assert_eq!(graded.answers.len(), 1);
    assert!(graded.answers[0].answered);
    assert_eq!(graded.score_points, 10.0);
    assert!(graded.score_points <= graded.total_point);
}

#[test]
fn score_stays_within_bounds() {
    let drafts = vec![
        tf_draft(1.0, true, false),
        tf_draft(2.0, true, false),
    ];
    let questions = validate_exam(&drafts, 3.0).unwrap();
    let exam = exam_with(questions, 3.0);

    // One of three points earned.
    let graded = grade_submission(&exam, &submission(1, &[(0, true), (1, false)])).unwrap();
    assert_eq!(graded.score_points, 1.0);
    assert_eq!(graded.percentage(), 33.33);

    // Nothing earned.
    let graded = grade_submission(&exam, &submission(1, &[(0, false), (1, false)])).unwrap();
    assert_eq!(graded.score_points, 0.0);
    assert_eq!(graded.percentage(), 0.0);

    // Everything earned.
    let graded = grade_submission(&exam, &submission(1, &[(0, true), (1, true)])).unwrap();
    assert_eq!(graded.score_points, graded.total_point);
    assert_eq!(graded.percentage(), 100.0);
}

#[test]
fn grading_error_messages_are_verbatim() {
    let err = GradingError::RequiredQuestionUnanswered {
        position: 0,
        display_name: "Is JavaScript a compiled language?".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Required question \"Is JavaScript a compiled language?\" (index 0) was not answered"
    );

    let err = GradingError::UnknownQuestionPosition { position: 7 };
    assert_eq!(err.to_string(), "Question with index 7 not found");
}
