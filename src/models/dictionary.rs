// src/models/dictionary.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single `{label, value}` pair returned by the dictionary endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryEntry {
    pub label: &'static str,
    pub value: &'static str,
}

/// The three question categories the engine understands.
/// The category decides which answer-key fields are legal on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCategory {
    TrueFalse,
    SingleChoice,
    MultipleChoice,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 3] = [
        QuestionCategory::TrueFalse,
        QuestionCategory::SingleChoice,
        QuestionCategory::MultipleChoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::TrueFalse => "TRUE_FALSE",
            QuestionCategory::SingleChoice => "SINGLE_CHOICE",
            QuestionCategory::MultipleChoice => "MULTIPLE_CHOICE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::TrueFalse => "True/False",
            QuestionCategory::SingleChoice => "Single Choice",
            QuestionCategory::MultipleChoice => "Multiple Choice",
        }
    }

    /// Parses a raw category string. Returns `None` for anything outside the
    /// three known values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "TRUE_FALSE" => Some(QuestionCategory::TrueFalse),
            "SINGLE_CHOICE" => Some(QuestionCategory::SingleChoice),
            "MULTIPLE_CHOICE" => Some(QuestionCategory::MultipleChoice),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject area of an exam. Stored as TEXT, listed by the dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamCategory {
    Javascript,
    Typescript,
    React,
    Angular,
    Vue,
    HtmlCss,
    General,
}

impl ExamCategory {
    pub const ALL: [ExamCategory; 7] = [
        ExamCategory::Javascript,
        ExamCategory::Typescript,
        ExamCategory::React,
        ExamCategory::Angular,
        ExamCategory::Vue,
        ExamCategory::HtmlCss,
        ExamCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamCategory::Javascript => "JAVASCRIPT",
            ExamCategory::Typescript => "TYPESCRIPT",
            ExamCategory::React => "REACT",
            ExamCategory::Angular => "ANGULAR",
            ExamCategory::Vue => "VUE",
            ExamCategory::HtmlCss => "HTML_CSS",
            ExamCategory::General => "GENERAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExamCategory::Javascript => "JavaScript",
            ExamCategory::Typescript => "TypeScript",
            ExamCategory::React => "React",
            ExamCategory::Angular => "Angular",
            ExamCategory::Vue => "Vue",
            ExamCategory::HtmlCss => "HTML & CSS",
            ExamCategory::General => "General",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

pub fn question_categories() -> Vec<DictionaryEntry> {
    QuestionCategory::ALL
        .iter()
        .map(|c| DictionaryEntry {
            label: c.label(),
            value: c.as_str(),
        })
        .collect()
}

pub fn exam_categories() -> Vec<DictionaryEntry> {
    ExamCategory::ALL
        .iter()
        .map(|c| DictionaryEntry {
            label: c.label(),
            value: c.as_str(),
        })
        .collect()
}

pub fn difficulties() -> Vec<DictionaryEntry> {
    Difficulty::ALL
        .iter()
        .map(|d| DictionaryEntry {
            label: d.label(),
            value: d.as_str(),
        })
        .collect()
}

/// Role values match the `users.role` column.
pub fn permissions() -> Vec<DictionaryEntry> {
    vec![
        DictionaryEntry {
            label: "User",
            value: "user",
        },
        DictionaryEntry {
            label: "Moderator",
            value: "moderator",
        },
        DictionaryEntry {
            label: "Admin",
            value: "admin",
        },
    ]
}

pub fn statuses() -> Vec<DictionaryEntry> {
    vec![
        DictionaryEntry {
            label: "Active",
            value: "ACTIVE",
        },
        DictionaryEntry {
            label: "Inactive",
            value: "INACTIVE",
        },
    ]
}
