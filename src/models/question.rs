//! Quiz content: written questions and answers, true/false questions and
//! presentation slides

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WrittenQuestion {
    pub id: i32,
    pub question: String,
    pub your_kahoot_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenQuestionRequest {
    pub question: String,
    pub your_kahoot_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WrittenAnswer {
    pub id: i32,
    pub answer: String,
    pub quiz_with_written_answer_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenAnswerRequest {
    pub answer: String,
    pub quiz_with_written_answer_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TrueFalseQuestion {
    pub id: i32,
    pub question: String,
    pub answer: bool,
    pub your_kahoot_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrueFalseQuestionRequest {
    pub question: String,
    pub answer: bool,
    pub your_kahoot_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PresentationSlide {
    pub id: i32,
    pub title: Option<String>,
    pub text: Option<String>,
    pub your_kahoot_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationSlideRequest {
    pub your_kahoot_id: i32,
    pub title: Option<String>,
    pub text: Option<String>,
}

/// Variant tag of a [`KahootQuestion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    TrueFalse,
    Written,
    Slide,
}

/// One element of a kahoot's mixed question list.
///
/// Serialized with a `type` discriminant. A slide's title is exposed as its
/// `question` so every element carries the same headline field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KahootQuestion {
    TrueFalse {
        id: i32,
        question: String,
        answer: bool,
    },
    Written {
        id: i32,
        question: String,
    },
    Slide {
        id: i32,
        #[serde(rename = "question")]
        title: Option<String>,
        text: Option<String>,
    },
}

impl KahootQuestion {
    pub fn kind(&self) -> QuestionKind {
        match self {
            KahootQuestion::TrueFalse { .. } => QuestionKind::TrueFalse,
            KahootQuestion::Written { .. } => QuestionKind::Written,
            KahootQuestion::Slide { .. } => QuestionKind::Slide,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            KahootQuestion::TrueFalse { id, .. }
            | KahootQuestion::Written { id, .. }
            | KahootQuestion::Slide { id, .. } => *id,
        }
    }

    /// Headline text: the question stem, or the slide title
    pub fn question(&self) -> Option<&str> {
        match self {
            KahootQuestion::TrueFalse { question, .. } | KahootQuestion::Written { question, .. } => {
                Some(question)
            }
            KahootQuestion::Slide { title, .. } => title.as_deref(),
        }
    }
}

impl From<TrueFalseQuestion> for KahootQuestion {
    fn from(row: TrueFalseQuestion) -> Self {
        KahootQuestion::TrueFalse {
            id: row.id,
            question: row.question,
            answer: row.answer,
        }
    }
}

impl From<WrittenQuestion> for KahootQuestion {
    fn from(row: WrittenQuestion) -> Self {
        KahootQuestion::Written {
            id: row.id,
            question: row.question,
        }
    }
}

impl From<PresentationSlide> for KahootQuestion {
    fn from(row: PresentationSlide) -> Self {
        KahootQuestion::Slide {
            id: row.id,
            title: row.title,
            text: row.text,
        }
    }
}
