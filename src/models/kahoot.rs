//! Kahoot model and its ownership/favorite junctions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Kahoot {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_private: bool,
    pub language_id: i32,
}

/// Projection returned by create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KahootSummary {
    pub id: i32,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateKahootRequest {
    pub title: String,
    pub language_id: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl CreateKahootRequest {
    pub fn new(title: impl Into<String>, language_id: i32) -> Self {
        Self {
            title: title.into(),
            language_id,
            description: None,
            is_private: false,
        }
    }
}

/// Full replacement of a kahoot's mutable fields
pub type UpdateKahootRequest = CreateKahootRequest;

/// `kahoot_owners` row. Either side is null once its parent was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KahootOwner {
    pub id: i32,
    pub users_id: Option<i32>,
    pub your_kahoot_id: Option<i32>,
}

/// `favorite_kahoots` row. Either side is null once its parent was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoriteKahoot {
    pub id: i32,
    pub users_id: Option<i32>,
    pub your_kahoot_id: Option<i32>,
}
