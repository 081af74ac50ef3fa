//! Read-only projections produced by the join queries
//!
//! Each row pairs a user with one joined entity. Users without any joined
//! entity still appear once, with every joined column null.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserKahootRow {
    pub user_id: i32,
    pub username: String,
    pub kahoot_id: Option<i32>,
    pub title: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserGroupRow {
    pub user_id: i32,
    pub username: String,
    pub group_id: Option<i32>,
    pub group_name: Option<String>,
    pub group_description: Option<String>,
}
