//! Group model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// `user_group_members` row. Either side is null once its parent was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GroupMember {
    pub id: i32,
    pub user_id: Option<i32>,
    pub group_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

pub type UpdateGroupRequest = CreateGroupRequest;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: i32,
    pub group_id: i32,
}
