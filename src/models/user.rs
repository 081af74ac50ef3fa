//! User model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Read projection of a user; the password never leaves the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub signup_date: NaiveDateTime,
    pub name: Option<String>,
    pub organisation: Option<String>,
    pub subscriptions_id: i32,
    pub language_id: i32,
    pub customer_type_id: i32,
}

/// Projection returned by create, update and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub birthdate: NaiveDate,
    pub subscriptions_id: i32,
    pub language_id: i32,
    pub customer_type_id: i32,
    pub name: Option<String>,
    pub organisation: Option<String>,
}

/// Full replacement of a user's mutable fields
pub type UpdateUserRequest = CreateUserRequest;
