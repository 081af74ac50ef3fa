//! Lookup-table models: subscriptions, languages and customer types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::schema::{limits, tables};

/// A row of one of the name-only lookup tables
pub trait ReferenceEntity: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const MAX_NAME_LEN: usize;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerType {
    pub id: i32,
    pub name: String,
}

impl ReferenceEntity for Subscription {
    const TABLE: &'static str = tables::SUBSCRIPTIONS;
    const MAX_NAME_LEN: usize = limits::SUBSCRIPTION_NAME;
}

impl ReferenceEntity for Language {
    const TABLE: &'static str = tables::LANGUAGES;
    const MAX_NAME_LEN: usize = limits::LANGUAGE_NAME;
}

impl ReferenceEntity for CustomerType {
    const TABLE: &'static str = tables::CUSTOMER_TYPES;
    const MAX_NAME_LEN: usize = limits::CUSTOMER_TYPE_NAME;
}
