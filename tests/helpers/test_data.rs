//! Test data helpers for creating request objects
//!
//! Usernames and emails come from `fake` with a per-process counter appended,
//! so repeated calls never collide on the unique columns.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use kahoot_store::database::DatabaseService;
use kahoot_store::models::{CreateKahootRequest, CreateUserRequest};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Ids of one subscription, language and customer type
#[derive(Debug, Clone, Copy)]
pub struct Lookups {
    pub subscription_id: i32,
    pub language_id: i32,
    pub customer_type_id: i32,
}

/// Create the lookup rows every user needs
pub async fn create_lookups(db: &DatabaseService) -> Lookups {
    Lookups {
        subscription_id: db.subscriptions.create("Premium").await.expect("subscription").id,
        language_id: db.languages.create("English").await.expect("language").id,
        customer_type_id: db.customer_types.create("Individual").await.expect("customer type").id,
    }
}

pub fn birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 5, 15).expect("valid date")
}

/// A user request with an explicit username
pub fn user_request(username: &str, lookups: Lookups) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "hashedpass".to_string(),
        birthdate: birthdate(),
        subscriptions_id: lookups.subscription_id,
        language_id: lookups.language_id,
        customer_type_id: lookups.customer_type_id,
        name: None,
        organisation: None,
    }
}

/// A user request with generated, unique username and email
pub fn fake_user_request(lookups: Lookups) -> CreateUserRequest {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let username: String = Username().fake();
    let email: String = SafeEmail().fake();
    CreateUserRequest {
        username: format!("{}_{n}", username.chars().take(30).collect::<String>()),
        email: format!("{n}.{email}"),
        ..user_request("unused", lookups)
    }
}

/// A public kahoot with a generated description
pub fn kahoot_request(title: &str, language_id: i32) -> CreateKahootRequest {
    let description: String = Sentence(3..8).fake();
    CreateKahootRequest {
        description: Some(description.chars().take(200).collect()),
        ..CreateKahootRequest::new(title, language_id)
    }
}
