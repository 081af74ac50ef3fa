//! Example data set
//!
//! A small but complete data set touching every table: lookup rows, three
//! users, four kahoots with ownerships and favorites, groups with members,
//! and quiz content of every kind. References between seeded rows use the
//! ids returned by the inserts, so loading works on non-empty tables too.
//! Loading twice fails on the unique usernames.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::database::service::DatabaseService;
use crate::models::{
    AddMemberRequest, CreateGroupRequest, CreateKahootRequest, CreateUserRequest,
    PresentationSlideRequest, TrueFalseQuestionRequest, WrittenAnswerRequest,
    WrittenQuestionRequest,
};
use crate::utils::errors::{KahootStoreError, Result};

const SUBSCRIPTIONS: [&str; 5] = ["Premium", "Basic", "Premium", "FREE-UPPERCASE", "  trimmed-sub  "];
const LANGUAGES: [&str; 4] = ["English", "Swedish", "sv-SE", "日本語"];
const CUSTOMER_TYPES: [&str; 4] = ["Individual", "Business", "B2B-Enterprise", "Non-Profit"];

struct SeedUser {
    username: &'static str,
    email: &'static str,
    password: &'static str,
    birthdate: (i32, u32, u32),
    name: Option<&'static str>,
    organisation: Option<&'static str>,
}

const USERS: [SeedUser; 3] = [
    SeedUser {
        username: "john_doe",
        email: "john@example.com",
        password: "hashedpass1",
        birthdate: (1990, 5, 15),
        name: None,
        organisation: None,
    },
    SeedUser {
        username: "jane_smith",
        email: "jane@test.se",
        password: "hashedpass2",
        birthdate: (1985, 12, 3),
        name: Some("Jane Smith"),
        organisation: None,
    },
    SeedUser {
        username: "user5",
        email: "user5@org.com",
        password: "pass5",
        birthdate: (1995, 7, 20),
        name: Some("User Five"),
        organisation: Some("TechCorp"),
    },
];

/// (title, description, is_private)
const KAHOOTS: [(&str, Option<&str>, bool); 4] = [
    ("My first kahoot", None, false),
    ("Swedish capitals", Some("Quiz about Swedish geography"), false),
    ("Private math quiz", Some("Algebra basics"), true),
    ("No description public", None, false),
];

/// (user index, kahoot index), shared by ownerships and favorites
const USER_KAHOOT_PAIRS: [(usize, usize); 3] = [(0, 0), (0, 1), (1, 0)];

const GROUPS: [(&str, Option<&str>); 4] = [
    ("Teachers", Some("Internal teacher group")),
    ("Students", Some("All students in class 9A")),
    ("Empty description group", None),
    ("Special chars ✓", Some("Unicode test")),
];

/// (user index, group index)
const MEMBERSHIPS: [(usize, usize); 3] = [(0, 0), (0, 1), (1, 0)];

/// (question, kahoot index)
const WRITTEN_QUESTIONS: [(&str, usize); 3] = [
    ("What is 2+2?", 0),
    ("Capital of Sweden?", 0),
    ("Long description question...", 1),
];

/// (answer, written question index)
const WRITTEN_ANSWERS: [(&str, usize); 3] = [("4", 0), ("Stockholm", 1), ("Wrong but valid", 0)];

/// (question, answer, kahoot index)
const TRUE_FALSE: [(&str, bool, usize); 3] = [
    ("The earth is flat", false, 0),
    ("Stockholm is in Sweden", true, 0),
    ("Edge case question", true, 1),
];

/// (title, text, kahoot index)
const SLIDES: [(Option<&str>, Option<&str>, usize); 4] = [
    (Some("Intro slide"), Some("Welcome to this kahoot"), 0),
    (Some("Rules"), Some("Answer fast to get more points"), 0),
    (None, Some("Text-only slide"), 0),
    (Some("Title only"), None, 0),
];

/// Rows inserted per table by [`load_example_data`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub subscriptions: usize,
    pub languages: usize,
    pub customer_types: usize,
    pub users: usize,
    pub kahoots: usize,
    pub kahoot_owners: usize,
    pub favorite_kahoots: usize,
    pub groups: usize,
    pub group_members: usize,
    pub written_questions: usize,
    pub written_answers: usize,
    pub true_false_questions: usize,
    pub slides: usize,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.subscriptions
            + self.languages
            + self.customer_types
            + self.users
            + self.kahoots
            + self.kahoot_owners
            + self.favorite_kahoots
            + self.groups
            + self.group_members
            + self.written_questions
            + self.written_answers
            + self.true_false_questions
            + self.slides
    }
}

fn pick(ids: &[i32], index: usize, what: &str) -> Result<i32> {
    ids.get(index)
        .copied()
        .ok_or_else(|| KahootStoreError::Seed(format!("no seeded {what} at index {index}")))
}

fn birthdate((year, month, day): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| KahootStoreError::Seed(format!("invalid birthdate {year}-{month}-{day}")))
}

/// Insert the example data set through the repositories
pub async fn load_example_data(db: &DatabaseService) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    let mut subscription_ids = Vec::with_capacity(SUBSCRIPTIONS.len());
    for name in SUBSCRIPTIONS {
        subscription_ids.push(db.subscriptions.create(name).await?.id);
    }
    summary.subscriptions = subscription_ids.len();

    let mut language_ids = Vec::with_capacity(LANGUAGES.len());
    for name in LANGUAGES {
        language_ids.push(db.languages.create(name).await?.id);
    }
    summary.languages = language_ids.len();

    let mut customer_type_ids = Vec::with_capacity(CUSTOMER_TYPES.len());
    for name in CUSTOMER_TYPES {
        customer_type_ids.push(db.customer_types.create(name).await?.id);
    }
    summary.customer_types = customer_type_ids.len();

    let subscription_id = pick(&subscription_ids, 0, "subscription")?;
    let language_id = pick(&language_ids, 0, "language")?;
    let customer_type_id = pick(&customer_type_ids, 0, "customer type")?;

    let mut user_ids = Vec::with_capacity(USERS.len());
    for user in &USERS {
        let request = CreateUserRequest {
            username: user.username.to_string(),
            email: user.email.to_string(),
            password: user.password.to_string(),
            birthdate: birthdate(user.birthdate)?,
            subscriptions_id: subscription_id,
            language_id,
            customer_type_id,
            name: user.name.map(str::to_string),
            organisation: user.organisation.map(str::to_string),
        };
        user_ids.push(db.users.create(request).await?.id);
    }
    summary.users = user_ids.len();

    let mut kahoot_ids = Vec::with_capacity(KAHOOTS.len());
    for (title, description, is_private) in KAHOOTS {
        let request = CreateKahootRequest {
            description: description.map(str::to_string),
            is_private,
            ..CreateKahootRequest::new(title, language_id)
        };
        kahoot_ids.push(db.kahoots.create(request).await?.id);
    }
    summary.kahoots = kahoot_ids.len();

    for (user, kahoot) in USER_KAHOOT_PAIRS {
        let user_id = pick(&user_ids, user, "user")?;
        let kahoot_id = pick(&kahoot_ids, kahoot, "kahoot")?;
        db.owners.create(user_id, kahoot_id).await?;
        db.favorites.create(user_id, kahoot_id).await?;
        summary.kahoot_owners += 1;
        summary.favorite_kahoots += 1;
    }

    let mut group_ids = Vec::with_capacity(GROUPS.len());
    for (name, description) in GROUPS {
        let request = CreateGroupRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        group_ids.push(db.groups.create(request).await?.id);
    }
    summary.groups = group_ids.len();

    for (user, group) in MEMBERSHIPS {
        let request = AddMemberRequest {
            user_id: pick(&user_ids, user, "user")?,
            group_id: pick(&group_ids, group, "group")?,
        };
        db.groups.add_member(request).await?;
        summary.group_members += 1;
    }

    let mut question_ids = Vec::with_capacity(WRITTEN_QUESTIONS.len());
    for (question, kahoot) in WRITTEN_QUESTIONS {
        let request = WrittenQuestionRequest {
            question: question.to_string(),
            your_kahoot_id: pick(&kahoot_ids, kahoot, "kahoot")?,
        };
        question_ids.push(db.written_questions.create(request).await?.id);
    }
    summary.written_questions = question_ids.len();

    for (answer, question) in WRITTEN_ANSWERS {
        let request = WrittenAnswerRequest {
            answer: answer.to_string(),
            quiz_with_written_answer_id: pick(&question_ids, question, "written question")?,
        };
        db.written_answers.create(request).await?;
        summary.written_answers += 1;
    }

    for (question, answer, kahoot) in TRUE_FALSE {
        let request = TrueFalseQuestionRequest {
            question: question.to_string(),
            answer,
            your_kahoot_id: pick(&kahoot_ids, kahoot, "kahoot")?,
        };
        db.true_false.create(request).await?;
        summary.true_false_questions += 1;
    }

    for (title, text, kahoot) in SLIDES {
        let request = PresentationSlideRequest {
            your_kahoot_id: pick(&kahoot_ids, kahoot, "kahoot")?,
            title: title.map(str::to_string),
            text: text.map(str::to_string),
        };
        db.slides.create(request).await?;
        summary.slides += 1;
    }

    info!(rows = summary.total(), "Example data loaded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::limits;

    #[test]
    fn seed_values_fit_their_columns() {
        assert!(SUBSCRIPTIONS.iter().all(|s| s.chars().count() <= limits::SUBSCRIPTION_NAME));
        assert!(LANGUAGES.iter().all(|s| s.chars().count() <= limits::LANGUAGE_NAME));
        assert!(CUSTOMER_TYPES.iter().all(|s| s.chars().count() <= limits::CUSTOMER_TYPE_NAME));
        assert!(USERS.iter().all(|u| u.username.len() <= limits::USERNAME));
        assert!(KAHOOTS.iter().all(|(title, ..)| title.len() <= limits::KAHOOT_TITLE));
        assert!(GROUPS.iter().all(|(name, _)| name.chars().count() <= limits::GROUP_NAME));
    }

    #[test]
    fn seed_indices_point_at_seeded_rows() {
        for (user, kahoot) in USER_KAHOOT_PAIRS {
            assert!(user < USERS.len() && kahoot < KAHOOTS.len());
        }
        for (user, group) in MEMBERSHIPS {
            assert!(user < USERS.len() && group < GROUPS.len());
        }
        assert!(WRITTEN_ANSWERS.iter().all(|(_, q)| *q < WRITTEN_QUESTIONS.len()));
        assert!(TRUE_FALSE.iter().all(|(.., k)| *k < KAHOOTS.len()));
        assert!(SLIDES.iter().all(|(.., k)| *k < KAHOOTS.len()));
    }

    #[test]
    fn seed_birthdates_are_valid() {
        for user in &USERS {
            assert!(birthdate(user.birthdate).is_ok(), "{}", user.username);
        }
        assert!(birthdate((2023, 2, 30)).is_err());
    }

    #[test]
    fn pick_reports_missing_rows() {
        assert_eq!(pick(&[4, 5], 1, "user").unwrap(), 5);
        assert!(matches!(pick(&[], 0, "user"), Err(KahootStoreError::Seed(_))));
    }
}
