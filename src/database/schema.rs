//! Relational schema for the quiz platform
//!
//! Every table uses a `SERIAL` primary key. Junction tables and quiz content
//! reference their parents with `ON DELETE SET NULL`, so deleting a user,
//! kahoot, group or written question leaves the dependent rows in place with
//! a null reference. References from users and kahoots to the lookup tables
//! are `ON DELETE RESTRICT`.
//!
//! The DDL lives in `migrations/` and is applied by the sqlx migrator as a
//! setup step run by the binary or the test harness; repositories assume the
//! schema already exists.

use crate::database::connection::ConnectionPool;
use crate::utils::errors::StoreResult;
use crate::utils::logging::{log_schema_event, timed_operation};

pub mod tables {
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const LANGUAGES: &str = "languages";
    pub const CUSTOMER_TYPES: &str = "customer_types";
    pub const USERS: &str = "users";
    pub const KAHOOTS: &str = "your_kahoot";
    pub const KAHOOT_OWNERS: &str = "kahoot_owners";
    pub const FAVORITE_KAHOOTS: &str = "favorite_kahoots";
    pub const GROUPS: &str = "groups";
    pub const GROUP_MEMBERS: &str = "user_group_members";
    pub const WRITTEN_QUESTIONS: &str = "quiz_with_written_answer";
    pub const WRITTEN_ANSWERS: &str = "quiz_written_answer";
    pub const TRUE_FALSE_QUESTIONS: &str = "quiz_with_true_false";
    pub const SLIDES: &str = "presentation_classic";
}

/// Column length bounds shared by the DDL and callers that want to
/// pre-check input.
pub mod limits {
    pub const SUBSCRIPTION_NAME: usize = 20;
    pub const LANGUAGE_NAME: usize = 50;
    pub const CUSTOMER_TYPE_NAME: usize = 30;
    pub const USERNAME: usize = 50;
    pub const EMAIL: usize = 255;
    pub const KAHOOT_TITLE: usize = 80;
    pub const KAHOOT_DESCRIPTION: usize = 500;
    pub const GROUP_NAME: usize = 50;
    pub const GROUP_DESCRIPTION: usize = 200;
    pub const QUESTION: usize = 100;
    pub const ANSWER: usize = 100;
    pub const SLIDE_TITLE: usize = 100;
    pub const SLIDE_TEXT: usize = 500;
}


/// Tables in creation order: every table follows the tables it references.
pub const TABLES: [&str; 13] = [
    tables::SUBSCRIPTIONS,
    tables::LANGUAGES,
    tables::CUSTOMER_TYPES,
    tables::USERS,
    tables::KAHOOTS,
    tables::KAHOOT_OWNERS,
    tables::FAVORITE_KAHOOTS,
    tables::GROUPS,
    tables::GROUP_MEMBERS,
    tables::WRITTEN_QUESTIONS,
    tables::WRITTEN_ANSWERS,
    tables::TRUE_FALSE_QUESTIONS,
    tables::SLIDES,
];

/// Names of all tables in creation order
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().copied()
}

/// Apply pending migrations. Already applied ones are skipped.
pub async fn create_tables(pool: &ConnectionPool) -> StoreResult<()> {
    timed_operation("create_tables", "*", async {
        sqlx::migrate!("./migrations")
            .run(pool.inner())
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    })
    .await?;

    log_schema_event("migrations applied", TABLES.len());
    Ok(())
}

/// Empty every table and restart identities at 1.
pub async fn truncate_all(pool: &ConnectionPool) -> StoreResult<()> {
    let statement = format!(
        "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
        table_names().collect::<Vec<_>>().join(", ")
    );

    timed_operation("truncate_all", "*", async {
        let mut conn = pool.acquire().await?;
        sqlx::query(&statement).execute(&mut *conn).await?;
        Ok(())
    })
    .await?;

    log_schema_event("tables truncated", TABLES.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: &str = include_str!("../../migrations/0001_init.sql");

    /// Body of one `CREATE TABLE` statement
    fn ddl(table: &str) -> &'static str {
        let start = INIT
            .find(&format!("CREATE TABLE IF NOT EXISTS {table}("))
            .unwrap_or_else(|| panic!("{table} missing from the initial migration"));
        let end = INIT[start..].find(");").map_or(INIT.len(), |offset| start + offset);
        &INIT[start..end]
    }

    fn position(table: &str) -> usize {
        table_names()
            .position(|name| name == table)
            .unwrap_or_else(|| panic!("{table} missing from TABLES"))
    }

    #[test]
    fn migration_creates_every_table_in_order() {
        assert_eq!(INIT.matches("CREATE TABLE").count(), TABLES.len());
        let offsets: Vec<usize> = table_names()
            .map(|table| INIT.find(&format!("EXISTS {table}(")).expect("table created"))
            .collect();
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn every_table_is_created_after_its_references() {
        for name in table_names() {
            for referenced in table_names() {
                if ddl(name).contains(&format!("REFERENCES {referenced}(")) {
                    assert!(
                        position(referenced) < position(name),
                        "{name} references {referenced} before it exists"
                    );
                }
            }
        }
    }

    #[test]
    fn junctions_are_unique_on_their_pair_and_nullify_on_delete() {
        for table in [tables::KAHOOT_OWNERS, tables::FAVORITE_KAHOOTS, tables::GROUP_MEMBERS] {
            assert!(ddl(table).contains("UNIQUE("));
            assert_eq!(ddl(table).matches("ON DELETE SET NULL").count(), 2);
        }
    }

    #[test]
    fn lookup_names_are_not_unique() {
        for table in [tables::SUBSCRIPTIONS, tables::LANGUAGES, tables::CUSTOMER_TYPES] {
            assert!(!ddl(table).contains("UNIQUE"));
        }
    }

    #[test]
    fn limits_match_column_definitions() {
        assert!(ddl(tables::USERS).contains(&format!("username VARCHAR({})", limits::USERNAME)));
        assert!(ddl(tables::KAHOOTS).contains(&format!("title VARCHAR({})", limits::KAHOOT_TITLE)));
        assert!(ddl(tables::GROUPS).contains(&format!("name VARCHAR({})", limits::GROUP_NAME)));
        assert!(ddl(tables::SLIDES).contains(&format!("text VARCHAR({})", limits::SLIDE_TEXT)));
    }
}
