//! Database service layer
//!
//! This module bundles every repository around one shared connection pool,
//! plus the setup steps (schema creation, truncation, example data) that the
//! binary and the test harness run before repositories are used.

use serde::Serialize;

use crate::config::DatabaseConfig;
use crate::database::connection::{create_pool, ConnectionPool, PoolConfig, PoolStatus};
use crate::database::repositories::{
    CustomerTypeRepository, FavoriteKahootRepository, GroupRepository, KahootOwnerRepository,
    KahootRepository, LanguageRepository, SlideRepository, SubscriptionRepository,
    TrueFalseRepository, UserRepository, ViewRepository, WrittenAnswerRepository,
    WrittenQuestionRepository,
};
use crate::database::schema;
use crate::database::seed::{self, SeedSummary};
use crate::models::views::{UserGroupRow, UserKahootRow};
use crate::utils::errors::{Result, StoreResult};

/// The three user-rooted join views in one serializable bundle
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub owned_kahoots: Vec<UserKahootRow>,
    pub favorite_kahoots: Vec<UserKahootRow>,
    pub groups: Vec<UserGroupRow>,
}

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: ConnectionPool,
    pub subscriptions: SubscriptionRepository,
    pub languages: LanguageRepository,
    pub customer_types: CustomerTypeRepository,
    pub users: UserRepository,
    pub kahoots: KahootRepository,
    pub owners: KahootOwnerRepository,
    pub favorites: FavoriteKahootRepository,
    pub groups: GroupRepository,
    pub written_questions: WrittenQuestionRepository,
    pub written_answers: WrittenAnswerRepository,
    pub true_false: TrueFalseRepository,
    pub slides: SlideRepository,
    pub views: ViewRepository,
}

impl DatabaseService {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            subscriptions: SubscriptionRepository::new(pool.clone()),
            languages: LanguageRepository::new(pool.clone()),
            customer_types: CustomerTypeRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            kahoots: KahootRepository::new(pool.clone()),
            owners: KahootOwnerRepository::new(pool.clone()),
            favorites: FavoriteKahootRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            written_questions: WrittenQuestionRepository::new(pool.clone()),
            written_answers: WrittenAnswerRepository::new(pool.clone()),
            true_false: TrueFalseRepository::new(pool.clone()),
            slides: SlideRepository::new(pool.clone()),
            views: ViewRepository::new(pool.clone()),
            pool,
        }
    }

    /// Build the pool from configuration and wrap it
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_pool(&PoolConfig::from(config)).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn pool_status(&self) -> PoolStatus {
        self.pool.status()
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        self.pool.health_check().await
    }

    /// Create every table that does not exist yet
    pub async fn setup(&self) -> StoreResult<()> {
        schema::create_tables(&self.pool).await
    }

    /// Empty every table and restart ids at 1
    pub async fn reset(&self) -> StoreResult<()> {
        schema::truncate_all(&self.pool).await
    }

    /// Load the example data set into the current tables
    pub async fn seed(&self) -> Result<SeedSummary> {
        seed::load_example_data(self).await
    }

    /// Run the three user join views
    pub async fn report(&self) -> StoreResult<ViewReport> {
        Ok(ViewReport {
            owned_kahoots: self.views.users_with_owned_kahoots().await?,
            favorite_kahoots: self.views.users_with_favorite_kahoots().await?,
            groups: self.views.users_with_groups().await?,
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
