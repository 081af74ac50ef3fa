//! Database module
//!
//! This module handles the connection pool, the relational schema and the
//! repositories that run every statement against it.

pub mod connection;
pub mod repositories;
pub mod schema;
pub mod seed;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_pool, ConnectionPool, PoolConfig, PoolStatus, PooledConnection};
pub use repositories::{
    CustomerTypeRepository, FavoriteKahootRepository, GroupRepository, KahootOwnerRepository,
    KahootRepository, LanguageRepository, SlideRepository, SubscriptionRepository,
    TrueFalseRepository, UserRepository, ViewRepository, WrittenAnswerRepository,
    WrittenQuestionRepository,
};
pub use schema::{create_tables, truncate_all};
pub use seed::SeedSummary;
pub use service::{DatabaseService, ViewReport};
