//! Database repositories module
//!
//! One repository per entity family. Every operation acquires its own pooled
//! connection and returns a classified [`StoreError`](crate::utils::errors::StoreError)
//! on failure.

pub mod group;
pub mod kahoot;
pub mod ownership;
pub mod question;
pub mod reference;
pub mod user;
pub mod views;

// Re-export repositories
pub use group::GroupRepository;
pub use kahoot::KahootRepository;
pub use ownership::{FavoriteKahootRepository, KahootOwnerRepository};
pub use question::{SlideRepository, TrueFalseRepository, WrittenAnswerRepository, WrittenQuestionRepository};
pub use reference::{CustomerTypeRepository, LanguageRepository, ReferenceRepository, SubscriptionRepository};
pub use user::UserRepository;
pub use views::ViewRepository;
