//! Data models module
//!
//! One record type per entity, per write request and per projection.

pub mod group;
pub mod kahoot;
pub mod question;
pub mod reference;
pub mod user;
pub mod views;

// Re-export commonly used models
pub use group::{AddMemberRequest, CreateGroupRequest, Group, GroupMember, UpdateGroupRequest};
pub use kahoot::{
    CreateKahootRequest, FavoriteKahoot, Kahoot, KahootOwner, KahootSummary, UpdateKahootRequest,
};
pub use question::{
    KahootQuestion, PresentationSlide, PresentationSlideRequest, QuestionKind, TrueFalseQuestion,
    TrueFalseQuestionRequest, WrittenAnswer, WrittenAnswerRequest, WrittenQuestion,
    WrittenQuestionRequest,
};
pub use reference::{CustomerType, Language, ReferenceEntity, Subscription};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserSummary};
pub use views::{UserGroupRow, UserKahootRow};
