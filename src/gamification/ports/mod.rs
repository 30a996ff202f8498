//! Port contracts for gamification persistence.

pub mod repository;

pub use repository::{
    GamificationRepository, GamificationRepositoryError, GamificationRepositoryResult,
};
