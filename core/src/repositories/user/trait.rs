//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// This trait defines the contract for data access operations related to
/// users. Implementations handle the actual store operations while keeping
/// the abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// List all users
    ///
    /// Used by the analytics digest; the record set for this product is
    /// small enough that pagination is not worth its complexity here.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Find starter-tier users whose membership ends on or before the cutoff
    ///
    /// Backs the trial-ending notification sweep.
    async fn find_trials_ending_by(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<User>, DomainError>;
}
