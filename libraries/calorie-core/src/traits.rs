/// Core traits for the calorie tracker
use crate::error::Result;
use crate::types::{NewUser, UpdateUser, User, UserId};

/// Credential store trait
///
/// Implementers persist user accounts together with their embedded food
/// logs. The user record is the unit of persistence: food-log mutations
/// are saved by rewriting the whole record, not by partial updates.
#[allow(async_fn_in_trait)]
pub trait UserStore: Send + Sync {
    /// Create a new user account
    ///
    /// Fails with [`crate::CalorieError::DuplicateUsername`] when the
    /// username is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Look up a user by username
    async fn find_user(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by id (token subject resolution)
    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>>;

    /// Get all users
    async fn all_users(&self) -> Result<Vec<User>>;

    /// Update a user's account fields, returning the updated record
    async fn update_user(&self, username: &str, update: UpdateUser) -> Result<Option<User>>;

    /// Delete a user by username, returning the removed record
    async fn delete_user(&self, username: &str) -> Result<Option<User>>;

    /// Persist a user's entire food log from the in-memory record
    async fn save_food_log(&self, user: &User) -> Result<()>;
}
