use crate::models::{NewUser, User, UserPatch};
use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

/// Storage primitives for [`User`] documents.
///
/// Lookups that can miss return `Ok(None)`; any storage failure is an
/// [`AppError::DatabaseError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns it with its assigned id.
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;

    /// All users, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Applies `patch` atomically and returns the document as it is afterwards.
    async fn find_one_and_update(
        &self,
        id: ObjectId,
        patch: UserPatch,
    ) -> Result<Option<User>, AppError>;

    /// Removes the user and returns the removed document.
    async fn find_one_and_delete(&self, id: ObjectId) -> Result<Option<User>, AppError>;
}
