use crate::models::{NewUser, User, UserPatch};
use crate::repositories::UserRepository;
use crate::utils::error::AppError;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

pub const USER_NOT_FOUND: &str = "User not found";

/// Forwards each operation to the injected repository.
///
/// The only translation done here is turning a missing document into
/// [`AppError::NotFound`].
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn save(&self, new_user: NewUser) -> Result<User, AppError> {
        self.repository.insert(new_user).await
    }

    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        self.repository.find_all().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<User, AppError> {
        self.repository.find_by_id(id).await?.ok_or_else(not_found)
    }

    /// Returns the user as stored after the update.
    pub async fn update(&self, id: ObjectId, patch: UserPatch) -> Result<User, AppError> {
        self.repository
            .find_one_and_update(id, patch)
            .await?
            .ok_or_else(not_found)
    }

    /// Returns the user that was removed.
    pub async fn delete(&self, id: ObjectId) -> Result<User, AppError> {
        self.repository
            .find_one_and_delete(id)
            .await?
            .ok_or_else(not_found)
    }
}

fn not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}
