use crate::models::{NewUser, User, UserPatch};
use crate::repositories::UserRepository;
use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

/// In-process [`UserRepository`] for handler tests. Keeps insertion order.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, AppError> {
        self.users
            .lock()
            .map_err(|_| AppError::DatabaseError("user store poisoned".into()))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut user = User::from(new_user);
        user.id = Some(ObjectId::new());
        self.lock()?.push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn find_one_and_update(
        &self,
        id: ObjectId,
        patch: UserPatch,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.lock()?;
        Ok(users.iter_mut().find(|u| u.id == Some(id)).map(|user| {
            if let Some(username) = &patch.username {
                user.username = username.clone();
            }
            if let Some(password) = &patch.password {
                user.password = password.clone();
            }
            user.clone()
        }))
    }

    async fn find_one_and_delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        let mut users = self.lock()?;
        let index = users.iter().position(|u| u.id == Some(id));
        Ok(index.map(|i| users.remove(i)))
    }
}
