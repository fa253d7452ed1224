use crate::config::MongoSettings;
use crate::database::MongoDB;
use crate::models::{NewUser, User, UserPatch};
use crate::repositories::UserRepository;
use crate::utils::error::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use tokio::sync::OnceCell;

pub const USERS_COLLECTION: &str = "users";

/// [`UserRepository`] backed by the `users` collection.
pub struct MongoUserRepository {
    collection: OnceCell<Collection<User>>,
    /// Used to build the client on first use when it could not be built at boot.
    settings: Option<MongoSettings>,
}

impl MongoUserRepository {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: OnceCell::from(db.collection::<User>(USERS_COLLECTION)),
            settings: None,
        }
    }

    /// Defers client construction to the first request, retrying on every
    /// request until it succeeds.
    pub fn deferred(settings: MongoSettings) -> Self {
        Self {
            collection: OnceCell::new(),
            settings: Some(settings),
        }
    }

    async fn collection(&self) -> Result<&Collection<User>, AppError> {
        self.collection
            .get_or_try_init(|| async {
                let settings = self.settings.as_ref().ok_or_else(|| {
                    AppError::DatabaseError("MongoDB client not configured".to_string())
                })?;
                let db = MongoDB::new(settings).await?;
                log::info!("✅ MongoDB client initialised");
                Ok::<_, AppError>(db.collection::<User>(USERS_COLLECTION))
            })
            .await
    }
}

/// `$set` document holding only the fields present in the patch.
fn set_document(patch: &UserPatch) -> Result<Document, AppError> {
    mongodb::bson::to_document(patch)
        .map_err(|e| AppError::DatabaseError(format!("Failed to encode update: {}", e)))
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut user = User::from(new_user);
        let result = self.collection().await?.insert_one(&user).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(format!(
                "Unexpected inserted id: {}",
                result.inserted_id
            ))
        })?;
        user.id = Some(id);

        log::debug!("💾 Inserted user {}", id);
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection().await?.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection().await?.find_one(doc! { "_id": id }).await?)
    }

    async fn find_one_and_update(
        &self,
        id: ObjectId,
        patch: UserPatch,
    ) -> Result<Option<User>, AppError> {
        let set = set_document(&patch)?;
        // MongoDB rejects an empty `$set`
        if set.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = self
            .collection()
            .await?
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn find_one_and_delete(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection().await?.find_one_and_delete(doc! { "_id": id }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_skips_absent_fields() {
        let patch = UserPatch {
            username: Some("alice2".into()),
            password: None,
        };
        let set = set_document(&patch).unwrap();

        assert_eq!(set, doc! { "username": "alice2" });
    }

    #[test]
    fn test_set_document_empty_patch() {
        assert!(set_document(&UserPatch::default()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deferred_client_failure_is_database_error() {
        let repo = MongoUserRepository::deferred(MongoSettings {
            url: "not-a-mongo-url".into(),
            database: None,
            max_pool_size: 5,
            min_pool_size: 1,
        });

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));

        // Not cached: the next request tries again
        let err = repo.find_by_id(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_deferred_client_builds_on_first_use() {
        let repo = MongoUserRepository::deferred(MongoSettings {
            url: "mongodb://localhost:27017".into(),
            database: Some("user_service_test".into()),
            max_pool_size: 5,
            min_pool_size: 0,
        });

        let collection = repo.collection().await.unwrap();
        assert_eq!(collection.namespace().db, "user_service_test");
        assert_eq!(collection.name(), USERS_COLLECTION);
    }

    async fn live_repository() -> MongoUserRepository {
        dotenv::dotenv().ok();
        let settings = MongoSettings {
            url: std::env::var("MONGO_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".into()),
            database: Some("user_service_test".into()),
            max_pool_size: 5,
            min_pool_size: 1,
        };
        let db = MongoDB::new(&settings).await.unwrap();
        MongoUserRepository::new(&db)
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_crud_round_trip() {
        let repo = live_repository().await;

        let created = repo
            .insert(NewUser {
                username: "alice".into(),
                password: "p1".into(),
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(created.clone()));

        let updated = repo
            .find_one_and_update(
                id,
                UserPatch {
                    username: Some("alice2".into()),
                    password: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.password, "p1");

        let deleted = repo.find_one_and_delete(id).await.unwrap();
        assert_eq!(deleted, Some(updated));
        assert_eq!(repo.find_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_missing_id_yields_none() {
        let repo = live_repository().await;
        let id = ObjectId::new();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo
            .find_one_and_update(
                id,
                UserPatch {
                    username: Some("x".into()),
                    password: None
                }
            )
            .await
            .unwrap()
            .is_none());
        assert!(repo.find_one_and_delete(id).await.unwrap().is_none());
    }
}
