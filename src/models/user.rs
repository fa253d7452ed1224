use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document (stored in MongoDB, collection `users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Documents written by other clients may lack either field.
    #[serde(default)]
    pub username: String,
    /// Stored as given, no hashing.
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /save`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "p1")]
    pub password: String,
}

/// Body of `PUT /{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "alice2")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

impl From<NewUser> for User {
    fn from(new_user: NewUser) -> Self {
        User {
            id: None,
            username: new_user.username,
            password: new_user.password,
        }
    }
}

/// User as rendered in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e8b3a4d0012ab34cd")]
    pub id: String,
    pub username: String,
    pub password: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: u.username,
            password: u.password,
        }
    }
}
