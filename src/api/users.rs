use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    models::{NewUser, UserPatch, UserResponse},
    services::UserService,
    utils::error::{AppError, ErrorResponse},
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserEnvelope {
    pub data: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserMessageEnvelope {
    pub data: UserResponse,
    #[schema(example = "User created successfully")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserListEnvelope {
    pub data: Vec<UserResponse>,
}

fn parse_user_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| {
        log::warn!("⚠️ Invalid user id: {}", raw);
        AppError::InvalidRequest("Invalid user id".to_string())
    })
}

/// POST /save - Creates a user
#[utoipa::path(
    post,
    path = "/save",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created successfully", body = UserMessageEnvelope),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn save_user(
    service: web::Data<UserService>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /save - Creating user {}", body.username);

    let user = service.save(body.into_inner()).await?;
    let data = UserResponse::from(user);

    log::info!("✅ User created: {}", data.id);
    Ok(HttpResponse::Created().json(UserMessageEnvelope {
        data,
        message: "User created successfully".to_string(),
    }))
}

/// GET /all/users - Lists every stored user
#[utoipa::path(
    get,
    path = "/all/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = UserListEnvelope),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn get_all_users(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    let users = service.get_all().await?;

    log::info!("📋 GET /all/users - Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(UserListEnvelope {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /{id} - Fetches a single user
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-character hex ObjectId)")),
    responses(
        (status = 200, description = "User found", body = UserEnvelope),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn find_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&path)?;

    let user = service.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(UserEnvelope { data: user.into() }))
}

/// PUT /{id} - Updates a user and returns it as stored afterwards
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-character hex ObjectId)")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated successfully", body = UserMessageEnvelope),
        (status = 400, description = "Malformed id or body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
    body: web::Json<UserPatch>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&path)?;
    let patch = body.into_inner();
    if patch.is_empty() {
        return Err(AppError::InvalidRequest(
            "Update must set username or password".to_string(),
        ));
    }

    log::info!("🔧 PUT /{} - Updating user", id);
    let user = service.update(id, patch).await?;

    Ok(HttpResponse::Ok().json(UserMessageEnvelope {
        data: user.into(),
        message: "User updated successfully".to_string(),
    }))
}

/// DELETE /{id} - Removes a user and returns it
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24-character hex ObjectId)")),
    responses(
        (status = 200, description = "User deleted successfully", body = UserMessageEnvelope),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_user_id(&path)?;

    log::info!("🗑️  DELETE /{} - Removing user", id);
    let user = service.delete(id).await?;

    Ok(HttpResponse::Ok().json(UserMessageEnvelope {
        data: user.into(),
        message: "User deleted successfully".to_string(),
    }))
}
