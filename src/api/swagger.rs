use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD API for users stored in MongoDB.\n\n**Errors:** every failure responds with `{\"error\": \"...\"}`. Database failures are reported as a generic message."
    ),
    paths(
        // Health
        crate::api::health::check,

        // Users
        crate::api::users::save_user,
        crate::api::users::get_all_users,
        crate::api::users::find_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::CheckResponse,
            crate::models::NewUser,
            crate::models::UserPatch,
            crate::models::UserResponse,
            crate::api::users::UserEnvelope,
            crate::api::users::UserMessageEnvelope,
            crate::api::users::UserListEnvelope,
            crate::utils::error::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness check."),
        (name = "Users", description = "Create, read, update and delete users."),
    )
)]
pub struct ApiDoc;
