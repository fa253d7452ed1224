use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckResponse {
    #[schema(example = "Success")]
    pub status: String,
    #[schema(example = 200)]
    pub code: u16,
    #[schema(example = "Server running successfully")]
    pub message: String,
}

/// Liveness check. Does not touch the database.
#[utoipa::path(
    get,
    path = "/check",
    tag = "Health",
    responses(
        (status = 200, description = "Server running successfully", body = CheckResponse)
    )
)]
pub async fn check() -> impl Responder {
    HttpResponse::Ok().json(CheckResponse {
        status: "Success".to_string(),
        code: 200,
        message: "Server running successfully".to_string(),
    })
}
