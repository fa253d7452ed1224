pub mod health;
pub mod swagger;
pub mod users;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::utils::error::AppError;

/// JSON extractor settings: malformed bodies become a 400 `{error}` payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️ Rejected body for {} {}: {}", req.method(), req.path(), err);
        AppError::InvalidRequest(err.to_string()).into()
    })
}

/// Registers every route. Fixed paths go before `/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            SwaggerUi::new("/api-docs/{_:.*}")
                .url("/api-docs/openapi.json", swagger::ApiDoc::openapi()),
        )
        .service(web::redirect("/api-docs", "/api-docs/"))
        .route("/check", web::get().to(health::check))
        .route("/save", web::post().to(users::save_user))
        .route("/all/users", web::get().to(users::get_all_users))
        .service(
            web::resource("/{id}")
                .route(web::get().to(users::find_user))
                .route(web::put().to(users::update_user))
                .route(web::delete().to(users::delete_user)),
        );
}
