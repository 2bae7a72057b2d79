pub mod health_handler;
pub mod quiz_handler;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::errors::ErrorResponse;

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::generate_quiz;

/// Registers every route plus the JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(generate_quiz)
        .service(health_check)
        .service(health_check_ready);
}

/// Malformed bodies get the same `{"error": ...}` shape as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::error!("Rejected request body: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse { error: message }),
        )
        .into()
    })
}
