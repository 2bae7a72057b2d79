use std::panic::AssertUnwindSafe;

use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::FutureExt;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::QuizRequest,
        dto::{request::GenerateQuizRequestDto, response::QuizResponseDto},
    },
};

#[post("/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req).unwrap_or_default();
    let payload = payload.into_inner();
    log::info!("[{}] Received quiz request: {:?}", request_id, payload);

    let request = QuizRequest::try_from(payload).map_err(|e| {
        log::error!("[{}] Validation failed: {}", request_id, e);
        e
    })?;

    let pipeline = AssertUnwindSafe(state.quiz_service.generate(request)).catch_unwind();

    let outcome = match pipeline.await {
        Ok(result) => result.map_err(|e| {
            log::error!("[{}] {}", request_id, e);
            e
        })?,
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!("[{}] Unexpected error in quiz pipeline: {}", request_id, detail);
            return Err(AppError::InternalError(detail));
        }
    };

    log::info!(
        "[{}] Returning quiz: ok={}, {} questions",
        request_id,
        outcome.is_ok(),
        outcome.question_count()
    );
    Ok(HttpResponse::Ok().json(QuizResponseDto::from(outcome)))
}
