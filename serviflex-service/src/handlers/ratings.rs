use crate::dtos::{CreateRatingRequest, RatingResponse};
use crate::models::Rating;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

#[utoipa::path(
    post,
    path = "/api/ratings",
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating recorded", body = RatingResponse),
        (status = 400, description = "Score outside 0..=5", body = ErrorResponse)
    ),
    tag = "Ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rating = Rating::new(
        req.professional_id,
        req.client_id,
        req.establishment_id.filter(|id| !id.is_empty()),
        req.score,
        req.comment,
    );
    state.repo.insert_rating(&rating).await?;
    tracing::info!(rating_id = %rating.id, professional_id = %rating.professional_id, score = rating.score, "Rating recorded");

    Ok((StatusCode::CREATED, Json(RatingResponse::from(rating))))
}
