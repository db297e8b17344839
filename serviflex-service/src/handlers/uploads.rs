use crate::dtos::{ImageUrlRequest, ImageUrlResponse};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

/// Attach an already-uploaded image URL to a professional or procedure
#[utoipa::path(
    put,
    path = "/api/upload/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "professional or procedure"),
        ("id" = String, Path, description = "Target id")
    ),
    request_body = ImageUrlRequest,
    responses(
        (status = 200, description = "Image URL stored", body = ImageUrlResponse),
        (status = 400, description = "Empty URL or invalid kind", body = ErrorResponse),
        (status = 404, description = "Target not found", body = ErrorResponse)
    ),
    tag = "Uploads"
)]
pub async fn set_image_url(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<ImageUrlRequest>,
) -> Result<Json<ImageUrlResponse>, AppError> {
    let image_url = req.image_url.trim().to_string();
    if image_url.is_empty() {
        return Err(AppError::bad_request("image_url is required"));
    }

    let matched = match kind.as_str() {
        "professional" => state.repo.set_professional_photo(&id, &image_url).await?,
        "procedure" => state.repo.set_procedure_image(&id, &image_url).await?,
        other => {
            return Err(AppError::bad_request(format!(
                "Invalid kind '{}': expected professional or procedure",
                other
            )))
        }
    };
    if !matched {
        return Err(AppError::not_found(format!("{} not found", kind)));
    }

    tracing::info!(kind = %kind, id = %id, "Image URL updated");
    Ok(Json(ImageUrlResponse { image_url }))
}
