use crate::dtos::{InvitationView, UserResponse};
use crate::models::UserKind;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

#[utoipa::path(
    get,
    path = "/api/professionals",
    responses(
        (status = 200, description = "All professionals", body = Vec<UserResponse>)
    ),
    tag = "Professionals"
)]
pub async fn list_professionals(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let professionals = state.repo.list_users(UserKind::Professionals).await?;
    Ok(Json(
        professionals
            .into_iter()
            .map(|p| UserResponse::new(UserKind::Professionals, p))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/professionals/{id}",
    params(("id" = String, Path, description = "Professional id")),
    responses(
        (status = 200, description = "Professional", body = UserResponse),
        (status = 404, description = "Professional not found", body = ErrorResponse)
    ),
    tag = "Professionals"
)]
pub async fn get_professional(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let professional = state
        .repo
        .find_user(UserKind::Professionals, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Professional not found"))?;
    Ok(Json(UserResponse::new(UserKind::Professionals, professional)))
}

/// Invitations the professional has not answered yet
#[utoipa::path(
    get,
    path = "/api/professionals/{id}/pending-invitations",
    params(("id" = String, Path, description = "Professional id")),
    responses(
        (status = 200, description = "Pending invitations", body = Vec<InvitationView>)
    ),
    tag = "Invitations"
)]
pub async fn list_pending_invitations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<InvitationView>>, AppError> {
    let invitations = state.repo.list_pending_invitations(&id).await?;
    Ok(Json(invitations.into_iter().map(Into::into).collect()))
}
