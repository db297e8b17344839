use crate::dtos::{
    CreatedResponse, EstablishmentRequest, EstablishmentResponse, MemberResponse,
    MessageResponse,
};
use crate::models::{Establishment, UserKind};
use crate::startup::AppState;
use crate::utils::{OptionalUserId, ValidatedJson};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Create an establishment
///
/// The optional `X-User-ID` header is recorded as the owner.
#[utoipa::path(
    post,
    path = "/api/establishments",
    request_body = EstablishmentRequest,
    params(("X-User-ID" = Option<String>, Header, description = "Owner id")),
    responses(
        (status = 201, description = "Establishment created", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Establishments"
)]
pub async fn create_establishment(
    State(state): State<AppState>,
    OptionalUserId(owner_id): OptionalUserId,
    ValidatedJson(req): ValidatedJson<EstablishmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let establishment = Establishment::new(
        req.name,
        req.description,
        req.photo_url,
        req.category,
        req.location,
        owner_id,
    );
    state.repo.insert_establishment(&establishment).await?;
    tracing::info!(establishment_id = %establishment.id, "Establishment created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: establishment.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/establishments",
    responses(
        (status = 200, description = "All establishments", body = Vec<EstablishmentResponse>)
    ),
    tag = "Establishments"
)]
pub async fn list_establishments(
    State(state): State<AppState>,
) -> Result<Json<Vec<EstablishmentResponse>>, AppError> {
    let establishments = state.repo.list_establishments().await?;
    Ok(Json(establishments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/establishments/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Establishment", body = EstablishmentResponse),
        (status = 404, description = "Establishment not found", body = ErrorResponse)
    ),
    tag = "Establishments"
)]
pub async fn get_establishment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EstablishmentResponse>, AppError> {
    let establishment = state
        .repo
        .find_establishment(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Establishment not found"))?;
    Ok(Json(establishment.into()))
}

/// Overwrite an establishment; owner and creation time are kept
#[utoipa::path(
    put,
    path = "/api/establishments/{id}",
    params(("id" = String, Path, description = "Establishment id")),
    request_body = EstablishmentRequest,
    responses(
        (status = 200, description = "Establishment updated", body = EstablishmentResponse),
        (status = 404, description = "Establishment not found", body = ErrorResponse)
    ),
    tag = "Establishments"
)]
pub async fn update_establishment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<EstablishmentRequest>,
) -> Result<Json<EstablishmentResponse>, AppError> {
    let mut establishment = state
        .repo
        .find_establishment(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Establishment not found"))?;

    establishment.name = req.name;
    establishment.description = req.description;
    establishment.photo_url = req.photo_url;
    establishment.category = req.category;
    establishment.location = req.location;

    if !state.repo.replace_establishment(&establishment).await? {
        return Err(AppError::not_found("Establishment not found"));
    }
    Ok(Json(establishment.into()))
}

#[utoipa::path(
    get,
    path = "/api/establishments/{id}/professionals",
    params(("id" = String, Path, description = "Establishment id")),
    responses(
        (status = 200, description = "Professionals linked to the establishment", body = Vec<MemberResponse>)
    ),
    tag = "Establishments"
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MemberResponse>>, AppError> {
    let members = state.repo.list_members(&id).await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Remove a professional from an establishment
#[utoipa::path(
    delete,
    path = "/api/establishments/{id}/professionals/{professional_id}",
    params(
        ("id" = String, Path, description = "Establishment id"),
        ("professional_id" = String, Path, description = "Professional id")
    ),
    responses(
        (status = 200, description = "Professional removed", body = MessageResponse),
        (status = 404, description = "Professional is not a member", body = ErrorResponse)
    ),
    tag = "Establishments"
)]
pub async fn remove_professional(
    State(state): State<AppState>,
    Path((id, professional_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_member(&id, &professional_id).await? {
        return Err(AppError::not_found(
            "Professional is not a member of this establishment",
        ));
    }

    // Only unlink when the professional still points at this establishment.
    let linked_here = state
        .repo
        .find_user(UserKind::Professionals, &professional_id)
        .await?
        .is_some_and(|p| p.establishment_id.as_deref() == Some(id.as_str()));
    if linked_here {
        state
            .repo
            .set_professional_establishment(&professional_id, None)
            .await?;
    }

    tracing::info!(establishment_id = %id, professional_id = %professional_id, "Professional removed from establishment");
    Ok(Json(MessageResponse::new("Professional removed")))
}
