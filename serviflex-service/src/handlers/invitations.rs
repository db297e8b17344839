use crate::dtos::{InviteRequest, InviteResponse, MessageResponse, RespondInvitationRequest};
use crate::models::{EstablishmentMember, Invitation, InvitationResponse, UserKind};
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

/// Invite a professional to join an establishment
#[utoipa::path(
    post,
    path = "/api/invitations",
    request_body = InviteRequest,
    responses(
        (status = 201, description = "Invitation sent", body = InviteResponse),
        (status = 404, description = "Establishment or professional not found", body = ErrorResponse)
    ),
    tag = "Invitations"
)]
pub async fn invite_professional(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<InviteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let establishment = state
        .repo
        .find_establishment(&req.establishment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Establishment not found"))?;
    state
        .repo
        .find_user(UserKind::Professionals, &req.professional_id)
        .await?
        .ok_or_else(|| AppError::not_found("Professional not found"))?;

    let invitation =
        Invitation::establishment_invite(&establishment.id, &establishment.name, &req.professional_id);
    state.repo.insert_invitation(&invitation).await?;

    tracing::info!(
        invitation_id = %invitation.id,
        establishment_id = %establishment.id,
        professional_id = %req.professional_id,
        "Invitation sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(InviteResponse {
            message: "Invitation sent".to_string(),
            id: invitation.id,
        }),
    ))
}

/// Accept or decline an invitation
///
/// Accepting makes the professional an active member and links their
/// profile to the establishment.
#[utoipa::path(
    post,
    path = "/api/invitations/{id}/respond",
    params(("id" = String, Path, description = "Invitation id")),
    request_body = RespondInvitationRequest,
    responses(
        (status = 200, description = "Answer recorded", body = MessageResponse),
        (status = 404, description = "Invitation not found", body = ErrorResponse),
        (status = 409, description = "Invitation already answered", body = ErrorResponse)
    ),
    tag = "Invitations"
)]
pub async fn respond_invitation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RespondInvitationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let invitation = state
        .repo
        .find_invitation(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Invitation not found"))?;

    if invitation.answered || !state.repo.answer_invitation(&id, req.response).await? {
        return Err(AppError::conflict("Invitation already answered"));
    }

    if req.response == InvitationResponse::Declined {
        tracing::info!(invitation_id = %id, "Invitation declined");
        return Ok(Json(MessageResponse::new("Invitation declined")));
    }

    let professional = state
        .repo
        .find_user(UserKind::Professionals, &invitation.professional_id)
        .await?
        .ok_or_else(|| AppError::not_found("Professional not found"))?;

    state
        .repo
        .upsert_member(&EstablishmentMember::active(
            &invitation.establishment_id,
            &professional.id,
            professional.name.clone(),
        ))
        .await?;
    state
        .repo
        .set_professional_establishment(&professional.id, Some(&invitation.establishment_id))
        .await?;

    tracing::info!(
        invitation_id = %id,
        establishment_id = %invitation.establishment_id,
        professional_id = %professional.id,
        "Invitation accepted"
    );
    Ok(Json(MessageResponse::new("Invitation accepted")))
}
