use super::users::{ensure_email_available, normalize_email, update_profile};
use crate::dtos::{
    CreateAdminRequest, MessageResponse, UpdateUserRequest, UserResponse,
};
use crate::models::{User, UserKind};
use crate::services::metrics::record_registration;
use crate::startup::AppState;
use crate::utils::{hash_password, ValidatedJson};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

#[utoipa::path(
    get,
    path = "/api/admins",
    responses((status = 200, description = "All admins", body = Vec<UserResponse>)),
    tag = "Admins"
)]
pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let admins = state.repo.list_users(UserKind::Admin).await?;
    Ok(Json(
        admins
            .into_iter()
            .map(|a| UserResponse::new(UserKind::Admin, a))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admins/{id}",
    params(("id" = String, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin", body = UserResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admins"
)]
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let admin = state
        .repo
        .find_user(UserKind::Admin, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin not found"))?;
    Ok(Json(UserResponse::new(UserKind::Admin, admin)))
}

#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Admins"
)]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email);
    ensure_email_available(state.repo.as_ref(), &email, None).await?;

    let mut admin = User::new(req.name, email, hash_password(&req.password)?);
    admin.phone = req.phone;
    admin.photo_url = req.photo_url;

    state.repo.insert_user(UserKind::Admin, &admin).await?;
    record_registration(UserKind::Admin.as_str());
    tracing::info!(admin_id = %admin.id, "Admin created");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new(UserKind::Admin, admin)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admins/{id}",
    params(("id" = String, Path, description = "Admin id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Admin updated", body = MessageResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Admins"
)]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    update_profile(state.repo.as_ref(), UserKind::Admin, &id, req).await?;
    Ok(Json(MessageResponse::new("Admin updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = String, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    ),
    tag = "Admins"
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.repo.delete_user(UserKind::Admin, &id).await? {
        return Err(AppError::not_found("Admin not found"));
    }
    tracing::info!(admin_id = %id, "Admin deleted");
    Ok(Json(MessageResponse::new("Admin deleted")))
}
