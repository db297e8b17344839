use super::users::{ensure_email_available, normalize_email};
use crate::dtos::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::models::{User, UserKind};
use crate::services::metrics::record_registration;
use crate::startup::AppState;
use crate::utils::{hash_password, verify_password, ValidatedJson};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

/// Log in with email and password
///
/// Clients, professionals and admins are searched in that order.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email);

    for kind in UserKind::ALL {
        if let Some(user) = state.repo.find_user_by_email(kind, &email).await? {
            if verify_password(&req.password, &user.password_hash) {
                tracing::info!(user_id = %user.id, kind = %kind, "User logged in");
                return Ok(Json(AuthResponse {
                    message: "Login successful".to_string(),
                    user: UserResponse::new(kind, user),
                }));
            }
        }
    }

    tracing::warn!("Login failed");
    Err(AppError::Unauthorized(anyhow::anyhow!(
        "Invalid email or password"
    )))
}

/// Register a client, professional or admin
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation error or invalid kind", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email);
    ensure_email_available(state.repo.as_ref(), &email, None).await?;

    let mut user = User::new(req.name, email, hash_password(&req.password)?);
    user.phone = req.phone;
    user.photo_url = req.photo_url;
    if req.kind == UserKind::Professionals {
        user.establishment_id = req.establishment_id;
    }

    state.repo.insert_user(req.kind, &user).await?;
    record_registration(req.kind.as_str());
    tracing::info!(user_id = %user.id, kind = %req.kind, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::new(req.kind, user),
        }),
    ))
}
