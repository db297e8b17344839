use crate::dtos::{MessageResponse, UpdateUserRequest, UserKindQuery};
use crate::models::{User, UserKind};
use crate::services::{MarketplaceRepository, EMAIL_TAKEN};
use crate::startup::AppState;
use crate::utils::{hash_password, ValidatedJson};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use service_core::error::AppError;

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fails with 409 when any account other than `except_id` uses `email`.
pub(crate) async fn ensure_email_available(
    repo: &dyn MarketplaceRepository,
    email: &str,
    except_id: Option<&str>,
) -> Result<(), AppError> {
    for kind in UserKind::ALL {
        if let Some(existing) = repo.find_user_by_email(kind, email).await? {
            if Some(existing.id.as_str()) != except_id {
                return Err(AppError::conflict(EMAIL_TAKEN));
            }
        }
    }
    Ok(())
}

/// Overwrites the editable profile fields. `id` and `created_at` stay.
pub(crate) fn apply_profile_update(
    mut user: User,
    kind: UserKind,
    req: UpdateUserRequest,
) -> Result<User, AppError> {
    user.name = req.name;
    user.email = normalize_email(&req.email);
    user.phone = req.phone;
    user.photo_url = req.photo_url;
    if let Some(password) = req.password {
        user.password_hash = hash_password(&password)?;
    }
    if kind == UserKind::Professionals {
        user.establishment_id = req.establishment_id;
    }
    Ok(user)
}

/// Shared by the user and admin update endpoints.
pub(crate) async fn update_profile(
    repo: &dyn MarketplaceRepository,
    kind: UserKind,
    id: &str,
    req: UpdateUserRequest,
) -> Result<(), AppError> {
    let existing = repo
        .find_user(kind, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    ensure_email_available(repo, &normalize_email(&req.email), Some(id)).await?;

    let updated = apply_profile_update(existing, kind, req)?;
    if !repo.replace_user(kind, &updated).await? {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!(user_id = %id, kind = %kind, "User updated");
    Ok(())
}

/// Update a client, professional or admin profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User id"),
        UserKindQuery
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid kind", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserKindQuery>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let kind: UserKind = query
        .kind
        .as_deref()
        .ok_or_else(|| AppError::bad_request("Query parameter 'kind' is required"))?
        .parse()?;

    update_profile(state.repo.as_ref(), kind, &id, req).await?;

    Ok(Json(MessageResponse::new("User updated successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryRepository;
    use crate::utils::verify_password;

    fn update(email: &str, password: Option<&str>) -> UpdateUserRequest {
        UpdateUserRequest {
            name: "New Name".to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
            phone: Some("123".to_string()),
            photo_url: None,
            establishment_id: Some("est-1".to_string()),
        }
    }

    #[test]
    fn update_keeps_identity_and_hash_without_password() {
        let user = User::new("Old".into(), "old@example.com".into(), "hash".into());
        let (id, created_at) = (user.id.clone(), user.created_at);

        let updated =
            apply_profile_update(user, UserKind::Clients, update(" New@Example.com ", None)).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.password_hash, "hash");
        assert_eq!(updated.establishment_id, None);
    }

    #[test]
    fn professional_update_sets_establishment_and_password() {
        let user = User::new("Old".into(), "old@example.com".into(), "hash".into());
        let updated =
            apply_profile_update(user, UserKind::Professionals, update("a@b.co", Some("new-pass")))
                .unwrap();
        assert_eq!(updated.establishment_id.as_deref(), Some("est-1"));
        assert!(verify_password("new-pass", &updated.password_hash));
    }

    #[tokio::test]
    async fn email_conflicts_span_every_kind() {
        let repo = InMemoryRepository::new();
        let admin = User::new("A".into(), "taken@example.com".into(), "h".into());
        repo.insert_user(UserKind::Admin, &admin).await.unwrap();

        let err = ensure_email_available(&repo, "taken@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert!(ensure_email_available(&repo, "taken@example.com", Some(&admin.id))
            .await
            .is_ok());
        assert!(ensure_email_available(&repo, "free@example.com", None).await.is_ok());
    }
}
