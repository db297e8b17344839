use crate::models::{User, UserKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Strips surrounding whitespace before the email is validated.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|raw| raw.trim().to_string())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@serviflex.test")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "demo-password")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Maria Silva")]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@serviflex.test")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "demo-password", min_length = 6)]
    pub password: String,

    pub kind: UserKind,

    #[schema(example = "(34) 99999-9999")]
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    /// Professionals only.
    pub establishment_id: Option<String>,
}

/// Account creation through the admin endpoints; the kind is implied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

/// Full overwrite of a profile. The password only changes when given.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub establishment_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserKindQuery {
    /// clients, professionals or admin
    #[param(example = "clients")]
    pub kind: Option<String>,
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub kind: UserKind,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn new(kind: UserKind, user: User) -> Self {
        Self {
            id: user.id,
            kind,
            name: user.name,
            email: user.email,
            phone: user.phone,
            photo_url: user.photo_url,
            establishment_id: user.establishment_id,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_before_validation() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "email": "  Ana@Example.com ",
            "password": "secret1",
            "kind": "clients"
        }))
        .unwrap();

        assert_eq!(req.email, "Ana@Example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_email_still_fails_validation() {
        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({ "email": "   ", "password": "x" }))
                .unwrap();
        assert!(req.validate().is_err());
    }
}
