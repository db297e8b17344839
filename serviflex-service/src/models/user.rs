use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account type. Each kind lives in its own collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Clients,
    Professionals,
    Admin,
}

impl UserKind {
    /// Lookup order used by login and duplicate-email checks.
    pub const ALL: [UserKind; 3] = [UserKind::Clients, UserKind::Professionals, UserKind::Admin];

    pub fn collection(&self) -> &'static str {
        match self {
            UserKind::Clients => "clients",
            UserKind::Professionals => "professionals",
            UserKind::Admin => "admins",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Clients => "clients",
            UserKind::Professionals => "professionals",
            UserKind::Admin => "admin",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients" => Ok(UserKind::Clients),
            "professionals" => Ok(UserKind::Professionals),
            "admin" => Ok(UserKind::Admin),
            other => Err(AppError::bad_request(format!(
                "Invalid user kind '{}': expected clients, professionals or admin",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    /// Only meaningful for professionals.
    pub establishment_id: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            phone: None,
            photo_url: None,
            establishment_id: None,
            created_at: Utc::now(),
        }
    }
}
