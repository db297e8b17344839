use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvitationKind {
    EstablishmentInvite,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationResponse {
    Accepted,
    Declined,
}

/// Notification asking a professional to join an establishment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(rename = "_id")]
    pub id: String,
    pub professional_id: String,
    pub kind: InvitationKind,
    pub message: String,
    pub establishment_id: String,
    pub answered: bool,
    pub response: Option<InvitationResponse>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn establishment_invite(
        establishment_id: &str,
        establishment_name: &str,
        professional_id: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            professional_id: professional_id.to_string(),
            kind: InvitationKind::EstablishmentInvite,
            message: format!("You have been invited to join {}", establishment_name),
            establishment_id: establishment_id.to_string(),
            answered: false,
            response: None,
            created_at: Utc::now(),
        }
    }
}
