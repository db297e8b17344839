use crate::models::{
    Address, Establishment, EstablishmentMember, Invitation, InvitationKind, InvitationResponse,
    MemberStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body for both create and full update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EstablishmentRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Studio da Beleza")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    #[schema(example = "Beauty")]
    pub category: String,
    #[validate(nested)]
    #[serde(default)]
    pub location: Address,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EstablishmentResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub category: String,
    pub location: Address,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Establishment> for EstablishmentResponse {
    fn from(establishment: Establishment) -> Self {
        Self {
            id: establishment.id,
            name: establishment.name,
            description: establishment.description,
            photo_url: establishment.photo_url,
            category: establishment.category,
            location: establishment.location,
            owner_id: establishment.owner_id,
            created_at: establishment.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub professional_id: String,
    pub name: String,
    pub status: MemberStatus,
    pub added_at: DateTime<Utc>,
}

impl From<EstablishmentMember> for MemberResponse {
    fn from(member: EstablishmentMember) -> Self {
        Self {
            professional_id: member.professional_id,
            name: member.name,
            status: member.status,
            added_at: member.added_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InviteRequest {
    #[validate(length(min = 1, message = "establishment_id is required"))]
    pub establishment_id: String,
    #[validate(length(min = 1, message = "professional_id is required"))]
    pub professional_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InviteResponse {
    #[schema(example = "Invitation sent")]
    pub message: String,
    pub id: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RespondInvitationRequest {
    pub response: InvitationResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvitationView {
    pub id: String,
    pub professional_id: String,
    pub establishment_id: String,
    pub kind: InvitationKind,
    pub message: String,
    pub answered: bool,
    pub response: Option<InvitationResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Invitation> for InvitationView {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id,
            professional_id: invitation.professional_id,
            establishment_id: invitation.establishment_id,
            kind: invitation.kind,
            message: invitation.message,
            answered: invitation.answered,
            response: invitation.response,
            created_at: invitation.created_at,
        }
    }
}
