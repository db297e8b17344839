use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate, ToSchema)]
pub struct Address {
    #[schema(example = "Rua das Flores, 100")]
    pub street: String,
    #[schema(example = "Campinas")]
    pub city: String,
    #[schema(example = "SP")]
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Establishment {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub category: String,
    pub location: Address,
    pub owner_id: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Establishment {
    pub fn new(
        name: String,
        description: String,
        photo_url: String,
        category: String,
        location: Address,
        owner_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            photo_url,
            category,
            location,
            owner_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Pending,
}

/// A professional's membership in an establishment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentMember {
    /// `{establishment_id}:{professional_id}`, so a pair has at most one row.
    #[serde(rename = "_id")]
    pub id: String,
    pub establishment_id: String,
    pub professional_id: String,
    pub name: String,
    pub status: MemberStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub added_at: DateTime<Utc>,
}

impl EstablishmentMember {
    pub fn member_id(establishment_id: &str, professional_id: &str) -> String {
        format!("{}:{}", establishment_id, professional_id)
    }

    pub fn active(establishment_id: &str, professional_id: &str, name: String) -> Self {
        Self {
            id: Self::member_id(establishment_id, professional_id),
            establishment_id: establishment_id.to_string(),
            professional_id: professional_id.to_string(),
            name,
            status: MemberStatus::Active,
            added_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_id_is_composite() {
        let member = EstablishmentMember::active("est-1", "prof-9", "Ana".to_string());
        assert_eq!(member.id, "est-1:prof-9");
        assert_eq!(member.status, MemberStatus::Active);
    }
}
