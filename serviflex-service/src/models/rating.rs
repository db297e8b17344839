use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: String,
    pub professional_id: String,
    pub client_id: String,
    pub establishment_id: Option<String>,
    /// 0 to 5 inclusive.
    pub score: i32,
    pub comment: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        professional_id: String,
        client_id: String,
        establishment_id: Option<String>,
        score: i32,
        comment: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            professional_id,
            client_id,
            establishment_id,
            score,
            comment,
            created_at: Utc::now(),
        }
    }
}
