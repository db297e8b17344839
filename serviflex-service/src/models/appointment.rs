use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    pub client_id: String,
    pub professional_id: String,
    pub establishment_id: String,
    /// Procedure name as offered by the professional.
    pub procedure: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_time: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        client_id: String,
        professional_id: String,
        establishment_id: String,
        procedure: String,
        date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            professional_id,
            establishment_id,
            procedure,
            date_time,
        }
    }
}
