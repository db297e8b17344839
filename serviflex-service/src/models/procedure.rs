use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced, timed service offered by one professional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    #[serde(rename = "_id")]
    pub id: String,
    pub professional_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_minutes: u32,
    pub image_url: Option<String>,
}

impl Procedure {
    pub fn new(
        professional_id: String,
        name: String,
        description: String,
        price: f64,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            professional_id,
            name,
            description,
            price,
            duration_minutes,
            image_url: None,
        }
    }
}
