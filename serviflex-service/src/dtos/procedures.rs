use crate::models::Procedure;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProcedureRequest {
    #[validate(length(min = 1, message = "professional_id is required"))]
    pub professional_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Haircut")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 50.0)]
    pub price: f64,
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    #[schema(example = 30)]
    pub duration_minutes: u32,
    pub image_url: Option<String>,
}

/// Overwrites a procedure; an omitted `image_url` keeps the current one.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProcedureRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration_minutes: u32,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcedureResponse {
    pub id: String,
    pub professional_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub duration_minutes: u32,
    pub image_url: Option<String>,
}

impl From<Procedure> for ProcedureResponse {
    fn from(procedure: Procedure) -> Self {
        Self {
            id: procedure.id,
            professional_id: procedure.professional_id,
            name: procedure.name,
            description: procedure.description,
            price: procedure.price,
            duration_minutes: procedure.duration_minutes,
            image_url: procedure.image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImageUrlRequest {
    #[validate(length(min = 1, message = "image_url is required"))]
    #[schema(example = "https://images.serviflex.test/cut.jpg")]
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageUrlResponse {
    pub image_url: String,
}
