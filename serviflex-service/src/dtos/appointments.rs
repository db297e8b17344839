use crate::models::{Appointment, Rating};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    #[validate(length(min = 1, message = "client_id is required"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "professional_id is required"))]
    pub professional_id: String,
    #[validate(length(min = 1, message = "establishment_id is required"))]
    pub establishment_id: String,
    /// Name of a procedure the professional offers.
    #[validate(length(min = 1, message = "procedure is required"))]
    #[schema(example = "Haircut")]
    pub procedure: String,
    /// RFC 3339 instant.
    #[schema(example = "2024-01-01T10:00:00Z")]
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: String,
    pub client_id: String,
    pub professional_id: String,
    pub establishment_id: String,
    pub procedure: String,
    pub date_time: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            client_id: appointment.client_id,
            professional_id: appointment.professional_id,
            establishment_id: appointment.establishment_id,
            procedure: appointment.procedure,
            date_time: appointment.date_time,
        }
    }
}

/// A professional's appointment with the client's name attached.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalAppointmentResponse {
    #[serde(flatten)]
    pub appointment: AppointmentResponse,
    /// Empty when the client record no longer exists.
    pub client_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingRequest {
    #[validate(length(min = 1, message = "professional_id is required"))]
    pub professional_id: String,
    #[validate(length(min = 1, message = "client_id is required"))]
    pub client_id: String,
    pub establishment_id: Option<String>,
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    #[schema(example = 5, minimum = 0, maximum = 5)]
    pub score: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub id: String,
    pub professional_id: String,
    pub client_id: String,
    pub establishment_id: Option<String>,
    pub score: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            professional_id: rating.professional_id,
            client_id: rating.client_id,
            establishment_id: rating.establishment_id,
            score: rating.score,
            comment: rating.comment,
            created_at: rating.created_at,
        }
    }
}
