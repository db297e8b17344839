use crate::models::{Weekday, WorkingHours};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkingHoursRequest {
    #[validate(length(min = 1, message = "professional_id is required"))]
    pub professional_id: String,
    #[validate(length(min = 1, message = "At least one weekday is required"))]
    pub weekdays: Vec<Weekday>,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "18:00")]
    pub end_time: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkingHoursRequest {
    pub weekday: Weekday,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "18:00")]
    pub end_time: String,
    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkingHoursResponse {
    pub id: String,
    pub professional_id: String,
    pub weekday: Weekday,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

impl From<WorkingHours> for WorkingHoursResponse {
    fn from(hours: WorkingHours) -> Self {
        Self {
            id: hours.id,
            professional_id: hours.professional_id,
            weekday: hours.weekday,
            start_time: hours.start_time,
            end_time: hours.end_time,
            available: hours.available,
        }
    }
}

/// Outcome of a bulk create: weekdays already registered are skipped.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkingHoursResponse {
    pub created: Vec<WorkingHoursResponse>,
    pub skipped: Vec<Weekday>,
}
