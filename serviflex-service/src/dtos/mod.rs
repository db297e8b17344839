pub mod appointments;
pub mod auth;
pub mod establishments;
pub mod procedures;
pub mod reports;
pub mod working_hours;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use appointments::*;
pub use auth::*;
pub use establishments::*;
pub use procedures::*;
pub use reports::*;
pub use working_hours::*;

/// Shape of every error body, as rendered by `AppError`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Email already registered")]
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
}
