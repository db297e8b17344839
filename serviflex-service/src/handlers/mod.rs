pub mod admins;
pub mod appointments;
pub mod auth;
pub mod establishments;
pub mod health;
pub mod invitations;
pub mod procedures;
pub mod professionals;
pub mod ratings;
pub mod reports;
pub mod uploads;
pub mod users;
pub mod working_hours;

pub use health::{health_check, metrics_endpoint, readiness_check};
