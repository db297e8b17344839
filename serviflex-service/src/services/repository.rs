//! Persistence seam for the marketplace.
//!
//! Handlers only talk to [`MarketplaceRepository`]; [`super::MongoDb`] backs
//! it in production and [`super::InMemoryRepository`] in tests and local runs.
//! Methods that replace, delete or patch a document return `true` when a
//! document matched so callers can answer 404.

use crate::models::{
    Appointment, Establishment, EstablishmentMember, Invitation, InvitationResponse, Procedure,
    Rating, User, UserKind, Weekday, WorkingHours,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use service_core::error::AppError;

/// Conflict message for an email another account already uses.
pub const EMAIL_TAKEN: &str = "Email already registered";

/// Appointment filter. Unset fields match everything; bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AppointmentQuery {
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub establishment_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl AppointmentQuery {
    pub fn for_client(client_id: &str) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            ..Default::default()
        }
    }

    pub fn for_professional(professional_id: &str) -> Self {
        Self {
            professional_id: Some(professional_id.to_string()),
            ..Default::default()
        }
    }

    pub fn for_establishment(establishment_id: &str) -> Self {
        Self {
            establishment_id: Some(establishment_id.to_string()),
            ..Default::default()
        }
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        fn eq(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().is_none_or(|f| f == value)
        }

        eq(&self.client_id, &appointment.client_id)
            && eq(&self.professional_id, &appointment.professional_id)
            && eq(&self.establishment_id, &appointment.establishment_id)
            && self.from.is_none_or(|from| appointment.date_time >= from)
            && self.to.is_none_or(|to| appointment.date_time <= to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RatingQuery {
    pub professional_id: Option<String>,
    pub establishment_id: Option<String>,
}

impl RatingQuery {
    pub fn for_professional(professional_id: &str) -> Self {
        Self {
            professional_id: Some(professional_id.to_string()),
            ..Default::default()
        }
    }

    pub fn for_establishment(establishment_id: &str) -> Self {
        Self {
            establishment_id: Some(establishment_id.to_string()),
            ..Default::default()
        }
    }

    pub fn matches(&self, rating: &Rating) -> bool {
        self.professional_id
            .as_deref()
            .is_none_or(|id| id == rating.professional_id)
            && self
                .establishment_id
                .as_deref()
                .is_none_or(|id| rating.establishment_id.as_deref() == Some(id))
    }
}

#[async_trait]
pub trait MarketplaceRepository: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    // Users
    /// Fails with `Conflict` when the store already holds the email.
    async fn insert_user(&self, kind: UserKind, user: &User) -> Result<(), AppError>;
    async fn find_user(&self, kind: UserKind, id: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, kind: UserKind, email: &str)
        -> Result<Option<User>, AppError>;
    async fn list_users(&self, kind: UserKind) -> Result<Vec<User>, AppError>;
    /// Fails with `Conflict` when another account holds the new email.
    async fn replace_user(&self, kind: UserKind, user: &User) -> Result<bool, AppError>;
    async fn delete_user(&self, kind: UserKind, id: &str) -> Result<bool, AppError>;
    /// Links a professional to an establishment, or unlinks it with `None`.
    async fn set_professional_establishment(
        &self,
        professional_id: &str,
        establishment_id: Option<&str>,
    ) -> Result<bool, AppError>;
    async fn set_professional_photo(&self, professional_id: &str, url: &str)
        -> Result<bool, AppError>;

    // Establishments and memberships
    async fn insert_establishment(&self, establishment: &Establishment) -> Result<(), AppError>;
    async fn find_establishment(&self, id: &str) -> Result<Option<Establishment>, AppError>;
    async fn list_establishments(&self) -> Result<Vec<Establishment>, AppError>;
    async fn replace_establishment(&self, establishment: &Establishment) -> Result<bool, AppError>;
    async fn upsert_member(&self, member: &EstablishmentMember) -> Result<(), AppError>;
    async fn delete_member(
        &self,
        establishment_id: &str,
        professional_id: &str,
    ) -> Result<bool, AppError>;
    async fn list_members(&self, establishment_id: &str)
        -> Result<Vec<EstablishmentMember>, AppError>;

    // Invitations
    async fn insert_invitation(&self, invitation: &Invitation) -> Result<(), AppError>;
    async fn find_invitation(&self, id: &str) -> Result<Option<Invitation>, AppError>;
    /// Records the answer; returns `false` if the invitation is unknown or
    /// was already answered.
    async fn answer_invitation(
        &self,
        id: &str,
        response: InvitationResponse,
    ) -> Result<bool, AppError>;
    async fn list_pending_invitations(
        &self,
        professional_id: &str,
    ) -> Result<Vec<Invitation>, AppError>;

    // Procedures
    async fn insert_procedure(&self, procedure: &Procedure) -> Result<(), AppError>;
    async fn find_procedure(&self, id: &str) -> Result<Option<Procedure>, AppError>;
    async fn find_procedure_by_name(
        &self,
        professional_id: &str,
        name: &str,
    ) -> Result<Option<Procedure>, AppError>;
    /// All procedures, or only one professional's.
    async fn list_procedures(&self, professional_id: Option<&str>)
        -> Result<Vec<Procedure>, AppError>;
    async fn replace_procedure(&self, procedure: &Procedure) -> Result<bool, AppError>;
    async fn delete_procedure(&self, id: &str) -> Result<bool, AppError>;
    async fn set_procedure_image(&self, id: &str, url: &str) -> Result<bool, AppError>;

    // Working hours
    async fn insert_working_hours(&self, hours: &WorkingHours) -> Result<(), AppError>;
    async fn find_working_hours(&self, id: &str) -> Result<Option<WorkingHours>, AppError>;
    async fn list_working_hours(
        &self,
        professional_id: &str,
        weekday: Option<Weekday>,
    ) -> Result<Vec<WorkingHours>, AppError>;
    async fn replace_working_hours(&self, hours: &WorkingHours) -> Result<bool, AppError>;
    async fn delete_working_hours(&self, id: &str) -> Result<bool, AppError>;

    // Appointments and ratings
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), AppError>;
    /// Matching appointments sorted by `date_time` ascending.
    async fn query_appointments(&self, query: &AppointmentQuery)
        -> Result<Vec<Appointment>, AppError>;
    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError>;
    async fn query_ratings(&self, query: &RatingQuery) -> Result<Vec<Rating>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment_at(hour: u32) -> Appointment {
        Appointment::new(
            "client-1".to_string(),
            "prof-1".to_string(),
            "est-1".to_string(),
            "Haircut".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(AppointmentQuery::default().matches(&appointment_at(9)));
    }

    #[test]
    fn appointment_filters_combine() {
        let appointment = appointment_at(9);
        assert!(AppointmentQuery::for_client("client-1").matches(&appointment));
        assert!(!AppointmentQuery::for_professional("prof-2").matches(&appointment));

        let from = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let window = AppointmentQuery::for_establishment("est-1").between(from, to);
        assert!(window.matches(&appointment));
        assert!(window.matches(&appointment_at(10)));
        assert!(!window.matches(&appointment_at(11)));
    }

    #[test]
    fn rating_query_by_establishment_skips_unlinked_ratings() {
        let unlinked = Rating::new("prof-1".into(), "c".into(), None, 4, String::new());
        let linked = Rating::new("prof-1".into(), "c".into(), Some("est-1".into()), 4, String::new());

        let query = RatingQuery::for_establishment("est-1");
        assert!(!query.matches(&unlinked));
        assert!(query.matches(&linked));
        assert!(RatingQuery::for_professional("prof-1").matches(&unlinked));
    }
}
