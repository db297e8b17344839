//! Mutex-guarded in-process store used by the test suite and by
//! `STORAGE_BACKEND=memory`.

use super::repository::{AppointmentQuery, MarketplaceRepository, RatingQuery, EMAIL_TAKEN};
use crate::models::{
    Appointment, Establishment, EstablishmentMember, Invitation, InvitationResponse, Procedure,
    Rating, User, UserKind, Weekday, WorkingHours,
};
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    clients: Vec<User>,
    professionals: Vec<User>,
    admins: Vec<User>,
    establishments: Vec<Establishment>,
    members: Vec<EstablishmentMember>,
    invitations: Vec<Invitation>,
    procedures: Vec<Procedure>,
    working_hours: Vec<WorkingHours>,
    appointments: Vec<Appointment>,
    ratings: Vec<Rating>,
}

impl Collections {
    fn users(&mut self, kind: UserKind) -> &mut Vec<User> {
        match kind {
            UserKind::Clients => &mut self.clients,
            UserKind::Professionals => &mut self.professionals,
            UserKind::Admin => &mut self.admins,
        }
    }

    /// Emails are unique across every user collection.
    fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.clients
            .iter()
            .chain(&self.professionals)
            .chain(&self.admins)
            .any(|u| u.email == email && Some(u.id.as_str()) != except_id)
    }
}

#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<Collections>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, AppError> {
        self.inner
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e)))
    }
}

/// Replaces the element with the same id; `false` when there is none.
fn replace_by<T: Clone>(items: &mut [T], value: &T, same: impl Fn(&T) -> bool) -> bool {
    match items.iter_mut().find(|item| same(item)) {
        Some(slot) => {
            *slot = value.clone();
            true
        }
        None => false,
    }
}

fn remove_by<T>(items: &mut Vec<T>, same: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !same(item));
    items.len() != before
}

#[async_trait]
impl MarketplaceRepository for InMemoryRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }

    async fn insert_user(&self, kind: UserKind, user: &User) -> Result<(), AppError> {
        let mut store = self.lock()?;
        if store.email_taken(&user.email, None) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        store.users(kind).push(user.clone());
        Ok(())
    }

    async fn find_user(&self, kind: UserKind, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users(kind).iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(
        &self,
        kind: UserKind,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()?
            .users(kind)
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users(&self, kind: UserKind) -> Result<Vec<User>, AppError> {
        Ok(self.lock()?.users(kind).clone())
    }

    async fn replace_user(&self, kind: UserKind, user: &User) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        if store.email_taken(&user.email, Some(&user.id)) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        Ok(replace_by(store.users(kind), user, |u| u.id == user.id))
    }

    async fn delete_user(&self, kind: UserKind, id: &str) -> Result<bool, AppError> {
        Ok(remove_by(self.lock()?.users(kind), |u| u.id == id))
    }

    async fn set_professional_establishment(
        &self,
        professional_id: &str,
        establishment_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        match store.professionals.iter_mut().find(|u| u.id == professional_id) {
            Some(professional) => {
                professional.establishment_id = establishment_id.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_professional_photo(
        &self,
        professional_id: &str,
        url: &str,
    ) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        match store.professionals.iter_mut().find(|u| u.id == professional_id) {
            Some(professional) => {
                professional.photo_url = Some(url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_establishment(&self, establishment: &Establishment) -> Result<(), AppError> {
        self.lock()?.establishments.push(establishment.clone());
        Ok(())
    }

    async fn find_establishment(&self, id: &str) -> Result<Option<Establishment>, AppError> {
        Ok(self
            .lock()?
            .establishments
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn list_establishments(&self) -> Result<Vec<Establishment>, AppError> {
        Ok(self.lock()?.establishments.clone())
    }

    async fn replace_establishment(&self, establishment: &Establishment) -> Result<bool, AppError> {
        Ok(replace_by(
            &mut self.lock()?.establishments,
            establishment,
            |e| e.id == establishment.id,
        ))
    }

    async fn upsert_member(&self, member: &EstablishmentMember) -> Result<(), AppError> {
        let mut store = self.lock()?;
        if !replace_by(&mut store.members, member, |m| m.id == member.id) {
            store.members.push(member.clone());
        }
        Ok(())
    }

    async fn delete_member(
        &self,
        establishment_id: &str,
        professional_id: &str,
    ) -> Result<bool, AppError> {
        let id = EstablishmentMember::member_id(establishment_id, professional_id);
        Ok(remove_by(&mut self.lock()?.members, |m| m.id == id))
    }

    async fn list_members(
        &self,
        establishment_id: &str,
    ) -> Result<Vec<EstablishmentMember>, AppError> {
        Ok(self
            .lock()?
            .members
            .iter()
            .filter(|m| m.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    async fn insert_invitation(&self, invitation: &Invitation) -> Result<(), AppError> {
        self.lock()?.invitations.push(invitation.clone());
        Ok(())
    }

    async fn find_invitation(&self, id: &str) -> Result<Option<Invitation>, AppError> {
        Ok(self
            .lock()?
            .invitations
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn answer_invitation(
        &self,
        id: &str,
        response: InvitationResponse,
    ) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        match store
            .invitations
            .iter_mut()
            .find(|i| i.id == id && !i.answered)
        {
            Some(invitation) => {
                invitation.answered = true;
                invitation.response = Some(response);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_pending_invitations(
        &self,
        professional_id: &str,
    ) -> Result<Vec<Invitation>, AppError> {
        Ok(self
            .lock()?
            .invitations
            .iter()
            .filter(|i| i.professional_id == professional_id && !i.answered)
            .cloned()
            .collect())
    }

    async fn insert_procedure(&self, procedure: &Procedure) -> Result<(), AppError> {
        self.lock()?.procedures.push(procedure.clone());
        Ok(())
    }

    async fn find_procedure(&self, id: &str) -> Result<Option<Procedure>, AppError> {
        Ok(self.lock()?.procedures.iter().find(|p| p.id == id).cloned())
    }

    async fn find_procedure_by_name(
        &self,
        professional_id: &str,
        name: &str,
    ) -> Result<Option<Procedure>, AppError> {
        Ok(self
            .lock()?
            .procedures
            .iter()
            .find(|p| p.professional_id == professional_id && p.name == name)
            .cloned())
    }

    async fn list_procedures(
        &self,
        professional_id: Option<&str>,
    ) -> Result<Vec<Procedure>, AppError> {
        Ok(self
            .lock()?
            .procedures
            .iter()
            .filter(|p| professional_id.is_none_or(|id| p.professional_id == id))
            .cloned()
            .collect())
    }

    async fn replace_procedure(&self, procedure: &Procedure) -> Result<bool, AppError> {
        Ok(replace_by(&mut self.lock()?.procedures, procedure, |p| {
            p.id == procedure.id
        }))
    }

    async fn delete_procedure(&self, id: &str) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.lock()?.procedures, |p| p.id == id))
    }

    async fn set_procedure_image(&self, id: &str, url: &str) -> Result<bool, AppError> {
        let mut store = self.lock()?;
        match store.procedures.iter_mut().find(|p| p.id == id) {
            Some(procedure) => {
                procedure.image_url = Some(url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_working_hours(&self, hours: &WorkingHours) -> Result<(), AppError> {
        self.lock()?.working_hours.push(hours.clone());
        Ok(())
    }

    async fn find_working_hours(&self, id: &str) -> Result<Option<WorkingHours>, AppError> {
        Ok(self
            .lock()?
            .working_hours
            .iter()
            .find(|h| h.id == id)
            .cloned())
    }

    async fn list_working_hours(
        &self,
        professional_id: &str,
        weekday: Option<Weekday>,
    ) -> Result<Vec<WorkingHours>, AppError> {
        Ok(self
            .lock()?
            .working_hours
            .iter()
            .filter(|h| h.professional_id == professional_id)
            .filter(|h| weekday.is_none_or(|day| h.weekday == day))
            .cloned()
            .collect())
    }

    async fn replace_working_hours(&self, hours: &WorkingHours) -> Result<bool, AppError> {
        Ok(replace_by(&mut self.lock()?.working_hours, hours, |h| {
            h.id == hours.id
        }))
    }

    async fn delete_working_hours(&self, id: &str) -> Result<bool, AppError> {
        Ok(remove_by(&mut self.lock()?.working_hours, |h| h.id == id))
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), AppError> {
        self.lock()?.appointments.push(appointment.clone());
        Ok(())
    }

    async fn query_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, AppError> {
        let mut appointments: Vec<Appointment> = self
            .lock()?
            .appointments
            .iter()
            .filter(|a| query.matches(a))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.date_time);
        Ok(appointments)
    }

    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError> {
        self.lock()?.ratings.push(rating.clone());
        Ok(())
    }

    async fn query_ratings(&self, query: &RatingQuery) -> Result<Vec<Rating>, AppError> {
        Ok(self
            .lock()?
            .ratings
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }
}
