use super::repository::{AppointmentQuery, MarketplaceRepository, RatingQuery, EMAIL_TAKEN};
use crate::models::{
    Appointment, Establishment, EstablishmentMember, Invitation, InvitationResponse, Procedure,
    Rating, User, UserKind, Weekday, WorkingHours,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// MongoDB-backed repository. One pooled client is shared by every request.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for serviflex-service");

        for kind in UserKind::ALL {
            self.create_index::<User>(kind.collection(), doc! { "email": 1 }, "email_unique", true)
                .await?;
        }
        self.create_index::<Procedure>(
            "procedures",
            doc! { "professional_id": 1, "name": 1 },
            "professional_procedure_lookup",
            false,
        )
        .await?;
        self.create_index::<WorkingHours>(
            "working_hours",
            doc! { "professional_id": 1, "weekday": 1 },
            "professional_weekday_lookup",
            false,
        )
        .await?;
        self.create_index::<EstablishmentMember>(
            "establishment_members",
            doc! { "establishment_id": 1 },
            "establishment_lookup",
            false,
        )
        .await?;
        self.create_index::<Invitation>(
            "invitations",
            doc! { "professional_id": 1, "answered": 1 },
            "pending_lookup",
            false,
        )
        .await?;
        for field in ["client_id", "professional_id", "establishment_id"] {
            let mut keys = Document::new();
            keys.insert(field, 1);
            keys.insert("date_time", 1);
            self.create_index::<Appointment>("appointments", keys, &format!("{}_date_lookup", field), false)
                .await?;
        }
        for field in ["professional_id", "establishment_id"] {
            let mut keys = Document::new();
            keys.insert(field, 1);
            self.create_index::<Rating>("ratings", keys, &format!("{}_lookup", field), false)
                .await?;
        }

        Ok(())
    }

    async fn create_index<T>(
        &self,
        collection: &str,
        keys: Document,
        name: &str,
        unique: bool,
    ) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .name(name.to_string())
                    .unique(unique)
                    .build(),
            )
            .build();

        self.db
            .collection::<T>(collection)
            .create_index(index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create index {} on {}: {}", name, collection, e);
                AppError::from(e)
            })?;
        tracing::info!("Created index {} on {}", name, collection);
        Ok(())
    }

    pub fn users(&self, kind: UserKind) -> Collection<User> {
        self.db.collection(kind.collection())
    }

    pub fn establishments(&self) -> Collection<Establishment> {
        self.db.collection("establishments")
    }

    pub fn members(&self) -> Collection<EstablishmentMember> {
        self.db.collection("establishment_members")
    }

    pub fn invitations(&self) -> Collection<Invitation> {
        self.db.collection("invitations")
    }

    pub fn procedures(&self) -> Collection<Procedure> {
        self.db.collection("procedures")
    }

    pub fn working_hours(&self) -> Collection<WorkingHours> {
        self.db.collection("working_hours")
    }

    pub fn appointments(&self) -> Collection<Appointment> {
        self.db.collection("appointments")
    }

    pub fn ratings(&self) -> Collection<Rating> {
        self.db.collection("ratings")
    }
}

/// Server error 11000: a unique index rejected the write.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == 11000
    )
}

fn user_write_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        AppError::conflict(EMAIL_TAKEN)
    } else {
        AppError::from(err)
    }
}

async fn find_all<T>(
    collection: Collection<T>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let cursor = collection.find(filter, options).await.map_err(|e| {
        tracing::error!("Failed to query {}: {}", collection.name(), e);
        AppError::from(e)
    })?;
    cursor.try_collect().await.map_err(AppError::from)
}

fn to_bson<T: serde::Serialize>(value: &T) -> Result<Bson, AppError> {
    Ok(bson::to_bson(value)?)
}

fn appointment_filter(query: &AppointmentQuery) -> Document {
    let mut filter = Document::new();
    if let Some(id) = &query.client_id {
        filter.insert("client_id", id);
    }
    if let Some(id) = &query.professional_id {
        filter.insert("professional_id", id);
    }
    if let Some(id) = &query.establishment_id {
        filter.insert("establishment_id", id);
    }

    let mut range = Document::new();
    if let Some(from) = query.from {
        range.insert("$gte", bson::DateTime::from_chrono(from));
    }
    if let Some(to) = query.to {
        range.insert("$lte", bson::DateTime::from_chrono(to));
    }
    if !range.is_empty() {
        filter.insert("date_time", range);
    }
    filter
}

fn rating_filter(query: &RatingQuery) -> Document {
    let mut filter = Document::new();
    if let Some(id) = &query.professional_id {
        filter.insert("professional_id", id);
    }
    if let Some(id) = &query.establishment_id {
        filter.insert("establishment_id", id);
    }
    filter
}

#[async_trait]
impl MarketplaceRepository for MongoDb {
    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn insert_user(&self, kind: UserKind, user: &User) -> Result<(), AppError> {
        self.users(kind)
            .insert_one(user, None)
            .await
            .map_err(user_write_error)
            .inspect_err(|e| {
                if !matches!(e, AppError::Conflict(_)) {
                    tracing::error!(user_id = %user.id, kind = %kind, "Failed to insert user: {}", e);
                }
            })?;
        Ok(())
    }

    async fn find_user(&self, kind: UserKind, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users(kind).find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_user_by_email(
        &self,
        kind: UserKind,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users(kind)
            .find_one(doc! { "email": email }, None)
            .await?)
    }

    async fn list_users(&self, kind: UserKind) -> Result<Vec<User>, AppError> {
        find_all(self.users(kind), doc! {}, None).await
    }

    async fn replace_user(&self, kind: UserKind, user: &User) -> Result<bool, AppError> {
        let result = self
            .users(kind)
            .replace_one(doc! { "_id": &user.id }, user, None)
            .await
            .map_err(user_write_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete_user(&self, kind: UserKind, id: &str) -> Result<bool, AppError> {
        let result = self.users(kind).delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn set_professional_establishment(
        &self,
        professional_id: &str,
        establishment_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let value = establishment_id.map_or(Bson::Null, |id| Bson::String(id.to_string()));
        let result = self
            .users(UserKind::Professionals)
            .update_one(
                doc! { "_id": professional_id },
                doc! { "$set": { "establishment_id": value } },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_professional_photo(
        &self,
        professional_id: &str,
        url: &str,
    ) -> Result<bool, AppError> {
        let result = self
            .users(UserKind::Professionals)
            .update_one(
                doc! { "_id": professional_id },
                doc! { "$set": { "photo_url": url } },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn insert_establishment(&self, establishment: &Establishment) -> Result<(), AppError> {
        self.establishments()
            .insert_one(establishment, None)
            .await
            .map_err(|e| {
                tracing::error!(establishment_id = %establishment.id, "Failed to insert establishment: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn find_establishment(&self, id: &str) -> Result<Option<Establishment>, AppError> {
        Ok(self.establishments().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_establishments(&self) -> Result<Vec<Establishment>, AppError> {
        find_all(self.establishments(), doc! {}, None).await
    }

    async fn replace_establishment(&self, establishment: &Establishment) -> Result<bool, AppError> {
        let result = self
            .establishments()
            .replace_one(doc! { "_id": &establishment.id }, establishment, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn upsert_member(&self, member: &EstablishmentMember) -> Result<(), AppError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.members()
            .replace_one(doc! { "_id": &member.id }, member, options)
            .await?;
        Ok(())
    }

    async fn delete_member(
        &self,
        establishment_id: &str,
        professional_id: &str,
    ) -> Result<bool, AppError> {
        let id = EstablishmentMember::member_id(establishment_id, professional_id);
        let result = self.members().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_members(
        &self,
        establishment_id: &str,
    ) -> Result<Vec<EstablishmentMember>, AppError> {
        find_all(
            self.members(),
            doc! { "establishment_id": establishment_id },
            None,
        )
        .await
    }

    async fn insert_invitation(&self, invitation: &Invitation) -> Result<(), AppError> {
        self.invitations().insert_one(invitation, None).await?;
        Ok(())
    }

    async fn find_invitation(&self, id: &str) -> Result<Option<Invitation>, AppError> {
        Ok(self.invitations().find_one(doc! { "_id": id }, None).await?)
    }

    async fn answer_invitation(
        &self,
        id: &str,
        response: InvitationResponse,
    ) -> Result<bool, AppError> {
        // Filtering on `answered: false` makes a concurrent second answer a no-op.
        let result = self
            .invitations()
            .update_one(
                doc! { "_id": id, "answered": false },
                doc! { "$set": { "answered": true, "response": to_bson(&response)? } },
                None,
            )
            .await?;
        Ok(result.modified_count > 0)
    }

    async fn list_pending_invitations(
        &self,
        professional_id: &str,
    ) -> Result<Vec<Invitation>, AppError> {
        find_all(
            self.invitations(),
            doc! { "professional_id": professional_id, "answered": false },
            None,
        )
        .await
    }

    async fn insert_procedure(&self, procedure: &Procedure) -> Result<(), AppError> {
        self.procedures().insert_one(procedure, None).await?;
        Ok(())
    }

    async fn find_procedure(&self, id: &str) -> Result<Option<Procedure>, AppError> {
        Ok(self.procedures().find_one(doc! { "_id": id }, None).await?)
    }

    async fn find_procedure_by_name(
        &self,
        professional_id: &str,
        name: &str,
    ) -> Result<Option<Procedure>, AppError> {
        Ok(self
            .procedures()
            .find_one(
                doc! { "professional_id": professional_id, "name": name },
                None,
            )
            .await?)
    }

    async fn list_procedures(
        &self,
        professional_id: Option<&str>,
    ) -> Result<Vec<Procedure>, AppError> {
        let filter = match professional_id {
            Some(id) => doc! { "professional_id": id },
            None => doc! {},
        };
        find_all(self.procedures(), filter, None).await
    }

    async fn replace_procedure(&self, procedure: &Procedure) -> Result<bool, AppError> {
        let result = self
            .procedures()
            .replace_one(doc! { "_id": &procedure.id }, procedure, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_procedure(&self, id: &str) -> Result<bool, AppError> {
        let result = self.procedures().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    async fn set_procedure_image(&self, id: &str, url: &str) -> Result<bool, AppError> {
        let result = self
            .procedures()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "image_url": url } },
                None,
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn insert_working_hours(&self, hours: &WorkingHours) -> Result<(), AppError> {
        self.working_hours().insert_one(hours, None).await?;
        Ok(())
    }

    async fn find_working_hours(&self, id: &str) -> Result<Option<WorkingHours>, AppError> {
        Ok(self.working_hours().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_working_hours(
        &self,
        professional_id: &str,
        weekday: Option<Weekday>,
    ) -> Result<Vec<WorkingHours>, AppError> {
        let mut filter = doc! { "professional_id": professional_id };
        if let Some(day) = weekday {
            filter.insert("weekday", day.as_str());
        }
        find_all(self.working_hours(), filter, None).await
    }

    async fn replace_working_hours(&self, hours: &WorkingHours) -> Result<bool, AppError> {
        let result = self
            .working_hours()
            .replace_one(doc! { "_id": &hours.id }, hours, None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_working_hours(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .working_hours()
            .delete_one(doc! { "_id": id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), AppError> {
        self.appointments()
            .insert_one(appointment, None)
            .await
            .map_err(|e| {
                tracing::error!(appointment_id = %appointment.id, "Failed to insert appointment: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn query_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> Result<Vec<Appointment>, AppError> {
        let options = FindOptions::builder().sort(doc! { "date_time": 1 }).build();
        find_all(self.appointments(), appointment_filter(query), Some(options)).await
    }

    async fn insert_rating(&self, rating: &Rating) -> Result<(), AppError> {
        self.ratings().insert_one(rating, None).await?;
        Ok(())
    }

    async fn query_ratings(&self, query: &RatingQuery) -> Result<Vec<Rating>, AppError> {
        find_all(self.ratings(), rating_filter(query), None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn appointment_filter_includes_only_set_fields() {
        let filter = appointment_filter(&AppointmentQuery::for_professional("prof-1"));
        assert_eq!(filter, doc! { "professional_id": "prof-1" });
    }

    #[test]
    fn appointment_filter_builds_date_range() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let filter = appointment_filter(&AppointmentQuery::for_establishment("est").between(from, to));

        let range = filter.get_document("date_time").unwrap();
        assert_eq!(
            range.get_datetime("$gte").unwrap(),
            &bson::DateTime::from_chrono(from)
        );
        assert_eq!(
            range.get_datetime("$lte").unwrap(),
            &bson::DateTime::from_chrono(to)
        );
    }

    #[test]
    fn rating_filter_by_establishment() {
        assert_eq!(
            rating_filter(&RatingQuery::for_establishment("est")),
            doc! { "establishment_id": "est" }
        );
    }
}
