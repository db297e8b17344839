//! Demo records for local runs, enabled with `SEED_DEMO_DATA=true`.

use super::repository::MarketplaceRepository;
use crate::models::{Address, Establishment, EstablishmentMember, User, UserKind};
use crate::utils::hash_password;
use service_core::error::AppError;

pub const DEMO_PROFESSIONAL_EMAIL: &str = "maria@serviflex.test";
pub const DEMO_CLIENT_EMAIL: &str = "joao@serviflex.test";
pub const DEMO_PASSWORD: &str = "demo-password";

/// Inserts a demo establishment, a professional working there and a client.
///
/// Returns `false` without touching anything when the demo professional
/// already exists, so restarts do not duplicate the records.
pub async fn seed_demo_data(repo: &dyn MarketplaceRepository) -> Result<bool, AppError> {
    if repo
        .find_user_by_email(UserKind::Professionals, DEMO_PROFESSIONAL_EMAIL)
        .await?
        .is_some()
    {
        tracing::info!("Demo data already present, skipping seed");
        return Ok(false);
    }

    let password_hash = hash_password(DEMO_PASSWORD)?;

    let establishment = Establishment::new(
        "Studio da Beleza".to_string(),
        "Beauty and wellness studio".to_string(),
        "https://images.serviflex.test/studio.jpg".to_string(),
        "Beauty".to_string(),
        Address {
            street: "Rua das Flores, 123".to_string(),
            city: "Uberlândia".to_string(),
            state: "MG".to_string(),
        },
        None,
    );
    repo.insert_establishment(&establishment).await?;

    let mut professional = User::new(
        "Maria Silva".to_string(),
        DEMO_PROFESSIONAL_EMAIL.to_string(),
        password_hash.clone(),
    );
    professional.phone = Some("(34) 99999-9999".to_string());
    professional.photo_url = Some("https://images.serviflex.test/maria.jpg".to_string());
    professional.establishment_id = Some(establishment.id.clone());
    repo.insert_user(UserKind::Professionals, &professional)
        .await?;
    repo.upsert_member(&EstablishmentMember::active(
        &establishment.id,
        &professional.id,
        professional.name.clone(),
    ))
    .await?;

    let mut client = User::new(
        "João Cliente".to_string(),
        DEMO_CLIENT_EMAIL.to_string(),
        password_hash,
    );
    client.phone = Some("(34) 98888-7777".to_string());
    repo.insert_user(UserKind::Clients, &client).await?;

    tracing::info!(
        establishment_id = %establishment.id,
        professional_id = %professional.id,
        client_id = %client.id,
        "Seeded demo data"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryRepository;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let repo = InMemoryRepository::new();
        assert!(seed_demo_data(&repo).await.unwrap());
        assert!(!seed_demo_data(&repo).await.unwrap());

        assert_eq!(repo.list_establishments().await.unwrap().len(), 1);
        assert_eq!(repo.list_users(UserKind::Professionals).await.unwrap().len(), 1);
        assert_eq!(repo.list_users(UserKind::Clients).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn demo_professional_is_an_active_member() {
        let repo = InMemoryRepository::new();
        seed_demo_data(&repo).await.unwrap();

        let establishment = repo.list_establishments().await.unwrap().remove(0);
        let members = repo.list_members(&establishment.id).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Maria Silva");
    }
}
