//! Services layer for serviflex-service.
//!
//! Persistence behind [`MarketplaceRepository`], plus the scheduling and
//! report logic the handlers call into.

mod database;
mod memory;
pub mod metrics;
pub mod reports;
mod repository;
pub mod scheduling;
pub mod seed;

pub use database::MongoDb;
pub use memory::InMemoryRepository;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{AppointmentQuery, MarketplaceRepository, RatingQuery, EMAIL_TAKEN};
