pub mod password;
pub mod user_id;
pub mod validation;

pub use password::{hash_password, verify_password};
pub use user_id::OptionalUserId;
pub use validation::ValidatedJson;
