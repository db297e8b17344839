mod appointment;
mod establishment;
mod invitation;
mod procedure;
mod rating;
mod user;
mod working_hours;

pub use appointment::Appointment;
pub use establishment::{Address, Establishment, EstablishmentMember, MemberStatus};
pub use invitation::{Invitation, InvitationKind, InvitationResponse};
pub use procedure::Procedure;
pub use rating::Rating;
pub use user::{User, UserKind};
pub use working_hours::{Weekday, WorkingHours};
