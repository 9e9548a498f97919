//! Record schemas for the two panels.

pub mod lead;
pub mod user;
pub mod validate;

pub use lead::{Lead, LeadFields, LeadForm, LeadStatus};
pub use user::{Role, User, UserEdit, UserForm, UserStatus, seed_users};
