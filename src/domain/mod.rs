mod publication;
mod user;

pub use publication::{Category, Condition, Publication, SortKey};
pub use user::{AuthIdentity, User};
