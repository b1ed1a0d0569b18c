mod publication_repository;
mod traits;
mod user_repository;

pub use publication_repository::PublicationRepositoryImpl;
pub use traits::{
    AuthRepository, PublicationRepository, PublicationSearchParams, UserRepository,
};
pub use user_repository::{AuthRepositoryImpl, UserRepositoryImpl};
