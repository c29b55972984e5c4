mod aggregate;
mod repository;
mod value_objects;

pub use aggregate::{ProfileChanges, User};
pub use repository::UserRepository;
pub use value_objects::{validate_password, Email, ProviderHandle};
