mod codes;
mod encryption;
mod jwt;
mod password;

pub use codes::generate_code;
pub use encryption::{EncryptionError, EncryptionService};
pub use jwt::JwtService;
pub use password::{PasswordHashParams, PasswordService};
