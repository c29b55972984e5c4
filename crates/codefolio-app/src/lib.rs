//! Codefolio API server: GraphQL and REST over the profile, social and
//! dashboard services.

pub mod application;
pub mod presentation;

pub use application::config::AppConfig;
pub use presentation::bootstrap::build_app_state;
pub use presentation::server::serve;
