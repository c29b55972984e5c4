// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod config;
pub mod http;
pub mod logging;
pub mod mail;
pub mod media;
pub mod persistence;
pub mod security;
