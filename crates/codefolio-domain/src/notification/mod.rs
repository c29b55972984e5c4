mod aggregate;
mod repository;

pub use aggregate::{Notification, NotificationKind};
pub use repository::NotificationRepository;
