pub mod dashboard;
pub mod health;
pub mod sessions;
pub mod users;
