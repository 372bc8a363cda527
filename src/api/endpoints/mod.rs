pub mod chat;
pub mod health;
pub mod insights;
pub mod models;
pub mod reports;
pub mod summary;
pub mod synthetic;
pub mod trends;
