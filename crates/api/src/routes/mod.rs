//! HTTP route handlers.

pub mod auth;
pub mod campaigns;
pub mod feedbacks;
pub mod health;
pub mod metrics;
pub mod users;
