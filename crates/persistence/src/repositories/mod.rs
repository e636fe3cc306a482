//! Repository implementations for database operations.

pub mod campaign;
pub mod feedback;
pub mod metric;
pub mod user;

pub use campaign::CampaignRepository;
pub use feedback::FeedbackRepository;
pub use metric::MetricRepository;
pub use user::UserRepository;
