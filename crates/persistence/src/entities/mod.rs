//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod campaign;
pub mod feedback;
pub mod metric;
pub mod user;

pub use campaign::CampaignEntity;
pub use feedback::FeedbackEntity;
pub use metric::MetricEntity;
pub use user::UserEntity;
