//! Application services.

pub mod analysis;
pub mod auth;

pub use analysis::AnalysisService;
pub use auth::AuthService;
