//! Domain layer for the PromptCampaign backend.
//!
//! This crate contains:
//! - Domain models (User, Campaign, Metric, Feedback)
//! - Request/response payload types with validation
//! - The pure metrics-derivation computation

pub mod derivation;
pub mod models;
