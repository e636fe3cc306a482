//! Shared utilities for the PromptCampaign backend.
//!
//! This crate provides common functionality used by the other crates:
//! - JWT token issuing and verification
//! - Password hashing with Argon2id

pub mod jwt;
pub mod password;
