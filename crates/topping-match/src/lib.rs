//! Kiosk service matching booth visitors to an ice-cream topping.
//!
//! The [`matching`] module holds the deterministic decision engine (question
//! bank plus scoring); the [`conversation`] module drives the Hebrew chat
//! flow around it, including free-text resolution through a remote
//! generative-language collaborator.

pub mod config;
pub mod conversation;
pub mod error;
pub mod matching;
pub mod telemetry;
