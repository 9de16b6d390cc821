//! health-advisor: health-advice service with medical report ingestion
//!
//! This crate accepts a health question plus an optional PDF medical report,
//! archives the report to a remote store on a best-effort basis, extracts its
//! text, and asks a generative model for an answer. The single HTTP operation
//! (`POST /api/health-advice`) always answers with a tagged result envelope.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod server;
pub mod types;

pub use config::AdvisorConfig;
pub use error::{Error, Result};
pub use processing::AdviceProcessor;
pub use types::{
    advice::{AdviceResult, Attachment},
    message::{Message, Role},
};
