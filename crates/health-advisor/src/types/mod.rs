//! Core types for the health advisor

pub mod advice;
pub mod message;

pub use advice::{AdviceResult, Attachment};
pub use message::{Message, Role};
