//! Provider abstractions for the generative model and the report archive
//!
//! Each concern has a trait plus interchangeable backends, so the endpoint
//! can run against Gemini and Dropbox in production, a local directory in
//! development, and recording stubs in tests. A provider whose credential is
//! missing at startup is represented by an explicit unavailable type.

pub mod archive;
pub mod dropbox;
pub mod gemini;
pub mod llm;
pub mod local;
pub mod unavailable;

pub use archive::{destination_path, ArchiveProvider};
pub use dropbox::DropboxArchiver;
pub use gemini::GeminiClient;
pub use llm::LlmProvider;
pub use local::LocalArchiver;
pub use unavailable::{UnavailableArchive, UnavailableModel};
