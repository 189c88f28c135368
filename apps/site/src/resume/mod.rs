//! Resume build pipeline.
//!
//! `fetch-resume` drives [`pipeline::run`]; the other modules are its stages.

pub mod fetcher;
pub mod fingerprint;
pub mod pipeline;
pub mod profile_sync;
pub mod prompts;
pub mod summarizer;
pub mod summary;
