pub mod auth;
pub mod config;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod logging;
pub mod models;
pub mod posts;
pub mod resume;
pub mod routes;
pub mod state;
pub mod store;
