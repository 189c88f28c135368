pub mod fields;
pub mod generate;
pub mod handlers;
pub mod prompts;
