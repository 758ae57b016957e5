//! dbuddy - a chat front end over a MySQL database.
//!
//! Natural language goes in, a narrated answer comes out. Per request:
//!
//! ```text
//! question → schema (cached) → LLM → SQL → denylist check → execute → LLM → answer
//! ```
//!
//! The pipeline lives in [`agent::SqlChatAgent`]; the database and language
//! model sit behind the [`database::DatabaseService`] and
//! [`llm_client::LlmClient`] traits so both can be mocked in tests.
//! Only read paths exist: mutating statements are rejected before execution.

pub mod agent;
pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod llm_client;
pub mod ollama_client;
pub mod schema;

// Re-exports for convenience
pub use agent::{QueryOutcome, SqlChatAgent};
pub use config::Settings;
pub use database::{DatabaseService, MySqlDatabase, ResultRow, ResultSet};
pub use error::{AgentError, DatabaseError, LlmError};
pub use llm_client::LlmClient;
pub use ollama_client::OllamaClient;
