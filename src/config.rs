//! Environment-driven application settings.
//!
//! Everything comes from environment variables (with `.env` support via
//! dotenvy in the binary). `DATABASE_URL` wins when set; otherwise the URL
//! is composed from the individual `MYSQL_*` variables.

/// Settings for the server binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ollama_host: String,
    pub ollama_model: String,
    pub database_url: String,
    pub port: u16,
    pub static_dir: String,
}

impl Settings {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = env_or("MYSQL_HOST", "localhost");
            let port = env_or("MYSQL_PORT", "3306");
            let user = env_or("MYSQL_USER", "root");
            let password = std::env::var("MYSQL_PASSWORD").unwrap_or_default();
            let database = env_or("MYSQL_DATABASE", "test");
            format!("mysql://{}:{}@{}:{}/{}", user, password, host, port, database)
        });

        Self {
            ollama_host: env_or("OLLAMA_HOST", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama2"),
            database_url,
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            static_dir: env_or("STATIC_DIR", "static"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
