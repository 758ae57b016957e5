use std::sync::Arc;

use tracing::info;

use dbuddy::api::{create_router, AppState};
use dbuddy::{MySqlDatabase, OllamaClient, Settings, SqlChatAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "dbuddy=info,tower_http=info".into()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let settings = Settings::from_env();

    info!(model = %settings.ollama_model, "starting dbuddy server");

    let db = Arc::new(MySqlDatabase::new(&settings.database_url)?);
    let llm = Arc::new(OllamaClient::new(
        settings.ollama_host.clone(),
        settings.ollama_model.clone(),
    ));
    let agent = Arc::new(SqlChatAgent::new(llm, db.clone()));

    let state = AppState { agent, db };
    let app = create_router(state, &settings.static_dir);

    let addr = format!("0.0.0.0:{}", settings.port);
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
