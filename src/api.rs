//! HTTP boundary for the query pipeline.
//!
//! Thin axum layer: request validation, outcome-to-JSON mapping, a schema
//! endpoint, and a health endpoint that checks database reachability without
//! touching the SQL pipeline.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::agent::{QueryOutcome, SqlChatAgent};
use crate::database::DatabaseService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<SqlChatAgent>,
    pub db: Arc<dyn DatabaseService>,
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Response for `/api/query`: success carries `sql_query` and `response`,
/// failure carries `error` and, when one existed, the attempted `sql_query`.
#[derive(Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SchemaResponse {
    pub success: bool,
    pub schema: String,
}

/// Body for boundary-level failures: always a message, never an empty reply.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message.into(),
        }),
    )
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/api/query", post(process_query))
        .route("/api/schema", get(get_schema))
        .route("/api/health", get(health_check))
        // Chat UI assets
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Process a natural-language query end-to-end.
async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Rejected here, before the pipeline ever runs.
    if request.query.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Query cannot be empty",
        ));
    }

    let response = match state.agent.process(&request.query).await {
        QueryOutcome::Success {
            sql_query,
            response,
            ..
        } => QueryResponse {
            success: true,
            response: Some(response),
            sql_query: Some(sql_query),
            error: None,
        },
        QueryOutcome::Failure { error, sql_query } => QueryResponse {
            success: false,
            response: None,
            sql_query,
            error: Some(error),
        },
    };

    Ok(Json(response))
}

/// Surface the schema description directly.
async fn get_schema(
    State(state): State<AppState>,
) -> Result<Json<SchemaResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.agent.schema().await {
        Ok(schema) => Ok(Json(SchemaResponse {
            success: true,
            schema: schema.to_string(),
        })),
        Err(e) => {
            warn!(error = %e, "failed to describe schema");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ))
        }
    }
}

/// Report database reachability without running the SQL pipeline.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.db.ping().await.is_ok();
    Json(HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        database: if connected {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
    })
}
