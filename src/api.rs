use crate::document::Hit;
use crate::engine::{SearchEngine, SearchError, SearchOptions};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub ranked: Option<bool>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub hits: Vec<HitResponse>,
}

#[derive(Debug, Serialize)]
pub struct HitResponse {
    pub corpus: String,
    pub name: String,
    pub score: f64,
    pub text: String,
}

impl From<Hit> for HitResponse {
    fn from(hit: Hit) -> Self {
        Self {
            corpus: hit.corpus,
            name: hit.name,
            score: hit.score,
            text: hit.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_documents: u32,
    pub total_terms: usize,
    pub avg_doc_length: f64,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        tracing::error!("API error: {}", message);

        // "No index yet" is a service-state problem, not a server bug.
        let status = match self.0.downcast_ref::<SearchError>() {
            Some(SearchError::IndexNotFound) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn search_documents(
    State(engine): State<Arc<SearchEngine>>,
    Query(req): Query<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut options = SearchOptions::default();
    if let Some(ranked) = req.ranked {
        options.ranked = ranked;
    }
    if let Some(limit) = req.limit {
        options.limit = limit;
    }

    let result = engine.search(&req.query, &options)?;

    let response = SearchResponse {
        query: req.query,
        total: result.total,
        hits: result.hits.into_iter().map(HitResponse::from).collect(),
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn get_stats(State(engine): State<Arc<SearchEngine>>) -> Result<impl IntoResponse, AppError> {
    let stats = engine.stats()?;

    let response = StatsResponse {
        total_documents: stats.total_documents,
        total_terms: stats.total_terms,
        avg_doc_length: stats.avg_doc_length,
    };

    Ok(Json(ApiResponse::success(response)))
}

// ========== Router ==========

/// Read-only search API. The index is build-once, so there are no write
/// routes; builds happen through the CLI before the server starts.
pub fn create_router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search_documents))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}
