mod members;
mod reports;
mod upload;

pub mod health;

use axum::{
    Router,
    routing::{delete, get, post},
};
use serde::Deserialize;

use crate::AppState;

/// Shared `?skip=&limit=` query parameters for the list endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).max(0)
    }
}

/// Build the API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::create))
        .route("/members", get(members::list))
        .route("/members/{id}", delete(members::remove))
        .route("/reports", get(reports::list))
        .route("/reports/{id}", delete(reports::remove))
}
