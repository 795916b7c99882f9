//! Health check route
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /health | GET | liveness plus employee row count |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "environment": "development", "employees": 5 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    /// Rows in the employees table; doubles as a database round trip
    employees: i64,
}

async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let employees = state.employees.count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        employees,
    }))
}
