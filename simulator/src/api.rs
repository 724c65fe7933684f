//! HTTP surface of the ledger authority.
//!
//! A single endpoint dispatched on the `action` query parameter (the
//! contract the lobby client speaks), plus `/healthz` for liveness.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use royale_types::{BalanceResponse, ErrorResponse, HistoryResponse, TransferRequest, WagerRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::{Rejection, Simulator};

pub struct Api {
    simulator: Arc<Simulator>,
}

#[derive(Serialize)]
struct HealthzResponse {
    ok: bool,
}

#[derive(Deserialize)]
struct ActionQuery {
    action: Option<String>,
}

impl Api {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(query).post(submit))
            .route("/healthz", get(healthz))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.simulator.clone())
    }
}

async fn healthz() -> Response {
    Json(HealthzResponse { ok: true }).into_response()
}

async fn query(
    State(simulator): State<Arc<Simulator>>,
    Query(params): Query<ActionQuery>,
) -> Response {
    // A bare GET reads the balance.
    match params.action.as_deref().unwrap_or("balance") {
        "balance" => Json(BalanceResponse {
            balance: simulator.balance(),
        })
        .into_response(),
        "history" => Json(HistoryResponse {
            transactions: simulator.history(),
        })
        .into_response(),
        other => {
            debug!(action = other, "unknown query action");
            not_found()
        }
    }
}

async fn submit(
    State(simulator): State<Arc<Simulator>>,
    Query(params): Query<ActionQuery>,
    body: Bytes,
) -> Response {
    if let Some(delay) = simulator.settle_delay() {
        tokio::time::sleep(delay).await;
    }

    // Submissions must name their action; there is no default.
    match params.action.as_deref() {
        Some("transfer") => {
            let request: TransferRequest = match serde_json::from_slice(&body) {
                Ok(request) => request,
                Err(err) => return malformed("transfer", err),
            };
            match simulator.apply_transfer(&request) {
                Ok(balance) => Json(BalanceResponse { balance }).into_response(),
                Err(rejection) => reject(rejection),
            }
        }
        Some("play") => {
            let request: WagerRequest = match serde_json::from_slice(&body) {
                Ok(request) => request,
                Err(err) => return malformed("play", err),
            };
            match simulator.apply_wager(&request) {
                Ok(result) => Json(result).into_response(),
                Err(rejection) => reject(rejection),
            }
        }
        other => {
            debug!(action = ?other, "unknown submit action");
            not_found()
        }
    }
}

fn reject(rejection: Rejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.to_string(),
        }),
    )
        .into_response()
}

fn malformed(action: &str, err: serde_json::Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("invalid {action} request: {err}"),
        }),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "endpoint not found".to_string(),
        }),
    )
        .into_response()
}
