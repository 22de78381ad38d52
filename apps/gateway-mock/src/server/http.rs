//! Axum router and handlers.
//!
//! Routes each Client Portal path to exactly one handler. Handlers are
//! independent and share only the order ledger through [`AppState`].
//! Every matched route answers HTTP 200 with a JSON body; unmatched
//! routes fall through to axum's default 404.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, SAMPLE_CONID};
use crate::ledger::OrderLedger;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The order ledger; the only mutable state in the process.
    pub ledger: Arc<OrderLedger>,
    /// Mock account id reported by the accounts endpoint.
    pub account_id: String,
}

impl AppState {
    /// Create state around a fresh ledger.
    #[must_use]
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            ledger: Arc::new(OrderLedger::new()),
            account_id: account_id.into(),
        }
    }
}

/// Create the router with every gateway endpoint.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/api/tickle", get(tickle).post(tickle))
        .route("/v1/api/iserver/auth/status", post(auth_status))
        .route("/v1/api/iserver/reauthenticate", post(reauthenticate))
        .route("/v1/api/iserver/accounts", get(get_accounts))
        .route(
            "/v1/api/iserver/account/{account_id}/orders",
            post(place_order),
        )
        .route(
            "/v1/api/iserver/account/{account_id}/order/{order_id}",
            post(modify_order).delete(cancel_order),
        )
        .route("/v1/api/iserver/account/orders", get(get_live_orders))
        .route(
            "/v1/api/portfolio/{account_id}/positions/0",
            get(get_positions),
        )
        .route("/v1/api/portfolio/{account_id}/summary", get(get_summary))
        .route("/v1/api/iserver/marketdata/snapshot", get(get_snapshot))
        .route("/v1/api/iserver/marketdata/history", get(get_history))
        .route("/v1/api/iserver/secdef/search", get(search_contracts))
        .with_state(state)
}

/// Liveness/auth heartbeat.
async fn tickle() -> Json<catalog::TickleResponse> {
    Json(catalog::tickle(Utc::now()))
}

/// Auth status; always authenticated.
async fn auth_status() -> Json<catalog::AuthStatusResponse> {
    Json(catalog::auth_status())
}

/// Reauthentication trigger; fixed acknowledgment.
async fn reauthenticate() -> Json<catalog::ReauthenticateResponse> {
    Json(catalog::reauthenticate())
}

/// Account listing; a single mock account.
async fn get_accounts(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(catalog::accounts(&state.account_id))
}

/// Response to a place-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    /// Assigned order id.
    pub id: String,
    /// Confirmation messages.
    pub message: Vec<String>,
    /// Assigned order id, duplicated as the real gateway does.
    pub order_id: String,
    /// Status assigned at creation; always `Submitted`.
    pub order_status: String,
}

/// Place an order against the ledger.
///
/// The body is opaque to the mock; a missing body is treated as an
/// empty object since some harnesses omit it.
async fn place_order(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    body: Option<Json<serde_json::Value>>,
) -> Json<PlaceOrderResponse> {
    let payload = body.map_or_else(|| serde_json::json!({}), |Json(v)| v);
    let (id, status) = state.ledger.place(&account_id, payload);

    tracing::info!(account = %account_id, order_id = %id, "Order placed");

    Json(PlaceOrderResponse {
        id: id.clone(),
        message: vec!["Order placed successfully".to_string()],
        order_id: id,
        order_status: status.to_string(),
    })
}

/// Response to a modify-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyOrderResponse {
    /// The order id from the request path.
    pub order_id: String,
    /// Status after the modification.
    pub order_status: String,
}

/// Modify an order in the ledger.
async fn modify_order(
    State(state): State<AppState>,
    Path((account_id, order_id)): Path<(String, String)>,
    body: Option<Json<serde_json::Value>>,
) -> Json<ModifyOrderResponse> {
    let patch = body.map_or_else(|| serde_json::json!({}), |Json(v)| v);
    let status = state.ledger.modify(&order_id, patch);

    tracing::info!(account = %account_id, order_id = %order_id, status = %status, "Order modified");

    Json(ModifyOrderResponse {
        order_id,
        order_status: status.to_string(),
    })
}

/// Response to a cancel-order request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    /// The order id from the request path.
    pub order_id: String,
    /// Submitted-style confirmation message.
    pub msg: String,
    /// Sample contract id.
    pub conid: i64,
    /// The account from the request path.
    pub account: String,
}

/// Cancel an order in the ledger. Idempotent; never errors.
async fn cancel_order(
    State(state): State<AppState>,
    Path((account_id, order_id)): Path<(String, String)>,
) -> Json<CancelOrderResponse> {
    let status = state.ledger.cancel(&order_id);

    tracing::info!(account = %account_id, order_id = %order_id, status = %status, "Order cancelled");

    Json(CancelOrderResponse {
        order_id,
        msg: "Request was submitted".to_string(),
        conid: SAMPLE_CONID,
        account: account_id,
    })
}

/// Live-orders listing: fixed sample plus ledger snapshots.
async fn get_live_orders(State(state): State<AppState>) -> Json<catalog::LiveOrdersResponse> {
    Json(catalog::live_orders(
        &state.account_id,
        &state.ledger.list(),
    ))
}

/// Fixed positions sample with the account id echoed.
async fn get_positions(
    Path(account_id): Path<String>,
) -> Json<Vec<catalog::PositionRecord>> {
    Json(catalog::positions(&account_id))
}

/// Fixed account summary with the account id echoed.
async fn get_summary(Path(account_id): Path<String>) -> Json<catalog::AccountSummary> {
    Json(catalog::account_summary(&account_id))
}

/// Query parameters for the snapshot endpoint.
#[derive(Debug, Deserialize)]
struct SnapshotParams {
    /// Comma-separated contract ids.
    #[serde(default)]
    conids: String,
}

/// Synthetic quotes, one per parsable conid.
async fn get_snapshot(
    Query(params): Query<SnapshotParams>,
) -> Json<Vec<catalog::SnapshotRecord>> {
    Json(catalog::snapshot(&params.conids, Utc::now()))
}

/// Fixed two-bar synthetic series regardless of requested range.
async fn get_history() -> Json<catalog::HistoryResponse> {
    Json(catalog::history(Utc::now()))
}

/// Query parameters for contract search.
#[derive(Debug, Deserialize)]
struct SearchParams {
    /// Symbol to search for.
    #[serde(default)]
    symbol: String,
}

/// Fixed contract descriptor with the symbol upper-cased.
async fn search_contracts(
    Query(params): Query<SearchParams>,
) -> Json<Vec<catalog::ContractDescriptor>> {
    Json(catalog::contract_search(&params.symbol))
}
