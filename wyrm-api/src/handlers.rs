//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use wyrm_core::types::AccountAddress;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn parse_owner(s: &str) -> Result<AccountAddress> {
    AccountAddress::from_hex(s)
        .map_err(|e| ApiError::bad_request(format!("invalid address: {e}")))
}

fn parse_payment(s: &str) -> Result<u128> {
    s.trim()
        .parse::<u128>()
        .map_err(|_| ApiError::bad_request(format!("invalid payment amount: {s:?}")))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// POST /api/v1/names
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<EntryDto>> {
    let owner = parse_owner(&req.owner)?;
    let payment = parse_payment(&req.payment)?;

    let entry = state.service.register(owner, &req.name, payment).await?;

    debug!(name = %entry.name, owner = %entry.owner, "Registered via API");
    Ok(Json(EntryDto::from(entry)))
}

/// GET /api/v1/names
pub async fn list_names(State(state): State<Arc<AppState>>) -> Result<Json<ListResponse>> {
    let rows = state.service.list_all().await?;
    let count = rows.len() as u64;

    Ok(Json(ListResponse {
        names: rows.into_iter().map(NameRow::from).collect(),
        count,
    }))
}

/// GET /api/v1/names/:name
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<EntryDto>> {
    let entry = state.service.entry_of(&name).await?;
    Ok(Json(EntryDto::from(entry)))
}

/// GET /api/v1/names/:name/owner
pub async fn get_owner(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<OwnerResponse>> {
    let entry = state.service.entry_of(&name).await?;
    Ok(Json(OwnerResponse {
        name: entry.name.to_string(),
        owner: entry.owner.to_hex_string(),
    }))
}

/// GET /api/v1/names/:name/record
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RecordResponse>> {
    let entry = state.service.entry_of(&name).await?;
    Ok(Json(RecordResponse {
        name: entry.name.to_string(),
        record: entry.record,
    }))
}

/// PUT /api/v1/names/:name/record
pub async fn set_record(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<SetRecordRequest>,
) -> Result<Json<EntryDto>> {
    let caller = parse_owner(&req.caller)?;

    let updated = state.service.set_record(caller, &name, req.record).await?;
    Ok(Json(EntryDto::from(updated)))
}

/// GET /api/v1/names/:name/quote
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<QuoteResponse>> {
    let quote = state.service.quote(&name)?;
    Ok(Json(QuoteResponse::new(name, quote)))
}
