use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::{DayEvents, InventoryState};
use crate::engine::inventory;
use crate::error::AppError;
use crate::store::StoreError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineRequest {
    pub on_hand: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: Uuid,
    pub on_hand: f64,
    pub days_passed: u32,
}

impl LineResponse {
    fn new(id: Uuid, state: InventoryState) -> Self {
        Self {
            id,
            on_hand: state.on_hand,
            days_passed: state.days_passed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfDayRequest {
    #[serde(default)]
    pub daily_sales: f64,
    #[serde(default)]
    pub incoming_stock: f64,
    /// Today's load; at or above the unsafe threshold the whole line is wasted.
    pub microbial_count: Option<f64>,
    /// Explicit waste, overriding the threshold policy.
    pub wasted: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfDayResponse {
    #[serde(flatten)]
    pub line: LineResponse,
    pub wasted: f64,
}

pub async fn create_line(
    State(state): State<AppState>,
    Json(req): Json<CreateLineRequest>,
) -> Result<Json<LineResponse>, AppError> {
    let (id, line) = state.inventory.create(req.on_hand)?;
    tracing::info!(line = %id, on_hand = line.on_hand, "inventory line created");
    Ok(Json(LineResponse::new(id, line)))
}

pub async fn get_line(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state
        .inventory
        .get(&id)
        .ok_or(StoreError::NotFound(id))?;
    Ok(Json(LineResponse::new(id, line)))
}

/// Close a line and report its final state.
pub async fn delete_line(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<LineResponse>, AppError> {
    let line = state.inventory.remove(&id)?;
    tracing::info!(
        line = %id,
        on_hand = line.on_hand,
        day = line.days_passed,
        "inventory line closed"
    );
    Ok(Json(LineResponse::new(id, line)))
}

/// Close the day for one line. Runs under the registry lock so steps on the
/// same line never interleave.
pub async fn end_of_day(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(req): Json<EndOfDayRequest>,
) -> Result<Json<EndOfDayResponse>, AppError> {
    let engine = state.gompertz.clone();
    let mut wasted = 0.0;

    let next = state.inventory.apply(&id, |current| match req.wasted {
        Some(explicit) => {
            wasted = explicit;
            inventory::step(
                current,
                DayEvents::new(req.daily_sales, req.incoming_stock, explicit),
            )
        }
        None => {
            wasted = engine.wasted_units(current, req.microbial_count);
            engine.end_of_day(current, req.daily_sales, req.incoming_stock, req.microbial_count)
        }
    })?;

    tracing::info!(
        line = %id,
        day = next.days_passed,
        on_hand = next.on_hand,
        wasted,
        "end of day applied"
    );

    Ok(Json(EndOfDayResponse {
        line: LineResponse::new(id, next),
        wasted,
    }))
}
