use crate::error::Result;
use crate::services::import_service::ImportStats;
use crate::services::maintenance_service::MaintenanceStats;
use crate::AppState;
use axum::{extract::State, response::Json};

/// Trigger a full import run and return its statistics. Runs are serialized;
/// a trigger during an active run waits for it to finish.
pub async fn run_import(State(state): State<AppState>) -> Json<ImportStats> {
    let stats = state.import_service.run_import().await;
    Json(stats)
}

pub async fn renormalize_locations(State(state): State<AppState>) -> Result<Json<MaintenanceStats>> {
    Ok(Json(state.maintenance_service.renormalize_locations().await?))
}

pub async fn refresh_remote_flags(State(state): State<AppState>) -> Result<Json<MaintenanceStats>> {
    Ok(Json(state.maintenance_service.refresh_remote_flags().await?))
}

pub async fn backfill_slugs(State(state): State<AppState>) -> Result<Json<MaintenanceStats>> {
    Ok(Json(state.maintenance_service.backfill_slugs().await?))
}

pub async fn refresh_domains(State(state): State<AppState>) -> Result<Json<MaintenanceStats>> {
    Ok(Json(state.maintenance_service.refresh_domains().await?))
}

pub async fn prune_irrelevant(State(state): State<AppState>) -> Result<Json<MaintenanceStats>> {
    Ok(Json(state.maintenance_service.prune_irrelevant().await?))
}
