//! Catalog home endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::catalog::CatalogSummary, AppState};

/// Record counts for the catalog home page
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog counts", body = CatalogSummary),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<CatalogSummary>> {
    let summary = state.services.catalog.summary().await?;
    Ok(Json(summary))
}
