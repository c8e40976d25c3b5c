//! Cell-type listing endpoint.

use axum::extract::State;
use axum::Json;
use cellradar_store::DatasetReader;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CellsRequest {
    pub dataset: String,
}

#[derive(Debug, Serialize)]
pub struct CellsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<String>>,
    pub msg: String,
}

/// POST /cellradar/getcells - Ordered cell-type labels for one dataset.
pub async fn get_cells(
    State(state): State<SharedState>,
    Json(req): Json<CellsRequest>,
) -> Result<Json<CellsResponse>, ApiError> {
    info!(dataset = %req.dataset, "cell-type request");

    let Some(entry) = state.settings.resolve_dataset(&req.dataset) else {
        warn!(dataset = %req.dataset, "cell-type request for unregistered dataset");
        return Ok(Json(CellsResponse {
            cells: None,
            msg: "Invalid dataset".to_string(),
        }));
    };

    let path = entry.path.clone();
    let cells = tokio::task::spawn_blocking(move || -> cellradar_store::Result<Vec<String>> {
        let reader = DatasetReader::open(&path)?;
        reader.cell_types()
    })
    .await??;

    Ok(Json(CellsResponse {
        cells: Some(cells),
        msg: "OK".to_string(),
    }))
}
