//! Dataset listing endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct DatasetItem {
    /// 1-based positional id, matching the legacy contract ("dataset1", ...).
    pub id: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DatasetsResponse {
    pub datasets: Vec<DatasetItem>,
}

/// GET /cellradar/getdatasets - List the registered datasets.
pub async fn get_datasets(State(state): State<SharedState>) -> Json<DatasetsResponse> {
    info!("listing datasets");
    let datasets = state
        .settings
        .dataset_names()
        .enumerate()
        .map(|(i, name)| DatasetItem {
            id: format!("dataset{}", i + 1),
            value: name.to_string(),
        })
        .collect();
    Json(DatasetsResponse { datasets })
}
