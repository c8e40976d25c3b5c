//! Radar curve endpoint.

use axum::extract::State;
use axum::Json;
use cellradar_core::{compute_radar, RadarOutcome};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct RadarRequest {
    pub dataset: String,
    pub genes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RadarResponse {
    pub status: &'static str,

    /// `[mean, lower, upper]` closed curves, present on success only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<[Vec<f64>; 3]>,

    /// Cell-type labels in curve order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<String>>,

    /// Newline-joined resolved gene symbols (legacy shape).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genes: Option<String>,

    pub msg: String,
}

impl From<RadarOutcome> for RadarResponse {
    fn from(outcome: RadarOutcome) -> Self {
        let status = outcome.status();
        let msg = outcome.message().to_string();
        match outcome {
            RadarOutcome::Success {
                curves,
                cell_types,
                genes,
            } => RadarResponse {
                status,
                values: Some([curves.mean, curves.lower, curves.upper]),
                cells: Some(cell_types),
                genes: Some(genes.join("\n")),
                msg,
            },
            _ => RadarResponse {
                status,
                values: None,
                cells: None,
                genes: None,
                msg,
            },
        }
    }
}

/// POST /cellradar/makeradar - Run the radar pipeline for one query.
pub async fn make_radar(
    State(state): State<SharedState>,
    Json(req): Json<RadarRequest>,
) -> Result<Json<RadarResponse>, ApiError> {
    info!(dataset = %req.dataset, genes = req.genes.len(), "radar request");

    // The pipeline is synchronous by design; keep it off the async workers.
    let settings = state.settings.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        compute_radar(&settings, &req.dataset, &req.genes)
    })
    .await??;

    Ok(Json(outcome.into()))
}
