//! cellradar-web — HTTP surface for the CellRadar backend.
//!
//! Thin JSON glue over `cellradar-core`: the legacy `/cellradar/*` routes
//! with permissive CORS, serving the radar pipeline to browser clients.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
