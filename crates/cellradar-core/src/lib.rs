//! cellradar-core — Radar curve computation pipeline.
//!
//! Turns a dataset name and a list of gene names into three normalised,
//! closed expression curves (median, median of mean−std, median of
//! mean+std across the requested genes), one value per cell type plus a
//! wrap-around point for polar rendering.

pub mod aggregate;
pub mod genes;
pub mod normalise;
pub mod pipeline;

pub use pipeline::{compute_radar, RadarCurves, RadarOutcome};
