//! Request-scoped radar computation.
//!
//! One call per request: validate input, canonicalise gene names, resolve
//! them against the dataset store, reduce to per-cell-type medians, then
//! min-max scale and close each curve. The store handle lives only for
//! the resolution phase.

use std::collections::HashSet;

use cellradar_config::Settings;
use cellradar_store::{DatasetReader, StoreError};
use tracing::{debug, info, warn};

use crate::aggregate::{median_series, ResolvedGene};
use crate::genes::canonical_symbol;
use crate::normalise::normalise_closed;

/// The three closed, normalised curves, each of length N+1.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarCurves {
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Outcome of one pipeline run. Every terminal state of the computation
/// has its own variant; store-level failures are a separate `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum RadarOutcome {
    Success {
        curves: RadarCurves,
        /// Cell-type labels in store order, one per curve point before closing.
        cell_types: Vec<String>,
        /// Canonical symbols that actually contributed, in query order.
        genes: Vec<String>,
    },
    EmptyGeneList,
    UnknownDataset,
    NoGenesResolved,
}

impl RadarOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RadarOutcome::Success { .. } => "OK",
            RadarOutcome::EmptyGeneList => "EMPTY_GENES",
            RadarOutcome::UnknownDataset => "UNKNOWN_DATASET",
            RadarOutcome::NoGenesResolved => "NO_GENES_RESOLVED",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RadarOutcome::Success { .. } => "OK",
            RadarOutcome::EmptyGeneList => "Please enter at least one gene name",
            RadarOutcome::UnknownDataset => "Selected dataset is invalid",
            RadarOutcome::NoGenesResolved => "None of the entered gene names is valid",
        }
    }
}

/// Compute the radar curves for one dataset and gene query.
///
/// Individual lookup misses are filtered silently; the pipeline proceeds
/// as long as at least one gene resolves. Duplicate symbols (after
/// canonicalisation) are resolved once, first occurrence kept.
pub fn compute_radar(
    settings: &Settings,
    dataset: &str,
    gene_names: &[String],
) -> Result<RadarOutcome, StoreError> {
    if gene_names.is_empty() {
        return Ok(RadarOutcome::EmptyGeneList);
    }
    let Some(entry) = settings.resolve_dataset(dataset) else {
        warn!(dataset, "radar request for unregistered dataset");
        return Ok(RadarOutcome::UnknownDataset);
    };

    let reader = DatasetReader::open(&entry.path)?;
    let cell_types = reader.cell_types()?;
    let n = cell_types.len();

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for raw in gene_names {
        let symbol = canonical_symbol(raw);
        if !seen.insert(symbol.clone()) {
            continue;
        }
        match reader.lookup_gene(&symbol)? {
            None => debug!(%symbol, "gene not present in dataset"),
            Some(stats) => {
                if stats.mean.len() != n {
                    return Err(StoreError::ShapeMismatch {
                        symbol,
                        expected: n,
                        actual: stats.mean.len(),
                    });
                }
                resolved.push(ResolvedGene { symbol, stats });
            }
        }
    }
    drop(reader); // the store handle is not held across the numeric stage

    if resolved.is_empty() {
        return Ok(RadarOutcome::NoGenesResolved);
    }
    info!(dataset, genes = resolved.len(), cell_types = n, "computing radar curves");

    let series = median_series(&resolved, n);
    let curves = RadarCurves {
        mean: normalise_closed(&series.mean),
        lower: normalise_closed(&series.lower),
        upper: normalise_closed(&series.upper),
    };
    let genes = resolved.into_iter().map(|g| g.symbol).collect();

    Ok(RadarOutcome::Success {
        curves,
        cell_types,
        genes,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cellradar_config::{DatasetEntry, ServerSettings};
    use cellradar_store::{write_dataset, GeneColumn};
    use tempfile::TempDir;

    const DATASET: &str = "Human normal hematopoiesis";

    fn gene(symbol: &str, mean: Vec<f64>, std: Vec<f64>) -> GeneColumn {
        GeneColumn {
            symbol: symbol.to_string(),
            mean,
            std,
        }
    }

    /// Registry with one dataset: cell types A/B/C, G1 mean [1,2,3] std 0,
    /// G2 mean [5,7,9] std [1,1,1].
    fn fixture(dir: &TempDir) -> Settings {
        let path = dir.path().join("hema.parquet");
        let cells = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let genes = [
            gene("G1", vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]),
            gene("G2", vec![5.0, 7.0, 9.0], vec![1.0, 1.0, 1.0]),
        ];
        write_dataset(&path, &cells, &genes).unwrap();
        Settings {
            server: ServerSettings::default(),
            datasets: vec![DatasetEntry {
                name: DATASET.to_string(),
                path,
            }],
        }
    }

    fn query(genes: &[&str]) -> Vec<String> {
        genes.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_empty_gene_list() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), DATASET, &[]).unwrap();
        assert_eq!(outcome, RadarOutcome::EmptyGeneList);
        assert_eq!(outcome.status(), "EMPTY_GENES");
        assert_eq!(outcome.message(), "Please enter at least one gene name");
    }

    #[test]
    fn test_unknown_dataset() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), "Zebrafish", &query(&["G1"])).unwrap();
        assert_eq!(outcome, RadarOutcome::UnknownDataset);
        assert_eq!(outcome.status(), "UNKNOWN_DATASET");
    }

    #[test]
    fn test_no_genes_resolved() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), DATASET, &query(&["NOPE", "also-missing"]))
            .unwrap();
        assert_eq!(outcome, RadarOutcome::NoGenesResolved);
        assert_eq!(outcome.message(), "None of the entered gene names is valid");
    }

    #[test]
    fn test_single_gene_zero_std() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), DATASET, &query(&["g1"])).unwrap();
        let RadarOutcome::Success { curves, cell_types, genes } = outcome else {
            panic!("expected success");
        };
        assert_eq!(cell_types, vec!["A", "B", "C"]);
        assert_eq!(genes, vec!["G1"]);
        // normalise([1,2,3]) closed = [0, 0.5, 1, 0]; std 0 makes all three
        // curves identical.
        assert_eq!(curves.mean, vec![0.0, 0.5, 1.0, 0.0]);
        assert_eq!(curves.lower, curves.mean);
        assert_eq!(curves.upper, curves.mean);
    }

    #[test]
    fn test_curves_are_closed_and_unit_scaled() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), DATASET, &query(&["G1", "G2"])).unwrap();
        let RadarOutcome::Success { curves, cell_types, .. } = outcome else {
            panic!("expected success");
        };
        let n = cell_types.len();
        for curve in [&curves.mean, &curves.lower, &curves.upper] {
            assert_eq!(curve.len(), n + 1);
            assert_eq!(curve[n], curve[0]);
            let open = &curve[..n];
            assert_eq!(open.iter().copied().fold(f64::INFINITY, f64::min), 0.0);
            assert_eq!(open.iter().copied().fold(f64::NEG_INFINITY, f64::max), 1.0);
        }
    }

    #[test]
    fn test_duplicate_genes_resolve_once() {
        let dir = TempDir::new().unwrap();
        let settings = fixture(&dir);
        let once = compute_radar(&settings, DATASET, &query(&["G1", "G2"])).unwrap();
        let twice = compute_radar(&settings, DATASET, &query(&["G1", "g1", "G2", "G-1"])).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_misses_are_filtered_not_fatal() {
        let dir = TempDir::new().unwrap();
        let outcome = compute_radar(&fixture(&dir), DATASET, &query(&["MISSING", "G1", ""]))
            .unwrap();
        let RadarOutcome::Success { genes, .. } = outcome else {
            panic!("expected success");
        };
        assert_eq!(genes, vec!["G1"]);
    }

    #[test]
    fn test_constant_series_yields_flat_curves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flat.parquet");
        let cells = vec!["A".to_string(), "B".to_string()];
        write_dataset(&path, &cells, &[gene("FLAT", vec![4.0, 4.0], vec![0.0, 0.0])]).unwrap();
        let settings = Settings {
            server: ServerSettings::default(),
            datasets: vec![DatasetEntry {
                name: DATASET.to_string(),
                path,
            }],
        };

        let outcome = compute_radar(&settings, DATASET, &query(&["FLAT"])).unwrap();
        let RadarOutcome::Success { curves, .. } = outcome else {
            panic!("expected success");
        };
        assert_eq!(curves.mean, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_store_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            server: ServerSettings::default(),
            datasets: vec![DatasetEntry {
                name: DATASET.to_string(),
                path: dir.path().join("missing.parquet"),
            }],
        };
        let err = compute_radar(&settings, DATASET, &query(&["G1"])).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
