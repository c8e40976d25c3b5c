//! Column-wise median aggregation across resolved genes.

use cellradar_store::GeneStats;

/// A gene that resolved against the store, with its statistics.
#[derive(Debug, Clone)]
pub struct ResolvedGene {
    pub symbol: String,
    pub stats: GeneStats,
}

/// The three derived series, one value per cell type (not yet closed).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBundle {
    pub mean: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Reduce the resolved genes to per-cell-type medians of mean, mean−std
/// and mean+std. Each cell type is aggregated independently; with a
/// single gene the medians are that gene's own values.
///
/// Callers guarantee at least one gene and vectors of length `cell_count`.
pub fn median_series(genes: &[ResolvedGene], cell_count: usize) -> SeriesBundle {
    debug_assert!(!genes.is_empty());

    let mut mean = Vec::with_capacity(cell_count);
    let mut lower = Vec::with_capacity(cell_count);
    let mut upper = Vec::with_capacity(cell_count);

    for cell in 0..cell_count {
        let means: Vec<f64> = genes.iter().map(|g| g.stats.mean[cell]).collect();
        let lowers: Vec<f64> = genes
            .iter()
            .map(|g| g.stats.mean[cell] - g.stats.std[cell])
            .collect();
        let uppers: Vec<f64> = genes
            .iter()
            .map(|g| g.stats.mean[cell] + g.stats.std[cell])
            .collect();

        mean.push(median(means));
        lower.push(median(lowers));
        upper.push(median(uppers));
    }

    SeriesBundle { mean, lower, upper }
}

/// Standard median: middle value, or the average of the two middle values
/// for even counts.
fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(symbol: &str, mean: Vec<f64>, std: Vec<f64>) -> ResolvedGene {
        ResolvedGene {
            symbol: symbol.to_string(),
            stats: GeneStats { mean, std },
        }
    }

    #[test]
    fn test_single_gene_is_identity() {
        let genes = [resolved("CD34", vec![1.0, 2.0, 3.0], vec![0.5, 0.5, 0.5])];
        let series = median_series(&genes, 3);
        assert_eq!(series.mean, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.lower, vec![0.5, 1.5, 2.5]);
        assert_eq!(series.upper, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_even_count_averages_middle_pair() {
        let genes = [
            resolved("G1", vec![1.0, 3.0], vec![0.0, 0.0]),
            resolved("G2", vec![5.0, 7.0], vec![0.0, 0.0]),
        ];
        let series = median_series(&genes, 2);
        assert_eq!(series.mean, vec![3.0, 5.0]);
        assert_eq!(series.lower, vec![3.0, 5.0]);
        assert_eq!(series.upper, vec![3.0, 5.0]);
    }

    #[test]
    fn test_median_is_per_cell_type_not_per_gene() {
        // Different gene dominates each column.
        let genes = [
            resolved("G1", vec![10.0, 0.0], vec![0.0, 0.0]),
            resolved("G2", vec![0.0, 10.0], vec![0.0, 0.0]),
            resolved("G3", vec![2.0, 8.0], vec![0.0, 0.0]),
        ];
        let series = median_series(&genes, 2);
        assert_eq!(series.mean, vec![2.0, 8.0]);
    }

    #[test]
    fn test_odd_count_takes_middle() {
        let genes = [
            resolved("G1", vec![1.0], vec![0.0]),
            resolved("G2", vec![100.0], vec![0.0]),
            resolved("G3", vec![2.0], vec![0.0]),
        ];
        let series = median_series(&genes, 1);
        assert_eq!(series.mean, vec![2.0]);
    }
}
