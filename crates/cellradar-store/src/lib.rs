//! cellradar-store — Columnar store for per-gene expression statistics.
//!
//! Each dataset is a single Parquet file whose rows are cell types, in
//! display order. The `celltype` column holds the ordered labels; every
//! other column is a gene, named by its canonical symbol and typed
//! `FixedSizeList<Float64, 2>` with `[mean, std]` per row. Gene lookups
//! read just the projected column, so a request touches only the data it
//! asked for.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Result, StoreError};
pub use reader::{DatasetReader, GeneStats};
pub use writer::{write_dataset, GeneColumn};

/// Column holding the ordered cell-type labels. Canonical gene symbols
/// are uppercase, so this lowercase name can never collide with a gene.
pub const CELL_TYPE_COLUMN: &str = "celltype";

/// Statistics stored per gene per cell type: mean and standard deviation.
pub const STATS_PER_GENE: usize = 2;
