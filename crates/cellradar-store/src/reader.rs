//! Read-only access to a dataset store file.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, FixedSizeListArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, SchemaRef};
use parquet::arrow::arrow_reader::{
    ArrowReaderMetadata, ArrowReaderOptions, ParquetRecordBatchReader,
    ParquetRecordBatchReaderBuilder,
};
use parquet::arrow::ProjectionMask;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{CELL_TYPE_COLUMN, STATS_PER_GENE};

/// Per-gene statistics, one value per cell type in store row order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// A request-scoped handle onto one dataset store file.
///
/// `open` parses the Parquet footer once; every subsequent read opens a
/// fresh file handle with the cached metadata, so concurrent readers of
/// the same store never share mutable state. Dropping the reader releases
/// everything — nothing is held across requests.
#[derive(Debug)]
pub struct DatasetReader {
    path: PathBuf,
    metadata: ArrowReaderMetadata,
}

impl DatasetReader {
    /// Open a dataset store file and validate its basic shape.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let metadata = ArrowReaderMetadata::load(&file, ArrowReaderOptions::new())?;

        if metadata.schema().index_of(CELL_TYPE_COLUMN).is_err() {
            return Err(StoreError::MissingColumn(CELL_TYPE_COLUMN.to_string()));
        }

        debug!(path = %path.display(), columns = metadata.schema().fields().len(), "opened dataset store");
        Ok(Self { path, metadata })
    }

    pub fn schema(&self) -> &SchemaRef {
        self.metadata.schema()
    }

    /// Number of gene columns in the store.
    pub fn gene_count(&self) -> usize {
        self.schema().fields().len() - 1
    }

    /// The ordered cell-type labels, one per store row.
    pub fn cell_types(&self) -> Result<Vec<String>> {
        let index = self
            .schema()
            .index_of(CELL_TYPE_COLUMN)
            .map_err(|_| StoreError::MissingColumn(CELL_TYPE_COLUMN.to_string()))?;

        let mut labels = Vec::new();
        for batch in self.projected_reader(index)? {
            let batch = batch?;
            let column = batch
                .column(0)
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| StoreError::ColumnType {
                    column: CELL_TYPE_COLUMN.to_string(),
                    datatype: batch.column(0).data_type().to_string(),
                })?;
            for value in column.iter() {
                // The writer declares this column non-null; a null label can
                // only come from an externally-produced file.
                let label = value.ok_or_else(|| StoreError::NullValue {
                    column: CELL_TYPE_COLUMN.to_string(),
                })?;
                labels.push(label.to_string());
            }
        }
        Ok(labels)
    }

    /// Fetch one gene's `[mean, std]` statistics.
    ///
    /// Lookup is exact-match on the stored canonical symbol. Returns
    /// `Ok(None)` when the store carries no column for the symbol.
    pub fn lookup_gene(&self, symbol: &str) -> Result<Option<GeneStats>> {
        if symbol == CELL_TYPE_COLUMN {
            return Ok(None);
        }
        let Ok(index) = self.schema().index_of(symbol) else {
            return Ok(None);
        };

        let mut mean = Vec::new();
        let mut std = Vec::new();
        for batch in self.projected_reader(index)? {
            let batch = batch?;
            let column = batch.column(0);
            let lists = match column.data_type() {
                DataType::FixedSizeList(_, len) if *len as usize == STATS_PER_GENE => column
                    .as_any()
                    .downcast_ref::<FixedSizeListArray>()
                    .ok_or_else(|| StoreError::ColumnType {
                        column: symbol.to_string(),
                        datatype: column.data_type().to_string(),
                    })?,
                other => {
                    return Err(StoreError::ColumnType {
                        column: symbol.to_string(),
                        datatype: other.to_string(),
                    })
                }
            };

            for row in 0..lists.len() {
                let pair = lists.value(row);
                let values = pair
                    .as_any()
                    .downcast_ref::<Float64Array>()
                    .ok_or_else(|| StoreError::ColumnType {
                        column: symbol.to_string(),
                        datatype: pair.data_type().to_string(),
                    })?;
                mean.push(values.value(0));
                std.push(values.value(1));
            }
        }
        Ok(Some(GeneStats { mean, std }))
    }

    fn projected_reader(&self, column: usize) -> Result<ParquetRecordBatchReader> {
        let file = File::open(&self.path)?;
        let mask = ProjectionMask::roots(
            self.metadata.metadata().file_metadata().schema_descr(),
            [column],
        );
        let reader = ParquetRecordBatchReaderBuilder::new_with_metadata(file, self.metadata.clone())
            .with_projection(mask)
            .build()?;
        Ok(reader)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
