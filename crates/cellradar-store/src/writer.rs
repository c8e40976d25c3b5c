//! Build dataset store files.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, FixedSizeListBuilder, Float64Builder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::{CELL_TYPE_COLUMN, STATS_PER_GENE};

/// One gene's statistics destined for a store file.
#[derive(Debug, Clone)]
pub struct GeneColumn {
    pub symbol: String,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Write a dataset store file: one row per cell type, one
/// `FixedSizeList<Float64, 2>` column per gene.
///
/// Every gene must cover exactly `cell_types.len()` cell types; symbols
/// must be unique and must not shadow the cell-type column.
pub fn write_dataset(path: impl AsRef<Path>, cell_types: &[String], genes: &[GeneColumn]) -> Result<()> {
    let n = cell_types.len();
    let mut fields = Vec::with_capacity(genes.len() + 1);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(genes.len() + 1);

    let labels = StringArray::from(cell_types.iter().map(String::as_str).collect::<Vec<_>>());
    fields.push(Field::new(CELL_TYPE_COLUMN, DataType::Utf8, false));
    arrays.push(Arc::new(labels));

    let mut seen = std::collections::HashSet::new();
    for gene in genes {
        if gene.symbol == CELL_TYPE_COLUMN || !seen.insert(gene.symbol.as_str()) {
            return Err(StoreError::DuplicateGene(gene.symbol.clone()));
        }
        if gene.mean.len() != n || gene.std.len() != n {
            return Err(StoreError::ShapeMismatch {
                symbol: gene.symbol.clone(),
                expected: n,
                actual: gene.mean.len().max(gene.std.len()),
            });
        }

        let mut builder = FixedSizeListBuilder::new(Float64Builder::new(), STATS_PER_GENE as i32);
        for row in 0..n {
            builder.values().append_value(gene.mean[row]);
            builder.values().append_value(gene.std[row]);
            builder.append(true);
        }
        let array = builder.finish();
        fields.push(Field::new(&gene.symbol, array.data_type().clone(), false));
        arrays.push(Arc::new(array));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path.as_ref())?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    info!(path = %path.as_ref().display(), genes = genes.len(), cell_types = n, "wrote dataset store");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
