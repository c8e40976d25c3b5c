//! radar-import — build a dataset store file from long-format CSV.
//!
//! Usage: radar-import <input.csv> <output.parquet>
//!
//! Input columns: `gene,celltype,mean,std`. Cell-type order is the order
//! of first appearance under the first gene; every gene must cover the
//! same cell types in the same order. Gene names are canonicalised on
//! import, so the store only ever contains lookup-ready symbols.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use cellradar_core::genes::canonical_symbol;
use cellradar_store::{write_dataset, GeneColumn};

#[derive(Debug, Deserialize)]
struct Row {
    gene: String,
    celltype: String,
    mean: f64,
    std: f64,
}

struct PendingGene {
    celltypes: Vec<String>,
    mean: Vec<f64>,
    std: Vec<f64>,
}

/// Assemble CSV rows into the ordered cell-type list and gene columns.
///
/// Genes keep first-appearance order; the first gene's cell-type sequence
/// is authoritative and every other gene must match it exactly.
fn assemble_dataset<R: Read>(reader: &mut csv::Reader<R>) -> Result<(Vec<String>, Vec<GeneColumn>)> {
    let mut order: Vec<String> = Vec::new();
    let mut pending: HashMap<String, PendingGene> = HashMap::new();

    for (line, record) in reader.deserialize::<Row>().enumerate() {
        let row = record.with_context(|| format!("CSV record {}", line + 1))?;
        let symbol = canonical_symbol(&row.gene);
        if symbol.is_empty() {
            bail!(
                "record {}: gene name '{}' is empty after canonicalisation",
                line + 1,
                row.gene
            );
        }

        let entry = pending.entry(symbol.clone()).or_insert_with(|| {
            order.push(symbol);
            PendingGene {
                celltypes: Vec::new(),
                mean: Vec::new(),
                std: Vec::new(),
            }
        });
        entry.celltypes.push(row.celltype);
        entry.mean.push(row.mean);
        entry.std.push(row.std);
    }

    let Some(first) = order.first() else {
        bail!("CSV contains no data rows");
    };
    let cell_types = pending[first].celltypes.clone();

    let mut genes = Vec::with_capacity(order.len());
    for symbol in &order {
        let gene = &pending[symbol];
        if gene.celltypes != cell_types {
            bail!(
                "gene {symbol} covers cell types {:?}, expected {:?}",
                gene.celltypes,
                cell_types
            );
        }
        genes.push(GeneColumn {
            symbol: symbol.clone(),
            mean: gene.mean.clone(),
            std: gene.std.clone(),
        });
    }

    Ok((cell_types, genes))
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: radar-import <input.csv> <output.parquet>");
    };

    let mut reader = csv::Reader::from_path(&input)
        .with_context(|| format!("opening {input}"))?;
    let (cell_types, genes) =
        assemble_dataset(&mut reader).with_context(|| format!("reading {input}"))?;

    write_dataset(&output, &cell_types, &genes)
        .with_context(|| format!("writing {output}"))?;

    println!(
        "Wrote {} genes across {} cell types to {output}",
        genes.len(),
        cell_types.len()
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
