use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::IntervalSummary;
use super::model::LogDataset;

/// Write the filtered interval as CSV: a header of `depth_name` followed by
/// the curve mnemonics, then one row per surviving sample.
pub fn write_interval_csv<W: Write>(
    writer: W,
    dataset: &LogDataset,
    summary: &IntervalSummary,
    depth_name: &str,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![depth_name.to_string()];
    header.extend(dataset.curves.iter().map(|c| c.mnemonic.clone()));
    wtr.write_record(&header).context("writing CSV header")?;

    for &i in &summary.indices {
        let mut row = Vec::with_capacity(dataset.curves.len() + 1);
        row.push(dataset.depth[i].to_string());
        row.extend(dataset.curves.iter().map(|c| c.values[i].to_string()));
        wtr.write_record(&row)
            .with_context(|| format!("writing CSV row for sample {i}"))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export the current interval to a CSV file at `path`.
pub fn export_interval_csv(
    path: &Path,
    dataset: &LogDataset,
    summary: &IntervalSummary,
    depth_name: &str,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_interval_csv(file, dataset, summary, depth_name)
}
