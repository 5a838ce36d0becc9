use std::io::{Read, Write};

use eyre::{Context, Result};
use tracing::info;

use crate::{
    chart::BarChart,
    config::Settings,
    extract::ParamExtractor,
    loader::{load_records, load_records_from_path},
    record::RecordSet,
    render::Renderer,
    transform::nanos_to_seconds,
};

/// Load, extract and rescale: the record set as it is handed to the chart.
pub fn prepare<R: Read>(reader: R) -> Result<RecordSet> {
    let records = load_records(reader).wrap_err("Load results")?;
    process(records)
}

fn process(mut records: RecordSet) -> Result<RecordSet> {
    ParamExtractor::new()?.apply(&mut records);
    nanos_to_seconds(&mut records);
    Ok(records)
}

/// Runs every stage against `settings.results_path`, dumps the processed
/// table to `table_out` and hands the chart to `renderer`.
pub fn run<W: Write, R: Renderer>(
    settings: &Settings,
    table_out: &mut W,
    renderer: &mut R,
) -> Result<BarChart> {
    let records = load_records_from_path(&settings.results_path).wrap_err("Load results")?;
    let records = process(records)?;
    writeln!(table_out, "{records}")?;

    info!(
        "Plotting {} records from {}",
        records.len(),
        settings.results_path.display()
    );
    let chart = BarChart::from_records(&records, &settings.labels);
    renderer.render(&chart).wrap_err("Render chart")?;
    Ok(chart)
}
