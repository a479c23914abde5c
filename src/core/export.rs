use crate::domain::chart::{AxisTick, ChartFrame};
use crate::domain::model::{ProjectionOutcome, ProjectionParameters, YearProjection};
use crate::utils::error::{ProjectorError, Result};
use serde::Serialize;

pub const CSV_HEADER: [&str; 6] = [
    "year",
    "gdp",
    "income_tax",
    "corporate_tax",
    "sales_tax",
    "total_revenue",
];

/// Breakdown rows as delimited text with a header line.
pub fn to_delimited(rows: &[YearProjection], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.year.to_string(),
            row.gdp.to_string(),
            row.income_tax.to_string(),
            row.corporate_tax.to_string(),
            row.sales_tax.to_string(),
            row.total_revenue.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ProjectorError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ProjectorError::RenderError {
        message: format!("Delimited output is not UTF-8: {}", e),
    })
}

pub fn to_csv(rows: &[YearProjection]) -> Result<String> {
    to_delimited(rows, b',')
}

pub fn to_tsv(rows: &[YearProjection]) -> Result<String> {
    to_delimited(rows, b'\t')
}

#[derive(Debug, Serialize)]
struct ChartSummary<'a> {
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    x_ticks: Vec<&'a str>,
    y_ticks: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    parameters: &'a ProjectionParameters,
    revenue: &'a [f64],
    chart: ChartSummary<'a>,
}

fn labels(ticks: &[AxisTick]) -> Vec<&str> {
    ticks.iter().map(|t| t.label.as_str()).collect()
}

pub fn to_json(outcome: &ProjectionOutcome, frame: &ChartFrame) -> Result<String> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        parameters: &outcome.parameters,
        revenue: outcome.revenue.values(),
        chart: ChartSummary {
            x_domain: frame.x_domain,
            y_domain: frame.y_domain,
            x_ticks: labels(&frame.x_ticks),
            y_ticks: labels(&frame.y_ticks),
        },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
