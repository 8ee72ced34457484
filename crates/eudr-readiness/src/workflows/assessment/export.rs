use serde::Serialize;
use std::io::Write;

use super::repository::AssessmentRecord;

#[derive(Debug)]
pub enum HistoryExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for HistoryExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryExportError::Io(err) => write!(f, "failed to write assessment history: {}", err),
            HistoryExportError::Csv(err) => write!(f, "could not encode assessment history: {}", err),
        }
    }
}

impl std::error::Error for HistoryExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryExportError::Io(err) => Some(err),
            HistoryExportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for HistoryExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for HistoryExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Assessment ID")]
    assessment_id: String,
    #[serde(rename = "Recorded At")]
    recorded_at: String,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Commodity")]
    commodity: &'a str,
    #[serde(rename = "Score")]
    score: u8,
    #[serde(rename = "Risk Level")]
    risk_level: &'static str,
    #[serde(rename = "Time To Compliance")]
    time_to_compliance: &'static str,
    #[serde(rename = "Critical Gaps")]
    critical_gaps: usize,
    #[serde(rename = "Country Risk")]
    country_risk: u8,
    #[serde(rename = "Commodity Risk")]
    commodity_risk: u8,
    #[serde(rename = "Supplier Risk")]
    supplier_risk: u8,
    #[serde(rename = "Traceability Risk")]
    traceability_risk: u8,
    #[serde(rename = "Documentation Risk")]
    documentation_risk: u8,
}

impl<'a> From<&'a AssessmentRecord> for HistoryRow<'a> {
    fn from(record: &'a AssessmentRecord) -> Self {
        let breakdown = &record.result.score_breakdown;
        Self {
            assessment_id: record.id.to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            company: record.form.company_name.trim(),
            country: record.form.export_country.trim(),
            commodity: record.form.product_type.trim(),
            score: record.result.score,
            risk_level: record.result.risk_level.label(),
            time_to_compliance: record.result.time_to_compliance.label(),
            critical_gaps: record.result.critical_gap_count(),
            country_risk: breakdown.country_risk,
            commodity_risk: breakdown.commodity_risk,
            supplier_risk: breakdown.supplier_risk,
            traceability_risk: breakdown.traceability_risk,
            documentation_risk: breakdown.documentation_risk,
        }
    }
}

const HEADER: [&str; 14] = [
    "Assessment ID",
    "Recorded At",
    "Company",
    "Country",
    "Commodity",
    "Score",
    "Risk Level",
    "Time To Compliance",
    "Critical Gaps",
    "Country Risk",
    "Commodity Risk",
    "Supplier Risk",
    "Traceability Risk",
    "Documentation Risk",
];

/// One row per record, in the order given. The header is written even for an empty history.
pub fn write_history_csv<W: Write>(
    records: &[AssessmentRecord],
    writer: W,
) -> Result<(), HistoryExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for record in records {
        csv_writer.serialize(HistoryRow::from(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}
