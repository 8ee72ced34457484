use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentProfile, ExporterFormData};
use super::scoring::{ComplianceResult, ComplianceTimeline, RiskLevel};

/// Stored assessment: the questionnaire as submitted plus the result it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub recorded_at: DateTime<Utc>,
    pub form: ExporterFormData,
    pub result: ComplianceResult,
}

impl AssessmentRecord {
    pub fn new(form: ExporterFormData, result: ComplianceResult, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: result.id,
            recorded_at,
            form,
            result,
        }
    }

    /// Canonical profile re-derived from the stored form.
    pub fn profile(&self) -> AssessmentProfile {
        AssessmentProfile::from(&self.form)
    }

    pub fn summary_view(&self) -> AssessmentSummaryView {
        AssessmentSummaryView {
            id: self.id,
            company_name: self.form.company_name.trim().to_string(),
            export_country: self.form.export_country.trim().to_string(),
            product_type: self.form.product_type.trim().to_string(),
            score: self.result.score,
            risk_level: self.result.risk_level,
            risk_label: self.result.risk_level.label(),
            time_to_compliance: self.result.time_to_compliance,
            critical_gaps: self.result.critical_gap_count(),
            recorded_at: self.recorded_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RecordStore: Send + Sync {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<AssessmentRecord>, StoreError>;
    fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("assessment already recorded")]
    Conflict,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (e-mail, chat, compliance inbox adapters).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: ComplianceAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAlert {
    pub template: String,
    pub assessment_id: AssessmentId,
    pub severity: RiskLevel,
    pub title: String,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// History row exposed by list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummaryView {
    pub id: AssessmentId,
    pub company_name: String,
    pub export_country: String,
    pub product_type: String,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub time_to_compliance: ComplianceTimeline,
    pub critical_gaps: usize,
    pub recorded_at: DateTime<Utc>,
}
