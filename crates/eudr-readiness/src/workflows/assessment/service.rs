use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use super::domain::{AssessmentId, AssessmentProfile, ExporterFormData};
use super::export::{write_history_csv, HistoryExportError};
use super::intake::{IntakeGuard, IntakeViolation};
use super::report::PortfolioSummary;
use super::repository::{
    AlertError, AlertPublisher, AssessmentRecord, ComplianceAlert, RecordStore, StoreError,
};
use super::scoring::{ComplianceResult, ScoringConfig, ScoringEngine};

pub(crate) const CRITICAL_GAPS_TEMPLATE: &str = "critical_compliance_gaps";

/// Service composing the intake guard, scoring engine, record store, and alert hooks.
pub struct AssessmentService<S, A> {
    guard: Arc<IntakeGuard>,
    engine: Arc<ScoringEngine>,
    store: Arc<S>,
    alerts: Arc<A>,
}

impl<S, A> AssessmentService<S, A>
where
    S: RecordStore + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(store: Arc<S>, alerts: Arc<A>, config: ScoringConfig) -> Self {
        Self {
            guard: Arc::new(IntakeGuard),
            engine: Arc::new(ScoringEngine::new(config)),
            store,
            alerts,
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Score without validation or persistence.
    pub fn preview(&self, form: &ExporterFormData, today: NaiveDate) -> ComplianceResult {
        self.engine.assess(&AssessmentProfile::from(form), today)
    }

    /// Validate, score and persist a questionnaire as of the current UTC date.
    pub fn submit(
        &self,
        form: ExporterFormData,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.submit_on(form, Utc::now().date_naive())
    }

    pub fn submit_on(
        &self,
        form: ExporterFormData,
        today: NaiveDate,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let profile = self.guard.profile_from_form(&form).map_err(|violation| {
            warn!(error = %violation, "questionnaire rejected at intake");
            violation
        })?;

        let result = self.engine.assess(&profile, today);
        let critical_gaps = result.critical_gap_count();
        let record = self
            .store
            .save(AssessmentRecord::new(form, result, Utc::now()))?;

        info!(
            assessment_id = %record.id,
            score = record.result.score,
            risk_level = record.result.risk_level.label(),
            critical_gaps,
            "assessment recorded"
        );

        if critical_gaps > 0 {
            self.alerts.publish(critical_gap_alert(&record, critical_gaps))?;
            info!(
                assessment_id = %record.id,
                template = CRITICAL_GAPS_TEMPLATE,
                "compliance alert published"
            );
        }

        Ok(record)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.store
            .find_by_id(id)?
            .ok_or(AssessmentServiceError::NotFound(*id))
    }

    /// Newest first, at most `limit` records.
    pub fn history(&self, limit: usize) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        let mut records = self.store.list()?;
        records.truncate(limit);
        Ok(records)
    }

    pub fn portfolio_summary(&self) -> Result<PortfolioSummary, AssessmentServiceError> {
        let records = self.store.list()?;
        Ok(PortfolioSummary::from_records(&records))
    }

    pub fn export_history_csv<W: Write>(&self, writer: W) -> Result<(), AssessmentServiceError> {
        let records = self.store.list()?;
        write_history_csv(&records, writer)?;
        Ok(())
    }
}

fn critical_gap_alert(record: &AssessmentRecord, critical_gaps: usize) -> ComplianceAlert {
    let company = record.form.company_name.trim();

    let mut details = BTreeMap::new();
    details.insert("company".to_string(), company.to_string());
    details.insert(
        "country".to_string(),
        record.form.export_country.trim().to_string(),
    );
    details.insert(
        "commodity".to_string(),
        record.form.product_type.trim().to_string(),
    );
    details.insert("score".to_string(), record.result.score.to_string());
    details.insert("critical_gaps".to_string(), critical_gaps.to_string());
    details.insert(
        "time_to_compliance".to_string(),
        record.result.time_to_compliance.label().to_string(),
    );

    ComplianceAlert {
        template: CRITICAL_GAPS_TEMPLATE.to_string(),
        assessment_id: record.id,
        severity: record.result.risk_level,
        title: format!("{company}: {critical_gaps} critical EUDR gap(s) block EU market access"),
        details,
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error("assessment {0} not found")]
    NotFound(AssessmentId),
    #[error(transparent)]
    Export(#[from] HistoryExportError),
}
