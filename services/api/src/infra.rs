use chrono::NaiveDate;
use eudr_readiness::workflows::assessment::{
    AlertError, AlertPublisher, AssessmentId, AssessmentRecord, ComplianceAlert, RecordStore,
    StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history; records are kept in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordStore {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl InMemoryRecordStore {
    fn records(&self) -> Result<std::sync::MutexGuard<'_, Vec<AssessmentRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("record store mutex poisoned".to_string()))
    }
}

impl RecordStore for InMemoryRecordStore {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.records()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<AssessmentRecord>, StoreError> {
        let guard = self.records()?;
        let mut records = guard.clone();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }
}

/// Keeps alerts in memory and mirrors them to the log.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<ComplianceAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: ComplianceAlert) -> Result<(), AlertError> {
        warn!(
            template = %alert.template,
            assessment_id = %alert.assessment_id,
            severity = alert.severity.label(),
            "{}",
            alert.title
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert mutex poisoned".to_string()))?;
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<ComplianceAlert> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
