use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::assessment::domain::{AssessmentId, ExporterFormData};
use crate::workflows::assessment::repository::{
    AlertError, AlertPublisher, AssessmentRecord, ComplianceAlert, RecordStore, StoreError,
};
use crate::workflows::assessment::{assessment_router, AssessmentService, ScoringConfig};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date")
}

/// Low-risk origin, plot-level traceability, direct sourcing, certified: 100 - 5 - 15 = 80.
pub(super) fn best_case_form() -> ExporterFormData {
    ExporterFormData {
        company_name: "Rheinland Kaffee GmbH".to_string(),
        export_country: "Germany".to_string(),
        product_type: "Coffee".to_string(),
        annual_volume: Some("120 t".to_string()),
        is_farm_known: Some(true),
        supplier_type: Some("Direct Farmer".to_string()),
        is_high_deforestation_risk: Some(false),
        is_gps_available: Some(true),
        plot_size: Some("Small".to_string()),
        geolocation_data: Some("52.5200, 13.4050".to_string()),
        traceability_level: Some("Advanced".to_string()),
        has_land_records: Some(true),
        has_third_party_cert: Some(true),
        certification_body: Some("Rainforest Alliance".to_string()),
        ..ExporterFormData::default()
    }
}

/// Every factor at its maximum deduction.
pub(super) fn worst_case_form() -> ExporterFormData {
    ExporterFormData {
        company_name: "Pantanal Pecuaria".to_string(),
        export_country: "Brazil".to_string(),
        product_type: "Cattle".to_string(),
        annual_volume: Some("2,000 head".to_string()),
        is_farm_known: Some(false),
        supplier_type: Some("Trader".to_string()),
        is_high_deforestation_risk: Some(true),
        is_gps_available: Some(false),
        plot_size: Some("Large".to_string()),
        traceability_level: Some("None".to_string()),
        has_land_records: Some(false),
        has_third_party_cert: Some(false),
        ..ExporterFormData::default()
    }
}

/// Medium tier origin with basic traceability: 100 - 15 - 15 - 5 - 15 = 50.
pub(super) fn medium_case_form() -> ExporterFormData {
    ExporterFormData {
        company_name: "Dak Lak Cooperative".to_string(),
        export_country: "Vietnam".to_string(),
        product_type: "Coffee".to_string(),
        annual_volume: Some("40 t".to_string()),
        is_farm_known: Some(true),
        supplier_type: Some("Cooperative".to_string()),
        is_gps_available: Some(true),
        plot_size: Some("Small".to_string()),
        geolocation_data: Some("12.6667, 108.05".to_string()),
        traceability_level: Some("Basic".to_string()),
        has_land_records: Some(true),
        has_third_party_cert: Some(false),
        ..ExporterFormData::default()
    }
}

/// Same facts as [`best_case_form`] spelled with the legacy field names.
pub(super) fn legacy_best_case_form() -> ExporterFormData {
    let mut form = best_case_form();
    form.is_farm_known = None;
    form.has_supplier_list = Some(true);
    form.supplier_count = Some(14);
    form.is_high_deforestation_risk = None;
    form.deforestation_risk_region = Some(false);
    form.is_gps_available = None;
    form.has_gps_data = Some(true);
    form
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryStore, MemoryAlerts>,
    Arc<MemoryStore>,
    Arc<MemoryAlerts>,
) {
    let store = Arc::new(MemoryStore::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = AssessmentService::new(store.clone(), alerts.clone(), ScoringConfig::default());
    (service, store, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl RecordStore for MemoryStore {
    fn save(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<ComplianceAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<ComplianceAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: ComplianceAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: ComplianceAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct ConflictStore;

impl RecordStore for ConflictStore {
    fn save(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Conflict)
    }

    fn list(&self) -> Result<Vec<AssessmentRecord>, StoreError> {
        Ok(Vec::new())
    }

    fn find_by_id(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn save(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryStore, MemoryAlerts>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}
