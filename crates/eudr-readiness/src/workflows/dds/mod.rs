//! Due Diligence Statement drafting for the EU TRACES information system.

mod xml;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflows::assessment::{AssessmentId, AssessmentRecord, RiskLevel};

/// Shipment and buyer details supplied when a statement is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DdsRequest {
    pub hs_code: String,
    pub net_mass_kg: f64,
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<NaiveDate>,
    pub buyer_name: String,
    pub buyer_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_country: Option<String>,
    #[serde(rename = "buyerEORI", skip_serializing_if = "Option::is_none")]
    pub buyer_eori: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_of_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DdsError {
    #[error("HS code must be 6 digits, got {0:?}")]
    InvalidHsCode(String),
    #[error("net mass must be a positive number of kilograms")]
    InvalidNetMass,
    #[error("invoice number is required")]
    MissingInvoiceNumber,
    #[error("buyer name is required")]
    MissingBuyerName,
}

impl DdsRequest {
    pub fn validate(&self) -> Result<(), DdsError> {
        let hs_code = self.hs_code.trim();
        if hs_code.len() != 6 || !hs_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DdsError::InvalidHsCode(self.hs_code.clone()));
        }
        if !self.net_mass_kg.is_finite() || self.net_mass_kg <= 0.0 {
            return Err(DdsError::InvalidNetMass);
        }
        if self.invoice_number.trim().is_empty() {
            return Err(DdsError::MissingInvoiceNumber);
        }
        if self.buyer_name.trim().is_empty() {
            return Err(DdsError::MissingBuyerName);
        }
        Ok(())
    }
}

pub const DEFORESTATION_CUTOFF: &str = "2020-12-31";

/// Statement drafted from a stored assessment, ready to be rendered as TRACES XML.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDiligenceStatement {
    pub reference_number: String,
    pub issued_at: DateTime<Utc>,
    pub assessment_id: AssessmentId,
    pub assessment_date: NaiveDate,
    pub operator_name: String,
    pub operator_country: String,
    pub commodity: String,
    pub hs_code: String,
    pub net_mass_kg: f64,
    pub invoice_number: String,
    pub shipment_date: NaiveDate,
    pub importer_name: String,
    pub importer_address: String,
    pub importer_country: String,
    pub importer_eori: Option<String>,
    pub port_of_entry: Option<String>,
    pub transport_mode: Option<String>,
    pub geolocation_attached: bool,
    pub deforestation_free: bool,
    pub risk_level: RiskLevel,
}

impl DueDiligenceStatement {
    pub fn draft(
        record: &AssessmentRecord,
        request: &DdsRequest,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, DdsError> {
        request.validate()?;

        let profile = record.profile();
        let operator_country = or_default(&profile.export_country, "Unknown");
        let commodity = or_default(&profile.product_type, "Relevant Commodity");

        Ok(Self {
            reference_number: reference_number(&profile.export_country, issued_at),
            issued_at,
            assessment_id: record.id,
            assessment_date: record.result.assessed_on,
            operator_name: profile.company_name.clone(),
            operator_country,
            commodity,
            hs_code: request.hs_code.trim().to_string(),
            net_mass_kg: request.net_mass_kg,
            invoice_number: request.invoice_number.trim().to_string(),
            shipment_date: request
                .shipment_date
                .unwrap_or_else(|| issued_at.date_naive()),
            importer_name: request.buyer_name.trim().to_string(),
            importer_address: request.buyer_address.trim().to_string(),
            importer_country: request
                .buyer_country
                .as_deref()
                .map(|country| or_default(country, "EU"))
                .unwrap_or_else(|| "EU".to_string()),
            importer_eori: non_blank(request.buyer_eori.as_deref()),
            port_of_entry: non_blank(request.port_of_entry.as_deref()),
            transport_mode: non_blank(request.transport_mode.as_deref()),
            geolocation_attached: profile.gps_available,
            deforestation_free: !profile.high_deforestation_risk,
            risk_level: record.result.risk_level,
        })
    }

    pub fn render_xml(&self) -> String {
        xml::render(self)
    }

    pub fn file_name(&self) -> String {
        format!("EUDR_DDS_{}.xml", self.reference_number)
    }
}

/// Two-digit year, two-letter origin prefix ("XX" when unknown), seven random characters.
fn reference_number(export_country: &str, issued_at: DateTime<Utc>) -> String {
    let origin: String = export_country
        .trim()
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    let origin = if origin.is_empty() {
        "XX".to_string()
    } else {
        origin
    };

    let random: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(7)
        .flat_map(char::to_uppercase)
        .collect();

    format!("{}{origin}{random}", issued_at.format("%y"))
}

fn or_default(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
