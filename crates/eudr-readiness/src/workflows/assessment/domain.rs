use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub Uuid);

impl AssessmentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Exporter questionnaire exactly as the form layer submits it.
///
/// Canonical and legacy spellings of the same fact are kept side by side; they are only
/// reconciled when an [`AssessmentProfile`] is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExporterFormData {
    pub company_name: String,
    pub export_country: String,
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_volume: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_farm_known: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_supplier_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_high_deforestation_risk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deforestation_risk_region: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gps_available: Option<bool>,
    #[serde(rename = "hasGPSData", skip_serializing_if = "Option::is_none")]
    pub has_gps_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geolocation_data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceability_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_land_records: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_third_party_cert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_body: Option<String>,
    /// Free text as entered; never parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_date: Option<String>,
}

/// Nature of the sourcing relationship with the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplierType {
    #[serde(rename = "Direct Farmer")]
    DirectFarmer,
    Smallholder,
    Cooperative,
    Trader,
    Wholesaler,
    Processor,
    Unknown,
}

impl SupplierType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::DirectFarmer,
            Self::Smallholder,
            Self::Cooperative,
            Self::Trader,
            Self::Wholesaler,
            Self::Processor,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DirectFarmer => "Direct Farmer",
            Self::Smallholder => "Smallholder",
            Self::Cooperative => "Cooperative",
            Self::Trader => "Trader",
            Self::Wholesaler => "Wholesaler",
            Self::Processor => "Processor",
            Self::Unknown => "Unknown",
        }
    }

    /// Unrecognized or missing values become [`SupplierType::Unknown`].
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| match_label(value, &Self::ordered(), |variant| variant.label()))
            .unwrap_or(Self::Unknown)
    }
}

/// Plot size class; Small plots (< 4 ha) may be geolocated with a point, Large plots need
/// a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotSize {
    Small,
    Large,
}

impl PlotSize {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Large => "Large",
        }
    }

    /// Unrecognized or missing values become [`PlotSize::Large`], which demands polygons.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| match_label(value, &[Self::Small, Self::Large], |v| v.label()))
            .unwrap_or(Self::Large)
    }
}

/// Depth of the chain-of-custody system from farm to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceabilityLevel {
    None,
    Basic,
    Advanced,
    Blockchain,
}

impl TraceabilityLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::None, Self::Basic, Self::Advanced, Self::Blockchain]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Basic => "Basic",
            Self::Advanced => "Advanced",
            Self::Blockchain => "Blockchain",
        }
    }

    pub const fn is_plot_level(self) -> bool {
        matches!(self, Self::Advanced | Self::Blockchain)
    }

    /// Unrecognized or missing values become [`TraceabilityLevel::None`].
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| match_label(value, &Self::ordered(), |variant| variant.label()))
            .unwrap_or(Self::None)
    }
}

/// Matches either the display label ("Direct Farmer") or its compact form ("DirectFarmer"),
/// ignoring ASCII case and surrounding whitespace.
fn match_label<T: Copy>(raw: &str, variants: &[T], label: impl Fn(T) -> &'static str) -> Option<T> {
    let wanted = compact(raw);
    if wanted.is_empty() {
        return None;
    }
    variants
        .iter()
        .copied()
        .find(|variant| compact(label(*variant)) == wanted)
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parsed geolocation evidence attached to a profile by the intake guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geolocation {
    Point { latitude: f64, longitude: f64 },
    Polygon { geometry: serde_json::Value },
}

/// Canonical, strongly typed view of a questionnaire that the scoring engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentProfile {
    pub company_name: String,
    pub export_country: String,
    pub product_type: String,
    pub farm_known: bool,
    pub supplier_type: SupplierType,
    pub high_deforestation_risk: bool,
    pub gps_available: bool,
    pub plot_size: PlotSize,
    pub traceability_level: TraceabilityLevel,
    pub has_land_records: bool,
    pub has_third_party_cert: bool,
    pub certification_body: Option<String>,
    pub geolocation: Option<Geolocation>,
}

impl From<&ExporterFormData> for AssessmentProfile {
    /// Single reconciliation point for legacy aliases; the canonical field wins when both
    /// spellings are present.
    fn from(form: &ExporterFormData) -> Self {
        Self {
            company_name: form.company_name.trim().to_string(),
            export_country: form.export_country.trim().to_string(),
            product_type: form.product_type.trim().to_string(),
            farm_known: resolve_alias(form.is_farm_known, form.has_supplier_list),
            supplier_type: SupplierType::parse_lenient(form.supplier_type.as_deref()),
            high_deforestation_risk: resolve_alias(
                form.is_high_deforestation_risk,
                form.deforestation_risk_region,
            ),
            gps_available: resolve_alias(form.is_gps_available, form.has_gps_data),
            plot_size: PlotSize::parse_lenient(form.plot_size.as_deref()),
            traceability_level: TraceabilityLevel::parse_lenient(
                form.traceability_level.as_deref(),
            ),
            has_land_records: form.has_land_records.unwrap_or(false),
            has_third_party_cert: form.has_third_party_cert.unwrap_or(false),
            certification_body: form
                .certification_body
                .as_deref()
                .map(str::trim)
                .filter(|body| !body.is_empty())
                .map(str::to_string),
            geolocation: None,
        }
    }
}

fn resolve_alias(canonical: Option<bool>, legacy: Option<bool>) -> bool {
    canonical.or(legacy).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_parsing_accepts_labels_and_compact_names() {
        assert_eq!(
            SupplierType::parse_lenient(Some("Direct Farmer")),
            SupplierType::DirectFarmer
        );
        assert_eq!(
            SupplierType::parse_lenient(Some("directfarmer")),
            SupplierType::DirectFarmer
        );
        assert_eq!(
            TraceabilityLevel::parse_lenient(Some(" blockchain ")),
            TraceabilityLevel::Blockchain
        );
        assert_eq!(PlotSize::parse_lenient(Some("small")), PlotSize::Small);
    }

    #[test]
    fn unrecognized_enum_values_fall_back_to_sentinels() {
        assert_eq!(
            SupplierType::parse_lenient(Some("broker")),
            SupplierType::Unknown
        );
        assert_eq!(SupplierType::parse_lenient(None), SupplierType::Unknown);
        assert_eq!(
            TraceabilityLevel::parse_lenient(Some("partial")),
            TraceabilityLevel::None
        );
        assert_eq!(PlotSize::parse_lenient(Some("")), PlotSize::Large);
    }

    #[test]
    fn canonical_field_takes_precedence_over_legacy_alias() {
        let form = ExporterFormData {
            is_gps_available: Some(false),
            has_gps_data: Some(true),
            has_supplier_list: Some(true),
            ..ExporterFormData::default()
        };

        let profile = AssessmentProfile::from(&form);

        assert!(!profile.gps_available);
        assert!(profile.farm_known);
        assert!(!profile.high_deforestation_risk);
    }

    #[test]
    fn legacy_wire_names_deserialize() {
        let form: ExporterFormData = serde_json::from_str(
            r#"{
                "companyName": "Kivu Beans",
                "exportCountry": "Rwanda",
                "productType": "Coffee",
                "hasGPSData": true,
                "deforestationRiskRegion": false,
                "hasSupplierList": true,
                "supplierCount": 12
            }"#,
        )
        .expect("legacy payload parses");

        assert_eq!(form.has_gps_data, Some(true));
        assert_eq!(form.is_gps_available, None);
        assert_eq!(form.supplier_count, Some(12));
    }

    #[test]
    fn certification_date_is_accepted_as_free_text() {
        for raw in ["", "2024-11-05T08:30:00.000Z", "March 2024"] {
            let payload = serde_json::json!({
                "companyName": "Kivu Beans",
                "exportCountry": "Rwanda",
                "productType": "Coffee",
                "certificationDate": raw,
            });

            let form: ExporterFormData =
                serde_json::from_value(payload).expect("questionnaire parses");

            assert_eq!(form.certification_date.as_deref(), Some(raw));
        }
    }
}
