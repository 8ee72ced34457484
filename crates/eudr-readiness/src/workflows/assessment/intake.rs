use serde_json::Value;

use super::domain::{AssessmentProfile, ExporterFormData, Geolocation, PlotSize};

/// Validation errors raised before a questionnaire reaches the scoring engine.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("company/operator name is required")]
    MissingCompanyName,
    #[error("annual export volume is required")]
    MissingAnnualVolume,
    #[error("export country is required")]
    MissingExportCountry,
    #[error("product type is required")]
    MissingProductType,
    #[error("number of suppliers must be specified when a supplier list is declared")]
    SupplierCountRequired,
    #[error("GPS coordinates are required when geolocation data is declared available")]
    MissingGeolocation,
    #[error("invalid geolocation data: {reason}")]
    InvalidGeolocation { reason: String },
}

/// Guard responsible for producing [`AssessmentProfile`] instances from form input.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Validate the required fields, then normalize aliases and enum strings.
    pub fn profile_from_form(
        &self,
        form: &ExporterFormData,
    ) -> Result<AssessmentProfile, IntakeViolation> {
        if form.company_name.trim().is_empty() {
            return Err(IntakeViolation::MissingCompanyName);
        }
        let has_volume = form
            .annual_volume
            .as_deref()
            .map_or(false, |volume| !volume.trim().is_empty());
        if !has_volume {
            return Err(IntakeViolation::MissingAnnualVolume);
        }
        if form.export_country.trim().is_empty() {
            return Err(IntakeViolation::MissingExportCountry);
        }
        if form.product_type.trim().is_empty() {
            return Err(IntakeViolation::MissingProductType);
        }

        if form.has_supplier_list == Some(true) && form.supplier_count.unwrap_or(0) == 0 {
            return Err(IntakeViolation::SupplierCountRequired);
        }

        let mut profile = AssessmentProfile::from(form);

        if profile.gps_available {
            let raw = form
                .geolocation_data
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .ok_or(IntakeViolation::MissingGeolocation)?;
            profile.geolocation = Some(parse_geolocation(raw, profile.plot_size)?);
        }

        Ok(profile)
    }
}

/// Small plots take a "latitude, longitude" pair; large plots take a GeoJSON geometry.
pub fn parse_geolocation(raw: &str, plot_size: PlotSize) -> Result<Geolocation, IntakeViolation> {
    match plot_size {
        PlotSize::Small => parse_point(raw),
        PlotSize::Large => parse_polygon(raw),
    }
}

fn parse_point(raw: &str) -> Result<Geolocation, IntakeViolation> {
    let numbers = extract_numbers(raw);
    let (latitude, longitude) = match numbers.as_slice() {
        [latitude, longitude, ..] => (*latitude, *longitude),
        _ => {
            return Err(invalid(
                "expected \"Latitude, Longitude\" (e.g., 12.34, 56.78)",
            ))
        }
    };

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(invalid(
            "coordinates out of range (lat -90 to 90, lng -180 to 180)",
        ));
    }

    Ok(Geolocation::Point {
        latitude,
        longitude,
    })
}

fn parse_polygon(raw: &str) -> Result<Geolocation, IntakeViolation> {
    let geometry: Value = serde_json::from_str(raw)
        .map_err(|err| invalid(format!("GeoJSON is not valid JSON ({err})")))?;

    let has_type = geometry
        .get("type")
        .and_then(Value::as_str)
        .map_or(false, |kind| !kind.trim().is_empty());
    let has_coordinates = geometry.get("coordinates").map_or(false, Value::is_array);
    if !has_type || !has_coordinates {
        return Err(invalid("GeoJSON must include \"type\" and \"coordinates\""));
    }

    Ok(Geolocation::Polygon { geometry })
}

/// Signed decimal numbers in reading order; anything else acts as a separator.
fn extract_numbers(raw: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String| {
        if current.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(value) = current.parse::<f64>() {
                numbers.push(value);
            }
        }
        current.clear();
    };

    for c in raw.chars() {
        match c {
            '0'..='9' => current.push(c),
            '.' if !current.contains('.') && !current.is_empty() => current.push(c),
            '-' if current.is_empty() => current.push(c),
            _ => {
                flush(&mut current);
                if c == '-' {
                    current.push(c);
                }
            }
        }
    }
    flush(&mut current);

    numbers
}

fn invalid(reason: impl Into<String>) -> IntakeViolation {
    IntakeViolation::InvalidGeolocation {
        reason: reason.into(),
    }
}
