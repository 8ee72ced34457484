use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency scale shared by gap severities and recommendation priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort key for prioritization; lower ranks come first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Documentation,
    Traceability,
    #[serde(rename = "GPS")]
    Gps,
    Certification,
    Legal,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Documentation => "Documentation",
            Self::Traceability => "Traceability",
            Self::Gps => "GPS",
            Self::Certification => "Certification",
            Self::Legal => "Legal",
        }
    }
}

/// Risk factors evaluated by the engine, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Country,
    Commodity,
    Supplier,
    DeforestationRegion,
    Geolocation,
    Traceability,
    LegalDocumentation,
}

impl RiskFactor {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Country,
            Self::Commodity,
            Self::Supplier,
            Self::DeforestationRegion,
            Self::Geolocation,
            Self::Traceability,
            Self::LegalDocumentation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Country => "Country risk",
            Self::Commodity => "Commodity risk",
            Self::Supplier => "Supplier verification",
            Self::DeforestationRegion => "Deforestation risk region",
            Self::Geolocation => "Geolocation documentation",
            Self::Traceability => "Traceability depth",
            Self::LegalDocumentation => "Legal documentation",
        }
    }

    /// Upper bound on the points this factor can remove.
    pub const fn max_deduction(self) -> u8 {
        match self {
            Self::Country => 25,
            Self::Commodity => 30,
            Self::Supplier => 25,
            Self::DeforestationRegion => 30,
            Self::Geolocation => 30,
            Self::Traceability => 30,
            Self::LegalDocumentation => 0,
        }
    }
}

/// Structured finding describing a shortfall against EUDR obligations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceGap {
    pub id: Uuid,
    pub area: String,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub required_action: String,
}

impl ComplianceGap {
    pub(crate) fn new(
        area: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        impact: impl Into<String>,
        required_action: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            area: area.into(),
            severity,
            description: description.into(),
            impact: impact.into(),
            required_action: required_action.into(),
        }
    }

    pub fn requires_immediate_action(&self) -> bool {
        matches!(self.severity, Severity::Critical | Severity::High)
    }
}

/// Remediation step with a rough budget and duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecommendation {
    pub id: Uuid,
    pub priority: Severity,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<u32>,
    /// Days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u16>,
}

impl ComplianceRecommendation {
    pub(crate) fn new(
        priority: Severity,
        category: RecommendationCategory,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            priority,
            category,
            title: title.into(),
            description: description.into(),
            estimated_cost: None,
            estimated_time: None,
        }
    }

    pub(crate) fn estimated(mut self, cost: u32, days: u16) -> Self {
        self.estimated_cost = Some(cost);
        self.estimated_time = Some(days);
        self
    }
}
