mod config;
mod findings;
mod plan;
mod rules;
mod tables;

pub use config::ScoringConfig;
pub use findings::{
    ComplianceGap, ComplianceRecommendation, RecommendationCategory, RiskFactor, Severity,
};
pub use plan::{ActionItem, ComplianceTimeline, ReadinessIndicators, RiskLevel};
pub use tables::{commodity_risk, country_risk, CommodityRisk, RiskTier};

use super::domain::{AssessmentId, AssessmentProfile, ExporterFormData};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stateless engine turning a canonical profile into a compliance result.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a profile. `today` anchors next-step deadlines; nothing else is time dependent.
    pub fn assess(&self, profile: &AssessmentProfile, today: NaiveDate) -> ComplianceResult {
        let findings = rules::score_profile(profile);

        let score = plan::final_score(&findings.breakdown);
        let risk_level = RiskLevel::from_score(score);
        let timeline = ComplianceTimeline::from_score(score);
        let strengths = plan::strengths(profile, findings.country_tier);
        let indicators = ReadinessIndicators::derive(&findings.breakdown, profile);
        let next_steps = plan::next_steps(
            &findings.recommendations,
            self.config.next_steps_limit,
            today,
            timeline,
        );
        let recommended_actions =
            plan::dedupe_actions(findings.actions, self.config.recommended_actions_limit);

        ComplianceResult {
            id: AssessmentId::generate(),
            assessed_on: today,
            score,
            risk_level,
            gaps: findings.gaps,
            recommendations: findings.recommendations,
            strengths,
            score_breakdown: findings.breakdown,
            indicators,
            components: findings.components,
            next_steps,
            missing_gaps: findings.gap_lines,
            recommended_actions,
            time_to_compliance: timeline,
            estimated_days_to_compliance: timeline.estimated_days(),
        }
    }
}

/// Normalize a raw questionnaire and score it as of the current UTC date.
pub fn calculate_compliance_score(form: &ExporterFormData) -> ComplianceResult {
    ScoringEngine::default().assess(&AssessmentProfile::from(form), Utc::now().date_naive())
}

/// Discrete deduction applied by one factor, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub deduction: u8,
    pub notes: String,
}

/// Points removed per bucket. Deforestation and geolocation both land in
/// `documentation_risk`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub country_risk: u8,
    pub commodity_risk: u8,
    pub supplier_risk: u8,
    pub traceability_risk: u8,
    pub documentation_risk: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u16 {
        [
            self.country_risk,
            self.commodity_risk,
            self.supplier_risk,
            self.traceability_risk,
            self.documentation_risk,
        ]
        .iter()
        .map(|value| u16::from(*value))
        .sum()
    }

    pub(crate) fn add(&mut self, factor: RiskFactor, deduction: u8) {
        let bucket = match factor {
            RiskFactor::Country => &mut self.country_risk,
            RiskFactor::Commodity => &mut self.commodity_risk,
            RiskFactor::Supplier => &mut self.supplier_risk,
            RiskFactor::Traceability => &mut self.traceability_risk,
            RiskFactor::DeforestationRegion
            | RiskFactor::Geolocation
            | RiskFactor::LegalDocumentation => &mut self.documentation_risk,
        };
        *bucket = bucket.saturating_add(deduction);
    }
}

/// Full outcome of one scoring call. Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub id: AssessmentId,
    pub assessed_on: NaiveDate,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub gaps: Vec<ComplianceGap>,
    pub recommendations: Vec<ComplianceRecommendation>,
    pub strengths: Vec<String>,
    pub score_breakdown: ScoreBreakdown,
    pub indicators: ReadinessIndicators,
    pub components: Vec<ScoreComponent>,
    pub next_steps: Vec<ActionItem>,
    pub missing_gaps: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub time_to_compliance: ComplianceTimeline,
    pub estimated_days_to_compliance: u16,
}

impl ComplianceResult {
    pub fn critical_gap_count(&self) -> usize {
        self.gaps
            .iter()
            .filter(|gap| gap.severity == Severity::Critical)
            .count()
    }

    pub fn component(&self, factor: RiskFactor) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
    }
}
