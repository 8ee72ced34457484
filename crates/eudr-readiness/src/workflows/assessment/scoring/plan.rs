use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::super::domain::{AssessmentProfile, SupplierType};
use super::findings::ComplianceRecommendation;
use super::tables::RiskTier;
use super::ScoreBreakdown;

pub(crate) const STARTING_SCORE: u16 = 100;

/// Overall readiness classification derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u8) -> Self {
        if score < 50 {
            Self::High
        } else if score < 80 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Rough time-to-compliance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceTimeline {
    #[serde(rename = "6+ months")]
    SixMonthsOrMore,
    #[serde(rename = "3-5 months")]
    ThreeToFiveMonths,
    #[serde(rename = "1-2 months")]
    OneToTwoMonths,
    #[serde(rename = "2-4 weeks")]
    TwoToFourWeeks,
    #[serde(rename = "Ready for EU Market")]
    Ready,
}

impl ComplianceTimeline {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=39 => Self::SixMonthsOrMore,
            40..=59 => Self::ThreeToFiveMonths,
            60..=79 => Self::OneToTwoMonths,
            80..=94 => Self::TwoToFourWeeks,
            _ => Self::Ready,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SixMonthsOrMore => "6+ months",
            Self::ThreeToFiveMonths => "3-5 months",
            Self::OneToTwoMonths => "1-2 months",
            Self::TwoToFourWeeks => "2-4 weeks",
            Self::Ready => "Ready for EU Market",
        }
    }

    pub const fn estimated_days(self) -> u16 {
        match self {
            Self::SixMonthsOrMore => 180,
            Self::ThreeToFiveMonths => 120,
            Self::OneToTwoMonths => 45,
            Self::TwoToFourWeeks => 21,
            Self::Ready => 0,
        }
    }
}

/// Prioritized follow-up derived from a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Chart-friendly percentages derived from the breakdown. They never feed back into the
/// score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessIndicators {
    pub traceability: u8,
    pub documentation: u8,
    pub gps_data: u8,
    pub certification: u8,
    pub risk_mitigation: u8,
}

impl ReadinessIndicators {
    pub(crate) fn derive(breakdown: &ScoreBreakdown, profile: &AssessmentProfile) -> Self {
        let remaining = |deduction: u16| STARTING_SCORE.saturating_sub(deduction) as u8;
        Self {
            traceability: remaining(breakdown.traceability_risk as u16),
            documentation: remaining(breakdown.documentation_risk as u16),
            gps_data: if profile.gps_available { 100 } else { 0 },
            certification: if profile.has_third_party_cert { 100 } else { 50 },
            risk_mitigation: remaining(
                breakdown.supplier_risk as u16 + breakdown.country_risk as u16,
            ),
        }
    }
}

/// `max(0, 100 - Σ deductions)`.
pub(crate) fn final_score(breakdown: &ScoreBreakdown) -> u8 {
    STARTING_SCORE.saturating_sub(breakdown.total()) as u8
}

pub(crate) fn strengths(profile: &AssessmentProfile, country_tier: RiskTier) -> Vec<String> {
    let mut strengths = Vec::new();

    if profile.gps_available {
        strengths.push("Geolocation data available".to_string());
    }
    if profile.has_land_records {
        strengths.push("Land ownership documentation present".to_string());
    }
    if profile.has_third_party_cert {
        let body = profile
            .certification_body
            .as_deref()
            .unwrap_or("recognized body");
        strengths.push(format!("Third-party certified by {body}"));
    }
    if profile.traceability_level.is_plot_level() {
        strengths.push("Advanced traceability system implemented".to_string());
    }
    if profile.farm_known && profile.supplier_type == SupplierType::DirectFarmer {
        strengths.push("Direct relationship with origin farmers".to_string());
    }
    if country_tier == RiskTier::Low {
        strengths.push("Low-risk origin country".to_string());
    }

    strengths
}

/// Highest-priority recommendations first; ties keep their evaluation order.
pub(crate) fn next_steps(
    recommendations: &[ComplianceRecommendation],
    limit: usize,
    today: NaiveDate,
    timeline: ComplianceTimeline,
) -> Vec<ActionItem> {
    let mut ranked: Vec<&ComplianceRecommendation> = recommendations.iter().collect();
    ranked.sort_by_key(|recommendation| recommendation.priority.rank());

    let days = timeline.estimated_days();
    let deadline = (days > 0)
        .then(|| today.checked_add_signed(Duration::days(i64::from(days))))
        .flatten();

    ranked
        .into_iter()
        .take(limit)
        .map(|recommendation| ActionItem {
            id: recommendation.id,
            title: recommendation.title.clone(),
            completed: false,
            deadline,
        })
        .collect()
}

/// First-seen order, duplicates dropped.
pub(crate) fn dedupe_actions(actions: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    actions
        .into_iter()
        .filter(|action| seen.insert(action.clone()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::scoring::findings::{RecommendationCategory, Severity};

    fn recommendation(priority: Severity, title: &str) -> ComplianceRecommendation {
        ComplianceRecommendation::new(priority, RecommendationCategory::Gps, title, "")
    }

    #[test]
    fn risk_level_thresholds_are_inclusive_at_the_lower_bound() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
    }

    #[test]
    fn timeline_bands_follow_score() {
        assert_eq!(ComplianceTimeline::from_score(39).estimated_days(), 180);
        assert_eq!(ComplianceTimeline::from_score(40).estimated_days(), 120);
        assert_eq!(ComplianceTimeline::from_score(60).estimated_days(), 45);
        assert_eq!(ComplianceTimeline::from_score(80).label(), "2-4 weeks");
        assert_eq!(ComplianceTimeline::from_score(95), ComplianceTimeline::Ready);
    }

    #[test]
    fn next_steps_sort_stably_and_truncate() {
        let recommendations = vec![
            recommendation(Severity::Low, "certify"),
            recommendation(Severity::Critical, "map supply chain"),
            recommendation(Severity::High, "declarations"),
            recommendation(Severity::Critical, "collect gps"),
            recommendation(Severity::Medium, "polygons"),
            recommendation(Severity::High, "upgrade traceability"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");

        let steps = next_steps(
            &recommendations,
            5,
            today,
            ComplianceTimeline::OneToTwoMonths,
        );

        let titles: Vec<&str> = steps.iter().map(|step| step.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "map supply chain",
                "collect gps",
                "declarations",
                "upgrade traceability",
                "polygons"
            ]
        );
        assert!(steps.iter().all(|step| !step.completed));
        assert_eq!(
            steps[0].deadline,
            NaiveDate::from_ymd_opt(2025, 4, 15)
        );
    }

    #[test]
    fn ready_timeline_leaves_deadlines_open() {
        let recommendations = vec![recommendation(Severity::Low, "certify")];
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");

        let steps = next_steps(&recommendations, 5, today, ComplianceTimeline::Ready);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].deadline, None);
    }

    #[test]
    fn actions_are_deduplicated_in_first_seen_order() {
        let actions = vec![
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
            "c".to_string(),
        ];

        assert_eq!(dedupe_actions(actions, 2), vec!["a", "b"]);
    }
}
