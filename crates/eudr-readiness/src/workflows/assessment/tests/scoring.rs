use super::common::*;
use chrono::NaiveDate;

use crate::workflows::assessment::domain::{AssessmentProfile, ExporterFormData};
use crate::workflows::assessment::{
    calculate_compliance_score, ComplianceResult, ComplianceTimeline, RecommendationCategory,
    RiskFactor, RiskLevel, ScoringConfig, ScoringEngine, Severity,
};

fn assess(form: &ExporterFormData) -> ComplianceResult {
    ScoringEngine::default().assess(&AssessmentProfile::from(form), today())
}

#[test]
fn best_case_exporter_scores_eighty_with_no_gaps() {
    let result = assess(&best_case_form());

    assert_eq!(result.score, 80);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.time_to_compliance, ComplianceTimeline::TwoToFourWeeks);
    assert_eq!(result.estimated_days_to_compliance, 21);
    assert!(result.gaps.is_empty());
    assert!(result.recommendations.is_empty());
    assert!(result.next_steps.is_empty());
    assert_eq!(result.score_breakdown.country_risk, 5);
    assert_eq!(result.score_breakdown.commodity_risk, 15);
    assert_eq!(result.score_breakdown.total(), 20);

    assert!(result
        .strengths
        .contains(&"Third-party certified by Rainforest Alliance".to_string()));
    assert!(result
        .strengths
        .contains(&"Direct relationship with origin farmers".to_string()));
    assert!(result
        .strengths
        .contains(&"Low-risk origin country".to_string()));
}

#[test]
fn worst_case_exporter_floors_at_zero() {
    let result = assess(&worst_case_form());

    assert_eq!(result.score, 0);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.time_to_compliance, ComplianceTimeline::SixMonthsOrMore);
    assert_eq!(result.critical_gap_count(), 4);
    assert!(
        result
            .gaps
            .iter()
            .filter(|gap| gap.requires_immediate_action())
            .count()
            >= 6
    );
    assert!(result.score_breakdown.total() > 100);
    assert_eq!(result.missing_gaps.len(), 7);
    assert!(result.strengths.is_empty());
}

#[test]
fn unlisted_other_origin_is_scored_as_high_risk_worst_case() {
    let mut form = worst_case_form();
    form.export_country = "Other".to_string();

    let result = assess(&form);

    assert_eq!(result.score, 0);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.score_breakdown.country_risk, 25);
    assert_eq!(result.score_breakdown.commodity_risk, 30);
    assert_eq!(result.score_breakdown.supplier_risk, 25);
    assert_eq!(result.score_breakdown.traceability_risk, 30);
    assert_eq!(result.score_breakdown.documentation_risk, 60);
    assert!(
        result
            .gaps
            .iter()
            .filter(|gap| matches!(gap.severity, Severity::Critical | Severity::High))
            .count()
            >= 6
    );
    assert!(result
        .gaps
        .iter()
        .any(|gap| gap.area == "Geographic Risk" && gap.description.starts_with("Other")));
}

#[test]
fn worst_case_next_steps_put_critical_work_first() {
    let result = assess(&worst_case_form());

    let titles: Vec<&str> = result
        .next_steps
        .iter()
        .map(|step| step.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Supply Chain Mapping Required",
            "Emergency Plot Segregation",
            "GPS Data Collection Program",
            "Traceability System Implementation",
            "Enhanced Due Diligence for High-Risk Country",
        ]
    );
    let deadline = NaiveDate::from_ymd_opt(2025, 8, 28);
    assert!(result.next_steps.iter().all(|step| step.deadline == deadline));
}

#[test]
fn medium_tier_origin_with_basic_traceability_lands_at_fifty() {
    let result = assess(&medium_case_form());

    assert_eq!(result.score, 50);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.time_to_compliance, ComplianceTimeline::ThreeToFiveMonths);
    assert_eq!(result.gaps.len(), 1);
    assert_eq!(result.gaps[0].area, "Traceability");
    assert_eq!(result.gaps[0].severity, Severity::High);
    assert_eq!(result.indicators.risk_mitigation, 80);
    assert_eq!(result.indicators.traceability, 85);
    assert_eq!(result.indicators.certification, 50);
}

#[test]
fn legacy_aliases_score_identically() {
    let canonical = assess(&best_case_form());
    let legacy = assess(&legacy_best_case_form());

    assert_eq!(canonical.score, legacy.score);
    assert_eq!(canonical.score_breakdown, legacy.score_breakdown);
    assert_eq!(canonical.strengths, legacy.strengths);
    assert_eq!(canonical.components, legacy.components);
}

#[test]
fn every_factor_reports_a_component_in_evaluation_order() {
    let result = assess(&medium_case_form());

    let factors: Vec<RiskFactor> = result
        .components
        .iter()
        .map(|component| component.factor)
        .collect();
    assert_eq!(factors, RiskFactor::ordered().to_vec());

    let supplier = result
        .component(RiskFactor::Supplier)
        .expect("supplier component");
    assert_eq!(supplier.deduction, 5);
    assert!(result
        .components
        .iter()
        .all(|component| component.deduction <= component.factor.max_deduction()));
}

#[test]
fn deforestation_flag_is_critical_and_lands_in_documentation_bucket() {
    let mut form = best_case_form();
    form.is_high_deforestation_risk = Some(true);

    let result = assess(&form);

    assert_eq!(result.score, 50);
    assert_eq!(result.score_breakdown.documentation_risk, 30);
    let gap = result
        .gaps
        .iter()
        .find(|gap| gap.area == "Deforestation Risk")
        .expect("deforestation gap");
    assert_eq!(gap.severity, Severity::Critical);
    assert!(result
        .recommended_actions
        .iter()
        .any(|action| action.starts_with("IMMEDIATE ACTION")));
}

#[test]
fn large_plots_with_points_get_polygon_advice_without_deduction() {
    let mut form = best_case_form();
    form.plot_size = Some("Large".to_string());

    let result = assess(&form);

    assert_eq!(result.score, 80);
    let recommendation = result
        .recommendations
        .iter()
        .find(|recommendation| recommendation.title == "Polygon Mapping for Large Plots")
        .expect("polygon advice");
    assert_eq!(recommendation.priority, Severity::Medium);
    assert_eq!(recommendation.category, RecommendationCategory::Gps);
    assert_eq!(recommendation.estimated_cost, Some(3000));
    assert_eq!(recommendation.estimated_time, Some(14));
}

#[test]
fn missing_enum_answers_take_the_conservative_branch() {
    let form = ExporterFormData {
        company_name: "Unlabelled Exports".to_string(),
        export_country: "Germany".to_string(),
        product_type: "Coffee".to_string(),
        is_farm_known: Some(true),
        is_gps_available: Some(true),
        has_land_records: Some(true),
        has_third_party_cert: Some(true),
        ..ExporterFormData::default()
    };

    let result = assess(&form);

    assert_eq!(
        result.component(RiskFactor::Supplier).map(|c| c.deduction),
        Some(10)
    );
    assert_eq!(result.score_breakdown.traceability_risk, 30);
    assert!(result
        .missing_gaps
        .contains(&"Supplier type not specified".to_string()));
    assert!(result
        .recommendations
        .iter()
        .any(|recommendation| recommendation.title == "Polygon Mapping for Large Plots"));
}

#[test]
fn unlisted_commodity_uses_fallback_weight() {
    let mut form = best_case_form();
    form.product_type = "Vanilla".to_string();

    let result = assess(&form);

    assert_eq!(result.score_breakdown.commodity_risk, 10);
    assert_eq!(result.score, 85);
}

#[test]
fn configured_limits_truncate_next_steps_and_actions() {
    let engine = ScoringEngine::new(ScoringConfig {
        next_steps_limit: 2,
        recommended_actions_limit: 3,
    });

    let result = engine.assess(&AssessmentProfile::from(&worst_case_form()), today());

    assert_eq!(result.next_steps.len(), 2);
    assert_eq!(result.recommended_actions.len(), 3);
    assert!(result.recommended_actions[0].contains("Brazil"));
}

#[test]
fn convenience_entry_point_matches_engine_scoring() {
    let form = medium_case_form();

    let direct = calculate_compliance_score(&form);
    let engine = assess(&form);

    assert_eq!(direct.score, engine.score);
    assert_eq!(direct.score_breakdown, engine.score_breakdown);
    assert_eq!(direct.gaps.len(), engine.gaps.len());
}
