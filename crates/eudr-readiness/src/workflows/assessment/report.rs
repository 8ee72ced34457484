use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::AssessmentId;
use super::repository::AssessmentRecord;
use super::scoring::{ActionItem, RiskLevel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTrendPoint {
    pub assessment_id: AssessmentId,
    pub recorded_at: DateTime<Utc>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadline {
    pub title: String,
    pub deadline: NaiveDate,
}

/// Dashboard statistics across every stored assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_assessments: usize,
    pub average_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_risk_level: Option<RiskLevel>,
    pub risk_distribution: RiskDistribution,
    pub score_trend: Vec<ScoreTrendPoint>,
    pub pending_actions: Vec<ActionItem>,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
    pub gps_coverage_pct: u8,
}

impl PortfolioSummary {
    /// Records may arrive in any order; "latest" means the greatest `recorded_at`.
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        let mut chronological: Vec<&AssessmentRecord> = records.iter().collect();
        chronological.sort_by_key(|record| record.recorded_at);

        let mut risk_distribution = RiskDistribution::default();
        for record in &chronological {
            risk_distribution.record(record.result.risk_level);
        }

        let total_assessments = chronological.len();
        let total_score: usize = chronological
            .iter()
            .map(|record| usize::from(record.result.score))
            .sum();
        let average_score = rounded_share(total_score, total_assessments, 1);

        let with_gps = chronological
            .iter()
            .filter(|record| record.profile().gps_available)
            .count();
        let gps_coverage_pct = rounded_share(with_gps, total_assessments, 100);

        let score_trend = chronological
            .iter()
            .map(|record| ScoreTrendPoint {
                assessment_id: record.id,
                recorded_at: record.recorded_at,
                score: record.result.score,
            })
            .collect();

        let latest = chronological.last().copied();
        let pending_actions: Vec<ActionItem> = latest
            .map(|record| {
                record
                    .result
                    .next_steps
                    .iter()
                    .filter(|step| !step.completed)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let mut upcoming_deadlines: Vec<UpcomingDeadline> = pending_actions
            .iter()
            .filter_map(|step| {
                step.deadline.map(|deadline| UpcomingDeadline {
                    title: step.title.clone(),
                    deadline,
                })
            })
            .collect();
        upcoming_deadlines.sort_by_key(|entry| entry.deadline);

        Self {
            total_assessments,
            average_score,
            latest_score: latest.map(|record| record.result.score),
            latest_risk_level: latest.map(|record| record.result.risk_level),
            risk_distribution,
            score_trend,
            pending_actions,
            upcoming_deadlines,
            gps_coverage_pct,
        }
    }
}

/// `round(part * scale / whole)`, 0 when there is nothing to divide by.
fn rounded_share(part: usize, whole: usize, scale: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let value = (part * scale * 2 + whole) / (whole * 2);
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_rounds_half_up() {
        assert_eq!(rounded_share(0, 0, 100), 0);
        assert_eq!(rounded_share(1, 3, 100), 33);
        assert_eq!(rounded_share(2, 3, 100), 67);
        assert_eq!(rounded_share(125, 2, 1), 63);
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let summary = PortfolioSummary::from_records(&[]);
        assert_eq!(summary.total_assessments, 0);
        assert_eq!(summary.average_score, 0);
        assert_eq!(summary.latest_score, None);
        assert!(summary.score_trend.is_empty());
        assert_eq!(summary.gps_coverage_pct, 0);
    }
}
