//! EUDR readiness assessment: questionnaire intake, scoring, persistence, and reporting.
//!
//! A questionnaire is normalized into an [`AssessmentProfile`], scored by the
//! [`ScoringEngine`] starting from 100 points, and stored as an [`AssessmentRecord`].
//! The engine itself is pure; only the service touches storage and alerts.

pub mod domain;
pub mod export;
pub(crate) mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentProfile, ExporterFormData, Geolocation, PlotSize, SupplierType,
    TraceabilityLevel,
};
pub use export::{write_history_csv, HistoryExportError};
pub use intake::{parse_geolocation, IntakeGuard, IntakeViolation};
pub use report::{PortfolioSummary, RiskDistribution, ScoreTrendPoint, UpcomingDeadline};
pub use repository::{
    AlertError, AlertPublisher, AssessmentRecord, AssessmentSummaryView, ComplianceAlert,
    RecordStore, StoreError,
};
pub use router::assessment_router;
pub use scoring::{
    calculate_compliance_score, commodity_risk, country_risk, ActionItem, CommodityRisk,
    ComplianceGap, ComplianceRecommendation, ComplianceResult, ComplianceTimeline,
    ReadinessIndicators, RecommendationCategory, RiskFactor, RiskLevel, RiskTier, ScoreBreakdown,
    ScoreComponent, ScoringConfig, ScoringEngine, Severity,
};
pub use service::{AssessmentService, AssessmentServiceError};
