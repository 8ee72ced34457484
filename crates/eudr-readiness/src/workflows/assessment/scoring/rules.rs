use super::super::domain::{AssessmentProfile, PlotSize, SupplierType, TraceabilityLevel};
use super::findings::{
    ComplianceGap, ComplianceRecommendation, RecommendationCategory, RiskFactor, Severity,
};
use super::tables::{commodity_risk, country_risk, RiskTier};
use super::{ScoreBreakdown, ScoreComponent};

/// Everything the factor checks produce before aggregation.
pub(crate) struct Findings {
    pub components: Vec<ScoreComponent>,
    pub breakdown: ScoreBreakdown,
    pub gaps: Vec<ComplianceGap>,
    pub recommendations: Vec<ComplianceRecommendation>,
    pub gap_lines: Vec<String>,
    pub actions: Vec<String>,
    pub country_tier: RiskTier,
}

impl Findings {
    fn new(country_tier: RiskTier) -> Self {
        Self {
            components: Vec::with_capacity(RiskFactor::ordered().len()),
            breakdown: ScoreBreakdown::default(),
            gaps: Vec::new(),
            recommendations: Vec::new(),
            gap_lines: Vec::new(),
            actions: Vec::new(),
            country_tier,
        }
    }

    fn deduct(&mut self, factor: RiskFactor, deduction: u8, notes: impl Into<String>) {
        self.breakdown.add(factor, deduction);
        self.components.push(ScoreComponent {
            factor,
            deduction,
            notes: notes.into(),
        });
    }

    fn gap_line(&mut self, line: impl Into<String>) {
        self.gap_lines.push(line.into());
    }

    fn action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }
}

pub(crate) fn score_profile(profile: &AssessmentProfile) -> Findings {
    let mut findings = Findings::new(country_risk(&profile.export_country));

    country(profile, &mut findings);
    commodity(profile, &mut findings);
    supplier(profile, &mut findings);
    deforestation_region(profile, &mut findings);
    geolocation(profile, &mut findings);
    traceability(profile, &mut findings);
    legal_documentation(profile, &mut findings);

    findings
}

fn country(profile: &AssessmentProfile, findings: &mut Findings) {
    let tier = findings.country_tier;
    let country = &profile.export_country;
    findings.deduct(
        RiskFactor::Country,
        tier.deduction(),
        format!("{country} classified as {} risk", tier.label()),
    );

    if tier != RiskTier::High {
        return;
    }

    findings.gap_line(format!("Sourcing from {country} (High Risk Jurisdiction)"));
    findings.action(format!(
        "Conduct enhanced due diligence for {country} origins, including satellite monitoring and third-party verification."
    ));
    findings.gaps.push(ComplianceGap::new(
        "Geographic Risk",
        Severity::High,
        format!("{country} is classified as a high-risk deforestation jurisdiction"),
        "May result in increased scrutiny, delayed shipments, or rejected exports to EU",
        "Enhanced due diligence required for all shipments from this country",
    ));
    findings.recommendations.push(
        ComplianceRecommendation::new(
            Severity::High,
            RecommendationCategory::Legal,
            "Enhanced Due Diligence for High-Risk Country",
            format!("Implement satellite monitoring and third-party audits for all {country} sources"),
        )
        .estimated(5000, 30),
    );
}

fn commodity(profile: &AssessmentProfile, findings: &mut Findings) {
    let row = commodity_risk(&profile.product_type);
    findings.deduct(
        RiskFactor::Commodity,
        row.deduction,
        format!("{} commodity weight {}", row.commodity, row.deduction),
    );

    if row.deduction < 20 {
        return;
    }

    findings.gap_line(format!("High-risk commodity: {}", profile.product_type));
    let severity = if row.deduction >= 25 {
        Severity::High
    } else {
        Severity::Medium
    };
    findings.gaps.push(ComplianceGap::new(
        "Commodity Risk",
        severity,
        row.rationale,
        "Higher compliance requirements and potential market access restrictions",
        "Implement commodity-specific risk mitigation protocols",
    ));
}

fn supplier(profile: &AssessmentProfile, findings: &mut Findings) {
    if !profile.farm_known {
        findings.deduct(RiskFactor::Supplier, 25, "farm-level origin unknown");
        findings.gap_line("Opaque Supply Chain: Unknown Farm Origin");
        findings.action("Map supply chain upstream to identify individual production plots.");
        findings.gaps.push(ComplianceGap::new(
            "Traceability",
            Severity::Critical,
            "Farm-level origin is unknown - EUDR requires traceability to production plot",
            "Cannot legally place products on EU market without plot-level traceability",
            "Conduct supply chain mapping to identify all origin farms",
        ));
        findings.recommendations.push(
            ComplianceRecommendation::new(
                Severity::Critical,
                RecommendationCategory::Traceability,
                "Supply Chain Mapping Required",
                "Trace all products back to origin farms and collect farmer identification data",
            )
            .estimated(10000, 60),
        );
        return;
    }

    match profile.supplier_type {
        SupplierType::Trader | SupplierType::Wholesaler => {
            findings.deduct(
                RiskFactor::Supplier,
                15,
                format!("indirect sourcing via {}", profile.supplier_type.label()),
            );
            findings.gap_line("Indirect Sourcing: Reliance on Traders/Wholesalers");
            findings.action("Obtain 'Supplier Declaration' warranties from all intermediaries.");
            findings.gaps.push(ComplianceGap::new(
                "Supplier Relationship",
                Severity::High,
                "Products are sourced through traders or wholesalers without direct farm relationships",
                "Origin claims depend on intermediaries and may not withstand audit",
                "Collect signed supplier declarations covering every consignment",
            ));
            findings.recommendations.push(
                ComplianceRecommendation::new(
                    Severity::High,
                    RecommendationCategory::Documentation,
                    "Supplier Declarations Required",
                    "Collect signed supplier declarations from all traders and wholesalers",
                )
                .estimated(2000, 14),
            );
        }
        SupplierType::Smallholder | SupplierType::Cooperative => {
            findings.deduct(
                RiskFactor::Supplier,
                5,
                format!("{} sourcing requires member records", profile.supplier_type.label()),
            );
            findings.action("Verify cooperative membership and individual farmer records.");
        }
        SupplierType::DirectFarmer => {
            findings.deduct(RiskFactor::Supplier, 0, "direct relationship with origin farmers");
        }
        SupplierType::Processor | SupplierType::Unknown => {
            findings.deduct(
                RiskFactor::Supplier,
                10,
                format!("supplier relationship {} not verifiable", profile.supplier_type.label()),
            );
            findings.gap_line("Supplier type not specified");
            findings.gaps.push(ComplianceGap::new(
                "Supplier Relationship",
                Severity::Medium,
                "Supplier type not specified",
                "Supplier risk cannot be assessed without knowing the sourcing relationship",
                "Classify each supplier relationship (direct farmer, cooperative, trader, etc.)",
            ));
        }
    }
}

fn deforestation_region(profile: &AssessmentProfile, findings: &mut Findings) {
    if !profile.high_deforestation_risk {
        findings.deduct(
            RiskFactor::DeforestationRegion,
            0,
            "no post-2020 deforestation flagged",
        );
        return;
    }

    findings.deduct(
        RiskFactor::DeforestationRegion,
        30,
        "production overlaps deforestation after 2020-12-31",
    );
    findings.gap_line("CRITICAL: Production overlaps with active deforestation alerts (post-2020)");
    findings.action(
        "IMMEDIATE ACTION: Segregate non-compliant plots. Do not ship products from these plots to the EU.",
    );
    findings.gaps.push(ComplianceGap::new(
        "Deforestation Risk",
        Severity::Critical,
        "Production area shows deforestation activity after December 31, 2020 cutoff date",
        "Products from these plots are PROHIBITED from EU market under EUDR Article 3",
        "IMMEDIATE: Remove non-compliant plots from supply chain",
    ));
    findings.recommendations.push(
        ComplianceRecommendation::new(
            Severity::Critical,
            RecommendationCategory::Gps,
            "Emergency Plot Segregation",
            "Conduct satellite analysis to identify and exclude all plots with post-2020 deforestation",
        )
        .estimated(15000, 7),
    );
}

fn geolocation(profile: &AssessmentProfile, findings: &mut Findings) {
    if !profile.gps_available {
        findings.deduct(RiskFactor::Geolocation, 30, "no geolocation for production plots");
        findings.gap_line("Missing Geolocation Coordinates (Mandatory - Article 9)");
        findings.action(
            "Collect GPS points for smallholders (<4ha) or polygon coordinates for large plots (≥4ha).",
        );
        findings.gaps.push(ComplianceGap::new(
            "Documentation",
            Severity::Critical,
            "No geolocation data provided - mandatory under EUDR Article 9(1)(a)",
            "Cannot submit Due Diligence Statement without GPS coordinates - shipments will be blocked",
            "Conduct GPS survey of all production plots using WGS 84 coordinate system",
        ));
        findings.recommendations.push(
            ComplianceRecommendation::new(
                Severity::Critical,
                RecommendationCategory::Gps,
                "GPS Data Collection Program",
                "Deploy mobile GPS collection tools or hire surveyor to map all plots",
            )
            .estimated(8000, 45),
        );
        return;
    }

    findings.deduct(RiskFactor::Geolocation, 0, "geolocation available");

    // Advisory only: large plots need polygons, not points.
    if profile.plot_size == PlotSize::Large {
        findings.action(
            "Verify that large plots (≥4ha) are mapped using GeoJSON Polygon format, not single GPS points.",
        );
        findings.recommendations.push(
            ComplianceRecommendation::new(
                Severity::Medium,
                RecommendationCategory::Gps,
                "Polygon Mapping for Large Plots",
                "Convert GPS points to polygon coordinates for all plots over 4 hectares",
            )
            .estimated(3000, 14),
        );
    }
}

fn traceability(profile: &AssessmentProfile, findings: &mut Findings) {
    match profile.traceability_level {
        TraceabilityLevel::None => {
            findings.deduct(RiskFactor::Traceability, 30, "no traceability system");
            findings.gap_line("No Traceability System Implemented");
            findings.action("Implement a batch-traceability system linking exports to origin plots.");
            findings.gaps.push(ComplianceGap::new(
                "Traceability",
                Severity::Critical,
                "No traceability system in place to link products to origin farms",
                "Cannot demonstrate chain of custody - high risk of audit failure",
                "Implement digital or paper-based traceability system",
            ));
            findings.recommendations.push(
                ComplianceRecommendation::new(
                    Severity::Critical,
                    RecommendationCategory::Traceability,
                    "Traceability System Implementation",
                    "Set up batch coding and chain-of-custody documentation system",
                )
                .estimated(12000, 60),
            );
        }
        TraceabilityLevel::Basic => {
            findings.deduct(
                RiskFactor::Traceability,
                15,
                "traceability limited to country or region",
            );
            findings.gap_line("Weak Traceability (Country/Regional Level Only)");
            findings.action("Upgrade traceability to plot-level or polygon-level precision.");
            findings.gaps.push(ComplianceGap::new(
                "Traceability",
                Severity::High,
                "Traceability stops at country or regional level",
                "Shipments cannot be linked to individual production plots",
                "Upgrade to plot-level traceability",
            ));
            findings.recommendations.push(
                ComplianceRecommendation::new(
                    Severity::High,
                    RecommendationCategory::Traceability,
                    "Traceability System Upgrade",
                    "Enhance current system to capture plot-level origin data",
                )
                .estimated(6000, 30),
            );
        }
        level @ (TraceabilityLevel::Advanced | TraceabilityLevel::Blockchain) => {
            findings.deduct(
                RiskFactor::Traceability,
                0,
                format!("{} plot-level traceability", level.label()),
            );
        }
    }
}

fn legal_documentation(profile: &AssessmentProfile, findings: &mut Findings) {
    let mut notes = Vec::new();

    if !profile.has_land_records {
        notes.push("land records missing");
        findings.gap_line("Missing land ownership/lease documentation");
        findings.action("Collect land titles, cadastral records, or lease agreements for all plots.");
        findings.gaps.push(ComplianceGap::new(
            "Documentation",
            Severity::High,
            "No documented proof of legal land rights",
            "Cannot verify legal production requirement under EUDR Article 2(39)",
            "Obtain and verify land title deeds or lease agreements",
        ));
    }

    if !profile.has_third_party_cert {
        notes.push("no third-party certification");
        findings.action(
            "Consider obtaining third-party certification (e.g., FSC, RSPO, Rainforest Alliance) to strengthen compliance.",
        );
        findings.recommendations.push(
            ComplianceRecommendation::new(
                Severity::Low,
                RecommendationCategory::Certification,
                "Third-Party Certification",
                "Pursue relevant sustainability certification to enhance credibility",
            )
            .estimated(15000, 180),
        );
    }

    let notes = if notes.is_empty() {
        "land records and certification present".to_string()
    } else {
        notes.join("; ")
    };
    findings.deduct(RiskFactor::LegalDocumentation, 0, notes);
}
