use crate::infra::{InMemoryAlertPublisher, InMemoryRecordStore};
use chrono::{NaiveDate, Utc};
use clap::Args;
use eudr_readiness::config::AppConfig;
use eudr_readiness::error::AppError;
use eudr_readiness::workflows::assessment::{
    AssessmentRecord, AssessmentService, ExporterFormData, PortfolioSummary, ScoringConfig,
};
use eudr_readiness::workflows::dds::{DdsRequest, DueDiligenceStatement};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Questionnaire JSON file (camelCase fields, legacy names accepted)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Assessment date used for next-step deadlines (defaults to today, UTC)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Assessment date used for next-step deadlines (defaults to today, UTC)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the rendered DDS XML for the strongest exporter
    #[arg(long)]
    pub(crate) show_xml: bool,
}

type DemoService = AssessmentService<InMemoryRecordStore, InMemoryAlertPublisher>;

fn build_service(config: ScoringConfig) -> (DemoService, Arc<InMemoryAlertPublisher>) {
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = AssessmentService::new(
        Arc::new(InMemoryRecordStore::default()),
        alerts.clone(),
        config,
    );
    (service, alerts)
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, today, json } = args;

    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&input)?;
    let form: ExporterFormData = serde_json::from_str(&raw)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    let (service, _) = build_service(config.scoring);
    let record = service.submit_on(form, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record.result)?);
    } else {
        render_record(&record);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, show_xml } = args;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    println!("EUDR readiness demo (assessed {today})");
    let (service, alerts) = build_service(ScoringConfig::default());

    let mut strongest: Option<AssessmentRecord> = None;
    for form in demo_exporters() {
        let record = match service.submit_on(form, today) {
            Ok(record) => record,
            Err(err) => {
                println!("  Questionnaire rejected: {}", err);
                continue;
            }
        };
        println!();
        render_record(&record);

        let is_stronger = strongest
            .as_ref()
            .map_or(true, |best| record.result.score > best.result.score);
        if is_stronger {
            strongest = Some(record);
        }
    }

    let summary = service.portfolio_summary()?;
    render_portfolio(&summary);

    let raised = alerts.events();
    if !raised.is_empty() {
        println!("\nAlerts raised");
        for alert in &raised {
            println!("- [{}] {}", alert.severity.label(), alert.title);
        }
    }

    let Some(record) = strongest else {
        return Ok(());
    };
    let statement = DueDiligenceStatement::draft(&record, &demo_shipment(), Utc::now())?;
    println!(
        "\nDue diligence statement {} drafted for {} ({})",
        statement.reference_number,
        statement.operator_name,
        statement.file_name()
    );
    if show_xml {
        println!("{}", statement.render_xml());
    }

    Ok(())
}

fn render_record(record: &AssessmentRecord) {
    let result = &record.result;

    println!(
        "{} | {} from {}",
        record.form.company_name.trim(),
        record.form.product_type.trim(),
        record.form.export_country.trim()
    );
    println!(
        "- Score {} / 100 | {} risk | {}",
        result.score,
        result.risk_level.label(),
        result.time_to_compliance.label()
    );
    for component in result.components.iter().filter(|c| c.deduction > 0) {
        println!(
            "- {}: -{} ({})",
            component.factor.label(),
            component.deduction,
            component.notes
        );
    }

    if !result.gaps.is_empty() {
        println!("  Gaps:");
        for gap in &result.gaps {
            println!(
                "    - [{}] {}: {}",
                gap.severity.label(),
                gap.area,
                gap.description
            );
        }
    }
    if !result.recommendations.is_empty() {
        println!("  Recommendations:");
        for recommendation in &result.recommendations {
            println!(
                "    - [{}] {} / {}",
                recommendation.priority.label(),
                recommendation.category.label(),
                recommendation.title
            );
        }
    }
    if !result.next_steps.is_empty() {
        println!("  Next steps:");
        for step in &result.next_steps {
            match step.deadline {
                Some(deadline) => println!("    - {} (by {})", step.title, deadline),
                None => println!("    - {}", step.title),
            }
        }
    }
    if !result.strengths.is_empty() {
        println!("  Strengths: {}", result.strengths.join("; "));
    }
}

fn render_portfolio(summary: &PortfolioSummary) {
    println!("\nPortfolio");
    println!(
        "- {} assessments | average score {} | GPS coverage {}%",
        summary.total_assessments, summary.average_score, summary.gps_coverage_pct
    );
    println!(
        "- Risk distribution: {} low / {} medium / {} high",
        summary.risk_distribution.low,
        summary.risk_distribution.medium,
        summary.risk_distribution.high
    );
    if let Some(deadline) = summary.upcoming_deadlines.first() {
        println!(
            "- Next deadline: {} on {}",
            deadline.title, deadline.deadline
        );
    }
}

fn demo_exporters() -> Vec<ExporterFormData> {
    vec![
        ExporterFormData {
            company_name: "Ucayali Cacao SAC".to_string(),
            export_country: "Peru".to_string(),
            product_type: "Cocoa".to_string(),
            annual_volume: Some("100-500 tons".to_string()),
            is_farm_known: Some(false),
            supplier_type: Some("Trader".to_string()),
            is_high_deforestation_risk: Some(true),
            is_gps_available: Some(false),
            traceability_level: Some("None".to_string()),
            has_land_records: Some(false),
            has_third_party_cert: Some(false),
            ..ExporterFormData::default()
        },
        ExporterFormData {
            company_name: "Sidama Highland Coffee Union".to_string(),
            export_country: "Ethiopia".to_string(),
            product_type: "Coffee".to_string(),
            annual_volume: Some("500-1000 tons".to_string()),
            is_farm_known: Some(true),
            supplier_type: Some("Cooperative".to_string()),
            is_gps_available: Some(true),
            plot_size: Some("Small".to_string()),
            geolocation_data: Some("6.7612, 38.4219".to_string()),
            traceability_level: Some("Basic".to_string()),
            has_land_records: Some(true),
            has_third_party_cert: Some(false),
            ..ExporterFormData::default()
        },
        ExporterFormData {
            company_name: "Perak Latex Estates".to_string(),
            export_country: "Malaysia".to_string(),
            product_type: "Rubber".to_string(),
            annual_volume: Some("1000+ tons".to_string()),
            is_farm_known: Some(true),
            supplier_type: Some("Direct Farmer".to_string()),
            is_gps_available: Some(true),
            plot_size: Some("Large".to_string()),
            geolocation_data: Some(
                r#"{"type":"Polygon","coordinates":[[[101.09,4.59],[101.12,4.59],[101.12,4.62],[101.09,4.59]]]}"#
                    .to_string(),
            ),
            traceability_level: Some("Advanced".to_string()),
            has_land_records: Some(true),
            has_third_party_cert: Some(true),
            certification_body: Some("FSC".to_string()),
            ..ExporterFormData::default()
        },
    ]
}

fn demo_shipment() -> DdsRequest {
    DdsRequest {
        hs_code: "400122".to_string(),
        net_mass_kg: 18000.0,
        invoice_number: "PLE-2025-0117".to_string(),
        buyer_name: "Rotterdam Polymer Trading B.V.".to_string(),
        buyer_address: "Waalhaven Z.z. 44, Rotterdam".to_string(),
        buyer_country: Some("Netherlands".to_string()),
        port_of_entry: Some("Rotterdam".to_string()),
        transport_mode: Some("Sea".to_string()),
        ..DdsRequest::default()
    }
}
