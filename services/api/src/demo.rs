use crate::infra::{parse_cli_amount, InMemoryApplicationRepository};
use clap::Args;
use creditx::error::AppError;
use creditx::workflows::mortgage::{
    ApplicantDetails, ApplicationDraft, DocumentCategory, DocumentDescriptor, EmploymentIncome,
    FeasibilityBatch, FeasibilityEvaluator, FeasibilityReport, FinancialSnapshot,
    MortgageApplicationService, PropertyDetails, PropertyKind, SectionUpdate,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding a financial snapshot in wizard format
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one applicant per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print outcomes as a JSON array instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Purchase price in CHF. Defaults to 800'000.
    #[arg(long, value_parser = parse_cli_amount)]
    pub(crate) property_price: Option<Decimal>,
    /// Gross annual salary in CHF. Defaults to 150'000.
    #[arg(long, value_parser = parse_cli_amount)]
    pub(crate) gross_income: Option<Decimal>,
    /// Liquid savings in CHF. Defaults to 20% of the price.
    #[arg(long, value_parser = parse_cli_amount)]
    pub(crate) liquid_assets: Option<Decimal>,
    /// Second-pillar withdrawal in CHF.
    #[arg(long, value_parser = parse_cli_amount)]
    pub(crate) second_pillar: Option<Decimal>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let snapshot: FinancialSnapshot = serde_json::from_str(&raw)?;
    let report = FeasibilityEvaluator::new().evaluate(&snapshot.sanitized());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let entries = FeasibilityBatch::from_path(&args.csv)?;
    let outcomes = FeasibilityBatch::evaluate(&entries, &FeasibilityEvaluator::new());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!(
        "{:<20} {:>9} {:>14} {:>14} {:>14}",
        "reference", "eligible", "total charge", "affordable", "equity"
    );
    for outcome in &outcomes {
        let figures = &outcome.report.figures;
        println!(
            "{:<20} {:>9} {:>14} {:>14} {:>14}",
            outcome.reference,
            if outcome.eligible { "yes" } else { "no" },
            figures.total_charge.round_dp(2),
            figures.affordable_charge.round_dp(2),
            figures.total_equity.round_dp(2)
        );
    }
    let eligible = outcomes.iter().filter(|outcome| outcome.eligible).count();
    println!("{eligible} of {} applicants feasible", outcomes.len());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let property_price = args.property_price.unwrap_or(dec!(800000));
    let financials = FinancialSnapshot {
        property_price,
        liquid_assets: args
            .liquid_assets
            .unwrap_or_else(|| property_price.saturating_mul(dec!(0.20))),
        second_pillar_withdrawal: args.second_pillar.unwrap_or(Decimal::ZERO),
        employment_incomes: vec![EmploymentIncome::new(
            args.gross_income.unwrap_or(dec!(150000)),
            Decimal::ZERO,
        )],
        ..FinancialSnapshot::default()
    };

    println!("Mortgage application wizard demo");
    let service = MortgageApplicationService::new(Arc::new(
        InMemoryApplicationRepository::default(),
    ));

    let record = match service.create(demo_draft()) {
        Ok(record) => record,
        Err(err) => {
            println!("  Application rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Started application {} at step {}",
        record.application_id,
        record.wizard.current_step.label()
    );

    let sections = [
        SectionUpdate::Financials { financials },
        SectionUpdate::Property {
            property: demo_property(),
        },
        SectionUpdate::Documents {
            documents: vec![DocumentDescriptor {
                name: "Salary statement 2024".to_string(),
                category: DocumentCategory::SalaryStatement,
                content_type: "image/jpeg".to_string(),
                storage_key: "redacted/sanitized".to_string(),
                check: None,
            }],
        },
    ];

    let mut current = record;
    for update in sections {
        let step = update.step();
        current = match service.update_section(&current.application_id, current.version, update)
        {
            Ok(saved) => saved,
            Err(err) => {
                println!("  Saving {} failed: {}", step.label(), err);
                return Ok(());
            }
        };
        println!(
            "- Saved {} (version {}, next step {})",
            step.label(),
            current.version,
            current.wizard.current_step.label()
        );
    }

    let report = match service.evaluate(&current.application_id, Some(current.version)) {
        Ok(report) => report,
        Err(err) => {
            println!("  Evaluation unavailable: {}", err);
            return Ok(());
        }
    };
    render_report(&report);

    match service.get(&current.application_id) {
        Ok(stored) => match serde_json::to_string_pretty(&stored.status_view()) {
            Ok(json) => println!("  Public status payload:\n{}", json),
            Err(err) => println!("  Public status payload unavailable: {}", err),
        },
        Err(err) => println!("  Repository unavailable: {}", err),
    }

    Ok(())
}

fn render_report(report: &FeasibilityReport) {
    let figures = &report.figures;
    println!("Feasibility: {}", report.summary());
    println!(
        "- Total cost {} | equity {} (hard {}) | loan {}",
        figures.total_cost, figures.total_equity, figures.hard_equity, figures.loan_amount
    );
    if let Some(ltv) = figures.loan_to_value {
        println!("- Loan-to-value {:.1}%", ltv.saturating_mul(dec!(100)));
    }
    println!(
        "- Yearly charge {} (interest {}, maintenance {}, amortization {}) vs affordable {}",
        figures.total_charge,
        figures.annual_interest,
        figures.maintenance_cost,
        figures.amortization,
        figures.affordable_charge
    );
    println!(
        "- Income {} | 20% equity {} | 10% hard equity {}",
        check_mark(report.verdict.sufficient_income),
        check_mark(report.verdict.meets_twenty_percent_equity),
        check_mark(report.verdict.meets_ten_percent_hard_equity)
    );
}

fn check_mark(passed: bool) -> &'static str {
    if passed {
        "ok"
    } else {
        "failed"
    }
}

fn demo_draft() -> ApplicationDraft {
    ApplicationDraft {
        applicants: vec![ApplicantDetails {
            first_name: "Anna".to_string(),
            last_name: "Meier".to_string(),
            email: "anna.meier@example.ch".to_string(),
            birth_date: None,
            nationality: Some("CH".to_string()),
            employment_status: Some("employed".to_string()),
        }],
        ..ApplicationDraft::default()
    }
}

fn demo_property() -> PropertyDetails {
    PropertyDetails {
        street: "Bahnhofstrasse 10".to_string(),
        postal_code: "6003".to_string(),
        city: "Luzern".to_string(),
        kind: PropertyKind::Apartment,
        living_area_sqm: Some(105),
        plot_area_sqm: None,
        rooms: Some(dec!(4.5)),
        build_year: Some(2015),
        estimated_value: None,
    }
}
