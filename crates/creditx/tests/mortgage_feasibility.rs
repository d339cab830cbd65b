//! Feasibility rules exercised through the public crate surface only: raw wizard JSON in,
//! verdict and figures out, plus the CSV batch path used by the CLI.

use std::io::Cursor;

use rust_decimal_macros::dec;
use serde_json::json;

use creditx::workflows::mortgage::{
    FeasibilityBatch, FeasibilityEvaluator, FeasibilityShortfall, FinancialSnapshot,
};

fn snapshot_from(value: serde_json::Value) -> FinancialSnapshot {
    serde_json::from_value(value).expect("wizard payload deserializes")
}

#[test]
fn wizard_payload_for_reference_purchase_is_feasible() {
    let snapshot = snapshot_from(json!({
        "propertyPrice": 800000,
        "additionalCosts": 0,
        "liquidAssets": "160'000",
        "thirdPillarWithdrawal": null,
        "employmentIncomes": [{ "grossAnnualIncome": "150000", "averageAnnualBonus": 0 }]
    }));

    let report = FeasibilityEvaluator::new().evaluate(&snapshot);

    assert!(report.is_eligible());
    assert_eq!(report.figures.loan_amount, dec!(640000));
    assert_eq!(report.figures.total_charge, dec!(46400));
    assert_eq!(report.figures.affordable_charge, dec!(49500));
    assert_eq!(report.figures.loan_to_value, Some(dec!(0.8)));
    assert_eq!(report.summary(), "mortgage feasible");
}

#[test]
fn garbage_amounts_degrade_to_zero_instead_of_failing() {
    let snapshot = snapshot_from(json!({
        "propertyPrice": "n/a",
        "liquidAssets": -5000,
        "employmentIncomes": "not a list",
        "donation": { "nested": true }
    }));

    assert_eq!(snapshot, FinancialSnapshot::default());

    let report = FeasibilityEvaluator::new().evaluate(&snapshot);
    assert!(!report.is_eligible());
    assert!(report
        .shortfalls()
        .contains(&FeasibilityShortfall::MissingPurchasePrice));
}

#[test]
fn second_pillar_funded_purchase_needs_ten_percent_hard_equity() {
    let snapshot = snapshot_from(json!({
        "propertyPrice": 1000000,
        "liquidAssets": 50000,
        "secondPillarWithdrawal": 150000,
        "employmentIncomes": [{ "grossAnnualIncome": 250000 }]
    }));

    let report = FeasibilityEvaluator::new().evaluate(&snapshot);

    assert!(report.verdict.sufficient_income);
    assert!(report.verdict.meets_twenty_percent_equity);
    assert!(!report.verdict.meets_ten_percent_hard_equity);
    assert_eq!(
        report.shortfalls(),
        vec![FeasibilityShortfall::InsufficientHardEquity {
            required: dec!(100000),
            available: dec!(50000),
        }]
    );
    assert!(report.summary().contains("hard equity"));
}

#[test]
fn csv_batch_evaluates_each_row_independently() {
    let csv = "\
reference,property_price,liquid_assets,gross_annual_income,second_pillar_withdrawal
zurich-flat,800000,160000,150000,
tight-budget,800000,160000,100000,
,1000000,50000,250000,150000
";
    let entries = FeasibilityBatch::from_reader(Cursor::new(csv)).expect("csv parses");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].reference, "row-3");

    let outcomes = FeasibilityBatch::evaluate(&entries, &FeasibilityEvaluator::new());
    let eligible: Vec<(&str, bool)> = outcomes
        .iter()
        .map(|outcome| (outcome.reference.as_str(), outcome.eligible))
        .collect();

    assert_eq!(
        eligible,
        vec![
            ("zurich-flat", true),
            ("tight-budget", false),
            ("row-3", false),
        ]
    );
    assert!(!outcomes[1].report.verdict.sufficient_income);
}
