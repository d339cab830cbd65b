mod policy;
mod rules;

pub use policy::{FeasibilityShortfall, FeasibilityVerdict};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::financials::FinancialSnapshot;

/// Stateless evaluator applying the affordability and equity rules to a snapshot.
///
/// Evaluation has no error path: every snapshot, including an all-zero one, yields a
/// verdict. The evaluator holds no state, so one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityEvaluator;

impl FeasibilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, snapshot: &FinancialSnapshot) -> FeasibilityReport {
        let figures = rules::compute_figures(snapshot);
        let verdict = policy::decide_verdict(snapshot, &figures);

        FeasibilityReport { verdict, figures }
    }
}

/// Intermediate amounts backing a verdict, kept so a decision can be explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityFigures {
    pub total_cost: Decimal,
    pub applicant_income: Decimal,
    pub co_applicant_income: Decimal,
    pub three_year_bonus: Decimal,
    pub total_income: Decimal,
    pub hard_equity: Decimal,
    pub total_equity: Decimal,
    pub loan_amount: Decimal,
    pub annual_interest: Decimal,
    pub maintenance_cost: Decimal,
    pub amortization_threshold: Decimal,
    pub amortization: Decimal,
    pub mortgage_charge: Decimal,
    pub total_charge: Decimal,
    pub affordable_charge: Decimal,
    pub required_equity: Decimal,
    pub required_hard_equity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_to_value: Option<Decimal>,
}

/// Verdict together with the figures it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityReport {
    pub verdict: FeasibilityVerdict,
    pub figures: FeasibilityFigures,
}

impl FeasibilityReport {
    pub fn is_eligible(&self) -> bool {
        self.verdict.is_eligible()
    }

    pub fn shortfalls(&self) -> Vec<FeasibilityShortfall> {
        policy::shortfalls(&self.verdict, &self.figures)
    }

    pub fn summary(&self) -> String {
        let shortfalls = self.shortfalls();
        if shortfalls.is_empty() {
            return self.verdict.summary();
        }

        let details: Vec<String> = shortfalls.iter().map(FeasibilityShortfall::summary).collect();
        format!("{}; {}", self.verdict.summary(), details.join("; "))
    }
}
