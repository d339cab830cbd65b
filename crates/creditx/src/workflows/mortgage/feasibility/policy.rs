use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::financials::FinancialSnapshot;
use super::FeasibilityFigures;

/// Outcome of the three affordability and equity rules.
///
/// Stored next to the application as a cache; it is recomputed on every evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityVerdict {
    pub sufficient_income: bool,
    pub meets_twenty_percent_equity: bool,
    pub meets_ten_percent_hard_equity: bool,
}

impl FeasibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        self.sufficient_income
            && self.meets_twenty_percent_equity
            && self.meets_ten_percent_hard_equity
    }

    pub fn summary(&self) -> String {
        if self.is_eligible() {
            return "mortgage feasible".to_string();
        }

        let mut failed = Vec::new();
        if !self.sufficient_income {
            failed.push("income");
        }
        if !self.meets_twenty_percent_equity {
            failed.push("equity");
        }
        if !self.meets_ten_percent_hard_equity {
            failed.push("hard equity");
        }
        format!("mortgage not feasible: insufficient {}", failed.join(", "))
    }
}

/// Failed rule with the amount required and the amount the applicants bring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "rule",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum FeasibilityShortfall {
    MissingPurchasePrice,
    InsufficientIncome {
        total_charge: Decimal,
        affordable_charge: Decimal,
    },
    InsufficientEquity {
        required: Decimal,
        available: Decimal,
    },
    InsufficientHardEquity {
        required: Decimal,
        available: Decimal,
    },
}

impl FeasibilityShortfall {
    pub fn summary(&self) -> String {
        match self {
            FeasibilityShortfall::MissingPurchasePrice => {
                "no purchase price or costs declared".to_string()
            }
            FeasibilityShortfall::InsufficientIncome {
                total_charge,
                affordable_charge,
            } => format!(
                "annual charges {} exceed the affordable {}",
                total_charge.round_dp(2),
                affordable_charge.round_dp(2)
            ),
            FeasibilityShortfall::InsufficientEquity {
                required,
                available,
            } => format!(
                "equity {} below the required 20% ({})",
                available.round_dp(2),
                required.round_dp(2)
            ),
            FeasibilityShortfall::InsufficientHardEquity {
                required,
                available,
            } => format!(
                "hard equity {} below the required 10% ({}) when drawing on the second pillar",
                available.round_dp(2),
                required.round_dp(2)
            ),
        }
    }
}

pub(crate) fn decide_verdict(
    snapshot: &FinancialSnapshot,
    figures: &FeasibilityFigures,
) -> FeasibilityVerdict {
    // Nothing to finance means nothing to approve; the income and equity rules fail.
    let has_purchase = figures.total_cost > Decimal::ZERO;
    // The hard-equity floor only binds once pension money from the second pillar is drawn.
    let meets_ten_percent_hard_equity = if snapshot.second_pillar_withdrawal > Decimal::ZERO {
        figures.hard_equity >= figures.required_hard_equity
    } else {
        true
    };

    FeasibilityVerdict {
        sufficient_income: has_purchase && figures.affordable_charge >= figures.total_charge,
        meets_twenty_percent_equity: has_purchase
            && figures.total_equity >= figures.required_equity,
        meets_ten_percent_hard_equity,
    }
}

pub(crate) fn shortfalls(
    verdict: &FeasibilityVerdict,
    figures: &FeasibilityFigures,
) -> Vec<FeasibilityShortfall> {
    let mut shortfalls = Vec::new();

    if figures.total_cost <= Decimal::ZERO {
        shortfalls.push(FeasibilityShortfall::MissingPurchasePrice);
        if !verdict.meets_ten_percent_hard_equity {
            shortfalls.push(FeasibilityShortfall::InsufficientHardEquity {
                required: figures.required_hard_equity,
                available: figures.hard_equity,
            });
        }
        return shortfalls;
    }

    if !verdict.sufficient_income {
        shortfalls.push(FeasibilityShortfall::InsufficientIncome {
            total_charge: figures.total_charge,
            affordable_charge: figures.affordable_charge,
        });
    }
    if !verdict.meets_twenty_percent_equity {
        shortfalls.push(FeasibilityShortfall::InsufficientEquity {
            required: figures.required_equity,
            available: figures.total_equity,
        });
    }
    if !verdict.meets_ten_percent_hard_equity {
        shortfalls.push(FeasibilityShortfall::InsufficientHardEquity {
            required: figures.required_hard_equity,
            available: figures.hard_equity,
        });
    }

    shortfalls
}
