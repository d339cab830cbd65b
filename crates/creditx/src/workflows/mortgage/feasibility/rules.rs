use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::financials::{EmploymentIncome, FinancialSnapshot};
use super::FeasibilityFigures;

/// Share of a declared bonus counted next to the salary of the same employer.
pub(crate) const INLINE_BONUS_WEIGHT: Decimal = dec!(0.66);
/// Share of the separately tracked three-year bonus average.
pub(crate) const THREE_YEAR_BONUS_WEIGHT: Decimal = dec!(0.80);
/// Stress-test interest rate, independent of the rate actually offered.
pub(crate) const STRESS_INTEREST_RATE: Decimal = dec!(0.05);
pub(crate) const MAINTENANCE_RATE: Decimal = dec!(0.01);
pub(crate) const AMORTIZATION_RATE: Decimal = dec!(0.01);
/// Loan-to-value above which the stress test adds amortization.
pub(crate) const FIRST_MORTGAGE_LTV: Decimal = dec!(0.66);
/// Share of gross income that may go to housing and fixed charges.
pub(crate) const AFFORDABILITY_RATIO: Decimal = dec!(0.33);
pub(crate) const MINIMUM_EQUITY_RATIO: Decimal = dec!(0.20);
pub(crate) const MINIMUM_HARD_EQUITY_RATIO: Decimal = dec!(0.10);

/// Salaries plus the inline share of each employer's bonus.
pub(crate) fn employment_income(entries: &[EmploymentIncome]) -> Decimal {
    let (salaries, bonuses) = entries
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(salaries, bonuses), entry| {
            (
                salaries.saturating_add(entry.gross_annual_income),
                bonuses.saturating_add(entry.average_annual_bonus),
            )
        });

    salaries.saturating_add(bonuses.saturating_mul(INLINE_BONUS_WEIGHT))
}

/// Derives every intermediate figure the verdict is based on.
///
/// Arithmetic saturates instead of overflowing so pathological inputs still yield a figure.
pub(crate) fn compute_figures(snapshot: &FinancialSnapshot) -> FeasibilityFigures {
    let total_cost = snapshot
        .property_price
        .saturating_add(snapshot.additional_costs);

    let applicant_income = employment_income(&snapshot.employment_incomes);
    let co_applicant_income = employment_income(&snapshot.co_applicant_employment_incomes);
    let three_year_bonus = snapshot
        .average_bonus_over_three_years
        .saturating_add(snapshot.co_applicant_average_bonus_over_three_years)
        .saturating_mul(THREE_YEAR_BONUS_WEIGHT);
    let total_income = applicant_income
        .saturating_add(co_applicant_income)
        .saturating_add(three_year_bonus)
        .saturating_add(snapshot.supplementary_income)
        .saturating_add(snapshot.co_applicant_supplementary_income);

    let hard_equity = snapshot
        .liquid_assets
        .saturating_add(snapshot.third_pillar_withdrawal);
    let total_equity = hard_equity
        .saturating_add(snapshot.second_pillar_withdrawal)
        .saturating_add(snapshot.third_party_loan)
        .saturating_add(snapshot.inheritance_advance)
        .saturating_add(snapshot.donation);

    // Over-funded purchases produce a negative loan; it is kept as-is.
    let loan_amount = total_cost.saturating_sub(total_equity);
    let annual_interest = loan_amount.saturating_mul(STRESS_INTEREST_RATE);
    let maintenance_cost = snapshot.property_price.saturating_mul(MAINTENANCE_RATE);
    let amortization_threshold = snapshot.property_price.saturating_mul(FIRST_MORTGAGE_LTV);
    let amortization = if loan_amount > amortization_threshold {
        loan_amount.saturating_mul(AMORTIZATION_RATE)
    } else {
        Decimal::ZERO
    };
    let mortgage_charge = annual_interest
        .saturating_add(maintenance_cost)
        .saturating_add(amortization);
    let total_charge = snapshot.fixed_annual_charges.saturating_add(mortgage_charge);

    FeasibilityFigures {
        total_cost,
        applicant_income,
        co_applicant_income,
        three_year_bonus,
        total_income,
        hard_equity,
        total_equity,
        loan_amount,
        annual_interest,
        maintenance_cost,
        amortization_threshold,
        amortization,
        mortgage_charge,
        total_charge,
        affordable_charge: total_income.saturating_mul(AFFORDABILITY_RATIO),
        required_equity: total_cost.saturating_mul(MINIMUM_EQUITY_RATIO),
        required_hard_equity: total_cost.saturating_mul(MINIMUM_HARD_EQUITY_RATIO),
        loan_to_value: loan_to_value(loan_amount, snapshot.property_price),
    }
}

fn loan_to_value(loan_amount: Decimal, property_price: Decimal) -> Option<Decimal> {
    if property_price.is_zero() {
        return None;
    }
    loan_amount
        .checked_div(property_price)
        .map(|ratio| ratio.round_dp(4))
}
