use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Declared salary for one employer of one applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentIncome {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub gross_annual_income: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub average_annual_bonus: Decimal,
}

impl EmploymentIncome {
    pub fn new(gross_annual_income: Decimal, average_annual_bonus: Decimal) -> Self {
        Self {
            gross_annual_income,
            average_annual_bonus,
        }
    }
}

/// Financial and property figures the feasibility rules read from an application.
///
/// Every amount is non-negative. Deserialization never fails on a bad amount: missing,
/// `null`, non-numeric and negative values all collapse to zero, and numbers sent as
/// strings (including Swiss `1'250'000` grouping) are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub property_price: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub additional_costs: Decimal,
    #[serde(default, deserialize_with = "lenient_incomes")]
    pub employment_incomes: Vec<EmploymentIncome>,
    #[serde(default, deserialize_with = "lenient_incomes")]
    pub co_applicant_employment_incomes: Vec<EmploymentIncome>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub average_bonus_over_three_years: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub co_applicant_average_bonus_over_three_years: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub supplementary_income: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub co_applicant_supplementary_income: Decimal,
    /// Leasing, existing credit installments and alimony for both applicants.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub fixed_annual_charges: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub liquid_assets: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub third_pillar_withdrawal: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub second_pillar_withdrawal: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub third_party_loan: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub inheritance_advance: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub donation: Decimal,
}

impl FinancialSnapshot {
    /// Re-applies the non-negative invariant to values built in code rather than parsed.
    pub fn sanitized(mut self) -> Self {
        for amount in [
            &mut self.property_price,
            &mut self.additional_costs,
            &mut self.average_bonus_over_three_years,
            &mut self.co_applicant_average_bonus_over_three_years,
            &mut self.supplementary_income,
            &mut self.co_applicant_supplementary_income,
            &mut self.fixed_annual_charges,
            &mut self.liquid_assets,
            &mut self.third_pillar_withdrawal,
            &mut self.second_pillar_withdrawal,
            &mut self.third_party_loan,
            &mut self.inheritance_advance,
            &mut self.donation,
        ] {
            *amount = non_negative(*amount);
        }

        for entry in self
            .employment_incomes
            .iter_mut()
            .chain(self.co_applicant_employment_incomes.iter_mut())
        {
            entry.gross_annual_income = non_negative(entry.gross_annual_income);
            entry.average_annual_bonus = non_negative(entry.average_annual_bonus);
        }

        self
    }
}

fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Coerces an arbitrary JSON value into a non-negative amount, defaulting to zero.
pub fn coerce_amount(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(raw) => parse_amount(raw),
        _ => None,
    };
    parsed.map(non_negative).unwrap_or(Decimal::ZERO)
}

/// Parses a textual amount, tolerating surrounding whitespace and apostrophe or
/// underscore digit grouping.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

fn lenient_incomes<'de, D>(deserializer: D) -> Result<Vec<EmploymentIncome>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let entries = match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value::<EmploymentIncome>(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_zero() {
        let snapshot: FinancialSnapshot = serde_json::from_value(json!({})).expect("parses");
        assert_eq!(snapshot, FinancialSnapshot::default());
    }

    #[test]
    fn malformed_amounts_collapse_to_zero() {
        let snapshot: FinancialSnapshot = serde_json::from_value(json!({
            "propertyPrice": "n/a",
            "additionalCosts": null,
            "liquidAssets": -5000,
            "donation": true,
            "employmentIncomes": "none",
        }))
        .expect("parses");

        assert_eq!(snapshot.property_price, Decimal::ZERO);
        assert_eq!(snapshot.additional_costs, Decimal::ZERO);
        assert_eq!(snapshot.liquid_assets, Decimal::ZERO);
        assert_eq!(snapshot.donation, Decimal::ZERO);
        assert!(snapshot.employment_incomes.is_empty());
    }

    #[test]
    fn accepts_strings_and_swiss_grouping() {
        let snapshot: FinancialSnapshot = serde_json::from_value(json!({
            "propertyPrice": "1'250'000",
            "additionalCosts": " 25000.50 ",
            "fixedAnnualCharges": 1.2e4,
        }))
        .expect("parses");

        assert_eq!(snapshot.property_price, dec!(1250000));
        assert_eq!(snapshot.additional_costs, dec!(25000.50));
        assert_eq!(snapshot.fixed_annual_charges, dec!(12000));
    }

    #[test]
    fn skips_non_object_income_entries() {
        let snapshot: FinancialSnapshot = serde_json::from_value(json!({
            "employmentIncomes": [
                { "grossAnnualIncome": 90000, "averageAnnualBonus": "5000" },
                42,
                { "grossAnnualIncome": "bad" }
            ]
        }))
        .expect("parses");

        assert_eq!(
            snapshot.employment_incomes,
            vec![
                EmploymentIncome::new(dec!(90000), dec!(5000)),
                EmploymentIncome::new(Decimal::ZERO, Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn sanitized_clamps_negative_values() {
        let snapshot = FinancialSnapshot {
            property_price: dec!(-1),
            employment_incomes: vec![EmploymentIncome::new(dec!(-10), dec!(20))],
            ..FinancialSnapshot::default()
        }
        .sanitized();

        assert_eq!(snapshot.property_price, Decimal::ZERO);
        assert_eq!(
            snapshot.employment_incomes[0],
            EmploymentIncome::new(Decimal::ZERO, dec!(20))
        );
    }
}
