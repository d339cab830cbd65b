use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::feasibility::{FeasibilityEvaluator, FeasibilityReport};
use super::financials::{parse_amount, EmploymentIncome, FinancialSnapshot};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read batch file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid batch CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One CSV row turned into a snapshot, keyed by the caller's reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub reference: String,
    pub snapshot: FinancialSnapshot,
}

/// Evaluation of one batch entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub reference: String,
    pub eligible: bool,
    pub report: FeasibilityReport,
}

/// Reads flat, one-employer-per-applicant snapshots from CSV exports.
///
/// Columns are matched by snake_case header name; absent columns and unparsable cells
/// count as zero, mirroring the lenient JSON intake.
pub struct FeasibilityBatch;

impl FeasibilityBatch {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<BatchEntry>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<BatchEntry>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, row) in csv_reader.deserialize::<BatchRow>().enumerate() {
            let row = row?;
            let reference = row
                .reference
                .clone()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| format!("row-{}", index + 1));
            entries.push(BatchEntry {
                reference,
                snapshot: row.into_snapshot(),
            });
        }

        Ok(entries)
    }

    pub fn evaluate(entries: &[BatchEntry], evaluator: &FeasibilityEvaluator) -> Vec<BatchOutcome> {
        entries
            .iter()
            .map(|entry| {
                let report = evaluator.evaluate(&entry.snapshot);
                BatchOutcome {
                    reference: entry.reference.clone(),
                    eligible: report.is_eligible(),
                    report,
                }
            })
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BatchRow {
    reference: Option<String>,
    property_price: Option<String>,
    additional_costs: Option<String>,
    gross_annual_income: Option<String>,
    average_annual_bonus: Option<String>,
    co_applicant_gross_annual_income: Option<String>,
    co_applicant_average_annual_bonus: Option<String>,
    average_bonus_over_three_years: Option<String>,
    co_applicant_average_bonus_over_three_years: Option<String>,
    supplementary_income: Option<String>,
    co_applicant_supplementary_income: Option<String>,
    fixed_annual_charges: Option<String>,
    liquid_assets: Option<String>,
    third_pillar_withdrawal: Option<String>,
    second_pillar_withdrawal: Option<String>,
    third_party_loan: Option<String>,
    inheritance_advance: Option<String>,
    donation: Option<String>,
}

impl BatchRow {
    fn into_snapshot(self) -> FinancialSnapshot {
        let employment = employer_entry(&self.gross_annual_income, &self.average_annual_bonus);
        let co_employment = employer_entry(
            &self.co_applicant_gross_annual_income,
            &self.co_applicant_average_annual_bonus,
        );

        FinancialSnapshot {
            property_price: amount(&self.property_price),
            additional_costs: amount(&self.additional_costs),
            employment_incomes: employment.into_iter().collect(),
            co_applicant_employment_incomes: co_employment.into_iter().collect(),
            average_bonus_over_three_years: amount(&self.average_bonus_over_three_years),
            co_applicant_average_bonus_over_three_years: amount(
                &self.co_applicant_average_bonus_over_three_years,
            ),
            supplementary_income: amount(&self.supplementary_income),
            co_applicant_supplementary_income: amount(&self.co_applicant_supplementary_income),
            fixed_annual_charges: amount(&self.fixed_annual_charges),
            liquid_assets: amount(&self.liquid_assets),
            third_pillar_withdrawal: amount(&self.third_pillar_withdrawal),
            second_pillar_withdrawal: amount(&self.second_pillar_withdrawal),
            third_party_loan: amount(&self.third_party_loan),
            inheritance_advance: amount(&self.inheritance_advance),
            donation: amount(&self.donation),
        }
        .sanitized()
    }
}

fn amount(cell: &Option<String>) -> Decimal {
    cell.as_deref()
        .and_then(parse_amount)
        .unwrap_or(Decimal::ZERO)
}

fn employer_entry(gross: &Option<String>, bonus: &Option<String>) -> Option<EmploymentIncome> {
    if gross.is_none() && bonus.is_none() {
        return None;
    }
    Some(EmploymentIncome::new(amount(gross), amount(bonus)))
}
