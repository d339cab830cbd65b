use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::financials::FinancialSnapshot;

/// Identifier wrapper for mortgage applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wizard steps in the order applicants walk through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalData,
    Financials,
    Property,
    Documents,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::PersonalData,
        WizardStep::Financials,
        WizardStep::Property,
        WizardStep::Documents,
        WizardStep::Review,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::PersonalData => "Personal data",
            WizardStep::Financials => "Financial situation",
            WizardStep::Property => "Property",
            WizardStep::Documents => "Documents",
            WizardStep::Review => "Review",
        }
    }
}

/// Where the applicant stands in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub current_step: WizardStep,
    pub completed_steps: BTreeSet<WizardStep>,
}

impl Default for WizardProgress {
    fn default() -> Self {
        Self {
            current_step: WizardStep::PersonalData,
            completed_steps: BTreeSet::new(),
        }
    }
}

impl WizardProgress {
    /// Marks a step done and moves to the first step not yet completed.
    pub fn complete(&mut self, step: WizardStep) {
        self.completed_steps.insert(step);
        self.current_step = WizardStep::ALL
            .iter()
            .copied()
            .find(|candidate| {
                *candidate != WizardStep::Review && !self.completed_steps.contains(candidate)
            })
            .unwrap_or(WizardStep::Review);
    }

    /// True once every data-collecting step has been submitted.
    pub fn ready_for_review(&self) -> bool {
        WizardStep::ALL
            .iter()
            .filter(|step| **step != WizardStep::Review)
            .all(|step| self.completed_steps.contains(step))
    }
}

/// Personal data for one borrower.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Apartment,
    SingleFamilyHouse,
    MultiFamilyHouse,
    BuildingLand,
    Other,
}

impl PropertyKind {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::Apartment => "apartment",
            PropertyKind::SingleFamilyHouse => "single-family house",
            PropertyKind::MultiFamilyHouse => "multi-family house",
            PropertyKind::BuildingLand => "building land",
            PropertyKind::Other => "property",
        }
    }
}

/// Property under consideration, as declared in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub street: String,
    pub postal_code: String,
    pub city: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub living_area_sqm: Option<u32>,
    #[serde(default)]
    pub plot_area_sqm: Option<u32>,
    #[serde(default)]
    pub rooms: Option<Decimal>,
    #[serde(default)]
    pub build_year: Option<u16>,
    #[serde(default)]
    pub estimated_value: Option<Decimal>,
}

impl PropertyDetails {
    pub fn address_line(&self) -> String {
        format!("{}, {} {}", self.street, self.postal_code, self.city)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Identification,
    SalaryStatement,
    TaxReturn,
    PensionStatement,
    DebtCollectionExtract,
    LandRegistryExtract,
    PurchaseContract,
    Other,
}

impl DocumentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::Identification => "identity document",
            DocumentCategory::SalaryStatement => "salary statement",
            DocumentCategory::TaxReturn => "tax return",
            DocumentCategory::PensionStatement => "pension fund statement",
            DocumentCategory::DebtCollectionExtract => "debt collection register extract",
            DocumentCategory::LandRegistryExtract => "land registry extract",
            DocumentCategory::PurchaseContract => "purchase contract",
            DocumentCategory::Other => "supporting document",
        }
    }
}

/// Metadata of an uploaded document; the binary lives in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    pub name: String,
    pub category: DocumentCategory,
    pub content_type: String,
    pub storage_key: String,
    #[serde(default)]
    pub check: Option<DocumentCheck>,
}

/// Result of the automated document review, cached on the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCheck {
    pub is_valid: bool,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Initial payload when an applicant starts the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(default)]
    pub applicants: Vec<ApplicantDetails>,
    #[serde(default)]
    pub property: Option<PropertyDetails>,
    #[serde(default)]
    pub financials: FinancialSnapshot,
}

/// Replacement for one wizard section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionUpdate {
    Applicants { applicants: Vec<ApplicantDetails> },
    Financials { financials: FinancialSnapshot },
    Property { property: PropertyDetails },
    Documents { documents: Vec<DocumentDescriptor> },
}

impl SectionUpdate {
    pub fn step(&self) -> WizardStep {
        match self {
            SectionUpdate::Applicants { .. } => WizardStep::PersonalData,
            SectionUpdate::Financials { .. } => WizardStep::Financials,
            SectionUpdate::Property { .. } => WizardStep::Property,
            SectionUpdate::Documents { .. } => WizardStep::Documents,
        }
    }
}
