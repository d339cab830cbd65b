use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantDetails, ApplicationId, DocumentDescriptor, PropertyDetails, WizardProgress,
    WizardStep,
};
use super::feasibility::FeasibilityVerdict;
use super::financials::FinancialSnapshot;

/// Persisted mortgage application, filled in incrementally by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageApplication {
    pub application_id: ApplicationId,
    /// Optimistic concurrency token; bumped by the repository on every write.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub wizard: WizardProgress,
    pub applicants: Vec<ApplicantDetails>,
    pub property: Option<PropertyDetails>,
    pub financials: FinancialSnapshot,
    pub documents: Vec<DocumentDescriptor>,
    /// Cached verdict of the last evaluation.
    pub feasibility: Option<FeasibilityVerdict>,
}

impl MortgageApplication {
    pub fn decision_rationale(&self) -> String {
        match &self.feasibility {
            Some(verdict) => verdict.summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.application_id.clone(),
            version: self.version,
            current_step: self.wizard.current_step,
            completed_steps: self.wizard.completed_steps.iter().copied().collect(),
            ready_for_review: self.wizard.ready_for_review(),
            decision_rationale: self.decision_rationale(),
            eligible: self.feasibility.map(|verdict| verdict.is_eligible()),
            feasibility: self.feasibility,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `update` must compare `record.version` with the stored version and refuse stale writes,
/// storing the record with the next version on success.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError>;
    fn update(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError>;
    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict { expected: u64, actual: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's progress and verdict.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub version: u64,
    pub current_step: WizardStep,
    pub completed_steps: Vec<WizardStep>,
    pub ready_for_review: bool,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feasibility: Option<FeasibilityVerdict>,
}
