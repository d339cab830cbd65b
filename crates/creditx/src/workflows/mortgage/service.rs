use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{ApplicationDraft, ApplicationId, SectionUpdate, WizardProgress, WizardStep};
use super::feasibility::{FeasibilityEvaluator, FeasibilityReport};
use super::financials::FinancialSnapshot;
use super::repository::{ApplicationRepository, MortgageApplication, RepositoryError};

/// Service composing the repository with the feasibility evaluator.
pub struct MortgageApplicationService<R> {
    repository: Arc<R>,
    evaluator: FeasibilityEvaluator,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R> MortgageApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            evaluator: FeasibilityEvaluator::new(),
        }
    }

    /// Start a new application from whatever the first wizard screen collected.
    pub fn create(
        &self,
        draft: ApplicationDraft,
    ) -> Result<MortgageApplication, ApplicationServiceError> {
        let ApplicationDraft {
            applicants,
            property,
            financials,
        } = draft;

        let mut wizard = WizardProgress::default();
        if !applicants.is_empty() {
            wizard.complete(WizardStep::PersonalData);
        }
        if financials != FinancialSnapshot::default() {
            wizard.complete(WizardStep::Financials);
        }
        if property.is_some() {
            wizard.complete(WizardStep::Property);
        }

        let now = Utc::now();
        let record = MortgageApplication {
            application_id: next_application_id(),
            version: 1,
            created_at: now,
            updated_at: now,
            wizard,
            applicants,
            property,
            financials: financials.sanitized(),
            documents: Vec::new(),
            feasibility: None,
        };

        let stored = self.repository.insert(record)?;
        info!(application_id = %stored.application_id, "mortgage application created");
        Ok(stored)
    }

    /// Fetch an application for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<MortgageApplication, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Replace one wizard section, refusing the write if the caller's copy is stale.
    pub fn update_section(
        &self,
        application_id: &ApplicationId,
        expected_version: u64,
        update: SectionUpdate,
    ) -> Result<MortgageApplication, ApplicationServiceError> {
        let mut record = self.get(application_id)?;
        ensure_version(&record, expected_version)?;

        let step = update.step();
        match update {
            SectionUpdate::Applicants { applicants } => record.applicants = applicants,
            SectionUpdate::Financials { financials } => {
                record.financials = financials.sanitized();
            }
            SectionUpdate::Property { property } => record.property = Some(property),
            SectionUpdate::Documents { documents } => record.documents = documents,
        }
        record.wizard.complete(step);
        record.updated_at = Utc::now();

        let stored = self.repository.update(record)?;
        debug!(
            application_id = %stored.application_id,
            step = step.label(),
            version = stored.version,
            "wizard section saved"
        );
        Ok(stored)
    }

    /// Evaluate the stored financials and write the verdict back onto the record.
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
        expected_version: Option<u64>,
    ) -> Result<FeasibilityReport, ApplicationServiceError> {
        let mut record = self.get(application_id)?;
        if let Some(expected) = expected_version {
            ensure_version(&record, expected)?;
        }

        let report = self.evaluator.evaluate(&record.financials);
        record.feasibility = Some(report.verdict);
        record.updated_at = Utc::now();
        self.repository.update(record)?;

        info!(
            application_id = %application_id,
            eligible = report.is_eligible(),
            sufficient_income = report.verdict.sufficient_income,
            meets_twenty_percent_equity = report.verdict.meets_twenty_percent_equity,
            meets_ten_percent_hard_equity = report.verdict.meets_ten_percent_hard_equity,
            "feasibility evaluated"
        );
        Ok(report)
    }

    /// Evaluate a snapshot without touching storage.
    pub fn evaluate_snapshot(&self, snapshot: &FinancialSnapshot) -> FeasibilityReport {
        self.evaluator.evaluate(snapshot)
    }

    pub fn delete(&self, application_id: &ApplicationId) -> Result<(), ApplicationServiceError> {
        self.repository.delete(application_id)?;
        info!(application_id = %application_id, "mortgage application deleted");
        Ok(())
    }
}

fn ensure_version(record: &MortgageApplication, expected: u64) -> Result<(), RepositoryError> {
    if record.version == expected {
        Ok(())
    } else {
        Err(RepositoryError::VersionConflict {
            expected,
            actual: record.version,
        })
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
