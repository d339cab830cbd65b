//! Mortgage application records and the feasibility rules applied to them.
//!
//! The wizard front end saves one section at a time; every write carries the version the
//! client last read so two sessions editing the same application cannot silently overwrite
//! each other. Feasibility is computed from a read-only snapshot of the stored financials
//! and cached back onto the record.

pub mod batch;
pub mod domain;
pub mod feasibility;
pub mod financials;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchEntry, BatchImportError, BatchOutcome, FeasibilityBatch};
pub use domain::{
    ApplicantDetails, ApplicationDraft, ApplicationId, DocumentCategory, DocumentCheck,
    DocumentDescriptor, PropertyDetails, PropertyKind, SectionUpdate, WizardProgress, WizardStep,
};
pub use feasibility::{
    FeasibilityEvaluator, FeasibilityFigures, FeasibilityReport, FeasibilityShortfall,
    FeasibilityVerdict,
};
pub use financials::{EmploymentIncome, FinancialSnapshot};
pub use repository::{
    ApplicationRepository, ApplicationStatusView, MortgageApplication, RepositoryError,
};
pub use router::{mortgage_router, EvaluateRequest, FeasibilityResponse, SectionUpdateRequest};
pub use service::{ApplicationServiceError, MortgageApplicationService};
