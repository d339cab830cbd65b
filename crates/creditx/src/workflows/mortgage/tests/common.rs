use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::workflows::mortgage::domain::{
    ApplicantDetails, ApplicationDraft, ApplicationId, PropertyDetails, PropertyKind,
};
use crate::workflows::mortgage::financials::{EmploymentIncome, FinancialSnapshot};
use crate::workflows::mortgage::repository::{
    ApplicationRepository, MortgageApplication, RepositoryError,
};
use crate::workflows::mortgage::{mortgage_router, MortgageApplicationService};

/// 800k purchase with exactly 20% liquid equity and a 150k salary.
pub(super) fn scenario_snapshot() -> FinancialSnapshot {
    FinancialSnapshot {
        property_price: dec!(800000),
        liquid_assets: dec!(160000),
        employment_incomes: vec![EmploymentIncome::new(dec!(150000), dec!(0))],
        ..FinancialSnapshot::default()
    }
}

pub(super) fn applicant() -> ApplicantDetails {
    ApplicantDetails {
        first_name: "Lea".to_string(),
        last_name: "Muster".to_string(),
        email: "lea.muster@example.ch".to_string(),
        birth_date: None,
        nationality: Some("CH".to_string()),
        employment_status: Some("employed".to_string()),
    }
}

pub(super) fn property() -> PropertyDetails {
    PropertyDetails {
        street: "Seestrasse 12".to_string(),
        postal_code: "8002".to_string(),
        city: "Zürich".to_string(),
        kind: PropertyKind::Apartment,
        living_area_sqm: Some(110),
        plot_area_sqm: None,
        rooms: Some(dec!(4.5)),
        build_year: Some(2008),
        estimated_value: None,
    }
}

pub(super) fn draft() -> ApplicationDraft {
    ApplicationDraft {
        applicants: vec![applicant()],
        property: None,
        financials: FinancialSnapshot::default(),
    }
}

pub(super) fn build_service() -> (
    MortgageApplicationService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = MortgageApplicationService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, MortgageApplication>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(
        &self,
        mut record: MortgageApplication,
    ) -> Result<MortgageApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let stored = guard
            .get(&record.application_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.version != record.version {
            return Err(RepositoryError::VersionConflict {
                expected: record.version,
                actual: stored.version,
            });
        }
        record.version += 1;
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

/// Repository that always reports a newer version than the caller holds.
pub(super) struct RacingRepository {
    pub(super) inner: MemoryRepository,
}

impl ApplicationRepository for RacingRepository {
    fn insert(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        Err(RepositoryError::VersionConflict {
            expected: record.version,
            actual: record.version + 1,
        })
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.inner.delete(id)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: MortgageApplicationService<MemoryRepository>,
) -> axum::Router {
    mortgage_router(Arc::new(service))
}
