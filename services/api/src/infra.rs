use creditx::workflows::mortgage::{
    ApplicationId, ApplicationRepository, MortgageApplication, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local application store; every write goes through the version check.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, MortgageApplication>>>,
}

impl InMemoryApplicationRepository {
    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ApplicationId, MortgageApplication>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: MortgageApplication) -> Result<MortgageApplication, RepositoryError> {
        let mut guard = self.lock()?;
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
        let mut guard = self.lock()?;
        let stored_version = guard
            .get(&record.application_id)
            .map(|stored| stored.version)
            .ok_or(RepositoryError::NotFound)?;
        if stored_version != record.version {
            return Err(RepositoryError::VersionConflict {
                expected: record.version,
                actual: stored_version,
            });
        }
        record.version = stored_version + 1;
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.lock()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// CLI parser for amounts, accepting `1'250'000` style grouping.
pub(crate) fn parse_cli_amount(raw: &str) -> Result<Decimal, String> {
    creditx::workflows::mortgage::financials::parse_amount(raw)
        .filter(|value| !value.is_sign_negative())
        .ok_or_else(|| format!("'{raw}' is not a non-negative amount"))
}
