use async_trait::async_trait;
use rosterly_application::EmployeeRepository;
use rosterly_core::{AppError, AppResult, SubjectId};
use rosterly_domain::{EmployeeId, EmployeeRecord};
use tokio::sync::RwLock;

/// In-memory employee record store.
///
/// Preserves insertion order so directory listings evaluate candidates in a
/// stable input order. Suitable for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    records: RwLock<Vec<EmployeeRecord>>,
}

impl InMemoryEmployeeRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Inserts a record, rejecting duplicate identifiers and duplicate
    /// owner subjects.
    pub async fn insert(&self, record: EmployeeRecord) -> AppResult<()> {
        let mut records = self.records.write().await;

        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(AppError::Conflict(format!(
                "employee '{}' already exists",
                record.id()
            )));
        }

        if records
            .iter()
            .any(|existing| existing.owner_subject() == record.owner_subject())
        {
            return Err(AppError::Conflict(format!(
                "subject '{}' already owns an employee record",
                record.owner_subject()
            )));
        }

        records.push(record);
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }

    async fn find_by_owner(&self, subject: SubjectId) -> AppResult<Option<EmployeeRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.owner_subject() == subject)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<EmployeeRecord>> {
        Ok(self.records.read().await.clone())
    }
}
