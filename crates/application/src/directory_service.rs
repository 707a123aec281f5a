//! Directory query orchestration: policy evaluation at scale, redaction,
//! and pagination over the external record store.

use std::sync::Arc;

use async_trait::async_trait;
use rosterly_core::{AppError, AppResult, Principal};
use rosterly_domain::{EmployeeId, EmployeeRecord};
use serde::Serialize;

use crate::PolicyEngine;

/// Repository port for the external employee record store. Reads only; the
/// core performs no writes.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Finds an employee record by its identifier.
    async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeRecord>>;

    /// Finds the employee record owned by an account subject.
    async fn find_by_owner(
        &self,
        subject: rosterly_core::SubjectId,
    ) -> AppResult<Option<EmployeeRecord>>;

    /// Lists all employee records in stable input order.
    async fn list(&self) -> AppResult<Vec<EmployeeRecord>>;
}

/// An employee record as visible to one caller, with sensitive fields
/// already redacted where the policy requires it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    /// Record identifier.
    pub id: EmployeeId,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Rank name.
    pub rank: String,
    /// Salary; absent when redacted for this viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
}

impl EmployeeProfile {
    /// Projects a record into the caller-visible shape.
    #[must_use]
    pub fn from_record(record: &EmployeeRecord, redact_sensitive: bool) -> Self {
        Self {
            id: record.id(),
            full_name: record.full_name().to_owned(),
            email: record.email().as_str().to_owned(),
            phone: record.phone().to_owned(),
            position: record.position().to_owned(),
            department: record.department().to_owned(),
            rank: record.rank().to_owned(),
            salary: (!redact_sensitive).then(|| record.salary()),
        }
    }
}

/// One page of visible directory entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryPage {
    /// Entries on the requested page, in store order.
    pub items: Vec<EmployeeProfile>,
    /// Count of *all* visible entries after filtering, independent of the
    /// requested page.
    pub total_count: usize,
}

/// Orchestrates the policy engine over the record store.
///
/// This is the one place the engine is applied at scale rather than to a
/// single pair: filter first over the full candidate set, then redact, then
/// paginate.
#[derive(Clone)]
pub struct DirectoryService {
    employees: Arc<dyn EmployeeRepository>,
    policy: PolicyEngine,
}

impl DirectoryService {
    /// Creates a directory service over a record store and policy engine.
    #[must_use]
    pub fn new(employees: Arc<dyn EmployeeRepository>, policy: PolicyEngine) -> Self {
        Self { employees, policy }
    }

    /// Lists the directory entries visible to the caller.
    ///
    /// `page` and `page_size` are 1-based positive integers. Pagination is
    /// applied after filtering, never before: `total_count` always reports
    /// the full filtered count, and an out-of-range page yields an empty
    /// item list with that count unchanged.
    pub async fn list_visible(
        &self,
        principal: &Principal,
        page: usize,
        page_size: usize,
    ) -> AppResult<DirectoryPage> {
        if page == 0 || page_size == 0 {
            return Err(AppError::Validation(
                "page and page_size must be positive".to_owned(),
            ));
        }

        let viewer = self.employees.find_by_owner(principal.subject()).await?;
        let candidates = self.employees.list().await?;

        let mut visible = Vec::new();
        for target in &candidates {
            let decision = self.policy.evaluate(principal, viewer.as_ref(), target)?;
            if decision.granted {
                visible.push(EmployeeProfile::from_record(target, decision.redact_sensitive));
            }
        }

        let total_count = visible.len();
        // A page so large the offset overflows usize is simply past the end.
        let offset = page
            .checked_sub(1)
            .and_then(|zero_based| zero_based.checked_mul(page_size))
            .unwrap_or(usize::MAX);
        let items = visible
            .into_iter()
            .skip(offset)
            .take(page_size)
            .collect();

        Ok(DirectoryPage { items, total_count })
    }

    /// Returns a single employee record as visible to the caller.
    ///
    /// `NotFound` when the target does not exist. Denied decisions map to a
    /// uniform `Forbidden` message; the specific reason goes to the log
    /// only, so error text never reveals hierarchy structure.
    pub async fn get_one(
        &self,
        principal: &Principal,
        id: EmployeeId,
    ) -> AppResult<EmployeeProfile> {
        let target = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("employee '{id}' not found")))?;

        let viewer = self.employees.find_by_owner(principal.subject()).await?;
        let decision = self.policy.evaluate(principal, viewer.as_ref(), &target)?;

        if !decision.granted {
            tracing::warn!(
                subject = %principal.subject(),
                target = %id,
                reason = decision.reason.map(|reason| reason.as_str()).unwrap_or("unspecified"),
                "directory access denied"
            );
            return Err(AppError::Forbidden(
                "access to this employee record is denied".to_owned(),
            ));
        }

        Ok(EmployeeProfile::from_record(&target, decision.redact_sensitive))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rosterly_core::{AccountRole, SubjectId};
    use rosterly_domain::{EmployeeInput, Hierarchy};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::*;

    const RANKS: [&str; 4] = ["Head", "Deputy", "Lead", "Staff"];

    struct TestEmployeeRepo {
        records: RwLock<Vec<EmployeeRecord>>,
    }

    impl TestEmployeeRepo {
        fn new(records: Vec<EmployeeRecord>) -> Self {
            Self {
                records: RwLock::new(records),
            }
        }
    }

    #[async_trait]
    impl EmployeeRepository for TestEmployeeRepo {
        async fn find_by_id(&self, id: EmployeeId) -> AppResult<Option<EmployeeRecord>> {
            Ok(self
                .records
                .read()
                .await
                .iter()
                .find(|record| record.id() == id)
                .cloned())
        }

        async fn find_by_owner(
            &self,
            subject: SubjectId,
        ) -> AppResult<Option<EmployeeRecord>> {
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

    fn hierarchy() -> Arc<Hierarchy> {
        match Hierarchy::new(RANKS.iter().map(|rank| (*rank).to_owned()).collect()) {
            Ok(hierarchy) => Arc::new(hierarchy),
            Err(error) => panic!("hierarchy construction failed: {error}"),
        }
    }

    fn employee(seed: u128, department: &str, rank: &str) -> EmployeeRecord {
        let input = EmployeeInput {
            id: EmployeeId::from_uuid(Uuid::from_u128(seed)),
            owner_subject: SubjectId::from_uuid(Uuid::from_u128(seed + 1000)),
            full_name: format!("Employee {seed}"),
            email: format!("employee{seed}@example.com"),
            phone: "+1-555-0100".to_owned(),
            position: "Member".to_owned(),
            department: department.to_owned(),
            rank: rank.to_owned(),
            salary: 480_000,
        };
        match EmployeeRecord::new(input, &hierarchy()) {
            Ok(record) => record,
            Err(error) => panic!("record construction failed: {error}"),
        }
    }

    fn principal_for(record: &EmployeeRecord) -> Principal {
        let now = Utc::now();
        Principal::new(
            record.owner_subject(),
            AccountRole::User,
            now,
            now + Duration::minutes(5),
        )
    }

    fn service(records: Vec<EmployeeRecord>) -> DirectoryService {
        DirectoryService::new(
            Arc::new(TestEmployeeRepo::new(records)),
            PolicyEngine::new(hierarchy()),
        )
    }

    fn eng_department() -> Vec<EmployeeRecord> {
        vec![
            employee(1, "Eng", "Lead"),
            employee(2, "Eng", "Staff"),
            employee(3, "Eng", "Deputy"),
            employee(4, "Eng", "Staff"),
            employee(5, "Sales", "Staff"),
        ]
    }

    #[tokio::test]
    async fn list_filters_by_policy_and_reports_filtered_count() {
        let records = eng_department();
        let viewer = records[0].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        let page = match service.list_visible(&caller, 1, 10).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };

        // Lead sees self, the two Eng staff, and the peer Lead (none here);
        // Deputy and Sales are filtered out.
        assert_eq!(page.total_count, 3);
        let ids: Vec<EmployeeId> = page.items.iter().map(|item| item.id).collect();
        assert_eq!(
            ids,
            vec![
                EmployeeId::from_uuid(Uuid::from_u128(1)),
                EmployeeId::from_uuid(Uuid::from_u128(2)),
                EmployeeId::from_uuid(Uuid::from_u128(4)),
            ]
        );
    }

    #[tokio::test]
    async fn list_redacts_salary_except_for_self() {
        let records = eng_department();
        let viewer = records[0].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        let page = match service.list_visible(&caller, 1, 10).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };

        for item in &page.items {
            if item.id == viewer.id() {
                assert_eq!(item.salary, Some(480_000));
            } else {
                assert_eq!(item.salary, None);
            }
        }
    }

    #[tokio::test]
    async fn most_senior_viewer_sees_salaries() {
        let mut records = eng_department();
        records.push(employee(6, "Eng", "Head"));
        let viewer = records[5].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        let page = match service.list_visible(&caller, 1, 10).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };

        assert_eq!(page.total_count, 5);
        assert!(page.items.iter().all(|item| item.salary.is_some()));
    }

    #[tokio::test]
    async fn pagination_applies_after_filtering() {
        let records = eng_department();
        let viewer = records[0].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        let first = match service.list_visible(&caller, 1, 2).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };
        assert_eq!(first.total_count, 3);
        assert_eq!(first.items.len(), 2);

        let second = match service.list_visible(&caller, 2, 2).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };
        assert_eq!(second.total_count, 3);
        assert_eq!(second.items.len(), 1);

        let beyond = match service.list_visible(&caller, 9, 2).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };
        assert_eq!(beyond.total_count, 3);
        assert!(beyond.items.is_empty());
    }

    #[tokio::test]
    async fn huge_page_number_yields_empty_page_not_wraparound() {
        let records = eng_department();
        let viewer = records[0].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        for page in [usize::MAX, usize::MAX / 2 + 2] {
            let beyond = match service.list_visible(&caller, page, 2).await {
                Ok(page) => page,
                Err(error) => panic!("list failed: {error}"),
            };
            assert_eq!(beyond.total_count, 3);
            assert!(beyond.items.is_empty());
        }
    }

    #[tokio::test]
    async fn zero_page_arguments_are_rejected() {
        let records = eng_department();
        let viewer = records[0].clone();
        let service = service(records);
        let caller = principal_for(&viewer);

        assert!(matches!(
            service.list_visible(&caller, 0, 10).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.list_visible(&caller, 1, 0).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn caller_without_record_sees_empty_directory() {
        let service = service(eng_department());
        let now = Utc::now();
        let caller = Principal::new(
            SubjectId::new(),
            AccountRole::User,
            now,
            now + Duration::minutes(5),
        );

        let page = match service.list_visible(&caller, 1, 10).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };

        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn admin_sees_full_directory_unredacted() {
        let service = service(eng_department());
        let now = Utc::now();
        let admin = Principal::new(
            SubjectId::new(),
            AccountRole::Admin,
            now,
            now + Duration::minutes(5),
        );

        let page = match service.list_visible(&admin, 1, 10).await {
            Ok(page) => page,
            Err(error) => panic!("list failed: {error}"),
        };

        assert_eq!(page.total_count, 5);
        assert!(page.items.iter().all(|item| item.salary.is_some()));
    }

    #[tokio::test]
    async fn get_one_distinguishes_not_found_from_forbidden() {
        let records = eng_department();
        let viewer = records[0].clone();
        let deputy_id = records[2].id();
        let service = service(records);
        let caller = principal_for(&viewer);

        let missing = EmployeeId::from_uuid(Uuid::from_u128(999));
        assert!(matches!(
            service.get_one(&caller, missing).await,
            Err(AppError::NotFound(_))
        ));

        assert!(matches!(
            service.get_one(&caller, deputy_id).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn forbidden_message_is_uniform_across_denial_reasons() {
        let records = eng_department();
        let viewer = records[0].clone();
        let deputy_id = records[2].id();
        let sales_id = records[4].id();
        let service = service(records);
        let caller = principal_for(&viewer);

        let rank_denial = service.get_one(&caller, deputy_id).await;
        let department_denial = service.get_one(&caller, sales_id).await;

        match (rank_denial, department_denial) {
            (Err(AppError::Forbidden(first)), Err(AppError::Forbidden(second))) => {
                assert_eq!(first, second);
            }
            other => panic!("expected two forbidden outcomes, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_one_returns_redacted_profile_for_junior_target() {
        let records = eng_department();
        let viewer = records[0].clone();
        let staff_id = records[1].id();
        let service = service(records);
        let caller = principal_for(&viewer);

        let profile = match service.get_one(&caller, staff_id).await {
            Ok(profile) => profile,
            Err(error) => panic!("get_one failed: {error}"),
        };

        assert_eq!(profile.id, staff_id);
        assert_eq!(profile.salary, None);
    }
}
