//! Employee records and their validation rules.

use rosterly_core::{AppError, AppResult, NonEmptyString, SubjectId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Hierarchy;

/// Unique identifier for an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Creates a new random employee identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an employee identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one
    /// `@`, local part and domain are non-empty, domain contains at least
    /// one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Input for creating an employee record.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    /// Record identifier.
    pub id: EmployeeId,
    /// Subject of the account that owns this record.
    pub owner_subject: SubjectId,
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
    /// Rank name; must be a member of the hierarchy.
    pub rank: String,
    /// Monthly salary in minor currency units. Sensitive.
    pub salary: i64,
}

/// A directory entry for one employee.
///
/// `rank` is guaranteed to be a member of the hierarchy the record was
/// validated against; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    id: EmployeeId,
    owner_subject: SubjectId,
    full_name: String,
    email: EmailAddress,
    phone: String,
    position: String,
    department: String,
    rank: String,
    salary: i64,
}

impl EmployeeRecord {
    /// Creates a validated employee record.
    ///
    /// Fails when the rank is not a member of the hierarchy, when the salary
    /// is negative, or when a required text field is blank.
    pub fn new(input: EmployeeInput, hierarchy: &Hierarchy) -> AppResult<Self> {
        if !hierarchy.contains(&input.rank) {
            return Err(AppError::Validation(format!(
                "rank '{}' is not part of the hierarchy",
                input.rank
            )));
        }

        if input.salary < 0 {
            return Err(AppError::Validation(
                "salary must not be negative".to_owned(),
            ));
        }

        Ok(Self {
            id: input.id,
            owner_subject: input.owner_subject,
            full_name: NonEmptyString::new(input.full_name)?.into(),
            email: EmailAddress::new(input.email)?,
            phone: NonEmptyString::new(input.phone)?.into(),
            position: NonEmptyString::new(input.position)?.into(),
            department: NonEmptyString::new(input.department)?.into(),
            rank: input.rank,
            salary: input.salary,
        })
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the subject of the owning account.
    #[must_use]
    pub fn owner_subject(&self) -> SubjectId {
        self.owner_subject
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Returns the job title.
    #[must_use]
    pub fn position(&self) -> &str {
        self.position.as_str()
    }

    /// Returns the department name.
    #[must_use]
    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    /// Returns the rank name.
    #[must_use]
    pub fn rank(&self) -> &str {
        self.rank.as_str()
    }

    /// Returns the salary. Sensitive; callers apply redaction before
    /// exposing records outside the core.
    #[must_use]
    pub fn salary(&self) -> i64 {
        self.salary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> Hierarchy {
        match Hierarchy::new(vec!["Lead".to_owned(), "Staff".to_owned()]) {
            Ok(hierarchy) => hierarchy,
            Err(error) => panic!("hierarchy construction failed: {error}"),
        }
    }

    fn input(rank: &str) -> EmployeeInput {
        EmployeeInput {
            id: EmployeeId::new(),
            owner_subject: SubjectId::new(),
            full_name: "Dana Reyes".to_owned(),
            email: "dana.reyes@example.com".to_owned(),
            phone: "+1-555-0100".to_owned(),
            position: "Engineer".to_owned(),
            department: "Eng".to_owned(),
            rank: rank.to_owned(),
            salary: 520_000,
        }
    }

    #[test]
    fn record_with_known_rank_is_accepted() {
        let record = EmployeeRecord::new(input("Staff"), &hierarchy());
        assert!(record.is_ok());
    }

    #[test]
    fn record_with_unknown_rank_is_rejected() {
        let record = EmployeeRecord::new(input("Contractor"), &hierarchy());
        assert!(record.is_err());
    }

    #[test]
    fn negative_salary_is_rejected() {
        let mut employee = input("Staff");
        employee.salary = -1;
        assert!(EmployeeRecord::new(employee, &hierarchy()).is_err());
    }

    #[test]
    fn blank_department_is_rejected() {
        let mut employee = input("Staff");
        employee.department = "  ".to_owned();
        assert!(EmployeeRecord::new(employee, &hierarchy()).is_err());
    }

    #[test]
    fn email_is_normalized() {
        let mut employee = input("Staff");
        employee.email = "Dana.Reyes@Example.COM".to_owned();
        let record = match EmployeeRecord::new(employee, &hierarchy()) {
            Ok(record) => record,
            Err(error) => panic!("record construction failed: {error}"),
        };
        assert_eq!(record.email().as_str(), "dana.reyes@example.com");
    }

    #[test]
    fn valid_email_is_accepted() {
        assert!(EmailAddress::new("user@example.com").is_ok());
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }
}
