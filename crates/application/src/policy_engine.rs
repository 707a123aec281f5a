//! Rank- and department-scoped visibility policy.
//!
//! The decision algorithm is a single ordered rule chain; first matching
//! rule wins and every input reaches exactly one terminal outcome. There is
//! no default-allow.

use std::sync::Arc;

use rosterly_core::{AppError, AppResult, Principal};
use rosterly_domain::{EmployeeRecord, Hierarchy};

/// Why a visibility decision denied access.
///
/// Internal taxonomy only: the boundary layer presents a uniform forbidden
/// outcome so callers cannot probe the hierarchy through error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller has no employee record of their own and is not an admin.
    NoAssociatedEmployee,
    /// Viewer and target belong to different departments.
    DepartmentMismatch,
    /// The target outranks the viewer.
    InsufficientRank,
}

impl DenialReason {
    /// Returns the log string for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAssociatedEmployee => "no_associated_employee",
            Self::DepartmentMismatch => "department_mismatch",
            Self::InsufficientRank => "insufficient_rank",
        }
    }
}

/// Outcome of one (viewer, target) policy evaluation. Plain data, no side
/// effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether the target record may be viewed at all.
    pub granted: bool,
    /// Denial reason when not granted.
    pub reason: Option<DenialReason>,
    /// Whether sensitive fields must be dropped from the visible record.
    pub redact_sensitive: bool,
}

impl AccessDecision {
    /// A granted decision; `redact_sensitive` controls salary visibility.
    #[must_use]
    pub fn grant(redact_sensitive: bool) -> Self {
        Self {
            granted: true,
            reason: None,
            redact_sensitive,
        }
    }

    /// A denied decision with its internal reason.
    #[must_use]
    pub fn deny(reason: DenialReason) -> Self {
        Self {
            granted: false,
            reason: Some(reason),
            redact_sensitive: true,
        }
    }
}

/// Pure decision function over one viewer/target pair.
///
/// Holds only the read-only hierarchy; safe for unsynchronized concurrent
/// use from any number of workers.
#[derive(Clone)]
pub struct PolicyEngine {
    hierarchy: Arc<Hierarchy>,
}

impl PolicyEngine {
    /// Creates a policy engine over a fixed hierarchy.
    #[must_use]
    pub fn new(hierarchy: Arc<Hierarchy>) -> Self {
        Self { hierarchy }
    }

    /// Returns the hierarchy this engine decides against.
    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Evaluates the ordered rule list for one (viewer, target) pair.
    ///
    /// Rules, first match wins:
    /// 1. admin principal: grant, unredacted;
    /// 2. self-view: grant, unredacted;
    /// 3. no viewer record: deny (`NoAssociatedEmployee`);
    /// 4. different department: deny (`DepartmentMismatch`);
    /// 5. target strictly more senior: deny (`InsufficientRank`);
    ///    otherwise grant, redacting salary unless the viewer holds the
    ///    most-senior rank. Equal rank grants with redaction.
    ///
    /// Fails only on corrupt data: a record whose rank is not a member of
    /// the hierarchy.
    pub fn evaluate(
        &self,
        principal: &Principal,
        viewer: Option<&EmployeeRecord>,
        target: &EmployeeRecord,
    ) -> AppResult<AccessDecision> {
        if principal.is_admin() {
            return Ok(AccessDecision::grant(false));
        }

        let Some(viewer) = viewer else {
            return Ok(AccessDecision::deny(DenialReason::NoAssociatedEmployee));
        };

        if viewer.id() == target.id() {
            return Ok(AccessDecision::grant(false));
        }

        if viewer.department() != target.department() {
            return Ok(AccessDecision::deny(DenialReason::DepartmentMismatch));
        }

        let viewer_rank = self.rank_index(viewer)?;
        let target_rank = self.rank_index(target)?;

        if target_rank < viewer_rank {
            return Ok(AccessDecision::deny(DenialReason::InsufficientRank));
        }

        // Peers and juniors are visible; only the most-senior rank sees
        // salary for records other than their own.
        Ok(AccessDecision::grant(viewer_rank != 0))
    }

    fn rank_index(&self, record: &EmployeeRecord) -> AppResult<usize> {
        self.hierarchy.rank_index(record.rank()).ok_or_else(|| {
            AppError::Internal(format!(
                "employee '{}' carries rank '{}' outside the hierarchy",
                record.id(),
                record.rank()
            ))
        })
    }
}
