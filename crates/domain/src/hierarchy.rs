//! Fixed seniority hierarchy for the directory.

use rosterly_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Ordered list of rank names, most-senior first.
///
/// The order is total and fixed at construction. Rank membership is exactly
/// the set of listed names; a lower index means a more senior rank. Intended
/// to be built once at process start and shared read-only (`Arc<Hierarchy>`)
/// across request workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    ranks: Vec<String>,
}

impl Hierarchy {
    /// Creates a hierarchy from an ordered list of rank names.
    ///
    /// Rejects empty lists, blank names, and duplicate names.
    pub fn new(ranks: Vec<String>) -> AppResult<Self> {
        if ranks.is_empty() {
            return Err(AppError::Validation(
                "hierarchy must contain at least one rank".to_owned(),
            ));
        }

        let mut validated = Vec::with_capacity(ranks.len());
        for rank in ranks {
            let rank: String = NonEmptyString::new(rank)?.into();

            if validated.contains(&rank) {
                return Err(AppError::Validation(format!(
                    "duplicate rank '{rank}' in hierarchy"
                )));
            }

            validated.push(rank);
        }

        Ok(Self { ranks: validated })
    }

    /// Returns the seniority index of a rank. Lower index = more senior.
    #[must_use]
    pub fn rank_index(&self, rank: &str) -> Option<usize> {
        self.ranks.iter().position(|value| value == rank)
    }

    /// Returns whether the name is a member of the hierarchy.
    #[must_use]
    pub fn contains(&self, rank: &str) -> bool {
        self.rank_index(rank).is_some()
    }

    /// Returns the most-senior rank name (index 0).
    #[must_use]
    pub fn most_senior(&self) -> &str {
        // Construction guarantees at least one rank.
        self.ranks.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns all rank names in seniority order.
    #[must_use]
    pub fn ranks(&self) -> &[String] {
        &self.ranks
    }

    /// Returns the number of ranks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns whether the hierarchy has no ranks. Always false for a
    /// successfully constructed hierarchy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy() -> Hierarchy {
        match Hierarchy::new(vec![
            "Head".to_owned(),
            "Deputy".to_owned(),
            "Lead".to_owned(),
            "Staff".to_owned(),
        ]) {
            Ok(hierarchy) => hierarchy,
            Err(error) => panic!("hierarchy construction failed: {error}"),
        }
    }

    #[test]
    fn rank_index_follows_declaration_order() {
        let hierarchy = hierarchy();
        assert_eq!(hierarchy.rank_index("Head"), Some(0));
        assert_eq!(hierarchy.rank_index("Staff"), Some(3));
        assert_eq!(hierarchy.rank_index("Intern"), None);
    }

    #[test]
    fn most_senior_is_first_rank() {
        assert_eq!(hierarchy().most_senior(), "Head");
    }

    #[test]
    fn empty_hierarchy_is_rejected() {
        assert!(Hierarchy::new(Vec::new()).is_err());
    }

    #[test]
    fn blank_rank_name_is_rejected() {
        assert!(Hierarchy::new(vec!["Head".to_owned(), "  ".to_owned()]).is_err());
    }

    #[test]
    fn duplicate_rank_name_is_rejected() {
        assert!(Hierarchy::new(vec!["Head".to_owned(), "Head".to_owned()]).is_err());
    }
}
