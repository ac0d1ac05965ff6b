//! Majors: named programs of study with required and elective course sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a course satisfies a required slot or an elective slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementKind {
    Required,
    Elective,
}

impl RequirementKind {
    /// Parse the single-letter marker from the majors file. Only "R" and
    /// "E" are valid; anything else is a data error at the call site.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "R" => Some(Self::Required),
            "E" => Some(Self::Elective),
            _ => None,
        }
    }

    /// The marker as written in source files.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Required => "R",
            Self::Elective => "E",
        }
    }
}

/// A program of study. A course name belongs to at most one of the two
/// sets; [`Major::register_course`] enforces that at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Major {
    name: String,
    required: BTreeSet<String>,
    electives: BTreeSet<String>,
}

impl Major {
    /// Create a major with empty course sets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: BTreeSet::new(),
            electives: BTreeSet::new(),
        }
    }

    /// Major name (the unique key, shared with the department namespace).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a course under this major. Returns `false` and leaves the
    /// sets untouched when the course is already registered in either set.
    #[must_use]
    pub fn register_course(&mut self, course_name: &str, kind: RequirementKind) -> bool {
        if self.required.contains(course_name) || self.electives.contains(course_name) {
            return false;
        }
        let set = match kind {
            RequirementKind::Required => &mut self.required,
            RequirementKind::Elective => &mut self.electives,
        };
        set.insert(course_name.to_string())
    }

    /// Required course names, sorted.
    pub fn required_courses(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Elective course names, sorted.
    pub fn elective_courses(&self) -> &BTreeSet<String> {
        &self.electives
    }

    /// Required courses not yet completed, sorted.
    pub fn outstanding_required(&self, completed: &BTreeSet<String>) -> Vec<String> {
        self.required.difference(completed).cloned().collect()
    }

    /// Electives still open, sorted. The elective requirement is
    /// "any one of": completing a single course from the elective set
    /// clears the whole list, so this is either every elective or none.
    pub fn outstanding_electives(&self, completed: &BTreeSet<String>) -> Vec<String> {
        if self.electives.intersection(completed).next().is_some() {
            return Vec::new();
        }
        self.electives.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sfen() -> Major {
        let mut major = Major::new("SFEN");
        assert!(major.register_course("SSW 540", RequirementKind::Required));
        assert!(major.register_course("SSW 564", RequirementKind::Required));
        assert!(major.register_course("CS 501", RequirementKind::Elective));
        assert!(major.register_course("CS 545", RequirementKind::Elective));
        major
    }

    fn completed(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_marker_parsing() {
        assert_eq!(RequirementKind::from_marker("R"), Some(RequirementKind::Required));
        assert_eq!(RequirementKind::from_marker("E"), Some(RequirementKind::Elective));
        assert_eq!(RequirementKind::from_marker("X"), None);
        assert_eq!(RequirementKind::from_marker("r"), None);
        assert_eq!(RequirementKind::Required.marker(), "R");
    }

    #[test]
    fn test_duplicate_registration_rejected_across_sets() {
        let mut major = sfen();
        // already required
        assert!(!major.register_course("SSW 540", RequirementKind::Required));
        // already elective, re-registered as required
        assert!(!major.register_course("CS 501", RequirementKind::Required));
        assert_eq!(major.required_courses().len(), 2);
        assert_eq!(major.elective_courses().len(), 2);
    }

    #[test]
    fn test_outstanding_required_is_set_difference() {
        let major = sfen();
        assert_eq!(
            major.outstanding_required(&completed(&["SSW 540", "CS 501"])),
            vec!["SSW 564".to_string()]
        );
        assert!(major
            .outstanding_required(&completed(&["SSW 540", "SSW 564"]))
            .is_empty());
    }

    #[test]
    fn test_one_completed_elective_clears_the_list() {
        let major = sfen();
        assert_eq!(
            major.outstanding_electives(&completed(&["SSW 540"])),
            vec!["CS 501".to_string(), "CS 545".to_string()]
        );
        assert!(major.outstanding_electives(&completed(&["CS 545"])).is_empty());
    }
}
