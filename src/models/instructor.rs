//! Instructors and their taught-course sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An instructor. The department is drawn from the major namespace and is
/// validated against the major table during loading. Taught courses
/// accumulate from grade records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    cwid: String,
    name: String,
    department: String,
    taught_courses: BTreeSet<String>,
}

impl Instructor {
    /// Create an instructor with an empty taught-course set.
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            department: department.into(),
            taught_courses: BTreeSet::new(),
        }
    }

    pub fn cwid(&self) -> &str {
        &self.cwid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Record that this instructor taught a course. Re-adding is a no-op.
    pub fn add_taught_course(&mut self, course_name: &str) {
        self.taught_courses.insert(course_name.to_string());
    }

    /// Names of courses this instructor has graded, sorted.
    pub fn taught_course_names(&self) -> &BTreeSet<String> {
        &self.taught_courses
    }
}
