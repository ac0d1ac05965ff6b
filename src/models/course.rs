//! Courses keyed by (course name, instructor) with per-student grades.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grade::LetterGrade;

/// Composite course identity. The same course name under two instructors
/// is two distinct courses, so the key is a structural pair rather than a
/// formatted string (a delimiter inside a course name cannot collide).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseKey {
    pub course_name: String,
    pub instructor_cwid: String,
}

impl CourseKey {
    pub fn new(course_name: impl Into<String>, instructor_cwid: impl Into<String>) -> Self {
        Self {
            course_name: course_name.into(),
            instructor_cwid: instructor_cwid.into(),
        }
    }
}

/// One course offering: grade history per student, in recorded order.
/// Created on first sight of its key in the grades file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    key: CourseKey,
    /// Student cwid -> grades received, retakes appended in order.
    student_grades: BTreeMap<String, Vec<LetterGrade>>,
}

impl Course {
    pub fn new(key: CourseKey) -> Self {
        Self {
            key,
            student_grades: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> &CourseKey {
        &self.key
    }

    pub fn course_name(&self) -> &str {
        &self.key.course_name
    }

    pub fn instructor_cwid(&self) -> &str {
        &self.key.instructor_cwid
    }

    /// Append a grade to the student's history for this course.
    pub fn record_grade(&mut self, student_cwid: &str, grade: LetterGrade) {
        self.student_grades
            .entry(student_cwid.to_string())
            .or_default()
            .push(grade);
    }

    /// Grade history per student, sorted by cwid.
    pub fn student_grades(&self) -> &BTreeMap<String, Vec<LetterGrade>> {
        &self.student_grades
    }

    /// Number of distinct students graded in this course.
    pub fn student_count(&self) -> usize {
        self.student_grades.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_structural() {
        let a = CourseKey::new("SSW 540", "98765");
        let b = CourseKey::new("SSW 540", "98765");
        let c = CourseKey::new("SSW 540", "98764");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_same_student_retake_appends() {
        let mut course = Course::new(CourseKey::new("SSW 540", "98765"));
        course.record_grade("10115", LetterGrade::F);
        course.record_grade("10115", LetterGrade::AMinus);
        course.record_grade("10103", LetterGrade::A);

        assert_eq!(
            course.student_grades()["10115"],
            vec![LetterGrade::F, LetterGrade::AMinus]
        );
        // Two distinct students, three grade entries.
        assert_eq!(course.student_count(), 2);
    }
}
