//! Students and the completion/GPA engine.
//!
//! A student's transcript is a per-course list of attempts in the order
//! they were recorded, so retakes keep their history. Completion and GPA
//! both derive from `latest_passing_grade`: the most recent attempt that
//! passed, found by scanning an attempt list backwards. A later failing
//! retake therefore never erases an earlier pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grade::{Gpa, LetterGrade};

/// One recorded attempt at a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseAttempt {
    /// Instructor who graded the attempt.
    pub instructor_cwid: String,
    /// Grade received.
    pub grade: LetterGrade,
}

/// A student and their course-attempt history.
///
/// Identity fields are fixed at creation; attempts accumulate as grade
/// records are processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    cwid: String,
    name: String,
    major_name: String,
    /// Course name -> attempts in recorded order (retakes append).
    attempts: BTreeMap<String, Vec<CourseAttempt>>,
}

impl Student {
    /// Create a student with an empty attempt history.
    pub fn new(cwid: impl Into<String>, name: impl Into<String>, major_name: impl Into<String>) -> Self {
        Self {
            cwid: cwid.into(),
            name: name.into(),
            major_name: major_name.into(),
            attempts: BTreeMap::new(),
        }
    }

    pub fn cwid(&self) -> &str {
        &self.cwid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the student's major (validated against the major table
    /// during loading).
    pub fn major_name(&self) -> &str {
        &self.major_name
    }

    /// Append an attempt to the course's history, creating the history on
    /// first sight of the course name.
    pub fn record_attempt(
        &mut self,
        course_name: &str,
        instructor_cwid: impl Into<String>,
        grade: LetterGrade,
    ) {
        self.attempts
            .entry(course_name.to_string())
            .or_default()
            .push(CourseAttempt {
                instructor_cwid: instructor_cwid.into(),
                grade,
            });
    }

    /// Attempt history by course name, sorted by course.
    pub fn course_attempts(&self) -> &BTreeMap<String, Vec<CourseAttempt>> {
        &self.attempts
    }

    /// The most recent passing grade for a course: scan the attempt list
    /// in reverse recorded order and return the first pass. `None` when
    /// the course was never attempted or never passed.
    pub fn latest_passing_grade(&self, course_name: &str) -> Option<LetterGrade> {
        self.attempts
            .get(course_name)?
            .iter()
            .rev()
            .map(|attempt| attempt.grade)
            .find(LetterGrade::is_passing)
    }

    /// Whether the student has a passing attempt for the course.
    pub fn is_completed(&self, course_name: &str) -> bool {
        self.latest_passing_grade(course_name).is_some()
    }

    /// Completed course names, lexicographically sorted, no duplicates.
    pub fn completed_course_names(&self) -> Vec<String> {
        self.attempts
            .keys()
            .filter(|course| self.is_completed(course))
            .cloned()
            .collect()
    }

    /// Grade point average over distinct completed courses, each
    /// contributing its latest passing grade once. Exactly 0.00 when
    /// nothing has been passed.
    pub fn gpa(&self) -> Gpa {
        Gpa::from_points(
            self.attempts
                .keys()
                .filter_map(|course| self.latest_passing_grade(course))
                .map(|grade| grade.points()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new("10103", "Baldwin, C", "SFEN")
    }

    #[test]
    fn test_identity_fields() {
        let s = student();
        assert_eq!(s.cwid(), "10103");
        assert_eq!(s.name(), "Baldwin, C");
        assert_eq!(s.major_name(), "SFEN");
        assert!(s.course_attempts().is_empty());
    }

    #[test]
    fn test_retake_keeps_both_attempts_in_order() {
        let mut s = student();
        s.record_attempt("SSW 540", "98765", LetterGrade::F);
        s.record_attempt("SSW 540", "98765", LetterGrade::A);

        let attempts = &s.course_attempts()["SSW 540"];
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].grade, LetterGrade::F);
        assert_eq!(attempts[1].grade, LetterGrade::A);
        assert_eq!(s.latest_passing_grade("SSW 540"), Some(LetterGrade::A));
    }

    #[test]
    fn test_later_failing_retake_never_erases_a_pass() {
        let mut s = student();
        s.record_attempt("SSW 564", "98764", LetterGrade::B);
        s.record_attempt("SSW 564", "98764", LetterGrade::F);

        // The backward scan walks past the F to the earlier B.
        assert_eq!(s.latest_passing_grade("SSW 564"), Some(LetterGrade::B));
        assert!(s.is_completed("SSW 564"));
    }

    #[test]
    fn test_latest_pass_supersedes_earlier_pass() {
        let mut s = student();
        s.record_attempt("CS 501", "98764", LetterGrade::C);
        s.record_attempt("CS 501", "98764", LetterGrade::A);
        assert_eq!(s.latest_passing_grade("CS 501"), Some(LetterGrade::A));
    }

    #[test]
    fn test_never_attempted_or_never_passed() {
        let mut s = student();
        assert_eq!(s.latest_passing_grade("SSW 540"), None);
        s.record_attempt("SSW 540", "98765", LetterGrade::F);
        s.record_attempt("SSW 540", "98765", LetterGrade::CMinus);
        assert_eq!(s.latest_passing_grade("SSW 540"), None);
        assert!(!s.is_completed("SSW 540"));
    }

    #[test]
    fn test_completed_course_names_sorted_unique() {
        let mut s = student();
        s.record_attempt("SSW 567", "98765", LetterGrade::A);
        s.record_attempt("CS 501", "98764", LetterGrade::B);
        s.record_attempt("CS 501", "98764", LetterGrade::A);
        s.record_attempt("SSW 555", "98763", LetterGrade::F);

        assert_eq!(
            s.completed_course_names(),
            vec!["CS 501".to_string(), "SSW 567".to_string()]
        );
        for name in s.completed_course_names() {
            assert!(s.is_completed(&name));
        }
    }

    #[test]
    fn test_latest_passing_grade_is_idempotent() {
        let mut s = student();
        s.record_attempt("SSW 540", "98765", LetterGrade::BPlus);
        let first = s.latest_passing_grade("SSW 540");
        let second = s.latest_passing_grade("SSW 540");
        assert_eq!(first, second);
    }

    #[test]
    fn test_gpa_counts_each_course_once() {
        // A, A-, B, B across 4 distinct courses -> 3.4375 -> "3.44"
        let mut s = student();
        s.record_attempt("SSW 540", "98765", LetterGrade::A);
        s.record_attempt("SSW 564", "98764", LetterGrade::AMinus);
        s.record_attempt("SSW 567", "98765", LetterGrade::B);
        s.record_attempt("CS 501", "98764", LetterGrade::B);

        assert_eq!(s.gpa().rounded_hundredths(), 344);
        assert_eq!(s.gpa().display(), "3.44");
    }

    #[test]
    fn test_gpa_uses_latest_pass_not_every_attempt() {
        let mut s = student();
        s.record_attempt("SSW 540", "98765", LetterGrade::C);
        s.record_attempt("SSW 540", "98765", LetterGrade::A);

        // One course, one contribution: 4.00, not the 3.00 average of both.
        assert_eq!(s.gpa().rounded_hundredths(), 400);
        assert_eq!(s.gpa().display(), "4.0");
    }

    #[test]
    fn test_gpa_zero_when_nothing_passed() {
        // F, D, C- in three different courses
        let mut s = student();
        s.record_attempt("SSW 540", "98765", LetterGrade::F);
        s.record_attempt("SSW 564", "98764", LetterGrade::D);
        s.record_attempt("SSW 567", "98765", LetterGrade::CMinus);

        assert_eq!(s.gpa().rounded_hundredths(), 0);
        assert_eq!(s.gpa().display(), "0.0");
    }
}
