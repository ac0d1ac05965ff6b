//! Domain models for the registrar repository.
//!
//! - Grade: letter-grade vocabulary and exact GPA arithmetic
//! - Major: required/elective course sets and outstanding-requirement queries
//! - Student: attempt history and the completion/GPA engine
//! - Instructor: taught-course accumulation
//! - Course: composite-keyed per-student grade history

pub mod course;
pub mod grade;
pub mod instructor;
pub mod major;
pub mod student;

pub use course::{Course, CourseKey};
pub use grade::{Gpa, LetterGrade, PASSING_GRADE};
pub use instructor::Instructor;
pub use major::{Major, RequirementKind};
pub use student::{CourseAttempt, Student};
