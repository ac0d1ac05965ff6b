//! The repository builder: load, cross-validate, and publish.
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌───────────────┐   ┌────────────┐
//! │ majors.txt │──▶│ students.txt │──▶│instructors.txt│──▶│ grades.txt │
//! └────────────┘   └──────────────┘   └───────────────┘   └────────────┘
//!       keys            ref majors        ref majors         ref both
//! ```
//!
//! Loading is strictly ordered because each stage validates references
//! into the stages before it. Everything is built into fresh temporary
//! tables; a [`University`] value exists only once all four stages have
//! succeeded, so no partially-loaded repository is ever observable. Any
//! failure aborts the whole construction.

pub mod tables;

use std::path::{Path, PathBuf};

use crate::error::{ContentError, ContentResult, RepositoryError, SetupError};
use crate::models::{Course, CourseKey, Instructor, LetterGrade, Major, RequirementKind, Student};
use crate::reader::{ensure_filled, RecordReader};
use self::tables::Table;

/// Majors source: (major, "R"|"E", course), tab-delimited.
pub const MAJORS_FILE: &str = "majors.txt";
/// Students source: (cwid, name, major), semicolon-delimited.
pub const STUDENTS_FILE: &str = "students.txt";
/// Instructors source: (cwid, name, department), pipe-delimited.
pub const INSTRUCTORS_FILE: &str = "instructors.txt";
/// Grades source: (student, course, grade, instructor), tab-delimited.
pub const GRADES_FILE: &str = "grades.txt";

/// Required source files in load order.
pub const REQUIRED_FILES: [&str; 4] = [MAJORS_FILE, STUDENTS_FILE, INSTRUCTORS_FILE, GRADES_FILE];

/// One grade tuple as it appeared in the grades source, re-derivable from
/// either the course table or the student table. The two derivations must
/// agree exactly; see [`University::grade_records_by_course`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GradeRecord {
    pub student_cwid: String,
    pub course_name: String,
    pub instructor_cwid: String,
    pub grade: LetterGrade,
}

/// The cross-referenced repository. Immutable once constructed; a reload
/// builds a whole new value.
#[derive(Debug, Clone)]
pub struct University {
    directory: PathBuf,
    majors: Table<String, Major>,
    students: Table<String, Student>,
    instructors: Table<String, Instructor>,
    courses: Table<CourseKey, Course>,
}

impl University {
    /// Build a repository from a data directory.
    ///
    /// Validates the directory and the presence of all four source files
    /// before any parsing, then runs the four loaders in dependency
    /// order. Returns the first error encountered; on error no repository
    /// value exists at all.
    pub fn from_directory(directory: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let directory = directory.as_ref().to_path_buf();
        check_sources(&directory)?;

        let majors = load_majors(&directory)?;
        let mut students = load_students(&directory, &majors)?;
        let mut instructors = load_instructors(&directory, &majors)?;
        let courses = load_grades(&directory, &mut students, &mut instructors)?;

        Ok(Self {
            directory,
            majors,
            students,
            instructors,
            courses,
        })
    }

    /// Directory the repository was loaded from.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn majors(&self) -> &Table<String, Major> {
        &self.majors
    }

    pub fn students(&self) -> &Table<String, Student> {
        &self.students
    }

    pub fn instructors(&self) -> &Table<String, Instructor> {
        &self.instructors
    }

    pub fn courses(&self) -> &Table<CourseKey, Course> {
        &self.courses
    }

    pub fn major(&self, name: &str) -> Option<&Major> {
        self.majors.get(name)
    }

    pub fn student(&self, cwid: &str) -> Option<&Student> {
        self.students.get(cwid)
    }

    pub fn instructor(&self, cwid: &str) -> Option<&Instructor> {
        self.instructors.get(cwid)
    }

    /// Every grade tuple, derived from the course table, sorted.
    pub fn grade_records_by_course(&self) -> Vec<GradeRecord> {
        let mut records: Vec<GradeRecord> = self
            .courses
            .values()
            .flat_map(|course| {
                course.student_grades().iter().flat_map(|(cwid, grades)| {
                    grades.iter().map(|grade| GradeRecord {
                        student_cwid: cwid.clone(),
                        course_name: course.course_name().to_string(),
                        instructor_cwid: course.instructor_cwid().to_string(),
                        grade: *grade,
                    })
                })
            })
            .collect();
        records.sort();
        records
    }

    /// Every grade tuple, derived independently from the student table,
    /// sorted. Equal to [`University::grade_records_by_course`] for any
    /// successfully built repository.
    pub fn grade_records_by_student(&self) -> Vec<GradeRecord> {
        let mut records: Vec<GradeRecord> = self
            .students
            .values()
            .flat_map(|student| {
                student.course_attempts().iter().flat_map(|(course_name, attempts)| {
                    attempts.iter().map(|attempt| GradeRecord {
                        student_cwid: student.cwid().to_string(),
                        course_name: course_name.clone(),
                        instructor_cwid: attempt.instructor_cwid.clone(),
                        grade: attempt.grade,
                    })
                })
            })
            .collect();
        records.sort();
        records
    }
}

// =============================================================================
// Setup validation
// =============================================================================

fn check_sources(directory: &Path) -> Result<(), SetupError> {
    if !directory.is_dir() {
        return Err(SetupError::InvalidDirectory {
            path: directory.to_path_buf(),
        });
    }

    let missing: Vec<String> = REQUIRED_FILES
        .iter()
        .filter(|name| !directory.join(name).is_file())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(SetupError::MissingFiles {
            directory: directory.to_path_buf(),
            missing,
        });
    }

    Ok(())
}

// =============================================================================
// Stage loaders
// =============================================================================

fn load_majors(directory: &Path) -> ContentResult<Table<String, Major>> {
    let mut majors: Table<String, Major> = Table::new();

    for row in RecordReader::open(&directory.join(MAJORS_FILE), 3, '\t', true)? {
        let row = row?;
        ensure_filled(MAJORS_FILE, &row)?;
        let (major_name, marker, course_name) = (row.field(0), row.field(1), row.field(2));

        let kind = RequirementKind::from_marker(marker).ok_or_else(|| ContentError::InvalidMarker {
            file: MAJORS_FILE.to_string(),
            line: row.line,
            marker: marker.to_string(),
        })?;

        let major = majors.get_or_insert_with(major_name.to_string(), |name| Major::new(name.clone()));
        if !major.register_course(course_name, kind) {
            return Err(ContentError::DuplicateCourse {
                file: MAJORS_FILE.to_string(),
                line: row.line,
                major: major_name.to_string(),
                course: course_name.to_string(),
            });
        }
    }

    Ok(majors)
}

fn load_students(directory: &Path, majors: &Table<String, Major>) -> ContentResult<Table<String, Student>> {
    let mut students: Table<String, Student> = Table::new();

    for row in RecordReader::open(&directory.join(STUDENTS_FILE), 3, ';', true)? {
        let row = row?;
        ensure_filled(STUDENTS_FILE, &row)?;
        let (cwid, name, major_name) = (row.field(0), row.field(1), row.field(2));

        if !majors.contains_key(major_name) {
            return Err(ContentError::UnknownMajor {
                file: STUDENTS_FILE.to_string(),
                line: row.line,
                major: major_name.to_string(),
            });
        }

        if !students.insert_unique(cwid.to_string(), Student::new(cwid, name, major_name)) {
            return Err(ContentError::DuplicateStudent {
                file: STUDENTS_FILE.to_string(),
                line: row.line,
                cwid: cwid.to_string(),
            });
        }
    }

    Ok(students)
}

fn load_instructors(
    directory: &Path,
    majors: &Table<String, Major>,
) -> ContentResult<Table<String, Instructor>> {
    let mut instructors: Table<String, Instructor> = Table::new();

    for row in RecordReader::open(&directory.join(INSTRUCTORS_FILE), 3, '|', true)? {
        let row = row?;
        ensure_filled(INSTRUCTORS_FILE, &row)?;
        let (cwid, name, department) = (row.field(0), row.field(1), row.field(2));

        // Departments reuse the major namespace.
        if !majors.contains_key(department) {
            return Err(ContentError::UnknownDepartment {
                file: INSTRUCTORS_FILE.to_string(),
                line: row.line,
                department: department.to_string(),
            });
        }

        if !instructors.insert_unique(cwid.to_string(), Instructor::new(cwid, name, department)) {
            return Err(ContentError::DuplicateInstructor {
                file: INSTRUCTORS_FILE.to_string(),
                line: row.line,
                cwid: cwid.to_string(),
            });
        }
    }

    Ok(instructors)
}

fn load_grades(
    directory: &Path,
    students: &mut Table<String, Student>,
    instructors: &mut Table<String, Instructor>,
) -> ContentResult<Table<CourseKey, Course>> {
    let mut courses: Table<CourseKey, Course> = Table::new();

    for row in RecordReader::open(&directory.join(GRADES_FILE), 4, '\t', true)? {
        let row = row?;
        ensure_filled(GRADES_FILE, &row)?;
        let (student_cwid, course_name, grade_symbol, instructor_cwid) =
            (row.field(0), row.field(1), row.field(2), row.field(3));

        let grade = LetterGrade::from_symbol(grade_symbol).ok_or_else(|| ContentError::UnknownGrade {
            file: GRADES_FILE.to_string(),
            line: row.line,
            grade: grade_symbol.to_string(),
        })?;

        let student = students
            .get_mut(student_cwid)
            .ok_or_else(|| ContentError::UnknownStudent {
                file: GRADES_FILE.to_string(),
                line: row.line,
                cwid: student_cwid.to_string(),
            })?;

        let instructor =
            instructors
                .get_mut(instructor_cwid)
                .ok_or_else(|| ContentError::UnknownInstructor {
                    file: GRADES_FILE.to_string(),
                    line: row.line,
                    cwid: instructor_cwid.to_string(),
                })?;

        // One grade record lands in three places: the student's attempt
        // history, the course's grade history, and the instructor's
        // taught-course set.
        student.record_attempt(course_name, instructor_cwid, grade);
        courses
            .get_or_insert_with(CourseKey::new(course_name, instructor_cwid), |key| {
                Course::new(key.clone())
            })
            .record_grade(student_cwid, grade);
        instructor.add_taught_course(course_name);
    }

    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const MAJORS: &str = "Major\tFlag\tCourse\n\
        SFEN\tR\tSSW 540\n\
        SFEN\tR\tSSW 555\n\
        SFEN\tR\tSSW 564\n\
        SFEN\tE\tCS 501\n\
        SFEN\tE\tCS 545\n\
        SYEN\tR\tSYS 671\n\
        SYEN\tR\tSYS 800\n\
        SYEN\tE\tSSW 540\n";

    const STUDENTS: &str = "CWID;Name;Major\n\
        10103;Baldwin, C;SFEN\n\
        10115;Wyatt, X;SFEN\n\
        11399;Cordova, I;SYEN\n\
        11658;Kelly, P;SYEN\n";

    const INSTRUCTORS: &str = "CWID|Name|Dept\n\
        98765|Einstein, A|SFEN\n\
        98764|Feynman, R|SFEN\n\
        98760|Darwin, C|SYEN\n";

    const GRADES: &str = "Student\tCourse\tGrade\tInstructor\n\
        10103\tSSW 540\tA\t98765\n\
        10103\tSSW 564\tB+\t98764\n\
        10103\tCS 501\tB\t98764\n\
        10115\tSSW 540\tF\t98765\n\
        10115\tSSW 540\tA-\t98765\n\
        11399\tSSW 540\tB\t98765\n\
        11658\tSSW 540\tF\t98765\n";

    /// Write a campus directory, with per-file overrides for error cases.
    fn campus(overrides: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (name, default) in [
            (MAJORS_FILE, MAJORS),
            (STUDENTS_FILE, STUDENTS),
            (INSTRUCTORS_FILE, INSTRUCTORS),
            (GRADES_FILE, GRADES),
        ] {
            let content = overrides
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, content)| *content)
                .unwrap_or(default);
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn content_error(result: Result<University, RepositoryError>) -> ContentError {
        match result.unwrap_err() {
            RepositoryError::Content(err) => err,
            RepositoryError::Setup(err) => panic!("expected content error, got setup: {err}"),
        }
    }

    #[test]
    fn test_loads_valid_campus() {
        let dir = campus(&[]);
        let university = University::from_directory(dir.path()).unwrap();

        assert_eq!(university.majors().len(), 2);
        assert_eq!(university.students().len(), 4);
        assert_eq!(university.instructors().len(), 3);
        // (SSW 540, 98765), (SSW 564, 98764), (CS 501, 98764)
        assert_eq!(university.courses().len(), 3);

        let baldwin = university.student("10103").unwrap();
        assert_eq!(baldwin.name(), "Baldwin, C");
        assert_eq!(
            baldwin.completed_course_names(),
            vec!["CS 501".to_string(), "SSW 540".to_string(), "SSW 564".to_string()]
        );

        let einstein = university.instructor("98765").unwrap();
        assert_eq!(einstein.taught_course_names().len(), 1);

        let ssw540 = university
            .courses()
            .get(&CourseKey::new("SSW 540", "98765"))
            .unwrap();
        assert_eq!(ssw540.student_count(), 4);
        // Wyatt's retake kept both grades in order.
        assert_eq!(
            ssw540.student_grades()["10115"],
            vec![LetterGrade::F, LetterGrade::AMinus]
        );
    }

    #[test]
    fn test_progress_and_gpa_from_loaded_data() {
        let dir = campus(&[]);
        let university = University::from_directory(dir.path()).unwrap();

        // Baldwin: A (400) + B+ (325) + B (300) over 3 courses = 3.41666… -> "3.42"
        let baldwin = university.student("10103").unwrap();
        assert_eq!(baldwin.gpa().display(), "3.42");

        // Wyatt passed SSW 540 on the retake: 3.75
        let wyatt = university.student("10115").unwrap();
        assert_eq!(wyatt.gpa().display(), "3.75");

        // Kelly failed the only attempt: 0.0
        let kelly = university.student("11658").unwrap();
        assert_eq!(kelly.gpa().display(), "0.0");
        assert!(kelly.completed_course_names().is_empty());

        // Cordova completed SSW 540, an SYEN elective: electives cleared.
        let cordova = university.student("11399").unwrap();
        let syen = university.major("SYEN").unwrap();
        let completed = cordova.completed_course_names().into_iter().collect();
        assert_eq!(
            syen.outstanding_required(&completed),
            vec!["SYS 671".to_string(), "SYS 800".to_string()]
        );
        assert!(syen.outstanding_electives(&completed).is_empty());
    }

    #[test]
    fn test_round_trip_views_agree() {
        let dir = campus(&[]);
        let university = University::from_directory(dir.path()).unwrap();

        let by_course = university.grade_records_by_course();
        let by_student = university.grade_records_by_student();
        assert_eq!(by_course.len(), 7);
        assert_eq!(by_course, by_student);

        // Spot-check the retake rows survive in both derivations.
        let wyatt_rows: Vec<&GradeRecord> = by_course
            .iter()
            .filter(|record| record.student_cwid == "10115")
            .collect();
        assert_eq!(wyatt_rows.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_setup_error() {
        let dir = tempdir().unwrap();
        let err = University::from_directory(dir.path().join("no_campus")).unwrap_err();
        assert!(matches!(err, RepositoryError::Setup(SetupError::InvalidDirectory { .. })));
    }

    #[test]
    fn test_missing_file_is_setup_error_even_with_malformed_others() {
        let dir = campus(&[(STUDENTS_FILE, "totally;broken\ndata\n")]);
        fs::remove_file(dir.path().join(GRADES_FILE)).unwrap();

        let err = University::from_directory(dir.path()).unwrap_err();
        match err {
            RepositoryError::Setup(SetupError::MissingFiles { missing, .. }) => {
                assert_eq!(missing, vec![GRADES_FILE.to_string()]);
            }
            other => panic!("expected missing-files setup error, got: {other}"),
        }
    }

    #[test]
    fn test_unknown_major_rejected() {
        let dir = campus(&[(STUDENTS_FILE, "CWID;Name;Major\n10103;Baldwin, C;ART\n")]);
        let err = content_error(University::from_directory(dir.path()));
        match err {
            ContentError::UnknownMajor { major, line, .. } => {
                assert_eq!(major, "ART");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_department_rejected() {
        let dir = campus(&[(INSTRUCTORS_FILE, "CWID|Name|Dept\n98765|Einstein, A|PHYS\n")]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::UnknownDepartment { department, .. } if department == "PHYS"));
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let dir = campus(&[(
            STUDENTS_FILE,
            "CWID;Name;Major\n10103;Baldwin, C;SFEN\n10103;Baldwin, C;SFEN\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::DuplicateStudent { cwid, line: 3, .. } if cwid == "10103"));
    }

    #[test]
    fn test_duplicate_instructor_rejected() {
        let dir = campus(&[(
            INSTRUCTORS_FILE,
            "CWID|Name|Dept\n98765|Einstein, A|SFEN\n98765|Einstein, A|SYEN\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::DuplicateInstructor { cwid, .. } if cwid == "98765"));
    }

    #[test]
    fn test_duplicate_major_course_rejected_across_sets() {
        let dir = campus(&[(
            MAJORS_FILE,
            "Major\tFlag\tCourse\nSFEN\tR\tSSW 540\nSFEN\tE\tSSW 540\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        match err {
            ContentError::DuplicateCourse { major, course, .. } => {
                assert_eq!(major, "SFEN");
                assert_eq!(course, "SSW 540");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_marker_rejected() {
        let dir = campus(&[(MAJORS_FILE, "Major\tFlag\tCourse\nSFEN\tX\tSSW 540\n")]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::InvalidMarker { marker, .. } if marker == "X"));
    }

    #[test]
    fn test_grade_with_unknown_student_rejected() {
        let dir = campus(&[(
            GRADES_FILE,
            "Student\tCourse\tGrade\tInstructor\n99999\tSSW 540\tA\t98765\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        match err {
            ContentError::UnknownStudent { cwid, file, .. } => {
                assert_eq!(cwid, "99999");
                assert_eq!(file, GRADES_FILE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_grade_with_unknown_instructor_rejected() {
        let dir = campus(&[(
            GRADES_FILE,
            "Student\tCourse\tGrade\tInstructor\n10103\tSSW 540\tA\t11111\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::UnknownInstructor { cwid, .. } if cwid == "11111"));
    }

    #[test]
    fn test_unknown_letter_grade_rejected() {
        let dir = campus(&[(
            GRADES_FILE,
            "Student\tCourse\tGrade\tInstructor\n10103\tSSW 540\tA+\t98765\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::UnknownGrade { grade, .. } if grade == "A+"));
    }

    #[test]
    fn test_blank_field_rejected() {
        let dir = campus(&[(STUDENTS_FILE, "CWID;Name;Major\n10103;;SFEN\n")]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(err, ContentError::BlankField { line: 2, .. }));
    }

    #[test]
    fn test_field_count_mismatch_rejected() {
        let dir = campus(&[(
            GRADES_FILE,
            "Student\tCourse\tGrade\tInstructor\n10103\tSSW 540\tA\n",
        )]);
        let err = content_error(University::from_directory(dir.path()));
        assert!(matches!(
            err,
            ContentError::FieldCount { found: 3, expected: 4, .. }
        ));
    }
}
