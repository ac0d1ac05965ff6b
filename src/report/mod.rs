//! Tabular summaries of a loaded repository.
//!
//! Summary rows are plain serializable structs so the CLI can render them
//! as bordered text tables or dump them as JSON. Assembly walks the
//! repository tables in key order, so output is deterministic.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::CourseKey;
use crate::repository::University;

/// One row of the major summary.
#[derive(Debug, Clone, Serialize)]
pub struct MajorSummary {
    pub major: String,
    pub required_courses: Vec<String>,
    pub elective_courses: Vec<String>,
}

/// One row of the student summary: progress against the student's major.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub cwid: String,
    pub name: String,
    pub major: String,
    pub completed_courses: Vec<String>,
    pub remaining_required: Vec<String>,
    pub remaining_electives: Vec<String>,
    /// GPA after display rounding, e.g. "3.44" or "0.0".
    pub gpa: String,
}

/// One row of the instructor summary: one taught course and its
/// distinct-student count.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorSummary {
    pub cwid: String,
    pub name: String,
    pub department: String,
    pub course: String,
    pub students: usize,
}

/// All three summaries for one repository.
#[derive(Debug, Clone, Serialize)]
pub struct UniversityReport {
    pub majors: Vec<MajorSummary>,
    pub students: Vec<StudentSummary>,
    pub instructors: Vec<InstructorSummary>,
}

impl UniversityReport {
    /// Assemble every summary row from a loaded repository.
    pub fn build(university: &University) -> Self {
        let majors = university
            .majors()
            .values()
            .map(|major| MajorSummary {
                major: major.name().to_string(),
                required_courses: major.required_courses().iter().cloned().collect(),
                elective_courses: major.elective_courses().iter().cloned().collect(),
            })
            .collect();

        let students = university
            .students()
            .values()
            .map(|student| {
                let completed: BTreeSet<String> =
                    student.completed_course_names().into_iter().collect();
                // Loading guarantees the major exists; an absent entry here
                // would mean the repository invariant was broken upstream.
                let (remaining_required, remaining_electives) =
                    match university.major(student.major_name()) {
                        Some(major) => (
                            major.outstanding_required(&completed),
                            major.outstanding_electives(&completed),
                        ),
                        None => (Vec::new(), Vec::new()),
                    };
                StudentSummary {
                    cwid: student.cwid().to_string(),
                    name: student.name().to_string(),
                    major: student.major_name().to_string(),
                    completed_courses: completed.into_iter().collect(),
                    remaining_required,
                    remaining_electives,
                    gpa: student.gpa().display(),
                }
            })
            .collect();

        let instructors = university
            .instructors()
            .values()
            .flat_map(|instructor| {
                instructor.taught_course_names().iter().map(|course_name| {
                    let students = university
                        .courses()
                        .get(&CourseKey::new(course_name.clone(), instructor.cwid()))
                        .map(|course| course.student_count())
                        .unwrap_or(0);
                    InstructorSummary {
                        cwid: instructor.cwid().to_string(),
                        name: instructor.name().to_string(),
                        department: instructor.department().to_string(),
                        course: course_name.clone(),
                        students,
                    }
                })
            })
            .collect();

        Self {
            majors,
            students,
            instructors,
        }
    }

    /// Render all three summaries as bordered text tables.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}",
            render_major_summary(&self.majors),
            render_student_summary(&self.students),
            render_instructor_summary(&self.instructors),
        )
    }
}

// =============================================================================
// Text table rendering
// =============================================================================

fn join(names: &[String]) -> String {
    names.join(", ")
}

/// Render the major summary table.
pub fn render_major_summary(rows: &[MajorSummary]) -> String {
    render_table(
        "Major Summary",
        &["Major", "Required Courses", "Electives"],
        rows.iter()
            .map(|row| {
                vec![
                    row.major.clone(),
                    join(&row.required_courses),
                    join(&row.elective_courses),
                ]
            })
            .collect(),
    )
}

/// Render the student summary table.
pub fn render_student_summary(rows: &[StudentSummary]) -> String {
    render_table(
        "Student Summary",
        &[
            "CWID",
            "Name",
            "Major",
            "Completed Courses",
            "Remaining Required",
            "Remaining Electives",
            "GPA",
        ],
        rows.iter()
            .map(|row| {
                vec![
                    row.cwid.clone(),
                    row.name.clone(),
                    row.major.clone(),
                    join(&row.completed_courses),
                    join(&row.remaining_required),
                    join(&row.remaining_electives),
                    row.gpa.clone(),
                ]
            })
            .collect(),
    )
}

/// Render the instructor summary table.
pub fn render_instructor_summary(rows: &[InstructorSummary]) -> String {
    render_table(
        "Instructor Summary",
        &["CWID", "Name", "Dept", "Course", "Students"],
        rows.iter()
            .map(|row| {
                vec![
                    row.cwid.clone(),
                    row.name.clone(),
                    row.department.clone(),
                    row.course.clone(),
                    row.students.to_string(),
                ]
            })
            .collect(),
    )
}

/// Render a titled, bordered table with column widths fitted to content.
fn render_table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let border: String = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!(" {:<width$} |", cell));
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&border);
    out.push('\n');
    out
}
