use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Grade;
use crate::db::types::GradeLetter;
use crate::repositories::grades::{LecturerGradeRow, StudentGradeRow};

#[derive(Debug, Deserialize)]
pub(crate) struct GradeCreate {
    #[serde(default, alias = "studentId")]
    pub(crate) student_id: Option<String>,
    #[serde(default, alias = "courseId")]
    pub(crate) course_id: Option<String>,
    pub(crate) score: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GradeUpdate {
    pub(crate) score: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GradeResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) course_id: String,
    pub(crate) lecturer_id: String,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<Grade> for GradeResponse {
    fn from(grade: Grade) -> Self {
        Self {
            id: grade.id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            lecturer_id: grade.lecturer_id,
            score: grade.score,
            letter: grade.letter,
            created_at: format_primitive(grade.created_at),
            updated_at: format_primitive(grade.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LecturerGradeResponse {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) student_external_id: String,
    pub(crate) course_id: String,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credits: i32,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) updated_at: String,
}

impl From<LecturerGradeRow> for LecturerGradeResponse {
    fn from(row: LecturerGradeRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            student_name: row.student_name,
            student_external_id: row.student_external_id,
            course_id: row.course_id,
            course_code: row.course_code,
            course_name: row.course_name,
            credits: row.credits,
            score: row.score,
            letter: row.letter,
            updated_at: format_primitive(row.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentGradeResponse {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) course_code: String,
    pub(crate) course_name: String,
    pub(crate) credits: i32,
    pub(crate) semester: i32,
    pub(crate) lecturer_name: String,
    pub(crate) score: f64,
    pub(crate) letter: GradeLetter,
    pub(crate) recorded_at: String,
}

impl From<StudentGradeRow> for StudentGradeResponse {
    fn from(row: StudentGradeRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            course_code: row.course_code,
            course_name: row.course_name,
            credits: row.credits,
            semester: row.semester,
            lecturer_name: row.lecturer_name,
            score: row.score,
            letter: row.letter,
            recorded_at: format_primitive(row.created_at),
        }
    }
}

/// Student dashboard: grades newest first plus IPK (GPA) and SKS (credits).
#[derive(Debug, Serialize)]
pub(crate) struct TranscriptResponse {
    pub(crate) grades: Vec<StudentGradeResponse>,
    pub(crate) gpa: f64,
    pub(crate) total_credits: i64,
    pub(crate) graded_courses: usize,
}
