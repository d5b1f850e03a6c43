use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Course;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 2, message = "Course code must be at least 2 characters"))]
    pub(crate) code: String,
    #[validate(length(min = 3, message = "Course name must be at least 3 characters"))]
    pub(crate) name: String,
    #[validate(range(min = 1, max = 6, message = "Credits must be between 1 and 6"))]
    pub(crate) credits: i32,
    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    pub(crate) semester: i32,
}

impl CourseCreate {
    pub(crate) fn normalized(self) -> Self {
        Self {
            code: self.code.trim().to_ascii_uppercase(),
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseUpdate {
    #[serde(default)]
    #[validate(length(min = 2, message = "Course code must be at least 2 characters"))]
    pub(crate) code: Option<String>,
    #[serde(default)]
    #[validate(length(min = 3, message = "Course name must be at least 3 characters"))]
    pub(crate) name: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 6, message = "Credits must be between 1 and 6"))]
    pub(crate) credits: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    pub(crate) semester: Option<i32>,
}

impl CourseUpdate {
    pub(crate) fn normalized(self) -> Self {
        Self {
            code: self.code.map(|code| code.trim().to_ascii_uppercase()),
            name: self.name.map(|name| name.trim().to_string()),
            ..self
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteCourseQuery {
    #[serde(default)]
    pub(crate) confirm: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: String,
    pub(crate) code: String,
    pub(crate) name: String,
    pub(crate) credits: i32,
    pub(crate) semester: i32,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            code: course.code,
            name: course.name,
            credits: course.credits,
            semester: course.semester,
            created_at: format_primitive(course.created_at),
            updated_at: format_primitive(course.updated_at),
        }
    }
}
