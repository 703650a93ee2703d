//! Joined Read Models
//!
//! Read-time joins assembled by the store for list endpoints. These are
//! not stored denormalizations: the underlying tables stay normalized,
//! and the nested user is always the password-free [`UserSummary`].

use auth::domain::entity::user::UserSummary;
use serde::Serialize;

use crate::domain::entities::{Course, Department, Enrollment, Grade, Student, Subject, Teacher};

/// Student merged with its owning user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithUser {
    #[serde(flatten)]
    pub student: Student,
    pub user: UserSummary,
}

/// Teacher merged with its owning user (course listings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWithUser {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: UserSummary,
}

/// Teacher merged with its owning user and department (teacher listings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: UserSummary,
    pub department: Option<Department>,
}

/// Course merged with its subject (grade listings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithSubject {
    #[serde(flatten)]
    pub course: Course,
    pub subject: Subject,
}

/// Course merged with its subject and teacher-with-user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub subject: Subject,
    pub teacher: TeacherWithUser,
}

/// Enrollment merged with its full student and course chains
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub student: StudentWithUser,
    pub course: CourseWithSubject,
}

/// Grade merged with the Enrollment -> Student -> User and
/// Enrollment -> Course -> Subject chains
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeDetail {
    #[serde(flatten)]
    pub grade: Grade,
    pub enrollment: EnrollmentDetail,
}
