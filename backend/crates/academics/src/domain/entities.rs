//! Domain Entities
//!
//! The relational entities of the school administration domain, plus
//! their insert (`New*`) and partial-update (`*Patch`) commands. The
//! entities are the wire format: they serialize (camelCase) exactly as
//! the API returns them, and the `New*` commands deserialize request
//! bodies, so server-assigned fields (ids, creation timestamps) cannot
//! be supplied by clients.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AcademicPeriodId, AssignmentId, AttendanceId, CourseId, DepartmentId, EnrollmentId, GradeId,
    ScheduleId, StudentId, SubjectId, TeacherId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::status::{
    AttendanceStatus, CourseStatus, EnrollmentStatus, StudentStatus, TeacherStatus,
};
use crate::error::{AcademicsError, AcademicsResult};

fn default_credits() -> i32 {
    3
}

fn default_max_students() -> i32 {
    30
}

fn default_max_grade() -> Decimal {
    Decimal::from(100)
}

fn default_max_points() -> Decimal {
    Decimal::from(100)
}

// ============================================================================
// Department
// ============================================================================

/// Academic department; owns teachers and subjects
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
    pub head: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub head: Option<String>,
}

impl Department {
    pub fn new(new: NewDepartment) -> Self {
        Self {
            id: DepartmentId::new(),
            name: new.name,
            description: new.description,
            head: new.head,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Academic Period
// ============================================================================

/// A semester/term; scopes which courses are offered
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPeriod {
    pub id: AcademicPeriodId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAcademicPeriod {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Period fields open to partial update
///
/// `is_active` is deliberately absent: activation goes through the
/// store's `set_active_period`, which keeps at most one period active.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPeriodPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AcademicPeriod {
    /// New periods are created inactive
    pub fn new(new: NewAcademicPeriod) -> Self {
        Self {
            id: AcademicPeriodId::new(),
            name: new.name,
            start_date: new.start_date,
            end_date: new.end_date,
            is_active: false,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Student
// ============================================================================

/// A student's academic profile; belongs to one user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub student_code: String,
    pub grade: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub user_id: UserId,
    pub student_code: String,
    pub grade: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub enrollment_date: NaiveDate,
    #[serde(default)]
    pub status: StudentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    pub student_code: Option<String>,
    pub grade: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
}

impl Student {
    pub fn new(new: NewStudent) -> Self {
        Self {
            id: StudentId::new(),
            user_id: new.user_id,
            student_code: new.student_code,
            grade: new.grade,
            date_of_birth: new.date_of_birth,
            address: new.address,
            phone: new.phone,
            enrollment_date: new.enrollment_date,
            status: new.status,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Teacher
// ============================================================================

/// A teacher's employment profile; belongs to one user, optionally to
/// one department
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub user_id: UserId,
    pub teacher_code: String,
    pub department_id: Option<DepartmentId>,
    pub specialization: Option<String>,
    pub hire_date: NaiveDate,
    pub status: TeacherStatus,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub user_id: UserId,
    pub teacher_code: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub specialization: Option<String>,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub status: TeacherStatus,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPatch {
    pub teacher_code: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub specialization: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<TeacherStatus>,
    pub phone: Option<String>,
}

impl Teacher {
    pub fn new(new: NewTeacher) -> Self {
        Self {
            id: TeacherId::new(),
            user_id: new.user_id,
            teacher_code: new.teacher_code,
            department_id: new.department_id,
            specialization: new.specialization,
            hire_date: new.hire_date,
            status: new.status,
            phone: new.phone,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Subject
// ============================================================================

/// Catalog subject (e.g. "Calculus"); instantiated by courses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub department_id: Option<DepartmentId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_credits")]
    pub credits: i32,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub department_id: Option<DepartmentId>,
}

impl Subject {
    pub fn new(new: NewSubject) -> Self {
        Self {
            id: SubjectId::new(),
            name: new.name,
            code: new.code,
            description: new.description,
            credits: new.credits,
            department_id: new.department_id,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Course
// ============================================================================

/// A scheduled instance of a subject in a period, taught by a teacher
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub academic_period_id: AcademicPeriodId,
    pub course_code: String,
    pub schedule: Option<String>,
    pub max_students: i32,
    pub status: CourseStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub academic_period_id: AcademicPeriodId,
    pub course_code: String,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default = "default_max_students")]
    pub max_students: i32,
    #[serde(default)]
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    pub subject_id: Option<SubjectId>,
    pub teacher_id: Option<TeacherId>,
    pub academic_period_id: Option<AcademicPeriodId>,
    pub course_code: Option<String>,
    pub schedule: Option<String>,
    pub max_students: Option<i32>,
    pub status: Option<CourseStatus>,
}

impl Course {
    pub fn new(new: NewCourse) -> Self {
        Self {
            id: CourseId::new(),
            subject_id: new.subject_id,
            teacher_id: new.teacher_id,
            academic_period_id: new.academic_period_id,
            course_code: new.course_code,
            schedule: new.schedule,
            max_students: new.max_students,
            status: new.status,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Enrollment
// ============================================================================

/// A student's registration in a course
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub enrollment_date: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub final_grade: Option<Decimal>,
}

/// Insert command; `enrollment_date` is server-assigned
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[serde(default)]
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub final_grade: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPatch {
    pub status: Option<EnrollmentStatus>,
    pub final_grade: Option<Decimal>,
}

impl Enrollment {
    pub fn new(new: NewEnrollment) -> Self {
        Self {
            id: EnrollmentId::new(),
            student_id: new.student_id,
            course_id: new.course_id,
            enrollment_date: Utc::now(),
            status: new.status,
            final_grade: new.final_grade,
        }
    }
}

// ============================================================================
// Grade
// ============================================================================

/// One graded assessment event on an enrollment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: GradeId,
    pub enrollment_id: EnrollmentId,
    pub assessment_type: String,
    pub assessment_name: String,
    pub grade: Decimal,
    pub max_grade: Decimal,
    pub weight: Option<Decimal>,
    pub assessment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrade {
    pub enrollment_id: EnrollmentId,
    pub assessment_type: String,
    pub assessment_name: String,
    pub grade: Decimal,
    #[serde(default = "default_max_grade")]
    pub max_grade: Decimal,
    #[serde(default)]
    pub weight: Option<Decimal>,
    pub assessment_date: NaiveDate,
}

impl NewGrade {
    /// A grade may not exceed its maximum
    pub fn validate(&self) -> AcademicsResult<()> {
        if self.grade > self.max_grade {
            return Err(AcademicsError::Validation(format!(
                "Grade {} exceeds maximum {}",
                self.grade, self.max_grade
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradePatch {
    pub assessment_type: Option<String>,
    pub assessment_name: Option<String>,
    pub grade: Option<Decimal>,
    pub max_grade: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub assessment_date: Option<NaiveDate>,
}

impl GradePatch {
    /// Cross-field bound check for the fields present in the patch; the
    /// schema CHECK constraint is the backstop when only one side changes.
    pub fn validate(&self) -> AcademicsResult<()> {
        if let (Some(grade), Some(max_grade)) = (self.grade, self.max_grade) {
            if grade > max_grade {
                return Err(AcademicsError::Validation(format!(
                    "Grade {} exceeds maximum {}",
                    grade, max_grade
                )));
            }
        }
        Ok(())
    }
}

impl Grade {
    pub fn new(new: NewGrade) -> Self {
        Self {
            id: GradeId::new(),
            enrollment_id: new.enrollment_id,
            assessment_type: new.assessment_type,
            assessment_name: new.assessment_name,
            grade: new.grade,
            max_grade: new.max_grade,
            weight: new.weight,
            assessment_date: new.assessment_date,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Attendance
// ============================================================================

/// One attendance record on an enrollment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: AttendanceId,
    pub enrollment_id: EnrollmentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub enrollment_id: EnrollmentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePatch {
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

impl Attendance {
    pub fn new(new: NewAttendance) -> Self {
        Self {
            id: AttendanceId::new(),
            enrollment_id: new.enrollment_id,
            date: new.date,
            status: new.status,
            notes: new.notes,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// Weekly meeting slot of a course
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub course_id: CourseId,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub classroom: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub course_id: CourseId,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub classroom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePatch {
    pub day_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub classroom: Option<String>,
}

impl Schedule {
    pub fn new(new: NewSchedule) -> Self {
        Self {
            id: ScheduleId::new(),
            course_id: new.course_id,
            day_of_week: new.day_of_week,
            start_time: new.start_time,
            end_time: new.end_time,
            classroom: new.classroom,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// A due-dated task for a course
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub course_id: CourseId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub max_points: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default = "default_max_points")]
    pub max_points: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub max_points: Option<Decimal>,
}

impl Assignment {
    pub fn new(new: NewAssignment) -> Self {
        Self {
            id: AssignmentId::new(),
            course_id: new.course_id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            max_points: new.max_points,
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Dashboard statistics
// ============================================================================

/// Point-in-time dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_students: i64,
    pub total_teachers: i64,
    pub active_courses: i64,
    pub total_departments: i64,
}
