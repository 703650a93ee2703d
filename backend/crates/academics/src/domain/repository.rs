//! Repository Traits
//!
//! One trait per aggregate, uniformly shaped (list, get, create, partial
//! update, delete). `update_*`/`delete_*` answer `None`/`false` for an
//! unknown id — a signal distinct from errors, so the gateway can return
//! 404 instead of 500. Guarded deletes fail with
//! [`crate::AcademicsError::HasDependents`] while dependent rows exist.

use auth::domain::value_object::user_id::UserId;
use kernel::id::{
    AcademicPeriodId, AssignmentId, AttendanceId, CourseId, DepartmentId, EnrollmentId, GradeId,
    ScheduleId, StudentId, SubjectId, TeacherId,
};

use crate::domain::entities::*;
use crate::domain::joined::{CourseDetail, GradeDetail, StudentWithUser, TeacherDetail};
use crate::error::AcademicsResult;

/// Department repository trait
#[trait_variant::make(DepartmentRepository: Send)]
pub trait LocalDepartmentRepository {
    async fn list_departments(&self) -> AcademicsResult<Vec<Department>>;
    async fn get_department(&self, id: DepartmentId) -> AcademicsResult<Option<Department>>;
    async fn create_department(&self, new: NewDepartment) -> AcademicsResult<Department>;
    async fn update_department(
        &self,
        id: DepartmentId,
        patch: DepartmentPatch,
    ) -> AcademicsResult<Option<Department>>;
    async fn delete_department(&self, id: DepartmentId) -> AcademicsResult<bool>;
}

/// Academic period repository trait
#[trait_variant::make(AcademicPeriodRepository: Send)]
pub trait LocalAcademicPeriodRepository {
    /// Periods ordered by start date, newest first
    async fn list_periods(&self) -> AcademicsResult<Vec<AcademicPeriod>>;
    async fn get_period(&self, id: AcademicPeriodId) -> AcademicsResult<Option<AcademicPeriod>>;
    async fn get_active_period(&self) -> AcademicsResult<Option<AcademicPeriod>>;
    async fn create_period(&self, new: NewAcademicPeriod) -> AcademicsResult<AcademicPeriod>;
    async fn update_period(
        &self,
        id: AcademicPeriodId,
        patch: AcademicPeriodPatch,
    ) -> AcademicsResult<Option<AcademicPeriod>>;
    /// Atomically deactivate every other period and activate this one
    async fn set_active_period(
        &self,
        id: AcademicPeriodId,
    ) -> AcademicsResult<Option<AcademicPeriod>>;
    async fn delete_period(&self, id: AcademicPeriodId) -> AcademicsResult<bool>;
}

/// Student repository trait
#[trait_variant::make(StudentRepository: Send)]
pub trait LocalStudentRepository {
    async fn list_students(&self) -> AcademicsResult<Vec<StudentWithUser>>;
    async fn get_student(&self, id: StudentId) -> AcademicsResult<Option<Student>>;
    async fn get_student_by_user(&self, user_id: &UserId) -> AcademicsResult<Option<Student>>;
    async fn create_student(&self, new: NewStudent) -> AcademicsResult<Student>;
    async fn update_student(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> AcademicsResult<Option<Student>>;
    async fn delete_student(&self, id: StudentId) -> AcademicsResult<bool>;
}

/// Teacher repository trait
#[trait_variant::make(TeacherRepository: Send)]
pub trait LocalTeacherRepository {
    async fn list_teachers(&self) -> AcademicsResult<Vec<TeacherDetail>>;
    async fn get_teacher(&self, id: TeacherId) -> AcademicsResult<Option<Teacher>>;
    async fn get_teacher_by_user(&self, user_id: &UserId) -> AcademicsResult<Option<Teacher>>;
    async fn create_teacher(&self, new: NewTeacher) -> AcademicsResult<Teacher>;
    async fn update_teacher(
        &self,
        id: TeacherId,
        patch: TeacherPatch,
    ) -> AcademicsResult<Option<Teacher>>;
    async fn delete_teacher(&self, id: TeacherId) -> AcademicsResult<bool>;
}

/// Subject repository trait
#[trait_variant::make(SubjectRepository: Send)]
pub trait LocalSubjectRepository {
    async fn list_subjects(&self) -> AcademicsResult<Vec<Subject>>;
    async fn get_subject(&self, id: SubjectId) -> AcademicsResult<Option<Subject>>;
    async fn create_subject(&self, new: NewSubject) -> AcademicsResult<Subject>;
    async fn update_subject(
        &self,
        id: SubjectId,
        patch: SubjectPatch,
    ) -> AcademicsResult<Option<Subject>>;
    async fn delete_subject(&self, id: SubjectId) -> AcademicsResult<bool>;
}

/// Course repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    async fn list_courses(&self) -> AcademicsResult<Vec<CourseDetail>>;
    async fn get_course(&self, id: CourseId) -> AcademicsResult<Option<Course>>;
    async fn create_course(&self, new: NewCourse) -> AcademicsResult<Course>;
    async fn update_course(
        &self,
        id: CourseId,
        patch: CoursePatch,
    ) -> AcademicsResult<Option<Course>>;
    async fn delete_course(&self, id: CourseId) -> AcademicsResult<bool>;
}

/// Enrollment repository trait
#[trait_variant::make(EnrollmentRepository: Send)]
pub trait LocalEnrollmentRepository {
    async fn list_enrollments_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Enrollment>>;
    async fn list_enrollments_by_student(
        &self,
        student_id: StudentId,
    ) -> AcademicsResult<Vec<Enrollment>>;
    async fn get_enrollment(&self, id: EnrollmentId) -> AcademicsResult<Option<Enrollment>>;
    async fn create_enrollment(&self, new: NewEnrollment) -> AcademicsResult<Enrollment>;
    async fn update_enrollment(
        &self,
        id: EnrollmentId,
        patch: EnrollmentPatch,
    ) -> AcademicsResult<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: EnrollmentId) -> AcademicsResult<bool>;
}

/// Grade repository trait
#[trait_variant::make(GradeRepository: Send)]
pub trait LocalGradeRepository {
    async fn list_grades(&self) -> AcademicsResult<Vec<GradeDetail>>;
    async fn list_grades_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AcademicsResult<Vec<Grade>>;
    async fn get_grade(&self, id: GradeId) -> AcademicsResult<Option<Grade>>;
    async fn create_grade(&self, new: NewGrade) -> AcademicsResult<Grade>;
    async fn update_grade(&self, id: GradeId, patch: GradePatch)
    -> AcademicsResult<Option<Grade>>;
    async fn delete_grade(&self, id: GradeId) -> AcademicsResult<bool>;
}

/// Attendance repository trait
#[trait_variant::make(AttendanceRepository: Send)]
pub trait LocalAttendanceRepository {
    async fn list_attendance_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AcademicsResult<Vec<Attendance>>;
    async fn get_attendance(&self, id: AttendanceId) -> AcademicsResult<Option<Attendance>>;
    async fn create_attendance(&self, new: NewAttendance) -> AcademicsResult<Attendance>;
    async fn update_attendance(
        &self,
        id: AttendanceId,
        patch: AttendancePatch,
    ) -> AcademicsResult<Option<Attendance>>;
    async fn delete_attendance(&self, id: AttendanceId) -> AcademicsResult<bool>;
}

/// Schedule repository trait
#[trait_variant::make(ScheduleRepository: Send)]
pub trait LocalScheduleRepository {
    async fn list_schedules_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Schedule>>;
    async fn get_schedule(&self, id: ScheduleId) -> AcademicsResult<Option<Schedule>>;
    async fn create_schedule(&self, new: NewSchedule) -> AcademicsResult<Schedule>;
    async fn update_schedule(
        &self,
        id: ScheduleId,
        patch: SchedulePatch,
    ) -> AcademicsResult<Option<Schedule>>;
    async fn delete_schedule(&self, id: ScheduleId) -> AcademicsResult<bool>;
}

/// Assignment repository trait
#[trait_variant::make(AssignmentRepository: Send)]
pub trait LocalAssignmentRepository {
    async fn list_assignments_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Assignment>>;
    async fn get_assignment(&self, id: AssignmentId) -> AcademicsResult<Option<Assignment>>;
    async fn create_assignment(&self, new: NewAssignment) -> AcademicsResult<Assignment>;
    async fn update_assignment(
        &self,
        id: AssignmentId,
        patch: AssignmentPatch,
    ) -> AcademicsResult<Option<Assignment>>;
    async fn delete_assignment(&self, id: AssignmentId) -> AcademicsResult<bool>;
}

/// Statistics repository trait
#[trait_variant::make(StatsRepository: Send)]
pub trait LocalStatsRepository {
    /// Point-in-time dashboard counters
    async fn statistics(&self) -> AcademicsResult<Statistics>;
}

/// Combined store surface, for handlers that need several aggregates
pub trait AcademicsRepository:
    DepartmentRepository
    + AcademicPeriodRepository
    + StudentRepository
    + TeacherRepository
    + SubjectRepository
    + CourseRepository
    + EnrollmentRepository
    + GradeRepository
    + AttendanceRepository
    + ScheduleRepository
    + AssignmentRepository
    + StatsRepository
{
}

impl<T> AcademicsRepository for T where
    T: DepartmentRepository
        + AcademicPeriodRepository
        + StudentRepository
        + TeacherRepository
        + SubjectRepository
        + CourseRepository
        + EnrollmentRepository
        + GradeRepository
        + AttendanceRepository
        + ScheduleRepository
        + AssignmentRepository
        + StatsRepository
{
}
