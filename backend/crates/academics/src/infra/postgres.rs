//! PostgreSQL Store Implementation
//!
//! `PgAcademicsStore` implements every repository trait of the domain
//! plus the auth crate's `ProfileProvisioner` port. Integrity rules live
//! here: foreign keys are verified before writes, deletes are rejected
//! while dependents exist, and period activation is transactional.

use auth::domain::entity::user::UserSummary;
use auth::domain::value_object::{user_id::UserId, user_role::UserRole};
use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{
    AcademicPeriodId, AssignmentId, AttendanceId, CourseId, DepartmentId, EnrollmentId, GradeId,
    ScheduleId, StudentId, SubjectId, TeacherId,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::*;
use crate::domain::joined::{
    CourseDetail, CourseWithSubject, EnrollmentDetail, GradeDetail, StudentWithUser,
    TeacherDetail, TeacherWithUser,
};
use crate::domain::repository::{
    AcademicPeriodRepository, AssignmentRepository, AttendanceRepository, CourseRepository,
    DepartmentRepository, EnrollmentRepository, GradeRepository, ScheduleRepository,
    StatsRepository, StudentRepository, SubjectRepository, TeacherRepository,
};
use crate::domain::status::{
    AttendanceStatus, CourseStatus, EnrollmentStatus, StudentStatus, TeacherStatus,
};
use crate::error::{AcademicsError, AcademicsResult};

/// PostgreSQL-backed academics store
#[derive(Clone)]
pub struct PgAcademicsStore {
    pool: PgPool,
}

impl PgAcademicsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// EXISTS probe; `sql` is a `SELECT EXISTS(... WHERE x = $1)` statement
    async fn exists(&self, sql: &str, id: Uuid) -> AcademicsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn ensure_user_exists(&self, id: &UserId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)",
                *id.as_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("user"))
        }
    }

    async fn ensure_department_exists(&self, id: DepartmentId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM departments WHERE department_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("department"))
        }
    }

    async fn ensure_subject_exists(&self, id: SubjectId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM subjects WHERE subject_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("subject"))
        }
    }

    async fn ensure_teacher_exists(&self, id: TeacherId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM teachers WHERE teacher_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("teacher"))
        }
    }

    async fn ensure_period_exists(&self, id: AcademicPeriodId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM academic_periods WHERE academic_period_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("academic period"))
        }
    }

    async fn ensure_student_exists(&self, id: StudentId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("student"))
        }
    }

    async fn ensure_course_exists(&self, id: CourseId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE course_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("course"))
        }
    }

    async fn ensure_enrollment_exists(&self, id: EnrollmentId) -> AcademicsResult<()> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM enrollments WHERE enrollment_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            Ok(())
        } else {
            Err(AcademicsError::ForeignKey("enrollment"))
        }
    }

    /// Unique-value probe for entity codes
    async fn code_taken(&self, sql: &str, code: &str) -> AcademicsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(sql)
            .bind(code)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

// ============================================================================
// Row conversion helpers
// ============================================================================

fn user_summary(
    user_id: Uuid,
    email: String,
    name: String,
    role: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
) -> AcademicsResult<UserSummary> {
    let role = UserRole::from_code(&role)
        .ok_or_else(|| AcademicsError::Internal(format!("Invalid role in database: {role}")))?;

    Ok(UserSummary {
        id: UserId::from_uuid(user_id),
        email,
        name,
        role,
        avatar,
        created_at,
    })
}

fn student_status(code: &str) -> AcademicsResult<StudentStatus> {
    StudentStatus::from_code(code).ok_or_else(|| {
        AcademicsError::Internal(format!("Invalid student status in database: {code}"))
    })
}

fn teacher_status(code: &str) -> AcademicsResult<TeacherStatus> {
    TeacherStatus::from_code(code).ok_or_else(|| {
        AcademicsError::Internal(format!("Invalid teacher status in database: {code}"))
    })
}

fn course_status(code: &str) -> AcademicsResult<CourseStatus> {
    CourseStatus::from_code(code).ok_or_else(|| {
        AcademicsError::Internal(format!("Invalid course status in database: {code}"))
    })
}

fn enrollment_status(code: &str) -> AcademicsResult<EnrollmentStatus> {
    EnrollmentStatus::from_code(code).ok_or_else(|| {
        AcademicsError::Internal(format!("Invalid enrollment status in database: {code}"))
    })
}

fn attendance_status(code: &str) -> AcademicsResult<AttendanceStatus> {
    AttendanceStatus::from_code(code).ok_or_else(|| {
        AcademicsError::Internal(format!("Invalid attendance status in database: {code}"))
    })
}

// ============================================================================
// Departments
// ============================================================================

#[derive(sqlx::FromRow)]
struct DepartmentRow {
    department_id: Uuid,
    name: String,
    description: Option<String>,
    head: Option<String>,
    created_at: DateTime<Utc>,
}

impl DepartmentRow {
    fn into_department(self) -> Department {
        Department {
            id: DepartmentId::from_uuid(self.department_id),
            name: self.name,
            description: self.description,
            head: self.head,
            created_at: self.created_at,
        }
    }
}

const DEPARTMENT_COLS: &str = "department_id, name, description, head, created_at";

impl DepartmentRepository for PgAcademicsStore {
    async fn list_departments(&self) -> AcademicsResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_COLS} FROM departments ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DepartmentRow::into_department).collect())
    }

    async fn get_department(&self, id: DepartmentId) -> AcademicsResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            "SELECT {DEPARTMENT_COLS} FROM departments WHERE department_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DepartmentRow::into_department))
    }

    async fn create_department(&self, new: NewDepartment) -> AcademicsResult<Department> {
        let department = Department::new(new);

        sqlx::query(
            r#"
            INSERT INTO departments (department_id, name, description, head, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(department.id.as_uuid())
        .bind(&department.name)
        .bind(&department.description)
        .bind(&department.head)
        .bind(department.created_at)
        .execute(&self.pool)
        .await?;

        Ok(department)
    }

    async fn update_department(
        &self,
        id: DepartmentId,
        patch: DepartmentPatch,
    ) -> AcademicsResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            UPDATE departments SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                head = COALESCE($4, head)
            WHERE department_id = $1
            RETURNING {DEPARTMENT_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.head)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DepartmentRow::into_department))
    }

    async fn delete_department(&self, id: DepartmentId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM teachers WHERE department_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("teachers"));
        }
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM subjects WHERE department_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("subjects"));
        }

        let affected = sqlx::query("DELETE FROM departments WHERE department_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Academic Periods
// ============================================================================

#[derive(sqlx::FromRow)]
struct PeriodRow {
    academic_period_id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl PeriodRow {
    fn into_period(self) -> AcademicPeriod {
        AcademicPeriod {
            id: AcademicPeriodId::from_uuid(self.academic_period_id),
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

const PERIOD_COLS: &str =
    "academic_period_id, name, start_date, end_date, is_active, created_at";

impl AcademicPeriodRepository for PgAcademicsStore {
    async fn list_periods(&self) -> AcademicsResult<Vec<AcademicPeriod>> {
        let rows = sqlx::query_as::<_, PeriodRow>(&format!(
            "SELECT {PERIOD_COLS} FROM academic_periods ORDER BY start_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PeriodRow::into_period).collect())
    }

    async fn get_period(&self, id: AcademicPeriodId) -> AcademicsResult<Option<AcademicPeriod>> {
        let row = sqlx::query_as::<_, PeriodRow>(&format!(
            "SELECT {PERIOD_COLS} FROM academic_periods WHERE academic_period_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PeriodRow::into_period))
    }

    async fn get_active_period(&self) -> AcademicsResult<Option<AcademicPeriod>> {
        let row = sqlx::query_as::<_, PeriodRow>(&format!(
            "SELECT {PERIOD_COLS} FROM academic_periods WHERE is_active"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PeriodRow::into_period))
    }

    async fn create_period(&self, new: NewAcademicPeriod) -> AcademicsResult<AcademicPeriod> {
        let period = AcademicPeriod::new(new);

        sqlx::query(
            r#"
            INSERT INTO academic_periods (
                academic_period_id, name, start_date, end_date, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(period.id.as_uuid())
        .bind(&period.name)
        .bind(period.start_date)
        .bind(period.end_date)
        .bind(period.is_active)
        .bind(period.created_at)
        .execute(&self.pool)
        .await?;

        Ok(period)
    }

    async fn update_period(
        &self,
        id: AcademicPeriodId,
        patch: AcademicPeriodPatch,
    ) -> AcademicsResult<Option<AcademicPeriod>> {
        let row = sqlx::query_as::<_, PeriodRow>(&format!(
            r#"
            UPDATE academic_periods SET
                name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date)
            WHERE academic_period_id = $1
            RETURNING {PERIOD_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.name)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PeriodRow::into_period))
    }

    async fn set_active_period(
        &self,
        id: AcademicPeriodId,
    ) -> AcademicsResult<Option<AcademicPeriod>> {
        let mut tx = self.pool.begin().await?;

        // Deactivate-then-activate in one transaction; the partial unique
        // index on (is_active) makes any interleaving fail loudly rather
        // than leave two active periods.
        sqlx::query("UPDATE academic_periods SET is_active = FALSE WHERE is_active")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, PeriodRow>(&format!(
            r#"
            UPDATE academic_periods SET is_active = TRUE
            WHERE academic_period_id = $1
            RETURNING {PERIOD_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;

        tracing::info!(period_id = %id, "Active academic period switched");

        Ok(row.map(PeriodRow::into_period))
    }

    async fn delete_period(&self, id: AcademicPeriodId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE academic_period_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("courses"));
        }

        let affected = sqlx::query("DELETE FROM academic_periods WHERE academic_period_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Students
// ============================================================================

#[derive(sqlx::FromRow)]
struct StudentRow {
    student_id: Uuid,
    user_id: Uuid,
    student_code: String,
    grade: String,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
    phone: Option<String>,
    enrollment_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl StudentRow {
    fn into_student(self) -> AcademicsResult<Student> {
        Ok(Student {
            id: StudentId::from_uuid(self.student_id),
            user_id: UserId::from_uuid(self.user_id),
            student_code: self.student_code,
            grade: self.grade,
            date_of_birth: self.date_of_birth,
            address: self.address,
            phone: self.phone,
            enrollment_date: self.enrollment_date,
            status: student_status(&self.status)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StudentWithUserRow {
    student_id: Uuid,
    user_id: Uuid,
    student_code: String,
    grade: String,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
    phone: Option<String>,
    enrollment_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    user_email: String,
    user_name: String,
    user_role: String,
    user_avatar: Option<String>,
    user_created_at: DateTime<Utc>,
}

impl StudentWithUserRow {
    fn into_detail(self) -> AcademicsResult<StudentWithUser> {
        let user = user_summary(
            self.user_id,
            self.user_email,
            self.user_name,
            self.user_role,
            self.user_avatar,
            self.user_created_at,
        )?;

        let student = Student {
            id: StudentId::from_uuid(self.student_id),
            user_id: UserId::from_uuid(self.user_id),
            student_code: self.student_code,
            grade: self.grade,
            date_of_birth: self.date_of_birth,
            address: self.address,
            phone: self.phone,
            enrollment_date: self.enrollment_date,
            status: student_status(&self.status)?,
            created_at: self.created_at,
        };

        Ok(StudentWithUser { student, user })
    }
}

const STUDENT_COLS: &str = "student_id, user_id, student_code, grade, date_of_birth, \
     address, phone, enrollment_date, status, created_at";

impl StudentRepository for PgAcademicsStore {
    async fn list_students(&self) -> AcademicsResult<Vec<StudentWithUser>> {
        let rows = sqlx::query_as::<_, StudentWithUserRow>(
            r#"
            SELECT
                s.student_id, s.user_id, s.student_code, s.grade, s.date_of_birth,
                s.address, s.phone, s.enrollment_date, s.status, s.created_at,
                u.email AS user_email, u.name AS user_name, u.role AS user_role,
                u.avatar AS user_avatar, u.created_at AS user_created_at
            FROM students s
            JOIN users u ON u.user_id = s.user_id
            ORDER BY s.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StudentWithUserRow::into_detail).collect()
    }

    async fn get_student(&self, id: StudentId) -> AcademicsResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLS} FROM students WHERE student_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn get_student_by_user(&self, user_id: &UserId) -> AcademicsResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLS} FROM students WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn create_student(&self, new: NewStudent) -> AcademicsResult<Student> {
        self.ensure_user_exists(&new.user_id).await?;

        if self
            .code_taken(
                "SELECT EXISTS(SELECT 1 FROM students WHERE student_code = $1)",
                &new.student_code,
            )
            .await?
        {
            return Err(AcademicsError::Duplicate("student_code"));
        }

        let student = Student::new(new);

        sqlx::query(
            r#"
            INSERT INTO students (
                student_id, user_id, student_code, grade, date_of_birth,
                address, phone, enrollment_date, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(student.id.as_uuid())
        .bind(student.user_id.as_uuid())
        .bind(&student.student_code)
        .bind(&student.grade)
        .bind(student.date_of_birth)
        .bind(&student.address)
        .bind(&student.phone)
        .bind(student.enrollment_date)
        .bind(student.status.code())
        .bind(student.created_at)
        .execute(&self.pool)
        .await?;

        Ok(student)
    }

    async fn update_student(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> AcademicsResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            UPDATE students SET
                student_code = COALESCE($2, student_code),
                grade = COALESCE($3, grade),
                date_of_birth = COALESCE($4, date_of_birth),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                enrollment_date = COALESCE($7, enrollment_date),
                status = COALESCE($8, status)
            WHERE student_id = $1
            RETURNING {STUDENT_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.student_code)
        .bind(patch.grade)
        .bind(patch.date_of_birth)
        .bind(patch.address)
        .bind(patch.phone)
        .bind(patch.enrollment_date)
        .bind(patch.status.map(|s| s.code()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(StudentRow::into_student).transpose()
    }

    async fn delete_student(&self, id: StudentId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("enrollments"));
        }

        let affected = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Teachers
// ============================================================================

#[derive(sqlx::FromRow)]
struct TeacherRow {
    teacher_id: Uuid,
    user_id: Uuid,
    teacher_code: String,
    department_id: Option<Uuid>,
    specialization: Option<String>,
    hire_date: NaiveDate,
    status: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl TeacherRow {
    fn into_teacher(self) -> AcademicsResult<Teacher> {
        Ok(Teacher {
            id: TeacherId::from_uuid(self.teacher_id),
            user_id: UserId::from_uuid(self.user_id),
            teacher_code: self.teacher_code,
            department_id: self.department_id.map(DepartmentId::from_uuid),
            specialization: self.specialization,
            hire_date: self.hire_date,
            status: teacher_status(&self.status)?,
            phone: self.phone,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TeacherDetailRow {
    teacher_id: Uuid,
    user_id: Uuid,
    teacher_code: String,
    department_id: Option<Uuid>,
    specialization: Option<String>,
    hire_date: NaiveDate,
    status: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    user_email: String,
    user_name: String,
    user_role: String,
    user_avatar: Option<String>,
    user_created_at: DateTime<Utc>,
    department_name: Option<String>,
    department_description: Option<String>,
    department_head: Option<String>,
    department_created_at: Option<DateTime<Utc>>,
}

impl TeacherDetailRow {
    fn into_detail(self) -> AcademicsResult<TeacherDetail> {
        let user = user_summary(
            self.user_id,
            self.user_email,
            self.user_name,
            self.user_role,
            self.user_avatar,
            self.user_created_at,
        )?;

        let department = match (self.department_id, self.department_name, self.department_created_at)
        {
            (Some(id), Some(name), Some(created_at)) => Some(Department {
                id: DepartmentId::from_uuid(id),
                name,
                description: self.department_description,
                head: self.department_head,
                created_at,
            }),
            _ => None,
        };

        let teacher = Teacher {
            id: TeacherId::from_uuid(self.teacher_id),
            user_id: UserId::from_uuid(self.user_id),
            teacher_code: self.teacher_code,
            department_id: self.department_id.map(DepartmentId::from_uuid),
            specialization: self.specialization,
            hire_date: self.hire_date,
            status: teacher_status(&self.status)?,
            phone: self.phone,
            created_at: self.created_at,
        };

        Ok(TeacherDetail {
            teacher,
            user,
            department,
        })
    }
}

const TEACHER_COLS: &str = "teacher_id, user_id, teacher_code, department_id, \
     specialization, hire_date, status, phone, created_at";

impl TeacherRepository for PgAcademicsStore {
    async fn list_teachers(&self) -> AcademicsResult<Vec<TeacherDetail>> {
        let rows = sqlx::query_as::<_, TeacherDetailRow>(
            r#"
            SELECT
                t.teacher_id, t.user_id, t.teacher_code, t.department_id,
                t.specialization, t.hire_date, t.status, t.phone, t.created_at,
                u.email AS user_email, u.name AS user_name, u.role AS user_role,
                u.avatar AS user_avatar, u.created_at AS user_created_at,
                d.name AS department_name, d.description AS department_description,
                d.head AS department_head, d.created_at AS department_created_at
            FROM teachers t
            JOIN users u ON u.user_id = t.user_id
            LEFT JOIN departments d ON d.department_id = t.department_id
            ORDER BY t.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TeacherDetailRow::into_detail).collect()
    }

    async fn get_teacher(&self, id: TeacherId) -> AcademicsResult<Option<Teacher>> {
        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            "SELECT {TEACHER_COLS} FROM teachers WHERE teacher_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TeacherRow::into_teacher).transpose()
    }

    async fn get_teacher_by_user(&self, user_id: &UserId) -> AcademicsResult<Option<Teacher>> {
        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            "SELECT {TEACHER_COLS} FROM teachers WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TeacherRow::into_teacher).transpose()
    }

    async fn create_teacher(&self, new: NewTeacher) -> AcademicsResult<Teacher> {
        self.ensure_user_exists(&new.user_id).await?;
        if let Some(department_id) = new.department_id {
            self.ensure_department_exists(department_id).await?;
        }

        if self
            .code_taken(
                "SELECT EXISTS(SELECT 1 FROM teachers WHERE teacher_code = $1)",
                &new.teacher_code,
            )
            .await?
        {
            return Err(AcademicsError::Duplicate("teacher_code"));
        }

        let teacher = Teacher::new(new);

        sqlx::query(
            r#"
            INSERT INTO teachers (
                teacher_id, user_id, teacher_code, department_id, specialization,
                hire_date, status, phone, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(teacher.id.as_uuid())
        .bind(teacher.user_id.as_uuid())
        .bind(&teacher.teacher_code)
        .bind(teacher.department_id.map(|d| d.into_uuid()))
        .bind(&teacher.specialization)
        .bind(teacher.hire_date)
        .bind(teacher.status.code())
        .bind(&teacher.phone)
        .bind(teacher.created_at)
        .execute(&self.pool)
        .await?;

        Ok(teacher)
    }

    async fn update_teacher(
        &self,
        id: TeacherId,
        patch: TeacherPatch,
    ) -> AcademicsResult<Option<Teacher>> {
        if let Some(department_id) = patch.department_id {
            self.ensure_department_exists(department_id).await?;
        }

        let row = sqlx::query_as::<_, TeacherRow>(&format!(
            r#"
            UPDATE teachers SET
                teacher_code = COALESCE($2, teacher_code),
                department_id = COALESCE($3, department_id),
                specialization = COALESCE($4, specialization),
                hire_date = COALESCE($5, hire_date),
                status = COALESCE($6, status),
                phone = COALESCE($7, phone)
            WHERE teacher_id = $1
            RETURNING {TEACHER_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.teacher_code)
        .bind(patch.department_id.map(|d| d.into_uuid()))
        .bind(patch.specialization)
        .bind(patch.hire_date)
        .bind(patch.status.map(|s| s.code()))
        .bind(patch.phone)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TeacherRow::into_teacher).transpose()
    }

    async fn delete_teacher(&self, id: TeacherId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE teacher_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("courses"));
        }

        let affected = sqlx::query("DELETE FROM teachers WHERE teacher_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Subjects
// ============================================================================

#[derive(sqlx::FromRow)]
struct SubjectRow {
    subject_id: Uuid,
    name: String,
    code: String,
    description: Option<String>,
    credits: i32,
    department_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl SubjectRow {
    fn into_subject(self) -> Subject {
        Subject {
            id: SubjectId::from_uuid(self.subject_id),
            name: self.name,
            code: self.code,
            description: self.description,
            credits: self.credits,
            department_id: self.department_id.map(DepartmentId::from_uuid),
            created_at: self.created_at,
        }
    }
}

const SUBJECT_COLS: &str =
    "subject_id, name, code, description, credits, department_id, created_at";

impl SubjectRepository for PgAcademicsStore {
    async fn list_subjects(&self) -> AcademicsResult<Vec<Subject>> {
        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {SUBJECT_COLS} FROM subjects ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubjectRow::into_subject).collect())
    }

    async fn get_subject(&self, id: SubjectId) -> AcademicsResult<Option<Subject>> {
        let row = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {SUBJECT_COLS} FROM subjects WHERE subject_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubjectRow::into_subject))
    }

    async fn create_subject(&self, new: NewSubject) -> AcademicsResult<Subject> {
        if let Some(department_id) = new.department_id {
            self.ensure_department_exists(department_id).await?;
        }

        if self
            .code_taken(
                "SELECT EXISTS(SELECT 1 FROM subjects WHERE code = $1)",
                &new.code,
            )
            .await?
        {
            return Err(AcademicsError::Duplicate("code"));
        }

        let subject = Subject::new(new);

        sqlx::query(
            r#"
            INSERT INTO subjects (
                subject_id, name, code, description, credits, department_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(subject.id.as_uuid())
        .bind(&subject.name)
        .bind(&subject.code)
        .bind(&subject.description)
        .bind(subject.credits)
        .bind(subject.department_id.map(|d| d.into_uuid()))
        .bind(subject.created_at)
        .execute(&self.pool)
        .await?;

        Ok(subject)
    }

    async fn update_subject(
        &self,
        id: SubjectId,
        patch: SubjectPatch,
    ) -> AcademicsResult<Option<Subject>> {
        if let Some(department_id) = patch.department_id {
            self.ensure_department_exists(department_id).await?;
        }

        let row = sqlx::query_as::<_, SubjectRow>(&format!(
            r#"
            UPDATE subjects SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                description = COALESCE($4, description),
                credits = COALESCE($5, credits),
                department_id = COALESCE($6, department_id)
            WHERE subject_id = $1
            RETURNING {SUBJECT_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.name)
        .bind(patch.code)
        .bind(patch.description)
        .bind(patch.credits)
        .bind(patch.department_id.map(|d| d.into_uuid()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubjectRow::into_subject))
    }

    async fn delete_subject(&self, id: SubjectId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE subject_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("courses"));
        }

        let affected = sqlx::query("DELETE FROM subjects WHERE subject_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Courses
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: Uuid,
    subject_id: Uuid,
    teacher_id: Uuid,
    academic_period_id: Uuid,
    course_code: String,
    schedule: Option<String>,
    max_students: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self) -> AcademicsResult<Course> {
        Ok(Course {
            id: CourseId::from_uuid(self.course_id),
            subject_id: SubjectId::from_uuid(self.subject_id),
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            academic_period_id: AcademicPeriodId::from_uuid(self.academic_period_id),
            course_code: self.course_code,
            schedule: self.schedule,
            max_students: self.max_students,
            status: course_status(&self.status)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CourseDetailRow {
    course_id: Uuid,
    subject_id: Uuid,
    teacher_id: Uuid,
    academic_period_id: Uuid,
    course_code: String,
    schedule: Option<String>,
    max_students: i32,
    status: String,
    created_at: DateTime<Utc>,
    subject_name: String,
    subject_code: String,
    subject_description: Option<String>,
    subject_credits: i32,
    subject_department_id: Option<Uuid>,
    subject_created_at: DateTime<Utc>,
    teacher_user_id: Uuid,
    teacher_code: String,
    teacher_department_id: Option<Uuid>,
    teacher_specialization: Option<String>,
    teacher_hire_date: NaiveDate,
    teacher_status: String,
    teacher_phone: Option<String>,
    teacher_created_at: DateTime<Utc>,
    user_email: String,
    user_name: String,
    user_role: String,
    user_avatar: Option<String>,
    user_created_at: DateTime<Utc>,
}

impl CourseDetailRow {
    fn into_detail(self) -> AcademicsResult<CourseDetail> {
        let user = user_summary(
            self.teacher_user_id,
            self.user_email,
            self.user_name,
            self.user_role,
            self.user_avatar,
            self.user_created_at,
        )?;

        let subject = Subject {
            id: SubjectId::from_uuid(self.subject_id),
            name: self.subject_name,
            code: self.subject_code,
            description: self.subject_description,
            credits: self.subject_credits,
            department_id: self.subject_department_id.map(DepartmentId::from_uuid),
            created_at: self.subject_created_at,
        };

        let teacher = Teacher {
            id: TeacherId::from_uuid(self.teacher_id),
            user_id: UserId::from_uuid(self.teacher_user_id),
            teacher_code: self.teacher_code,
            department_id: self.teacher_department_id.map(DepartmentId::from_uuid),
            specialization: self.teacher_specialization,
            hire_date: self.teacher_hire_date,
            status: teacher_status(&self.teacher_status)?,
            phone: self.teacher_phone,
            created_at: self.teacher_created_at,
        };

        let course = Course {
            id: CourseId::from_uuid(self.course_id),
            subject_id: SubjectId::from_uuid(self.subject_id),
            teacher_id: TeacherId::from_uuid(self.teacher_id),
            academic_period_id: AcademicPeriodId::from_uuid(self.academic_period_id),
            course_code: self.course_code,
            schedule: self.schedule,
            max_students: self.max_students,
            status: course_status(&self.status)?,
            created_at: self.created_at,
        };

        Ok(CourseDetail {
            course,
            subject,
            teacher: TeacherWithUser { teacher, user },
        })
    }
}

const COURSE_COLS: &str = "course_id, subject_id, teacher_id, academic_period_id, \
     course_code, schedule, max_students, status, created_at";

impl CourseRepository for PgAcademicsStore {
    async fn list_courses(&self) -> AcademicsResult<Vec<CourseDetail>> {
        let rows = sqlx::query_as::<_, CourseDetailRow>(
            r#"
            SELECT
                c.course_id, c.subject_id, c.teacher_id, c.academic_period_id,
                c.course_code, c.schedule, c.max_students, c.status, c.created_at,
                sub.name AS subject_name, sub.code AS subject_code,
                sub.description AS subject_description, sub.credits AS subject_credits,
                sub.department_id AS subject_department_id,
                sub.created_at AS subject_created_at,
                t.user_id AS teacher_user_id, t.teacher_code,
                t.department_id AS teacher_department_id,
                t.specialization AS teacher_specialization,
                t.hire_date AS teacher_hire_date, t.status AS teacher_status,
                t.phone AS teacher_phone, t.created_at AS teacher_created_at,
                u.email AS user_email, u.name AS user_name, u.role AS user_role,
                u.avatar AS user_avatar, u.created_at AS user_created_at
            FROM courses c
            JOIN subjects sub ON sub.subject_id = c.subject_id
            JOIN teachers t ON t.teacher_id = c.teacher_id
            JOIN users u ON u.user_id = t.user_id
            ORDER BY c.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CourseDetailRow::into_detail).collect()
    }

    async fn get_course(&self, id: CourseId) -> AcademicsResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLS} FROM courses WHERE course_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRow::into_course).transpose()
    }

    async fn create_course(&self, new: NewCourse) -> AcademicsResult<Course> {
        self.ensure_subject_exists(new.subject_id).await?;
        self.ensure_teacher_exists(new.teacher_id).await?;
        self.ensure_period_exists(new.academic_period_id).await?;

        if self
            .code_taken(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE course_code = $1)",
                &new.course_code,
            )
            .await?
        {
            return Err(AcademicsError::Duplicate("course_code"));
        }

        let course = Course::new(new);

        sqlx::query(
            r#"
            INSERT INTO courses (
                course_id, subject_id, teacher_id, academic_period_id, course_code,
                schedule, max_students, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(course.subject_id.as_uuid())
        .bind(course.teacher_id.as_uuid())
        .bind(course.academic_period_id.as_uuid())
        .bind(&course.course_code)
        .bind(&course.schedule)
        .bind(course.max_students)
        .bind(course.status.code())
        .bind(course.created_at)
        .execute(&self.pool)
        .await?;

        Ok(course)
    }

    async fn update_course(
        &self,
        id: CourseId,
        patch: CoursePatch,
    ) -> AcademicsResult<Option<Course>> {
        if let Some(subject_id) = patch.subject_id {
            self.ensure_subject_exists(subject_id).await?;
        }
        if let Some(teacher_id) = patch.teacher_id {
            self.ensure_teacher_exists(teacher_id).await?;
        }
        if let Some(period_id) = patch.academic_period_id {
            self.ensure_period_exists(period_id).await?;
        }

        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses SET
                subject_id = COALESCE($2, subject_id),
                teacher_id = COALESCE($3, teacher_id),
                academic_period_id = COALESCE($4, academic_period_id),
                course_code = COALESCE($5, course_code),
                schedule = COALESCE($6, schedule),
                max_students = COALESCE($7, max_students),
                status = COALESCE($8, status)
            WHERE course_id = $1
            RETURNING {COURSE_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.subject_id.map(|s| s.into_uuid()))
        .bind(patch.teacher_id.map(|t| t.into_uuid()))
        .bind(patch.academic_period_id.map(|p| p.into_uuid()))
        .bind(patch.course_code)
        .bind(patch.schedule)
        .bind(patch.max_students)
        .bind(patch.status.map(|s| s.code()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRow::into_course).transpose()
    }

    async fn delete_course(&self, id: CourseId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM enrollments WHERE course_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("enrollments"));
        }
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM schedules WHERE course_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("schedules"));
        }
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM assignments WHERE course_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("assignments"));
        }

        let affected = sqlx::query("DELETE FROM courses WHERE course_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Enrollments
// ============================================================================

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    enrollment_id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    enrollment_date: DateTime<Utc>,
    status: String,
    final_grade: Option<Decimal>,
}

impl EnrollmentRow {
    fn into_enrollment(self) -> AcademicsResult<Enrollment> {
        Ok(Enrollment {
            id: EnrollmentId::from_uuid(self.enrollment_id),
            student_id: StudentId::from_uuid(self.student_id),
            course_id: CourseId::from_uuid(self.course_id),
            enrollment_date: self.enrollment_date,
            status: enrollment_status(&self.status)?,
            final_grade: self.final_grade,
        })
    }
}

const ENROLLMENT_COLS: &str =
    "enrollment_id, student_id, course_id, enrollment_date, status, final_grade";

impl EnrollmentRepository for PgAcademicsStore {
    async fn list_enrollments_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE course_id = $1 ORDER BY enrollment_date"
        ))
        .bind(course_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EnrollmentRow::into_enrollment).collect()
    }

    async fn list_enrollments_by_student(
        &self,
        student_id: StudentId,
    ) -> AcademicsResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE student_id = $1 ORDER BY enrollment_date"
        ))
        .bind(student_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EnrollmentRow::into_enrollment).collect()
    }

    async fn get_enrollment(&self, id: EnrollmentId) -> AcademicsResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            "SELECT {ENROLLMENT_COLS} FROM enrollments WHERE enrollment_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(EnrollmentRow::into_enrollment).transpose()
    }

    async fn create_enrollment(&self, new: NewEnrollment) -> AcademicsResult<Enrollment> {
        self.ensure_student_exists(new.student_id).await?;
        self.ensure_course_exists(new.course_id).await?;

        let enrollment = Enrollment::new(new);

        sqlx::query(
            r#"
            INSERT INTO enrollments (
                enrollment_id, student_id, course_id, enrollment_date, status, final_grade
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.student_id.as_uuid())
        .bind(enrollment.course_id.as_uuid())
        .bind(enrollment.enrollment_date)
        .bind(enrollment.status.code())
        .bind(enrollment.final_grade)
        .execute(&self.pool)
        .await?;

        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        id: EnrollmentId,
        patch: EnrollmentPatch,
    ) -> AcademicsResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, EnrollmentRow>(&format!(
            r#"
            UPDATE enrollments SET
                status = COALESCE($2, status),
                final_grade = COALESCE($3, final_grade)
            WHERE enrollment_id = $1
            RETURNING {ENROLLMENT_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.status.map(|s| s.code()))
        .bind(patch.final_grade)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EnrollmentRow::into_enrollment).transpose()
    }

    async fn delete_enrollment(&self, id: EnrollmentId) -> AcademicsResult<bool> {
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM grades WHERE enrollment_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("grades"));
        }
        if self
            .exists(
                "SELECT EXISTS(SELECT 1 FROM attendance WHERE enrollment_id = $1)",
                id.into_uuid(),
            )
            .await?
        {
            return Err(AcademicsError::HasDependents("attendance records"));
        }

        let affected = sqlx::query("DELETE FROM enrollments WHERE enrollment_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Grades
// ============================================================================

#[derive(sqlx::FromRow)]
struct GradeRow {
    grade_id: Uuid,
    enrollment_id: Uuid,
    assessment_type: String,
    assessment_name: String,
    grade: Decimal,
    max_grade: Decimal,
    weight: Option<Decimal>,
    assessment_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl GradeRow {
    fn into_grade(self) -> Grade {
        Grade {
            id: GradeId::from_uuid(self.grade_id),
            enrollment_id: EnrollmentId::from_uuid(self.enrollment_id),
            assessment_type: self.assessment_type,
            assessment_name: self.assessment_name,
            grade: self.grade,
            max_grade: self.max_grade,
            weight: self.weight,
            assessment_date: self.assessment_date,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GradeDetailRow {
    // grade
    grade_id: Uuid,
    enrollment_id: Uuid,
    assessment_type: String,
    assessment_name: String,
    grade: Decimal,
    max_grade: Decimal,
    weight: Option<Decimal>,
    assessment_date: NaiveDate,
    created_at: DateTime<Utc>,
    // enrollment
    enrollment_student_id: Uuid,
    enrollment_course_id: Uuid,
    enrollment_date: DateTime<Utc>,
    enrollment_status: String,
    final_grade: Option<Decimal>,
    // student + user
    student_user_id: Uuid,
    student_code: String,
    student_grade: String,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
    student_phone: Option<String>,
    student_enrollment_date: NaiveDate,
    student_status: String,
    student_created_at: DateTime<Utc>,
    user_email: String,
    user_name: String,
    user_role: String,
    user_avatar: Option<String>,
    user_created_at: DateTime<Utc>,
    // course + subject
    course_subject_id: Uuid,
    course_teacher_id: Uuid,
    course_period_id: Uuid,
    course_code: String,
    course_schedule: Option<String>,
    max_students: i32,
    course_status: String,
    course_created_at: DateTime<Utc>,
    subject_name: String,
    subject_code: String,
    subject_description: Option<String>,
    subject_credits: i32,
    subject_department_id: Option<Uuid>,
    subject_created_at: DateTime<Utc>,
}

impl GradeDetailRow {
    fn into_detail(self) -> AcademicsResult<GradeDetail> {
        let user = user_summary(
            self.student_user_id,
            self.user_email,
            self.user_name,
            self.user_role,
            self.user_avatar,
            self.user_created_at,
        )?;

        let student = Student {
            id: StudentId::from_uuid(self.enrollment_student_id),
            user_id: UserId::from_uuid(self.student_user_id),
            student_code: self.student_code,
            grade: self.student_grade,
            date_of_birth: self.date_of_birth,
            address: self.address,
            phone: self.student_phone,
            enrollment_date: self.student_enrollment_date,
            status: student_status(&self.student_status)?,
            created_at: self.student_created_at,
        };

        let subject = Subject {
            id: SubjectId::from_uuid(self.course_subject_id),
            name: self.subject_name,
            code: self.subject_code,
            description: self.subject_description,
            credits: self.subject_credits,
            department_id: self.subject_department_id.map(DepartmentId::from_uuid),
            created_at: self.subject_created_at,
        };

        let course = Course {
            id: CourseId::from_uuid(self.enrollment_course_id),
            subject_id: SubjectId::from_uuid(self.course_subject_id),
            teacher_id: TeacherId::from_uuid(self.course_teacher_id),
            academic_period_id: AcademicPeriodId::from_uuid(self.course_period_id),
            course_code: self.course_code,
            schedule: self.course_schedule,
            max_students: self.max_students,
            status: course_status(&self.course_status)?,
            created_at: self.course_created_at,
        };

        let enrollment = Enrollment {
            id: EnrollmentId::from_uuid(self.enrollment_id),
            student_id: StudentId::from_uuid(self.enrollment_student_id),
            course_id: CourseId::from_uuid(self.enrollment_course_id),
            enrollment_date: self.enrollment_date,
            status: enrollment_status(&self.enrollment_status)?,
            final_grade: self.final_grade,
        };

        let grade = Grade {
            id: GradeId::from_uuid(self.grade_id),
            enrollment_id: EnrollmentId::from_uuid(self.enrollment_id),
            assessment_type: self.assessment_type,
            assessment_name: self.assessment_name,
            grade: self.grade,
            max_grade: self.max_grade,
            weight: self.weight,
            assessment_date: self.assessment_date,
            created_at: self.created_at,
        };

        Ok(GradeDetail {
            grade,
            enrollment: EnrollmentDetail {
                enrollment,
                student: StudentWithUser { student, user },
                course: CourseWithSubject { course, subject },
            },
        })
    }
}

const GRADE_COLS: &str = "grade_id, enrollment_id, assessment_type, assessment_name, \
     grade, max_grade, weight, assessment_date, created_at";

impl GradeRepository for PgAcademicsStore {
    async fn list_grades(&self) -> AcademicsResult<Vec<GradeDetail>> {
        let rows = sqlx::query_as::<_, GradeDetailRow>(
            r#"
            SELECT
                g.grade_id, g.enrollment_id, g.assessment_type, g.assessment_name,
                g.grade, g.max_grade, g.weight, g.assessment_date, g.created_at,
                e.student_id AS enrollment_student_id,
                e.course_id AS enrollment_course_id,
                e.enrollment_date, e.status AS enrollment_status, e.final_grade,
                s.user_id AS student_user_id, s.student_code,
                s.grade AS student_grade, s.date_of_birth, s.address,
                s.phone AS student_phone,
                s.enrollment_date AS student_enrollment_date,
                s.status AS student_status, s.created_at AS student_created_at,
                u.email AS user_email, u.name AS user_name, u.role AS user_role,
                u.avatar AS user_avatar, u.created_at AS user_created_at,
                c.subject_id AS course_subject_id, c.teacher_id AS course_teacher_id,
                c.academic_period_id AS course_period_id, c.course_code,
                c.schedule AS course_schedule, c.max_students,
                c.status AS course_status, c.created_at AS course_created_at,
                sub.name AS subject_name, sub.code AS subject_code,
                sub.description AS subject_description, sub.credits AS subject_credits,
                sub.department_id AS subject_department_id,
                sub.created_at AS subject_created_at
            FROM grades g
            JOIN enrollments e ON e.enrollment_id = g.enrollment_id
            JOIN students s ON s.student_id = e.student_id
            JOIN users u ON u.user_id = s.user_id
            JOIN courses c ON c.course_id = e.course_id
            JOIN subjects sub ON sub.subject_id = c.subject_id
            ORDER BY g.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(GradeDetailRow::into_detail).collect()
    }

    async fn list_grades_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AcademicsResult<Vec<Grade>> {
        let rows = sqlx::query_as::<_, GradeRow>(&format!(
            "SELECT {GRADE_COLS} FROM grades WHERE enrollment_id = $1 ORDER BY assessment_date"
        ))
        .bind(enrollment_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GradeRow::into_grade).collect())
    }

    async fn get_grade(&self, id: GradeId) -> AcademicsResult<Option<Grade>> {
        let row = sqlx::query_as::<_, GradeRow>(&format!(
            "SELECT {GRADE_COLS} FROM grades WHERE grade_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GradeRow::into_grade))
    }

    async fn create_grade(&self, new: NewGrade) -> AcademicsResult<Grade> {
        new.validate()?;
        self.ensure_enrollment_exists(new.enrollment_id).await?;

        let grade = Grade::new(new);

        sqlx::query(
            r#"
            INSERT INTO grades (
                grade_id, enrollment_id, assessment_type, assessment_name,
                grade, max_grade, weight, assessment_date, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(grade.id.as_uuid())
        .bind(grade.enrollment_id.as_uuid())
        .bind(&grade.assessment_type)
        .bind(&grade.assessment_name)
        .bind(grade.grade)
        .bind(grade.max_grade)
        .bind(grade.weight)
        .bind(grade.assessment_date)
        .bind(grade.created_at)
        .execute(&self.pool)
        .await?;

        Ok(grade)
    }

    async fn update_grade(
        &self,
        id: GradeId,
        patch: GradePatch,
    ) -> AcademicsResult<Option<Grade>> {
        patch.validate()?;

        let row = sqlx::query_as::<_, GradeRow>(&format!(
            r#"
            UPDATE grades SET
                assessment_type = COALESCE($2, assessment_type),
                assessment_name = COALESCE($3, assessment_name),
                grade = COALESCE($4, grade),
                max_grade = COALESCE($5, max_grade),
                weight = COALESCE($6, weight),
                assessment_date = COALESCE($7, assessment_date)
            WHERE grade_id = $1
            RETURNING {GRADE_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.assessment_type)
        .bind(patch.assessment_name)
        .bind(patch.grade)
        .bind(patch.max_grade)
        .bind(patch.weight)
        .bind(patch.assessment_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GradeRow::into_grade))
    }

    async fn delete_grade(&self, id: GradeId) -> AcademicsResult<bool> {
        let affected = sqlx::query("DELETE FROM grades WHERE grade_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    attendance_id: Uuid,
    enrollment_id: Uuid,
    date: NaiveDate,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl AttendanceRow {
    fn into_attendance(self) -> AcademicsResult<Attendance> {
        Ok(Attendance {
            id: AttendanceId::from_uuid(self.attendance_id),
            enrollment_id: EnrollmentId::from_uuid(self.enrollment_id),
            date: self.date,
            status: attendance_status(&self.status)?,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

const ATTENDANCE_COLS: &str =
    "attendance_id, enrollment_id, date, status, notes, created_at";

impl AttendanceRepository for PgAcademicsStore {
    async fn list_attendance_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> AcademicsResult<Vec<Attendance>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLS} FROM attendance WHERE enrollment_id = $1 ORDER BY date"
        ))
        .bind(enrollment_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttendanceRow::into_attendance).collect()
    }

    async fn get_attendance(&self, id: AttendanceId) -> AcademicsResult<Option<Attendance>> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            "SELECT {ATTENDANCE_COLS} FROM attendance WHERE attendance_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRow::into_attendance).transpose()
    }

    async fn create_attendance(&self, new: NewAttendance) -> AcademicsResult<Attendance> {
        self.ensure_enrollment_exists(new.enrollment_id).await?;

        let attendance = Attendance::new(new);

        sqlx::query(
            r#"
            INSERT INTO attendance (
                attendance_id, enrollment_id, date, status, notes, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(attendance.id.as_uuid())
        .bind(attendance.enrollment_id.as_uuid())
        .bind(attendance.date)
        .bind(attendance.status.code())
        .bind(&attendance.notes)
        .bind(attendance.created_at)
        .execute(&self.pool)
        .await?;

        Ok(attendance)
    }

    async fn update_attendance(
        &self,
        id: AttendanceId,
        patch: AttendancePatch,
    ) -> AcademicsResult<Option<Attendance>> {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            UPDATE attendance SET
                date = COALESCE($2, date),
                status = COALESCE($3, status),
                notes = COALESCE($4, notes)
            WHERE attendance_id = $1
            RETURNING {ATTENDANCE_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.date)
        .bind(patch.status.map(|s| s.code()))
        .bind(patch.notes)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttendanceRow::into_attendance).transpose()
    }

    async fn delete_attendance(&self, id: AttendanceId) -> AcademicsResult<bool> {
        let affected = sqlx::query("DELETE FROM attendance WHERE attendance_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Schedules
// ============================================================================

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    schedule_id: Uuid,
    course_id: Uuid,
    day_of_week: String,
    start_time: String,
    end_time: String,
    classroom: Option<String>,
    created_at: DateTime<Utc>,
}

impl ScheduleRow {
    fn into_schedule(self) -> Schedule {
        Schedule {
            id: ScheduleId::from_uuid(self.schedule_id),
            course_id: CourseId::from_uuid(self.course_id),
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            classroom: self.classroom,
            created_at: self.created_at,
        }
    }
}

const SCHEDULE_COLS: &str =
    "schedule_id, course_id, day_of_week, start_time, end_time, classroom, created_at";

impl ScheduleRepository for PgAcademicsStore {
    async fn list_schedules_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {SCHEDULE_COLS} FROM schedules WHERE course_id = $1 ORDER BY created_at"
        ))
        .bind(course_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ScheduleRow::into_schedule).collect())
    }

    async fn get_schedule(&self, id: ScheduleId) -> AcademicsResult<Option<Schedule>> {
        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {SCHEDULE_COLS} FROM schedules WHERE schedule_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScheduleRow::into_schedule))
    }

    async fn create_schedule(&self, new: NewSchedule) -> AcademicsResult<Schedule> {
        self.ensure_course_exists(new.course_id).await?;

        let schedule = Schedule::new(new);

        sqlx::query(
            r#"
            INSERT INTO schedules (
                schedule_id, course_id, day_of_week, start_time, end_time,
                classroom, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(schedule.id.as_uuid())
        .bind(schedule.course_id.as_uuid())
        .bind(&schedule.day_of_week)
        .bind(&schedule.start_time)
        .bind(&schedule.end_time)
        .bind(&schedule.classroom)
        .bind(schedule.created_at)
        .execute(&self.pool)
        .await?;

        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        id: ScheduleId,
        patch: SchedulePatch,
    ) -> AcademicsResult<Option<Schedule>> {
        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            r#"
            UPDATE schedules SET
                day_of_week = COALESCE($2, day_of_week),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                classroom = COALESCE($5, classroom)
            WHERE schedule_id = $1
            RETURNING {SCHEDULE_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.day_of_week)
        .bind(patch.start_time)
        .bind(patch.end_time)
        .bind(patch.classroom)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ScheduleRow::into_schedule))
    }

    async fn delete_schedule(&self, id: ScheduleId) -> AcademicsResult<bool> {
        let affected = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Assignments
// ============================================================================

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    assignment_id: Uuid,
    course_id: Uuid,
    title: String,
    description: Option<String>,
    due_date: DateTime<Utc>,
    max_points: Decimal,
    created_at: DateTime<Utc>,
}

impl AssignmentRow {
    fn into_assignment(self) -> Assignment {
        Assignment {
            id: AssignmentId::from_uuid(self.assignment_id),
            course_id: CourseId::from_uuid(self.course_id),
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            max_points: self.max_points,
            created_at: self.created_at,
        }
    }
}

const ASSIGNMENT_COLS: &str =
    "assignment_id, course_id, title, description, due_date, max_points, created_at";

impl AssignmentRepository for PgAcademicsStore {
    async fn list_assignments_by_course(
        &self,
        course_id: CourseId,
    ) -> AcademicsResult<Vec<Assignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {ASSIGNMENT_COLS} FROM assignments WHERE course_id = $1 ORDER BY due_date"
        ))
        .bind(course_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AssignmentRow::into_assignment).collect())
    }

    async fn get_assignment(&self, id: AssignmentId) -> AcademicsResult<Option<Assignment>> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            "SELECT {ASSIGNMENT_COLS} FROM assignments WHERE assignment_id = $1"
        ))
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AssignmentRow::into_assignment))
    }

    async fn create_assignment(&self, new: NewAssignment) -> AcademicsResult<Assignment> {
        self.ensure_course_exists(new.course_id).await?;

        let assignment = Assignment::new(new);

        sqlx::query(
            r#"
            INSERT INTO assignments (
                assignment_id, course_id, title, description, due_date,
                max_points, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(assignment.id.as_uuid())
        .bind(assignment.course_id.as_uuid())
        .bind(&assignment.title)
        .bind(&assignment.description)
        .bind(assignment.due_date)
        .bind(assignment.max_points)
        .bind(assignment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        id: AssignmentId,
        patch: AssignmentPatch,
    ) -> AcademicsResult<Option<Assignment>> {
        let row = sqlx::query_as::<_, AssignmentRow>(&format!(
            r#"
            UPDATE assignments SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                due_date = COALESCE($4, due_date),
                max_points = COALESCE($5, max_points)
            WHERE assignment_id = $1
            RETURNING {ASSIGNMENT_COLS}
            "#
        ))
        .bind(id.into_uuid())
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.due_date)
        .bind(patch.max_points)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AssignmentRow::into_assignment))
    }

    async fn delete_assignment(&self, id: AssignmentId) -> AcademicsResult<bool> {
        let affected = sqlx::query("DELETE FROM assignments WHERE assignment_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Statistics
// ============================================================================

impl StatsRepository for PgAcademicsStore {
    async fn statistics(&self) -> AcademicsResult<Statistics> {
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        let total_teachers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;

        let active_courses =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let total_departments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await?;

        Ok(Statistics {
            total_students,
            total_teachers,
            active_courses,
            total_departments,
        })
    }
}

// ============================================================================
// Profile provisioning (auth port)
// ============================================================================

impl auth::domain::repository::ProfileProvisioner for PgAcademicsStore {
    async fn provision_student(&self, user_id: &UserId) -> auth::AuthResult<()> {
        let new = NewStudent {
            user_id: *user_id,
            student_code: format!("STU-{}", Utc::now().timestamp_millis()),
            grade: "Unassigned".to_string(),
            date_of_birth: None,
            address: None,
            phone: None,
            enrollment_date: Utc::now().date_naive(),
            status: StudentStatus::default(),
        };

        self.create_student(new)
            .await
            .map_err(|e| auth::AuthError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn provision_teacher(&self, user_id: &UserId) -> auth::AuthResult<()> {
        let new = NewTeacher {
            user_id: *user_id,
            teacher_code: format!("TCH-{}", Utc::now().timestamp_millis()),
            department_id: None,
            specialization: None,
            hire_date: Utc::now().date_naive(),
            status: TeacherStatus::default(),
            phone: None,
        };

        self.create_teacher(new)
            .await
            .map_err(|e| auth::AuthError::Internal(e.to_string()))?;

        Ok(())
    }
}
