//! HTTP Handlers
//!
//! One handler per (verb, resource) route. Each follows the same shape:
//! resolve the principal (the extractor already rejected sessionless
//! requests), consult the policy table, validate the body, delegate to
//! the store, shape the response.

use axum::Json;
use axum::extract::{Path, State};
use kernel::error::app_error::{AppError, AppResult, OptionExt};
use kernel::extract::ValidJson;
use kernel::id::{CourseId, GradeId, StudentId, TeacherId};
use std::sync::Arc;
use uuid::Uuid;

use auth::domain::entity::principal::Principal;

use crate::application::StatisticsUseCase;
use crate::domain::entities::*;
use crate::domain::joined::{CourseDetail, GradeDetail, StudentWithUser, TeacherDetail};
use crate::domain::repository::AcademicsRepository;
use crate::presentation::dto::MessageResponse;
use crate::presentation::policy::{Action, Resource, authorize};

/// Shared state for academics handlers
pub struct AcademicsAppState<R>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    pub store: Arc<R>,
}

impl<R> Clone for AcademicsAppState<R>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

// ============================================================================
// Students
// ============================================================================

/// GET /api/students
pub async fn list_students<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<StudentWithUser>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Students, Action::Read)?;

    let students = state.store.list_students().await?;
    Ok(Json(students))
}

/// POST /api/students
pub async fn create_student<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewStudent>,
) -> AppResult<Json<Student>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Students, Action::Write)?;

    let student = state.store.create_student(new).await?;
    Ok(Json(student))
}

/// PATCH /api/students/{id}
pub async fn update_student<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<StudentPatch>,
) -> AppResult<Json<Student>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Students, Action::Write)?;

    let student = state
        .store
        .update_student(StudentId::from_uuid(id), patch)
        .await?
        .ok_or_not_found("Student not found")?;

    Ok(Json(student))
}

/// DELETE /api/students/{id}
pub async fn delete_student<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Students, Action::Delete)?;

    if !state.store.delete_student(StudentId::from_uuid(id)).await? {
        return Err(AppError::not_found("Student not found"));
    }

    Ok(Json(MessageResponse::new("Student deleted")))
}

// ============================================================================
// Teachers
// ============================================================================

/// GET /api/teachers
pub async fn list_teachers<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<TeacherDetail>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Teachers, Action::Read)?;

    let teachers = state.store.list_teachers().await?;
    Ok(Json(teachers))
}

/// POST /api/teachers
pub async fn create_teacher<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewTeacher>,
) -> AppResult<Json<Teacher>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Teachers, Action::Write)?;

    let teacher = state.store.create_teacher(new).await?;
    Ok(Json(teacher))
}

/// PATCH /api/teachers/{id}
pub async fn update_teacher<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<TeacherPatch>,
) -> AppResult<Json<Teacher>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Teachers, Action::Write)?;

    let teacher = state
        .store
        .update_teacher(TeacherId::from_uuid(id), patch)
        .await?
        .ok_or_not_found("Teacher not found")?;

    Ok(Json(teacher))
}

/// DELETE /api/teachers/{id}
pub async fn delete_teacher<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Teachers, Action::Delete)?;

    if !state.store.delete_teacher(TeacherId::from_uuid(id)).await? {
        return Err(AppError::not_found("Teacher not found"));
    }

    Ok(Json(MessageResponse::new("Teacher deleted")))
}

// ============================================================================
// Departments
// ============================================================================

/// GET /api/departments
pub async fn list_departments<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<Department>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Departments, Action::Read)?;

    let departments = state.store.list_departments().await?;
    Ok(Json(departments))
}

/// POST /api/departments
pub async fn create_department<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewDepartment>,
) -> AppResult<Json<Department>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Departments, Action::Write)?;

    let department = state.store.create_department(new).await?;
    Ok(Json(department))
}

// ============================================================================
// Subjects
// ============================================================================

/// GET /api/subjects
pub async fn list_subjects<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<Subject>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Subjects, Action::Read)?;

    let subjects = state.store.list_subjects().await?;
    Ok(Json(subjects))
}

/// POST /api/subjects
pub async fn create_subject<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewSubject>,
) -> AppResult<Json<Subject>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Subjects, Action::Write)?;

    let subject = state.store.create_subject(new).await?;
    Ok(Json(subject))
}

// ============================================================================
// Courses
// ============================================================================

/// GET /api/courses
pub async fn list_courses<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<CourseDetail>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Courses, Action::Read)?;

    let courses = state.store.list_courses().await?;
    Ok(Json(courses))
}

/// POST /api/courses
pub async fn create_course<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewCourse>,
) -> AppResult<Json<Course>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Courses, Action::Write)?;

    let course = state.store.create_course(new).await?;
    Ok(Json(course))
}

/// PATCH /api/courses/{id}
pub async fn update_course<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<CoursePatch>,
) -> AppResult<Json<Course>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Courses, Action::Write)?;

    let course = state
        .store
        .update_course(CourseId::from_uuid(id), patch)
        .await?
        .ok_or_not_found("Course not found")?;

    Ok(Json(course))
}

/// DELETE /api/courses/{id}
pub async fn delete_course<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Courses, Action::Delete)?;

    if !state.store.delete_course(CourseId::from_uuid(id)).await? {
        return Err(AppError::not_found("Course not found"));
    }

    Ok(Json(MessageResponse::new("Course deleted")))
}

// ============================================================================
// Grades
// ============================================================================

/// GET /api/grades
pub async fn list_grades<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Vec<GradeDetail>>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Grades, Action::Read)?;

    let grades = state.store.list_grades().await?;
    Ok(Json(grades))
}

/// POST /api/grades
pub async fn create_grade<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    ValidJson(new): ValidJson<NewGrade>,
) -> AppResult<Json<Grade>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Grades, Action::Write)?;

    let grade = state.store.create_grade(new).await?;
    Ok(Json(grade))
}

/// PATCH /api/grades/{id}
pub async fn update_grade<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<GradePatch>,
) -> AppResult<Json<Grade>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Grades, Action::Write)?;

    let grade = state
        .store
        .update_grade(GradeId::from_uuid(id), patch)
        .await?
        .ok_or_not_found("Grade not found")?;

    Ok(Json(grade))
}

/// DELETE /api/grades/{id}
pub async fn delete_grade<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Grades, Action::Delete)?;

    if !state.store.delete_grade(GradeId::from_uuid(id)).await? {
        return Err(AppError::not_found("Grade not found"));
    }

    Ok(Json(MessageResponse::new("Grade deleted")))
}

// ============================================================================
// Dashboard Statistics
// ============================================================================

/// GET /api/dashboard/statistics
pub async fn statistics<R>(
    State(state): State<AcademicsAppState<R>>,
    principal: Principal,
) -> AppResult<Json<Statistics>>
where
    R: AcademicsRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, Resource::Statistics, Action::Read)?;

    let use_case = StatisticsUseCase::new(state.store.clone());
    let stats = use_case.execute().await?;

    Ok(Json(stats))
}
