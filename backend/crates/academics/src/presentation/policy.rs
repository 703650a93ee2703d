//! Authorization Policy
//!
//! One declarative table maps (resource, action) to the roles allowed to
//! perform it; [`authorize`] is the single checker every handler goes
//! through. Reads are open to any authenticated principal.

use auth::domain::entity::principal::Principal;
use auth::domain::value_object::user_role::UserRole;
use kernel::error::app_error::AppError;

/// API resources subject to role gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Students,
    Teachers,
    Departments,
    Subjects,
    Courses,
    Grades,
    Statistics,
}

/// Gated actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    Delete,
}

use self::Action::*;
use self::Resource::*;
use auth::domain::value_object::user_role::UserRole::{Admin, Student, Teacher};

const ANY: &[UserRole] = &[Admin, Teacher, Student];
const ADMIN_ONLY: &[UserRole] = &[Admin];
const STAFF: &[UserRole] = &[Admin, Teacher];
const NOBODY: &[UserRole] = &[];

/// The gate matrix. Rows without a route (e.g. department delete) are
/// present as `NOBODY` so the table stays the single source of truth.
const POLICY: &[(Resource, Action, &[UserRole])] = &[
    (Students, Read, ANY),
    (Students, Write, ADMIN_ONLY),
    (Students, Delete, ADMIN_ONLY),
    (Teachers, Read, ANY),
    (Teachers, Write, ADMIN_ONLY),
    (Teachers, Delete, ADMIN_ONLY),
    (Departments, Read, ANY),
    (Departments, Write, ADMIN_ONLY),
    (Departments, Delete, NOBODY),
    (Subjects, Read, ANY),
    (Subjects, Write, ADMIN_ONLY),
    (Subjects, Delete, NOBODY),
    (Courses, Read, ANY),
    (Courses, Write, STAFF),
    (Courses, Delete, ADMIN_ONLY),
    (Grades, Read, ANY),
    (Grades, Write, STAFF),
    (Grades, Delete, STAFF),
    (Statistics, Read, ANY),
    (Statistics, Write, NOBODY),
    (Statistics, Delete, NOBODY),
];

/// Roles allowed to perform `action` on `resource`
pub fn allowed_roles(resource: Resource, action: Action) -> &'static [UserRole] {
    POLICY
        .iter()
        .find(|(r, a, _)| *r == resource && *a == action)
        .map(|(_, _, roles)| *roles)
        .unwrap_or(NOBODY)
}

/// The single authorization gate
///
/// The principal is already authenticated (the extractor rejected
/// sessionless requests with 401); this only decides 403.
pub fn authorize(
    principal: &Principal,
    resource: Resource,
    action: Action,
) -> Result<(), AppError> {
    if allowed_roles(resource, action).contains(&principal.role) {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied"))
    }
}
