//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Every entity is keyed by a globally-unique opaque identifier (UUID v4),
/// assigned at creation. The phantom marker prevents ids of different
/// entities from being mixed up at compile time.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type StudentId = Id<markers::Student>;
/// ```
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

// Manual impls: a derive would require `T: Clone` etc. on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

// Ids cross the API boundary as plain UUID strings.
impl<T> serde::Serialize for Id<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> serde::Deserialize<'de> for Id<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Department IDs
    pub struct Department;

    /// Marker for AcademicPeriod IDs
    pub struct AcademicPeriod;

    /// Marker for Student IDs
    pub struct Student;

    /// Marker for Teacher IDs
    pub struct Teacher;

    /// Marker for Subject IDs
    pub struct Subject;

    /// Marker for Course IDs
    pub struct Course;

    /// Marker for Enrollment IDs
    pub struct Enrollment;

    /// Marker for Grade IDs
    pub struct Grade;

    /// Marker for Attendance IDs
    pub struct Attendance;

    /// Marker for Schedule IDs
    pub struct Schedule;

    /// Marker for Assignment IDs
    pub struct Assignment;
}

/// Type aliases for common IDs
pub type DepartmentId = Id<markers::Department>;
pub type AcademicPeriodId = Id<markers::AcademicPeriod>;
pub type StudentId = Id<markers::Student>;
pub type TeacherId = Id<markers::Teacher>;
pub type SubjectId = Id<markers::Subject>;
pub type CourseId = Id<markers::Course>;
pub type EnrollmentId = Id<markers::Enrollment>;
pub type GradeId = Id<markers::Grade>;
pub type AttendanceId = Id<markers::Attendance>;
pub type ScheduleId = Id<markers::Schedule>;
pub type AssignmentId = Id<markers::Assignment>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_safety() {
        let student_id: StudentId = Id::new();
        let course_id: CourseId = Id::new();

        // These are different types, cannot be mixed
        let _s: Uuid = student_id.into_uuid();
        let _c: Uuid = course_id.into_uuid();
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id: StudentId = Id::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_id_serializes_as_uuid_string() {
        let uuid = Uuid::new_v4();
        let id: CourseId = Id::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));

        let back: CourseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
