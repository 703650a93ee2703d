//! Status Value Objects
//!
//! Lifecycle states for the academic entities. Stored as string codes
//! (backed by CHECK constraints) and serialized as the same codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Student lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    AtRisk,
}

impl StudentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::AtRisk => "at_risk",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "at_risk" => Some(Self::AtRisk),
            _ => None,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Teacher employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

impl TeacherStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Inactive => "inactive",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "on_leave" => Some(Self::OnLeave),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for TeacherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Course status
///
/// `Active` courses count towards the dashboard statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl CourseStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Enrollment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Dropped,
    Completed,
}

impl EnrollmentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Enrolled => "enrolled",
            Self::Dropped => "dropped",
            Self::Completed => "completed",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "enrolled" => Some(Self::Enrolled),
            "dropped" => Some(Self::Dropped),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Attendance record status
///
/// No default: every attendance record states explicitly how the
/// student attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "late" => Some(Self::Late),
            "excused" => Some(Self::Excused),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for status in [
            StudentStatus::Active,
            StudentStatus::Inactive,
            StudentStatus::AtRisk,
        ] {
            assert_eq!(StudentStatus::from_code(status.code()), Some(status));
        }
        for status in [
            TeacherStatus::Active,
            TeacherStatus::OnLeave,
            TeacherStatus::Inactive,
        ] {
            assert_eq!(TeacherStatus::from_code(status.code()), Some(status));
        }
        for status in [
            CourseStatus::Active,
            CourseStatus::Inactive,
            CourseStatus::Completed,
        ] {
            assert_eq!(CourseStatus::from_code(status.code()), Some(status));
        }
        for status in [
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::Dropped,
            EnrollmentStatus::Completed,
        ] {
            assert_eq!(EnrollmentStatus::from_code(status.code()), Some(status));
        }
        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Late,
            AttendanceStatus::Excused,
        ] {
            assert_eq!(AttendanceStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        assert_eq!(StudentStatus::from_code("expelled"), None);
        assert_eq!(TeacherStatus::from_code("retired"), None);
        assert_eq!(AttendanceStatus::from_code(""), None);
    }

    #[test]
    fn test_serde_uses_snake_case_codes() {
        assert_eq!(
            serde_json::to_string(&StudentStatus::AtRisk).unwrap(),
            "\"at_risk\""
        );
        assert_eq!(
            serde_json::to_string(&TeacherStatus::OnLeave).unwrap(),
            "\"on_leave\""
        );

        let status: EnrollmentStatus = serde_json::from_str("\"dropped\"").unwrap();
        assert_eq!(status, EnrollmentStatus::Dropped);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
        assert_eq!(TeacherStatus::default(), TeacherStatus::Active);
        assert_eq!(CourseStatus::default(), CourseStatus::Active);
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Enrolled);
    }
}
