//! Unit tests for the academics crate

use auth::domain::entity::principal::Principal;
use auth::domain::entity::user::UserSummary;
use auth::domain::value_object::{user_id::UserId, user_role::UserRole};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::*;
use crate::domain::joined::{StudentWithUser, TeacherDetail};
use crate::domain::status::StudentStatus;
use crate::presentation::dto::MessageResponse;
use crate::presentation::policy::{Action, Resource, allowed_roles, authorize};

fn principal(role: UserRole) -> Principal {
    Principal::new(UserId::new(), role)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_user(role: UserRole) -> UserSummary {
    UserSummary {
        id: UserId::new(),
        email: "a@x.edu".to_string(),
        name: "A".to_string(),
        role,
        avatar: None,
        created_at: Utc::now(),
    }
}

fn sample_student() -> Student {
    Student::new(NewStudent {
        user_id: UserId::new(),
        student_code: "STU-1".to_string(),
        grade: "10th".to_string(),
        date_of_birth: None,
        address: None,
        phone: None,
        enrollment_date: date(2026, 8, 1),
        status: StudentStatus::default(),
    })
}

mod policy_tests {
    use super::*;

    /// The full observed gate matrix, swept triple by triple
    #[test]
    fn test_gate_matrix() {
        use crate::presentation::policy::Action::*;
        use crate::presentation::policy::Resource::*;
        use auth::domain::value_object::user_role::UserRole::*;

        // (resource, action, admin, teacher, student)
        let matrix: &[(Resource, Action, bool, bool, bool)] = &[
            (Students, Read, true, true, true),
            (Students, Write, true, false, false),
            (Students, Delete, true, false, false),
            (Teachers, Read, true, true, true),
            (Teachers, Write, true, false, false),
            (Teachers, Delete, true, false, false),
            (Departments, Read, true, true, true),
            (Departments, Write, true, false, false),
            (Departments, Delete, false, false, false),
            (Subjects, Read, true, true, true),
            (Subjects, Write, true, false, false),
            (Subjects, Delete, false, false, false),
            (Courses, Read, true, true, true),
            (Courses, Write, true, true, false),
            (Courses, Delete, true, false, false),
            (Grades, Read, true, true, true),
            (Grades, Write, true, true, false),
            (Grades, Delete, true, true, false),
            (Statistics, Read, true, true, true),
        ];

        for &(resource, action, admin, teacher, student) in matrix {
            for (role, expected) in [(Admin, admin), (Teacher, teacher), (Student, student)] {
                let result = authorize(&principal(role), resource, action);
                assert_eq!(
                    result.is_ok(),
                    expected,
                    "({resource:?}, {action:?}, {role:?})"
                );
            }
        }
    }

    #[test]
    fn test_forbidden_is_403() {
        let err = authorize(&principal(UserRole::Student), Resource::Students, Action::Write)
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_unlisted_pair_denies_everyone() {
        assert!(allowed_roles(Resource::Statistics, Action::Delete).is_empty());
    }
}

mod validation_tests {
    use super::*;

    fn grade(value: &str, max: &str) -> NewGrade {
        NewGrade {
            enrollment_id: kernel::id::EnrollmentId::new(),
            assessment_type: "exam".to_string(),
            assessment_name: "Midterm".to_string(),
            grade: value.parse().unwrap(),
            max_grade: max.parse().unwrap(),
            weight: None,
            assessment_date: date(2026, 6, 1),
        }
    }

    #[test]
    fn test_grade_within_bounds_accepted() {
        assert!(grade("87.50", "100").validate().is_ok());
        assert!(grade("100", "100").validate().is_ok());
    }

    #[test]
    fn test_grade_over_max_rejected() {
        let err = grade("105", "100").validate().unwrap_err();
        let app: crate::AppError = err.into();
        assert_eq!(app.status_code(), 400);
    }

    #[test]
    fn test_grade_patch_cross_field_check() {
        let patch = GradePatch {
            grade: Some("90".parse().unwrap()),
            max_grade: Some("80".parse().unwrap()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        // Only one side present: the schema CHECK is the backstop
        let patch = GradePatch {
            grade: Some("90".parse().unwrap()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_new_student_requires_fields() {
        let missing: Result<NewStudent, _> =
            serde_json::from_str(r#"{"studentCode": "STU-1"}"#);
        assert!(missing.is_err());

        let ok: NewStudent = serde_json::from_str(&format!(
            r#"{{"userId": "{}", "studentCode": "STU-1", "grade": "10th",
                "enrollmentDate": "2026-08-01"}}"#,
            uuid::Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(ok.status, StudentStatus::Active);
    }

    #[test]
    fn test_insert_defaults() {
        let subject: NewSubject = serde_json::from_str(r#"{"name": "Calculus", "code": "MATH101"}"#)
            .unwrap();
        assert_eq!(subject.credits, 3);

        let grade: NewGrade = serde_json::from_str(&format!(
            r#"{{"enrollmentId": "{}", "assessmentType": "exam",
                "assessmentName": "Final", "grade": "95",
                "assessmentDate": "2026-06-01"}}"#,
            uuid::Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(grade.max_grade, Decimal::from(100));
    }
}

mod entity_tests {
    use super::*;

    #[test]
    fn test_new_period_starts_inactive() {
        let period = AcademicPeriod::new(NewAcademicPeriod {
            name: "2026-Fall".to_string(),
            start_date: date(2026, 9, 1),
            end_date: date(2026, 12, 20),
        });
        assert!(!period.is_active);
    }

    #[test]
    fn test_enrollment_date_is_server_assigned() {
        let before = Utc::now();
        let enrollment = Enrollment::new(NewEnrollment {
            student_id: kernel::id::StudentId::new(),
            course_id: kernel::id::CourseId::new(),
            status: Default::default(),
            final_grade: None,
        });
        assert!(enrollment.enrollment_date >= before);
        assert_eq!(
            enrollment.status,
            crate::domain::status::EnrollmentStatus::Enrolled
        );
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let a = sample_student();
        let b = sample_student();
        assert_ne!(a.id, b.id);
    }
}

mod serialization_tests {
    use super::*;

    #[test]
    fn test_student_with_user_flattens() {
        let detail = StudentWithUser {
            student: sample_student(),
            user: sample_user(UserRole::Student),
        };

        let json = serde_json::to_value(&detail).unwrap();
        let obj = json.as_object().unwrap();

        // student fields flattened to the top level, user nested
        assert!(obj.contains_key("studentCode"));
        assert!(obj.contains_key("enrollmentDate"));
        assert!(obj["user"].is_object());
        assert_eq!(json["user"]["role"], "student");

        // no password anywhere in the payload
        assert!(!serde_json::to_string(&detail).unwrap().to_lowercase().contains("password"));
    }

    #[test]
    fn test_teacher_detail_department_nullable() {
        let teacher = Teacher::new(NewTeacher {
            user_id: UserId::new(),
            teacher_code: "TCH-1".to_string(),
            department_id: None,
            specialization: None,
            hire_date: date(2020, 3, 1),
            status: Default::default(),
            phone: None,
        });

        let detail = TeacherDetail {
            teacher,
            user: sample_user(UserRole::Teacher),
            department: None,
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json["department"].is_null());
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_decimal_serializes_as_string() {
        let grade = Grade::new(NewGrade {
            enrollment_id: kernel::id::EnrollmentId::new(),
            assessment_type: "exam".to_string(),
            assessment_name: "Midterm".to_string(),
            grade: "87.50".parse().unwrap(),
            max_grade: Decimal::from(100),
            weight: Some("0.25".parse().unwrap()),
            assessment_date: date(2026, 6, 1),
        });

        let json = serde_json::to_value(&grade).unwrap();
        assert_eq!(json["grade"], "87.50");
        assert_eq!(json["maxGrade"], "100");
    }

    #[test]
    fn test_statistics_camel_case_keys() {
        let stats = Statistics {
            total_students: 12,
            total_teachers: 3,
            active_courses: 5,
            total_departments: 2,
        };

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalStudents"], 12);
        assert_eq!(json["totalTeachers"], 3);
        assert_eq!(json["activeCourses"], 5);
        assert_eq!(json["totalDepartments"], 2);
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("Student deleted")).unwrap();
        assert_eq!(json["message"], "Student deleted");
    }
}
