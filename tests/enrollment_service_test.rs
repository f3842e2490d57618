mod common;

use backend::error::AppError;
use backend::models::{CourseStatus, EnrollmentRole, EnrollmentStatus, NewCourse};
use backend::services::{courses, enrollments};
use sqlx::SqlitePool;

async fn create_course(pool: &SqlitePool, code: &str) -> i64 {
    let course = courses::create_course(
        pool,
        NewCourse {
            title: format!("Course {code}"),
            code: code.to_string(),
            description: None,
            instructor_id: 1,
            credits: 3,
            max_students: 1,
            is_public: false,
            status: CourseStatus::Published,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .expect("create course");
    course.id
}

#[tokio::test]
async fn enroll_creates_active_student_enrollment() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    let enrollment = enrollments::enroll_course(&pool, 7, course_id)
        .await
        .expect("enroll");

    assert_eq!(enrollment.user_id, 7);
    assert_eq!(enrollment.course_id, course_id);
    assert_eq!(enrollment.role, EnrollmentRole::Student);
    assert_eq!(enrollment.enrollment_status, EnrollmentStatus::Active);
    assert!(enrollment.completed_at.is_none());
}

#[tokio::test]
async fn double_enrollment_fails_while_active() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    enrollments::enroll_course(&pool, 7, course_id).await.expect("enroll");

    let err = enrollments::enroll_course(&pool, 7, course_id)
        .await
        .expect_err("second active enrollment must fail");
    assert!(matches!(err, AppError::BusinessRule(_)), "got {err:?}");
}

#[tokio::test]
async fn enroll_missing_course_is_not_found() {
    let pool = common::setup_db().await;

    let err = enrollments::enroll_course(&pool, 7, 999)
        .await
        .expect_err("missing course");
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn drop_then_reenroll_creates_a_second_row() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    enrollments::enroll_course(&pool, 7, course_id).await.expect("enroll");
    enrollments::drop_course(&pool, 7, course_id).await.expect("drop");

    // The active-uniqueness rule only covers active rows, so a new
    // enrollment goes through and history is preserved.
    enrollments::enroll_course(&pool, 7, course_id).await.expect("re-enroll");

    let history = enrollments::list_user_enrollments(&pool, 7).await.expect("list");
    assert_eq!(history.len(), 2);

    let active: Vec<_> = history
        .iter()
        .filter(|e| e.enrollment_status == EnrollmentStatus::Active)
        .collect();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn drop_without_active_enrollment_is_not_found() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    let err = enrollments::drop_course(&pool, 7, course_id)
        .await
        .expect_err("nothing to drop");
    assert!(matches!(err, AppError::NotFound(_)));

    // Dropped rows do not count as active either.
    enrollments::enroll_course(&pool, 7, course_id).await.expect("enroll");
    enrollments::drop_course(&pool, 7, course_id).await.expect("drop");
    let err = enrollments::drop_course(&pool, 7, course_id)
        .await
        .expect_err("already dropped");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn complete_stamps_completion_time() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    let enrollment = enrollments::enroll_course(&pool, 7, course_id)
        .await
        .expect("enroll");
    enrollments::complete_course(&pool, 7, course_id).await.expect("complete");

    let completed = enrollments::get_enrollment(&pool, enrollment.id)
        .await
        .expect("get");
    assert_eq!(completed.enrollment_status, EnrollmentStatus::Completed);
    assert!(completed.completed_at.is_some());
}

#[tokio::test]
async fn enrollment_check_and_count_track_active_rows_only() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    assert!(!enrollments::is_user_enrolled(&pool, 7, course_id).await.expect("check"));
    assert_eq!(
        enrollments::course_enrollment_count(&pool, course_id).await.expect("count"),
        0
    );

    enrollments::enroll_course(&pool, 7, course_id).await.expect("enroll");
    enrollments::enroll_course(&pool, 8, course_id).await.expect("enroll");

    assert!(enrollments::is_user_enrolled(&pool, 7, course_id).await.expect("check"));
    assert_eq!(
        enrollments::course_enrollment_count(&pool, course_id).await.expect("count"),
        2
    );

    enrollments::drop_course(&pool, 7, course_id).await.expect("drop");

    assert!(!enrollments::is_user_enrolled(&pool, 7, course_id).await.expect("check"));
    assert_eq!(
        enrollments::course_enrollment_count(&pool, course_id).await.expect("count"),
        1
    );
}

#[tokio::test]
async fn capacity_is_not_enforced() {
    let pool = common::setup_db().await;
    // max_students is 1 in the fixture; enrollment ignores it.
    let course_id = create_course(&pool, "CS101").await;

    enrollments::enroll_course(&pool, 1, course_id).await.expect("enroll");
    enrollments::enroll_course(&pool, 2, course_id).await.expect("enroll over capacity");

    assert_eq!(
        enrollments::course_enrollment_count(&pool, course_id).await.expect("count"),
        2
    );
}

#[tokio::test]
async fn delete_enrollment_hard_deletes() {
    let pool = common::setup_db().await;
    let course_id = create_course(&pool, "CS101").await;

    let enrollment = enrollments::enroll_course(&pool, 7, course_id)
        .await
        .expect("enroll");

    enrollments::delete_enrollment(&pool, enrollment.id).await.expect("delete");

    let err = enrollments::get_enrollment(&pool, enrollment.id)
        .await
        .expect_err("gone");
    assert!(matches!(err, AppError::NotFound(_)));

    let err = enrollments::delete_enrollment(&pool, enrollment.id)
        .await
        .expect_err("already gone");
    assert!(matches!(err, AppError::NotFound(_)));
}
