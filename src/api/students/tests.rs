use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::db::types::Role;
use crate::test_support::{self, call};

#[tokio::test]
async fn recorded_grade_reaches_student_transcript() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();
    let settings = ctx.state.settings();

    let admin = test_support::insert_member(db, "admin@kampus.ac.id", "Admin", Role::Admin).await;
    let lecturer =
        test_support::insert_member(db, "dosen@kampus.ac.id", "Dr. Rina", Role::Dosen).await;
    let student =
        test_support::insert_member(db, "budi@kampus.ac.id", "Budi Santoso", Role::Mahasiswa).await;
    let admin_token = test_support::bearer_token(db, settings, &admin.id).await;
    let lecturer_token = test_support::bearer_token(db, settings, &lecturer.id).await;
    let student_token = test_support::bearer_token(db, settings, &student.id).await;

    let (status, course) = call(
        &ctx.app,
        Method::POST,
        "/api/v1/courses",
        Some(&admin_token),
        Some(json!({ "code": "TIF101", "name": "Algoritma", "credits": 3, "semester": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "response: {course}");

    let (status, students) =
        call(&ctx.app, Method::GET, "/api/v1/students", Some(&lecturer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let students = students.as_array().expect("student list");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], student.id.as_str());

    let (status, grade) = call(
        &ctx.app,
        Method::POST,
        "/api/v1/grades",
        Some(&lecturer_token),
        Some(json!({ "student_id": student.id, "course_id": course["id"], "score": 78 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "response: {grade}");
    assert_eq!(grade["letter"], "B");

    let (status, transcript) =
        call(&ctx.app, Method::GET, "/api/v1/me/grades", Some(&student_token), None).await;
    assert_eq!(status, StatusCode::OK, "response: {transcript}");
    assert_eq!(transcript["gpa"].as_f64(), Some(3.0));
    assert_eq!(transcript["total_credits"], 3);
    assert_eq!(transcript["graded_courses"], 1);
    assert_eq!(transcript["grades"][0]["course_code"], "TIF101");
    assert_eq!(transcript["grades"][0]["lecturer_name"], "Dr. Rina");
    assert_eq!(transcript["grades"][0]["letter"], "B");
}

#[tokio::test]
async fn transcript_only_shows_own_grades() {
    let Some(ctx) = test_support::setup_test_context().await else { return };
    let db = ctx.state.db();
    let settings = ctx.state.settings();

    let lecturer =
        test_support::insert_member(db, "dosen@kampus.ac.id", "Dr. Rina", Role::Dosen).await;
    let budi = test_support::insert_member(db, "budi@kampus.ac.id", "Budi", Role::Mahasiswa).await;
    let siti = test_support::insert_member(db, "siti@kampus.ac.id", "Siti", Role::Mahasiswa).await;
    let course = test_support::insert_course(db, "TIF101", "Algoritma", 3, 1).await;
    let lecturer_token = test_support::bearer_token(db, settings, &lecturer.id).await;

    let (status, _) = call(
        &ctx.app,
        Method::POST,
        "/api/v1/grades",
        Some(&lecturer_token),
        Some(json!({ "student_id": budi.id, "course_id": course.id, "score": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let siti_token = test_support::bearer_token(db, settings, &siti.id).await;
    let (status, transcript) =
        call(&ctx.app, Method::GET, "/api/v1/me/grades", Some(&siti_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transcript["grades"], json!([]));
    assert_eq!(transcript["gpa"].as_f64(), Some(0.0));
    assert_eq!(transcript["total_credits"], 0);

    let (status, _) =
        call(&ctx.app, Method::GET, "/api/v1/me/grades", Some(&lecturer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
