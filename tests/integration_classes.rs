mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use classhub::classhub_models::{ClassStatus, UserRole};

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["_id"].as_str().unwrap().to_string())
        .collect()
}

fn new_class_body() -> Value {
    json!({
        "name": "Oil Portraits",
        "image": "https://img.example.com/oil.png",
        "info": "Six weeks of faces",
        "price": 120.0,
        "seats": 12,
        "difficulty": "advanced",
        "instructorName": "Rembrandt"
    })
}

#[tokio::test]
async fn test_public_listing_only_shows_active() {
    let app = common::setup_test_app();
    let active = app
        .seed_class("i@test.com", ClassStatus::Active, 10, 0)
        .await;
    app.seed_class("i@test.com", ClassStatus::Pending, 10, 0)
        .await;
    app.seed_class("i@test.com", ClassStatus::Denied, 10, 0)
        .await;

    let (status, body) = app.get("/classes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![active.id.to_string()]);
}

#[tokio::test]
async fn test_public_listing_filters_by_difficulty() {
    let app = common::setup_test_app();
    app.seed_class("i@test.com", ClassStatus::Active, 10, 0)
        .await;

    let (_, beginner) = app.get("/classes?difficulty=beginner", None).await;
    let (_, advanced) = app.get("/classes?difficulty=advanced", None).await;

    assert_eq!(beginner.as_array().unwrap().len(), 1);
    assert!(advanced.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_class_by_id() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 10, 2)
        .await;

    let (status, body) = app.get(&format!("/classes/{}", class.id), None).await;
    let (missing, error) = app
        .get(&format!("/classes/{}", Uuid::new_v4()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["instructorEmail"], "i@test.com");
    assert_eq!(body["enrolled"], 2);
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(error["message"], "Class not found");
}

#[tokio::test]
async fn test_popular_sorted_by_enrollment() {
    let app = common::setup_test_app();
    let low = app
        .seed_class("i@test.com", ClassStatus::Active, 10, 1)
        .await;
    let high = app
        .seed_class("i@test.com", ClassStatus::Active, 10, 30)
        .await;
    let mid = app
        .seed_class("i@test.com", ClassStatus::Active, 10, 7)
        .await;

    let (_, body) = app.get("/popular-classes", None).await;

    assert_eq!(
        ids(&body),
        vec![high.id.to_string(), mid.id.to_string(), low.id.to_string()]
    );
}

#[tokio::test]
async fn test_instructor_classes_lists_active_only() {
    let app = common::setup_test_app();
    let mine = app
        .seed_class("ada@test.com", ClassStatus::Active, 10, 0)
        .await;
    app.seed_class("ada@test.com", ClassStatus::Pending, 10, 0)
        .await;
    app.seed_class("bob@test.com", ClassStatus::Active, 10, 0)
        .await;

    let (_, body) = app.get("/instructor-classes/ada@test.com", None).await;

    assert_eq!(ids(&body), vec![mine.id.to_string()]);
}

#[tokio::test]
async fn test_instructor_creates_pending_class() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    app.seed_user("admin@test.com", Some(UserRole::Admin)).await;
    let token = app.token("ada@test.com");

    let (status, body) = app.post("/classes", Some(&token), new_class_body()).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["insertedId"].as_str().unwrap().to_string();

    let (_, public) = app.get("/classes", None).await;
    assert!(public.as_array().unwrap().is_empty());

    let (_, mine) = app.get("/myclasses", Some(&token)).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["_id"], id);
    assert_eq!(mine[0]["status"], "pending");
    assert_eq!(mine[0]["enrolled"], 0);
    assert_eq!(mine[0]["instructorEmail"], "ada@test.com");

    let admin = app.token("admin@test.com");
    let (_, pending) = app.get("/allclasses?status=pending", Some(&admin)).await;
    assert_eq!(ids(&pending), vec![id]);
}

#[tokio::test]
async fn test_student_cannot_create_class() {
    let app = common::setup_test_app();
    app.seed_user("learn@test.com", None).await;
    let token = app.token("learn@test.com");

    let (status, _) = app.post("/classes", Some(&token), new_class_body()).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_class_rejects_negative_seats() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    let token = app.token("ada@test.com");
    let mut body = new_class_body();
    body["seats"] = json!(-1);

    let (status, _) = app.post("/classes", Some(&token), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_myclasses_enforces_ownership() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    app.seed_user("bob@test.com", Some(UserRole::Instructor))
        .await;
    let class = app
        .seed_class("ada@test.com", ClassStatus::Active, 10, 0)
        .await;
    let uri = format!("/myclasses/{}", class.id);
    let bob = app.token("bob@test.com");

    let (get_status, _) = app.get(&uri, Some(&bob)).await;
    let (patch_status, _) = app
        .patch(&uri, Some(&bob), json!({ "price": 1.0 }))
        .await;
    let (delete_status, _) = app.delete(&uri, Some(&bob)).await;

    assert_eq!(get_status, StatusCode::FORBIDDEN);
    assert_eq!(patch_status, StatusCode::FORBIDDEN);
    assert_eq!(delete_status, StatusCode::FORBIDDEN);

    let (_, unchanged) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(unchanged["price"], 19.99);
}

#[tokio::test]
async fn test_owner_updates_and_deletes_class() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    let class = app
        .seed_class("ada@test.com", ClassStatus::Active, 10, 3)
        .await;
    let uri = format!("/myclasses/{}", class.id);
    let token = app.token("ada@test.com");

    let (status, body) = app
        .patch(&uri, Some(&token), json!({ "price": 25.5, "seats": 20 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);

    let (_, updated) = app.get(&uri, Some(&token)).await;
    assert_eq!(updated["price"], 25.5);
    assert_eq!(updated["seats"], 20);
    assert_eq!(updated["name"], "Watercolor Basics");
    assert_eq!(updated["enrolled"], 3);

    let (_, deleted) = app.delete(&uri, Some(&token)).await;
    assert_eq!(deleted["deletedCount"], 1);

    let (status, _) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_moderates_class() {
    let app = common::setup_test_app();
    app.seed_user("admin@test.com", Some(UserRole::Admin)).await;
    let class = app
        .seed_class("ada@test.com", ClassStatus::Pending, 10, 0)
        .await;
    let token = app.token("admin@test.com");
    let uri = format!("/allclasses/{}", class.id);

    let (status, body) = app
        .post(&uri, Some(&token), json!({ "status": "active" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);

    let (_, public) = app.get("/classes", None).await;
    assert_eq!(ids(&public), vec![class.id.to_string()]);

    app.post(
        &uri,
        Some(&token),
        json!({ "status": "denied", "feedback": "Needs a syllabus" }),
    )
    .await;
    let (_, denied) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(denied["status"], "denied");
    assert_eq!(denied["feedback"], "Needs a syllabus");

    let (_, public) = app.get("/classes", None).await;
    assert!(public.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_moderating_unknown_class_upserts() {
    let app = common::setup_test_app();
    app.seed_user("admin@test.com", Some(UserRole::Admin)).await;
    let token = app.token("admin@test.com");
    let id = Uuid::new_v4();

    let (status, body) = app
        .post(
            &format!("/allclasses/{}", id),
            Some(&token),
            json!({ "status": "denied" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upsertedId"], id.to_string());
    let (_, all) = app.get("/allclasses", Some(&token)).await;
    assert_eq!(ids(&all), vec![id.to_string()]);
}

#[tokio::test]
async fn test_moderation_rejects_unknown_status() {
    let app = common::setup_test_app();
    app.seed_user("admin@test.com", Some(UserRole::Admin)).await;
    let class = app
        .seed_class("ada@test.com", ClassStatus::Pending, 10, 0)
        .await;
    let token = app.token("admin@test.com");

    let (status, _) = app
        .post(
            &format!("/allclasses/{}", class.id),
            Some(&token),
            json!({ "status": "archived" }),
        )
        .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_instructor_cannot_moderate() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    let class = app
        .seed_class("ada@test.com", ClassStatus::Pending, 10, 0)
        .await;
    let token = app.token("ada@test.com");

    let (status, _) = app
        .post(
            &format!("/allclasses/{}", class.id),
            Some(&token),
            json!({ "status": "active" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_class_id_is_json_bad_request() {
    let app = common::setup_test_app();

    let (status, body) = app.get("/classes/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_status_filter_is_json_bad_request() {
    let app = common::setup_test_app();
    app.seed_user("admin@test.com", Some(UserRole::Admin)).await;
    let token = app.token("admin@test.com");

    let (status, body) = app.get("/allclasses?status=archived", Some(&token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameter")
    );
}

#[tokio::test]
async fn test_malformed_myclass_id_is_json_bad_request() {
    let app = common::setup_test_app();
    app.seed_user("ada@test.com", Some(UserRole::Instructor))
        .await;
    let token = app.token("ada@test.com");

    let (status, body) = app.delete("/myclasses/42", Some(&token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}
