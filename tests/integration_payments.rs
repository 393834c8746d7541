mod common;

use axum::http::StatusCode;
use futures::future::join_all;
use serde_json::{Value, json};
use uuid::Uuid;

use classhub::classhub_models::ClassStatus;

fn purchase_body(class_id: Uuid, cart_id: Option<&Value>) -> Value {
    json!({
        "classId": class_id,
        "cartId": cart_id,
        "price": 19.99,
        "transactionId": "pi_test_123",
        "className": "Watercolor Basics",
        "seats": 99,
        "enrolled": 0
    })
}

#[tokio::test]
async fn test_purchase_takes_seat_and_records_everything() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 10)
        .await;
    let token = app.token("learn@test.com");
    let (_, cart) = app
        .post("/carts", Some(&token), json!({ "classId": class.id }))
        .await;

    let (status, body) = app
        .post(
            "/payments",
            Some(&token),
            purchase_body(class.id, Some(&cart["insertedId"])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);
    let payment_id = body["insertedId"].clone();

    let (_, updated) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(updated["seats"], 4);
    assert_eq!(updated["enrolled"], 11);

    let (_, remaining) = app.get("/carts/learn@test.com", Some(&token)).await;
    assert!(remaining.as_array().unwrap().is_empty());

    let (status, enrollment) = app
        .get(&format!("/enrolled/{}", class.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrollment["paymentId"], payment_id);
    assert_eq!(enrollment["email"], "learn@test.com");

    let (_, payments) = app.get("/payments", Some(&token)).await;
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["_id"], payment_id);
    assert_eq!(payments[0]["price"], 19.99);
    assert_eq!(payments[0]["transactionId"], "pi_test_123");
}

#[tokio::test]
async fn test_purchase_without_price_uses_class_price() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 10)
        .await;
    let token = app.token("a@x.com");
    let (_, cart) = app
        .post("/carts", Some(&token), json!({ "classId": class.id }))
        .await;

    let (status, body) = app
        .post(
            "/payments",
            Some(&token),
            json!({
                "classId": class.id,
                "cartId": cart["insertedId"],
                "seats": 5,
                "enrolled": 10,
                "email": "a@x.com"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);

    let (_, updated) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(updated["seats"], 4);
    assert_eq!(updated["enrolled"], 11);

    let (_, remaining) = app.get("/carts/a@x.com", Some(&token)).await;
    assert!(remaining.as_array().unwrap().is_empty());

    let (_, enrolled) = app.get("/enrolled", Some(&token)).await;
    assert_eq!(enrolled.as_array().unwrap().len(), 1);

    let (_, payments) = app.get("/payments", Some(&token)).await;
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["price"], 19.99);
}

#[tokio::test]
async fn test_purchase_without_cart_entry() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 2, 0)
        .await;
    let token = app.token("direct@test.com");

    let (status, _) = app
        .post("/payments", Some(&token), purchase_body(class.id, None))
        .await;

    assert_eq!(status, StatusCode::OK);
    let (_, updated) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(updated["seats"], 1);
}

#[tokio::test]
async fn test_purchase_clears_cart_entry_by_class() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 2, 0)
        .await;
    let token = app.token("learn@test.com");
    app.post("/carts", Some(&token), json!({ "classId": class.id }))
        .await;

    app.post("/payments", Some(&token), purchase_body(class.id, None))
        .await;

    let (_, remaining) = app.get("/carts/learn@test.com", Some(&token)).await;
    assert!(remaining.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_purchase_with_no_seats_conflicts() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 0, 20)
        .await;
    let token = app.token("late@test.com");

    let (status, body) = app
        .post("/payments", Some(&token), purchase_body(class.id, None))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], true);
    let (_, payments) = app.get("/payments", Some(&token)).await;
    assert!(payments.as_array().unwrap().is_empty());
    let (status, _) = app
        .get(&format!("/enrolled/{}", class.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purchase_unknown_class_not_found() {
    let app = common::setup_test_app();
    let token = app.token("learn@test.com");

    let (status, _) = app
        .post("/payments", Some(&token), purchase_body(Uuid::new_v4(), None))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purchase_twice_conflicts() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 0)
        .await;
    let token = app.token("learn@test.com");

    app.post("/payments", Some(&token), purchase_body(class.id, None))
        .await;
    let (status, _) = app
        .post("/payments", Some(&token), purchase_body(class.id, None))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let (_, updated) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(updated["seats"], 4);
    assert_eq!(updated["enrolled"], 1);
}

#[tokio::test]
async fn test_purchase_for_other_email_is_forbidden() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 0)
        .await;
    let token = app.token("learn@test.com");
    let mut body = purchase_body(class.id, None);
    body["email"] = json!("someone@test.com");

    let (status, _) = app.post("/payments", Some(&token), body).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    let (_, untouched) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(untouched["seats"], 5);
}

#[tokio::test]
async fn test_concurrent_purchases_take_last_seat_once() {
    let app = common::setup_test_app();
    let class = app
        .seed_class("i@test.com", ClassStatus::Active, 1, 0)
        .await;
    let tokens: Vec<String> = (0..8)
        .map(|i| app.token(&format!("buyer{}@test.com", i)))
        .collect();

    let results = join_all(tokens.iter().map(|token| {
        app.post(
            "/payments",
            Some(token.as_str()),
            purchase_body(class.id, None),
        )
    }))
    .await;

    let successes = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::OK)
        .count();
    let conflicts = results
        .iter()
        .filter(|(status, _)| *status == StatusCode::CONFLICT)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);

    let (_, updated) = app.get(&format!("/classes/{}", class.id), None).await;
    assert_eq!(updated["seats"], 0);
    assert_eq!(updated["enrolled"], 1);
}

#[tokio::test]
async fn test_payment_history_newest_first_and_private() {
    let app = common::setup_test_app();
    let first = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 0)
        .await;
    let second = app
        .seed_class("i@test.com", ClassStatus::Active, 5, 0)
        .await;
    let token = app.token("learn@test.com");
    let other = app.token("other@test.com");

    app.post("/payments", Some(&token), purchase_body(first.id, None))
        .await;
    app.post("/payments", Some(&token), purchase_body(second.id, None))
        .await;
    app.post("/payments", Some(&other), purchase_body(first.id, None))
        .await;

    let (_, payments) = app.get("/payments", Some(&token)).await;
    let payments = payments.as_array().unwrap();

    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["classId"], second.id.to_string());
    assert_eq!(payments[1]["classId"], first.id.to_string());
    assert!(payments.iter().all(|p| p["email"] == "learn@test.com"));
}

#[tokio::test]
async fn test_payment_intent_returns_client_secret() {
    let app = common::setup_test_app();
    let token = app.token("learn@test.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": 19.99 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "clientSecret": "pi_test_123_secret_456" }));
    assert_eq!(*app.gateway.amounts.lock().unwrap(), vec![1999]);
}

#[tokio::test]
async fn test_payment_intent_rejects_negative_price() {
    let app = common::setup_test_app();
    let token = app.token("learn@test.com");

    let (status, _) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": -3.0 }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.gateway.amounts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_payment_intent_provider_failure_is_bad_gateway() {
    let app = common::setup_test_app_with_gateway(common::FakeGateway {
        fail: true,
        ..Default::default()
    });
    let token = app.token("learn@test.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": 10 }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_payment_intent_requires_token() {
    let app = common::setup_test_app();

    let (status, _) = app
        .post("/create-payment-intent", None, json!({ "price": 10 }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
