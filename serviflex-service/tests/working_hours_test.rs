mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_skips_weekdays_already_declared() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Julia").await;

    let first = app
        .create_working_hours(&professional, &["monday", "tuesday"], "09:00", "17:00")
        .await;
    assert_eq!(first["created"].as_array().unwrap().len(), 2);
    assert!(first["skipped"].as_array().unwrap().is_empty());

    let second = app
        .create_working_hours(&professional, &["tuesday", "wednesday", "wednesday"], "10:00", "12:00")
        .await;
    assert_eq!(second["created"].as_array().unwrap().len(), 1);
    assert_eq!(second["created"][0]["weekday"], "wednesday");
    assert_eq!(second["skipped"], json!(["tuesday", "wednesday"]));

    let list: Value = app
        .get(&format!("/api/working-hours/{}", professional))
        .await
        .json()
        .await
        .unwrap();
    let weekdays: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["weekday"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(weekdays, vec!["monday", "tuesday", "wednesday"]);
}

#[tokio::test]
async fn create_rejects_invalid_windows() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Karla").await;

    for (start, end) in [("17:00", "09:00"), ("9am", "17:00"), ("10:00", "10:00"), ("25:00", "26:00")] {
        let response = app
            .post(
                "/api/working-hours",
                &json!({
                    "professional_id": professional,
                    "weekdays": ["friday"],
                    "start_time": start,
                    "end_time": end,
                }),
            )
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status(), "{}-{}", start, end);
    }
}

#[tokio::test]
async fn update_and_delete_working_hours() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Leo").await;
    let created = app
        .create_working_hours(&professional, &["thursday"], "08:00", "12:00")
        .await;
    let id = created["created"][0]["id"].as_str().unwrap().to_string();

    let updated = app
        .put(
            &format!("/api/working-hours/{}", id),
            &json!({
                "weekday": "saturday",
                "start_time": "09:30",
                "end_time": "13:00",
                "available": false
            }),
        )
        .await;
    assert_eq!(StatusCode::OK, updated.status());
    let body: Value = updated.json().await.unwrap();
    assert_eq!(body["weekday"], "saturday");
    assert_eq!(body["available"], false);

    let deleted = app.delete(&format!("/api/working-hours/{}", id)).await;
    assert_eq!(StatusCode::OK, deleted.status());

    let again = app.delete(&format!("/api/working-hours/{}", id)).await;
    assert_eq!(StatusCode::NOT_FOUND, again.status());

    let missing = app
        .put(
            &format!("/api/working-hours/{}", id),
            &json!({ "weekday": "monday", "start_time": "09:00", "end_time": "10:00" }),
        )
        .await;
    assert_eq!(StatusCode::NOT_FOUND, missing.status());
}

#[tokio::test]
async fn update_cannot_move_onto_a_declared_weekday() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Milena").await;
    let created = app
        .create_working_hours(&professional, &["monday", "tuesday"], "09:00", "17:00")
        .await;
    let monday_id = created["created"][0]["id"].as_str().unwrap().to_string();

    let clash = app
        .put(
            &format!("/api/working-hours/{}", monday_id),
            &json!({ "weekday": "tuesday", "start_time": "10:00", "end_time": "12:00" }),
        )
        .await;
    assert_eq!(StatusCode::CONFLICT, clash.status());

    let same_day = app
        .put(
            &format!("/api/working-hours/{}", monday_id),
            &json!({ "weekday": "monday", "start_time": "10:00", "end_time": "12:00" }),
        )
        .await;
    assert_eq!(StatusCode::OK, same_day.status());

    let free_day = app
        .put(
            &format!("/api/working-hours/{}", monday_id),
            &json!({ "weekday": "friday", "start_time": "10:00", "end_time": "12:00" }),
        )
        .await;
    assert_eq!(StatusCode::OK, free_day.status());
}
