mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::Value;

struct Salon {
    client: String,
    professional: String,
    establishment: String,
}

// 2024-01-01 is a Monday.
async fn salon(app: &TestApp) -> Salon {
    let professional = app.register("professionals", "Olga").await;
    let client = app.register("clients", "Paulo").await;
    let establishment = app.create_establishment("Studio Olga").await;
    app.create_procedure(&professional, "Haircut", 50.0, 30).await;
    app.create_working_hours(&professional, &["monday"], "09:00", "17:00")
        .await;
    Salon {
        client,
        professional,
        establishment,
    }
}

#[tokio::test]
async fn booking_inside_working_hours_succeeds() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    let response = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T10:00:00Z")
        .await;

    assert_eq!(StatusCode::CREATED, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["procedure"], "Haircut");
    assert_eq!(body["client_id"], s.client.as_str());
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn window_bounds_are_inclusive() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    let at_open = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T09:00:00Z")
        .await;
    assert_eq!(StatusCode::CREATED, at_open.status());

    let ending_at_close = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T16:30:00Z")
        .await;
    assert_eq!(StatusCode::CREATED, ending_at_close.status());

    let overrunning_close = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T16:45:00Z")
        .await;
    assert_eq!(StatusCode::BAD_REQUEST, overrunning_close.status());
}

#[tokio::test]
async fn booking_outside_working_hours_is_rejected() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    let response = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T08:00:00Z")
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Requested time is outside the professional's working hours"
    );
}

#[tokio::test]
async fn booking_on_a_day_off_is_rejected() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    let response = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-02T10:00:00Z")
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Professional does not work on tuesday");
}

#[tokio::test]
async fn booking_unknown_procedure_is_rejected() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    let response = app
        .book(&s.client, &s.professional, &s.establishment, "Massage", "2024-01-01T10:00:00Z")
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Procedure not offered by this professional");
}

#[tokio::test]
async fn unavailable_window_does_not_accept_bookings() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;
    let hours: Value = app
        .get(&format!("/api/working-hours/{}", s.professional))
        .await
        .json()
        .await
        .unwrap();
    let id = hours[0]["id"].as_str().unwrap();

    app.put(
        &format!("/api/working-hours/{}", id),
        &serde_json::json!({
            "weekday": "monday",
            "start_time": "09:00",
            "end_time": "17:00",
            "available": false
        }),
    )
    .await;

    let response = app
        .book(&s.client, &s.professional, &s.establishment, "Haircut", "2024-01-01T10:00:00Z")
        .await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn listings_are_sorted_and_carry_client_names() {
    let app = TestApp::spawn().await;
    let s = salon(&app).await;

    for time in ["2024-01-08T15:00:00Z", "2024-01-01T11:00:00Z"] {
        let response = app
            .book(&s.client, &s.professional, &s.establishment, "Haircut", time)
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
    }

    let client_list: Value = app
        .get(&format!("/api/appointments/client/{}", s.client))
        .await
        .json()
        .await
        .unwrap();
    let times: Vec<_> = client_list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["date_time"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(times.len(), 2);
    assert!(times[0].starts_with("2024-01-01T11:00:00"));
    assert!(times[1].starts_with("2024-01-08T15:00:00"));

    let professional_list: Value = app
        .get(&format!("/api/appointments/professional/{}", s.professional))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(professional_list.as_array().unwrap().len(), 2);
    assert_eq!(professional_list[0]["client_name"], "Paulo");
    assert_eq!(professional_list[0]["procedure"], "Haircut");
}
