mod common;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

const ALL_WEEK: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn at(day: NaiveDate, hour: u32) -> String {
    day.and_hms_opt(hour, 0, 0).unwrap().and_utc().to_rfc3339()
}

fn month_key(day: NaiveDate) -> String {
    format!("{:04}-{:02}", day.year(), day.month())
}

#[tokio::test]
async fn rating_score_is_range_checked() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Zeca").await;
    let client = app.register("clients", "Alice").await;

    let response = app
        .post(
            "/api/ratings",
            &json!({ "professional_id": professional, "client_id": client, "score": 6 }),
        )
        .await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    let response = app
        .post(
            "/api/ratings",
            &json!({ "professional_id": professional, "client_id": client, "score": 5, "comment": "Great" }),
        )
        .await;
    assert_eq!(StatusCode::CREATED, response.status());
    assert_eq!(response.json::<Value>().await.unwrap()["comment"], "Great");
}

#[tokio::test]
async fn professional_and_establishment_reports() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Beto").await;
    let client = app.register("clients", "Carla").await;
    let establishment = app.create_establishment("Studio Beto").await;
    app.create_procedure(&professional, "Haircut", 50.0, 30).await;
    app.create_procedure(&professional, "Beard", 25.5, 15).await;
    app.create_working_hours(&professional, &ALL_WEEK, "00:00", "23:59")
        .await;

    let day = Utc::now().date_naive() - Duration::days(2);
    let booked = |hour: u32| at(day, hour);
    for (procedure, hour) in [("Haircut", 9), ("Haircut", 11), ("Beard", 14)] {
        let response = app
            .book(&client, &professional, &establishment, procedure, &booked(hour))
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
    }

    for (score, establishment_id) in [(4, Some(establishment.as_str())), (5, None)] {
        app.post(
            "/api/ratings",
            &json!({
                "professional_id": professional,
                "client_id": client,
                "establishment_id": establishment_id,
                "score": score
            }),
        )
        .await;
    }

    let revenue: Value = app
        .get(&format!("/api/reports/professionals/{}/revenue", professional))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(revenue["appointment_count"], 3);
    assert_eq!(revenue["total_revenue"], 125.5);

    let establishment_revenue: Value = app
        .get(&format!("/api/reports/establishments/{}/revenue", establishment))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(establishment_revenue["total_revenue"], 125.5);

    let ratings: Value = app
        .get(&format!("/api/reports/professionals/{}/ratings", professional))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ratings["count"], 2);
    assert_eq!(ratings["average"], 4.5);

    let establishment_ratings: Value = app
        .get(&format!("/api/reports/establishments/{}/ratings", establishment))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(establishment_ratings["count"], 1);
    assert_eq!(establishment_ratings["average"], 4.0);

    let booked_month = month_key(day);
    for path in [
        format!("/api/reports/professionals/{}/appointments-per-month", professional),
        format!("/api/reports/establishments/{}/appointments-per-month", establishment),
    ] {
        let monthly: Value = app.get(&path).await.json().await.unwrap();
        let months = monthly["months"].as_object().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[&booked_month], 3);
    }
}

#[tokio::test]
async fn reports_for_unknown_ids_are_empty() {
    let app = TestApp::spawn().await;

    let revenue: Value = app
        .get("/api/reports/professionals/nobody/revenue")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(revenue["appointment_count"], 0);
    assert_eq!(revenue["total_revenue"], 0.0);

    let ratings: Value = app
        .get("/api/reports/establishments/nowhere/ratings")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(ratings["count"], 0);
    assert_eq!(ratings["average"], 0.0);
}

#[tokio::test]
async fn upcoming_bookings_are_left_out_of_the_monthly_count() {
    let app = TestApp::spawn().await;
    let professional = app.register("professionals", "Dalva").await;
    let client = app.register("clients", "Edu").await;
    let establishment = app.create_establishment("Studio Dalva").await;
    app.create_procedure(&professional, "Haircut", 50.0, 30).await;
    app.create_working_hours(&professional, &ALL_WEEK, "00:00", "23:59")
        .await;

    let today = Utc::now().date_naive();
    for day in [today - Duration::days(3), today + Duration::days(1), today + Duration::days(20)] {
        let response = app
            .book(&client, &professional, &establishment, "Haircut", &at(day, 10))
            .await;
        assert_eq!(StatusCode::CREATED, response.status());
    }

    let monthly: Value = app
        .get(&format!(
            "/api/reports/professionals/{}/appointments-per-month",
            professional
        ))
        .await
        .json()
        .await
        .unwrap();
    let months = monthly["months"].as_object().unwrap();
    let total: u64 = months.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 1);
    assert_eq!(months[&month_key(today - Duration::days(3))], 1);
}
