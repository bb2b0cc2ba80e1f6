//! API integration tests
//!
//! These tests expect a running server with a fresh database and Redis.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8001/api/v1";

/// Helper to create an employee and return its id
async fn create_employee(client: &Client, name: &str, phone: &str) -> i32 {
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .json(&json!({
            "name": name,
            "phone": phone,
            "role": "barber"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response") as i32
}

/// Helper to create a catalog service and return its id
async fn create_service(client: &Client, description: &str, duration_minutes: i32) -> i32 {
    let response = client
        .post(format!("{}/services", BASE_URL))
        .json(&json!({
            "description": description,
            "price": "30.00",
            "duration_minutes": duration_minutes,
            "commission": 0.4,
            "category": "hair"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response") as i32
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_employee_crud() {
    let client = Client::new();
    let id = create_employee(&client, "Carlos", "5511999000001").await;

    let response = client
        .get(format!("{}/employees/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Carlos");

    let response = client
        .put(format!("{}/employees/{}", BASE_URL, id))
        .json(&json!({ "name": "Carlos Silva" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Carlos Silva");

    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Soft-deleted rows are invisible to reads
    let response = client
        .get(format!("{}/employees/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_employee_phone_conflicts() {
    let client = Client::new();
    create_employee(&client, "Ana", "5511999000002").await;

    let response = client
        .post(format!("{}/employees", BASE_URL))
        .json(&json!({
            "name": "Ana Clone",
            "phone": "5511999000002",
            "role": "barber"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_working_hours_upsert_and_fetch() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Bruno", "5511999000003").await;

    let response = client
        .put(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .json(&json!({
            "weekday": "monday",
            "start_time": "09:00",
            "end_time": "18:00",
            "lunch_start": "12:00",
            "lunch_end": "13:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Upsert replaces the existing row for the same weekday
    let response = client
        .put(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .json(&json!({
            "weekday": "monday",
            "start_time": "10:00",
            "end_time": "17:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let rows = body.as_array().expect("Expected an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["start_time"], "10:00:00");
}

#[tokio::test]
#[ignore]
async fn test_invalid_working_hours_rejected() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Davi", "5511999000004").await;

    let response = client
        .put(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .json(&json!({
            "weekday": "tuesday",
            "start_time": "18:00",
            "end_time": "09:00"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_slots_for_service_day() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Edu", "5511999000005").await;
    let service_id = create_service(&client, "Corte", 40).await;

    // 2026-09-07 is a Monday
    let response = client
        .put(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .json(&json!({
            "weekday": "monday",
            "start_time": "09:00",
            "end_time": "12:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/slots", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "date": "2026-09-07",
            "service_id": service_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let slots = body.as_array().expect("Expected an array");
    // 09:00 through 11:20, every 20 minutes, 40-minute candidates
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0]["start"], "2026-09-07T09:00:00");
    assert_eq!(slots[0]["end"], "2026-09-07T09:40:00");
    assert_eq!(slots[7]["start"], "2026-09-07T11:20:00");
}

#[tokio::test]
#[ignore]
async fn test_slots_day_off_is_empty() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Fabio", "5511999000006").await;
    let service_id = create_service(&client, "Barba", 20).await;

    // No working hours registered for Sunday 2026-09-06
    let response = client
        .post(format!("{}/slots", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "date": "2026-09-06",
            "service_id": service_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Expected an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_ad_hoc_slots_bypass_working_hours() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Gil", "5511999000007").await;

    let response = client
        .post(format!("{}/slots", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "date": "2026-09-06",
            "work_start": "14:00",
            "work_end": "16:00",
            "slot_minutes": 30
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let slots = body.as_array().expect("Expected an array");
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0]["start"], "2026-09-06T14:00:00");
    assert_eq!(slots[3]["end"], "2026-09-06T16:00:00");
}

#[tokio::test]
#[ignore]
async fn test_booking_conflict_returns_409() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Hugo", "5511999000008").await;
    let service_id = create_service(&client, "Corte e barba", 60).await;

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&json!({ "name": "Cliente", "phone": "5511988000001" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let customer_id = body["id"].as_i64().expect("No id in response");

    let booking = json!({
        "employee_id": employee_id,
        "service_id": service_id,
        "customer_id": customer_id,
        "start_time": "2026-09-07T10:00:00"
    });

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Overlapping start inside the first booking's window
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "service_id": service_id,
            "customer_id": customer_id,
            "start_time": "2026-09-07T10:30:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_booked_slot_disappears_from_availability() {
    let client = Client::new();
    let employee_id = create_employee(&client, "Igor", "5511999000009").await;
    let service_id = create_service(&client, "Corte rapido", 20).await;

    let response = client
        .put(format!("{}/employees/{}/working-hours", BASE_URL, employee_id))
        .json(&json!({
            "weekday": "monday",
            "start_time": "09:00",
            "end_time": "10:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .json(&json!({ "name": "Outro cliente", "phone": "5511988000002" }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let customer_id = body["id"].as_i64().expect("No id in response");

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "service_id": service_id,
            "customer_id": customer_id,
            "start_time": "2026-09-07T09:40:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/slots", BASE_URL))
        .json(&json!({
            "employee_id": employee_id,
            "date": "2026-09-07",
            "service_id": service_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let starts: Vec<&str> = body
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|s| s["start"].as_str().expect("Missing start"))
        .collect();
    assert!(starts.contains(&"2026-09-07T09:00:00"));
    // 09:20 ends exactly when the booking starts and is taken with it
    assert!(!starts.contains(&"2026-09-07T09:20:00"));
    assert!(!starts.contains(&"2026-09-07T09:40:00"));
}

fn webhook_message(phone: &str, id: &str, timestamp: i64, text: &str) -> Value {
    json!({
        "data": {
            "key": {"remoteJid": format!("{}@s.whatsapp.net", phone), "fromMe": false, "id": id},
            "messageTimestamp": timestamp,
            "pushName": "Cliente",
            "message": {"conversation": text}
        }
    })
}

#[tokio::test]
#[ignore]
async fn test_webhook_deduplicates_redeliveries() {
    let client = Client::new();
    let payload = webhook_message("5511977000001", "MSG-DEDUP-1", 1751980000, "oi");

    for _ in 0..2 {
        let response = client
            .post(format!("{}/webhook", BASE_URL))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);
    }
}

#[tokio::test]
#[ignore]
async fn test_webhook_rate_limits_per_phone() {
    let client = Client::new();

    // Default window allows 3 messages; the 4th distinct one gets 429
    for i in 0..3i64 {
        let payload = webhook_message("5511977000002", &format!("MSG-RATE-{}", i), 1751980100 + i, "oi");
        let response = client
            .post(format!("{}/webhook", BASE_URL))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);
    }

    let payload = webhook_message("5511977000002", "MSG-RATE-3", 1751980200, "oi");
    let response = client
        .post(format!("{}/webhook", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 429);
}

#[tokio::test]
#[ignore]
async fn test_webhook_without_message_is_accepted() {
    let client = Client::new();

    let response = client
        .post(format!("{}/webhook", BASE_URL))
        .json(&json!({ "data": { "event": "connection.update" } }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
