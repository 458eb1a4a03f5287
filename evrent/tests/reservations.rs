mod helpers;
use evrent_client::domain::ReservationStatus;
use evrent_client::filter::Choice;
use evrent_client::forms::ReservationForm;
use evrent_client::messages;
use evrent_client::screens::{ReservationsScreen, Submit};
use helpers::{renter_json, reservation_json, vehicle_json, TestApp};
use serde_json::{json, Value};
use time::macros::datetime;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_lists(app: &TestApp, reservations: Value) {
    Mock::given(method("GET"))
        .and(path("/renter/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reservations))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .and(query_param("status", "available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vehicles": [vehicle_json("v1", "car", 100_000), vehicle_json("v2", "motorbike", 30_000)]
        })))
        .mount(&app.server)
        .await;
}

fn form(vehicle_id: &str) -> ReservationForm {
    ReservationForm {
        vehicle_id: vehicle_id.into(),
        reserved_start_time: datetime!(2026-10-20 08:00 UTC),
        reserved_end_time: datetime!(2026-10-20 13:30 UTC),
        insurance: 50_000,
    }
}

#[tokio::test]
async fn quote_uses_the_loaded_vehicle_price() {
    let app = TestApp::spawn().await.unwrap();
    mount_lists(&app, json!([])).await;

    let mut screen = ReservationsScreen::new(app.context().unwrap());
    screen.load().await;
    assert_eq!(screen.vehicles.len(), 2);

    let quote = screen.quote(&form("v2")).unwrap();
    assert_eq!(quote.hours, 6);
    assert_eq!(quote.rental_cost, 180_000);
    assert_eq!(quote.total, 230_000);

    assert!(screen.quote(&form("missing")).is_none());
}

#[tokio::test]
async fn reservation_is_posted_with_iso_times() {
    let app = TestApp::spawn().await.unwrap();
    mount_lists(&app, json!({ "data": [] })).await;
    Mock::given(method("POST"))
        .and(path("/renter/reservations"))
        .and(body_partial_json(json!({
            "vehicleId": "v1",
            "reservedStartTime": "2026-10-20T08:00:00Z",
            "insurance": 50_000,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": reservation_json("res9", renter_json("r1"), vehicle_json("v1", "car", 100_000), "pending")
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut screen = ReservationsScreen::new(app.context().unwrap());
    screen.load().await;

    assert_eq!(screen.create(&form("v1")).await, Submit::Done);
    assert_eq!(app.last_message().as_deref(), Some(messages::RESERVATION_CREATED));
}

#[tokio::test]
async fn reversed_window_never_reaches_the_backend() {
    let app = TestApp::spawn().await.unwrap();
    let mut screen = ReservationsScreen::new(app.context().unwrap());

    let mut reversed = form("v1");
    std::mem::swap(&mut reversed.reserved_start_time, &mut reversed.reserved_end_time);

    assert!(matches!(screen.create(&reversed).await, Submit::Rejected(_)));
    assert!(app.requests("POST").await.is_empty());
}

#[tokio::test]
async fn only_open_reservations_can_be_cancelled() {
    let app = TestApp::spawn().await.unwrap();
    let vehicle = vehicle_json("v1", "car", 100_000);
    mount_lists(
        &app,
        json!([
            reservation_json("res1", renter_json("r1"), vehicle.clone(), "pending"),
            reservation_json("res2", renter_json("r1"), vehicle, "completed"),
        ]),
    )
    .await;
    Mock::given(method("PATCH"))
        .and(path("/renter/reservations/res1/cancel"))
        .and(body_partial_json(json!({ "reason": "Đổi lịch" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut screen = ReservationsScreen::new(app.context().unwrap());
    screen.load().await;

    assert!(!screen.cancel("res2", "Đổi lịch").await);
    assert_eq!(app.last_message().as_deref(), Some(messages::NOT_CANCELLABLE));

    assert!(screen.cancel("res1", "Đổi lịch").await);
    assert_eq!(app.last_message().as_deref(), Some(messages::RESERVATION_CANCELLED));

    screen.status = Choice::Only(ReservationStatus::Completed);
    assert_eq!(screen.visible().len(), 1);
}
