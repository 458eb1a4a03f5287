mod helpers;
use evrent_client::domain::{PaymentMethod, PaymentStatus};
use evrent_client::filter::Choice;
use evrent_client::messages;
use evrent_client::screens::PaymentsScreen;
use helpers::{rental_json, TestApp};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn settled(id: &str, status: &str, total: u64) -> serde_json::Value {
    let mut rental = rental_json(id, status, "held");
    rental["totalCost"] = json!(total);
    rental
}

#[tokio::test]
async fn only_rentals_at_the_counter_become_payments() {
    let app = TestApp::spawn().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/staff/rentals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rentals": [
                settled("p1", "waiting_for_payment", 400_000),
                settled("p2", "returned", 250_000),
                settled("p3", "waiting_for_payment", 150_000),
                rental_json("u1", "in_use", "held"),
                rental_json("b1", "booked", "pending"),
            ]
        })))
        .mount(&app.server)
        .await;

    let mut screen = PaymentsScreen::new(app.context().unwrap());
    screen.load().await;

    let payments = screen.payments();
    assert_eq!(payments.len(), 3);
    assert_eq!(screen.outstanding(), 550_000);

    screen.status = Choice::Only(PaymentStatus::Paid);
    let paid = screen.visible();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].rental_id, "p2");
    assert_eq!(paid[0].amount, 250_000);

    screen.status = Choice::All;
    screen.search = "P3".into();
    assert_eq!(screen.visible().len(), 1);
}

#[tokio::test]
async fn cash_payment_settles_and_refreshes() {
    let app = TestApp::spawn().await.unwrap();
    Mock::given(method("GET"))
        .and(path("/staff/rentals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([settled("p1", "waiting_for_payment", 400_000)])),
        )
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/staff/rentals"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([settled("p1", "returned", 400_000)])),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/staff/rentals/p1/bill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rentalId": "p1",
            "rentalCost": 400_000,
            "violationCost": 0,
            "totalCost": 400_000,
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/staff/rentals/p1/payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "method": "cash", "amount": 400_000, "status": "paid" }
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut screen = PaymentsScreen::new(app.context().unwrap());
    screen.load().await;
    assert_eq!(screen.outstanding(), 400_000);

    let bill = screen.load_bill("p1").await.unwrap();
    assert_eq!(bill.total_cost, 400_000);
    assert_eq!(bill.amount_due, None);

    let receipt = screen.pay("p1", PaymentMethod::Cash).await.unwrap();
    assert_eq!(receipt.status, PaymentStatus::Paid);
    assert!(receipt.checkout_url.is_none());
    assert!(screen.bill.is_none());
    assert_eq!(screen.outstanding(), 0);
    assert_eq!(app.last_message().as_deref(), Some(messages::PAYMENT_DONE));
}

#[tokio::test]
async fn failed_payment_reports_the_backend_message() {
    let app = TestApp::spawn().await.unwrap();
    Mock::given(method("POST"))
        .and(path("/staff/rentals/p1/payment"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({ "message": "Không thể tạo liên kết PayOS" })),
        )
        .mount(&app.server)
        .await;

    let mut screen = PaymentsScreen::new(app.context().unwrap());
    assert!(screen.pay("p1", PaymentMethod::Payos).await.is_none());

    let toast = app.last_toast().unwrap();
    assert!(toast.is_destructive());
    assert_eq!(toast.description.as_deref(), Some("Không thể tạo liên kết PayOS"));
}
