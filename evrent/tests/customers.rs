mod helpers;
use evrent_client::filter::Choice;
use evrent_client::messages;
use evrent_client::screens::CustomersScreen;
use helpers::{renter_json, TestApp, TOKEN};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn toggle_twice_restores_the_status() {
    let app = TestApp::spawn().await.unwrap();
    let mut customer = renter_json("u1");

    let mut responses = Vec::new();
    for active in [true, false, true] {
        customer["isActive"] = json!(active);
        responses.push(json!([customer.clone()]));
    }
    for body in responses {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("role", "renter"))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(&app.server)
            .await;
    }
    Mock::given(method("PATCH"))
        .and(path("/users/u1/toggle-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(2)
        .mount(&app.server)
        .await;

    let mut screen = CustomersScreen::new(app.context().unwrap());
    screen.load().await;
    assert!(screen.find("u1").unwrap().is_active);

    assert!(screen.toggle_status("u1").await);
    assert!(!screen.find("u1").unwrap().is_active);
    assert_eq!(app.last_message().as_deref(), Some(messages::STATUS_UPDATED));

    assert!(screen.toggle_status("u1").await);
    assert!(screen.find("u1").unwrap().is_active);
}

#[tokio::test]
async fn server_message_is_shown_when_an_action_fails() {
    let app = TestApp::spawn().await.unwrap();

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "users": [renter_json("u1")] })),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1/verify"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Chưa tải lên giấy tờ" })),
        )
        .mount(&app.server)
        .await;

    let mut screen = CustomersScreen::new(app.context().unwrap());
    screen.load().await;
    assert_eq!(screen.customers.len(), 1);

    assert!(!screen.verify("u1").await);
    let toast = app.last_toast().unwrap();
    assert!(toast.is_destructive());
    assert_eq!(toast.description.as_deref(), Some("Chưa tải lên giấy tờ"));
    assert!(!screen.find("u1").unwrap().is_verified());
}

#[tokio::test]
async fn failed_load_keeps_the_list_and_falls_back_to_the_local_message() {
    let app = TestApp::spawn().await.unwrap();

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [renter_json("u1")] })))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&app.server)
        .await;

    let mut screen = CustomersScreen::new(app.context().unwrap());
    screen.load().await;
    screen.load().await;

    assert_eq!(screen.customers.len(), 1);
    assert_eq!(app.last_message().as_deref(), Some(messages::LOAD_USERS_FAILED));
}

#[tokio::test]
async fn filters_and_stats_work_on_the_loaded_list() {
    let app = TestApp::spawn().await.unwrap();
    let mut verified = renter_json("u1");
    verified["fullName"] = json!("Nguyễn Văn An");
    verified["verification"] = json!({ "verified": true, "documentUrl": "/uploads/u1.png" });
    let mut locked = renter_json("u2");
    locked["fullName"] = json!("Trần Thị Bình");
    locked["isActive"] = json!(false);

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([verified, locked])))
        .mount(&app.server)
        .await;

    let mut screen = CustomersScreen::new(app.context().unwrap());
    screen.load().await;

    let stats = screen.stats();
    assert_eq!((stats.total, stats.verified, stats.active, stats.locked), (2, 1, 1, 1));

    screen.search = "  nguyễn ".into();
    assert_eq!(screen.visible().len(), 1);

    screen.search.clear();
    screen.status = Choice::Only(false);
    assert_eq!(screen.visible()[0].id, "u2");

    let user = screen.find("u1").unwrap();
    assert_eq!(
        screen.document_url(user).as_deref(),
        Some("http://assets.test/uploads/u1.png")
    );
}
