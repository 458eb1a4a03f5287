mod helpers;
use evrent_client::domain::Role;
use evrent_client::forms::PersonnelForm;
use evrent_client::messages;
use evrent_client::screens::{PersonnelScreen, Submit};
use helpers::{station_json, user_json, TestApp};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn form(email: &str) -> PersonnelForm {
    PersonnelForm {
        full_name: "Lê Văn Cường".into(),
        email: email.into(),
        phone: "0912345678".into(),
        password: "matkhau123".into(),
        role: Role::Staff,
        station_id: Some("s1".into()),
    }
}

async fn mount_lists(app: &TestApp, users: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([station_json("s1", "Trạm Quận 1")])),
        )
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn duplicate_email_is_refused_without_a_request() {
    let app = TestApp::spawn().await.unwrap();
    let mut staff = user_json("u1", "staff");
    staff["email"] = json!("cuong@evrent.vn");
    mount_lists(&app, json!([staff])).await;

    let mut screen = PersonnelScreen::new(app.context().unwrap());
    screen.load().await;

    let outcome = screen.create(&form("  Cuong@EVRENT.vn ")).await;

    assert!(matches!(outcome, Submit::Rejected(_)));
    assert_eq!(outcome.errors()[0].field, "email");
    assert_eq!(app.last_message().as_deref(), Some(messages::EMAIL_EXISTS));
    assert!(app.requests("POST").await.is_empty());
}

#[tokio::test]
async fn invalid_fields_are_reported_per_field() {
    let app = TestApp::spawn().await.unwrap();
    mount_lists(&app, json!([])).await;

    let mut screen = PersonnelScreen::new(app.context().unwrap());
    screen.load().await;

    let mut bad = form("moi@evrent.vn");
    bad.phone = "12345".into();
    bad.password = "short".into();
    let outcome = screen.create(&bad).await;

    let fields: Vec<&str> = outcome.errors().iter().map(|x| x.field.as_str()).collect();
    assert_eq!(fields, vec!["password", "phone"]);
    assert!(app.requests("POST").await.is_empty());
}

#[tokio::test]
async fn created_account_shows_up_after_reload() {
    let app = TestApp::spawn().await.unwrap();
    let mut created = user_json("u9", "staff");
    created["email"] = json!("moi@evrent.vn");
    created["stationId"] = json!("s1");

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    mount_lists(&app, json!([created.clone()])).await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": created })))
        .expect(1)
        .mount(&app.server)
        .await;

    let mut screen = PersonnelScreen::new(app.context().unwrap());
    screen.load().await;
    assert!(screen.users.is_empty());

    assert_eq!(screen.create(&form("moi@evrent.vn")).await, Submit::Done);
    assert_eq!(screen.users.len(), 1);
    assert_eq!(screen.station_name("s1"), Some("Trạm Quận 1"));
    assert_eq!(app.last_message().as_deref(), Some(messages::USER_CREATED));

    let body: serde_json::Value = app.requests("POST").await[0].body_json().unwrap();
    assert_eq!(body["fullName"], "Lê Văn Cường");
    assert_eq!(body["stationId"], "s1");
}
