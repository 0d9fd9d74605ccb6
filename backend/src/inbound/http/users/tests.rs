//! Tests for account handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::test_utils::{
    MockPorts, TEST_PLAYER_ID as PLAYER_ID, json_body, test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

fn player_id() -> UserId {
    UserId::new(PLAYER_ID).expect("fixture id")
}

fn profile(display_name: &str) -> PlayerProfile {
    PlayerProfile {
        id: player_id(),
        display_name: DisplayName::new(display_name).expect("fixture name"),
        email: "ada@example.com".to_owned(),
        coins: 400,
        high_score: 1200,
    }
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(register)
                .service(login)
                .service(current_user)
                .service(rename_current_user),
        )
}

fn session_cookie(response: &actix_web::dev::ServiceResponse) -> actix_web::cookie::Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn logged_in_ports() -> MockPorts {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_login()
        .returning(|_| Ok(player_id()));
    ports
}

#[actix_web::test]
async fn register_creates_account_and_session() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .withf(|credentials| credentials.email().as_str() == "ada@example.com")
        .times(1)
        .returning(|_| Ok(player_id()));
    ports
        .profiles
        .expect_profile()
        .withf(|identity| identity.user_id().as_ref() == PLAYER_ID)
        .returning(|_| Ok(profile("ada")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    assert_eq!(json_body(response).await["id"], PLAYER_ID);

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let body = json_body(me).await;
    assert_eq!(body["displayName"], "ada");
    assert_eq!(body["coins"], 400);
    assert_eq!(body["highScore"], 1200);
}

#[rstest]
#[case(json!({"password": "correct horse"}), "email", "missing_field")]
#[case(json!({"email": "ada@example.com"}), "password", "missing_field")]
#[case(json!({"email": "nobody", "password": "correct horse"}), "email", "invalid_email")]
#[case(json!({"email": "ada@example.com", "password": "short"}), "password", "password_too_short")]
#[actix_web::test]
async fn register_rejects_invalid_input(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::default();
    ports.accounts.expect_register().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn register_surfaces_duplicate_email_as_conflict() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_register()
        .returning(|_| Err(Error::conflict("email already registered")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.response().cookies().next().is_none());
}

#[actix_web::test]
async fn login_accepts_short_existing_passwords() {
    let app = actix_test::init_service(test_app(logged_in_ports())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.com", "password": "x"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let _ = session_cookie(&response);
    assert_eq!(json_body(response).await["id"], PLAYER_ID);
}

#[actix_web::test]
async fn login_rejects_wrong_password() {
    let mut ports = MockPorts::default();
    ports
        .accounts
        .expect_login()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.com", "password": "wrong"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn profile_requires_a_session() {
    let mut ports = MockPorts::default();
    ports.profiles.expect_profile().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Error = serde_json::from_value(json_body(response).await).expect("error body");
    assert_eq!(body.code(), ErrorCode::Unauthorized);
}

async fn logged_in_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
            .to_request(),
    )
    .await;
    session_cookie(&response)
}

#[actix_web::test]
async fn rename_returns_the_updated_profile() {
    let mut ports = logged_in_ports();
    ports
        .accounts
        .expect_rename()
        .withf(|identity, name| identity.user_id().as_ref() == PLAYER_ID && name.as_ref() == "Ada L")
        .times(1)
        .returning(|_, name| Ok(profile(name.as_ref())));
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = logged_in_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(json!({"displayName": "Ada L"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["displayName"], "Ada L");
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({"displayName": ""}), "invalid_display_name")]
#[case(json!({"displayName": "<script>"}), "invalid_display_name")]
#[actix_web::test]
async fn rename_rejects_invalid_names(#[case] payload: Value, #[case] code: &str) {
    let mut ports = logged_in_ports();
    ports.accounts.expect_rename().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let cookie = logged_in_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["field"], "displayName");
    assert_eq!(body["details"]["code"], code);
}
