//! Tests for game economy handlers.

use super::*;
use crate::domain::{Collectible, CollectibleId, PlayerIdentity, Rarity, UserId, Weight};
use crate::inbound::http::test_utils::{
    MockPorts, TEST_PLAYER_ID, establish_session, json_body, session_cookie_for,
    test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

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
        .route("/test/session", web::get().to(establish_session))
        .service(web::scope("/api/v1").service(finish_game).service(draw_gacha))
}

fn player() -> PlayerIdentity {
    PlayerIdentity::new(UserId::new(TEST_PLAYER_ID).expect("fixture id"))
}

fn koi() -> Collectible {
    Collectible::new(
        CollectibleId::random(),
        "Golden Koi",
        Rarity::new(5).expect("rarity"),
        Weight::new(1).expect("weight"),
    )
    .expect("collectible")
}

async fn post_json<S>(app: &S, uri: &str, payload: Value, logged_in: bool) -> actix_web::dev::ServiceResponse
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(payload);
    if logged_in {
        request = request.cookie(session_cookie_for(app).await);
    }
    actix_test::call_service(app, request.to_request()).await
}

#[actix_web::test]
async fn finish_game_reports_reward_and_balance() {
    let mut ports = MockPorts::default();
    ports
        .game
        .expect_finish_game()
        .withf(|request| request.identity == player() && request.score.value() == 1200)
        .times(1)
        .returning(|_| {
            Ok(FinishGameOutcome {
                coins_awarded: 2500,
                high_score: 1200,
                coins: 2900,
                leaderboard: LeaderboardSync::Updated,
            })
        });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/game/finish", json!({"score": 1200}), true).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["coinsAwarded"], 2500);
    assert_eq!(body["coins"], 2900);
    assert_eq!(body["highScore"], 1200);
    assert_eq!(body["leaderboardUpdated"], true);
}

#[actix_web::test]
async fn stale_leaderboard_still_succeeds() {
    let mut ports = MockPorts::default();
    ports.game.expect_finish_game().returning(|_| {
        Ok(FinishGameOutcome {
            coins_awarded: 100,
            high_score: 0,
            coins: 100,
            leaderboard: LeaderboardSync::Stale {
                error: "connection refused".to_owned(),
            },
        })
    });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/game/finish", json!({"score": 0}), true).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["leaderboardUpdated"], false);
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({"score": -1}), "out_of_range")]
#[case(json!({"score": 2_147_483_648_i64}), "out_of_range")]
#[actix_web::test]
async fn finish_game_rejects_bad_scores(#[case] payload: Value, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.game.expect_finish_game().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/game/finish", payload, true).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["field"], "score");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case("/api/v1/game/finish", json!({"score": 10}))]
#[case("/api/v1/gacha/draw", json!({"times": 1}))]
#[actix_web::test]
async fn game_endpoints_require_a_session(#[case] uri: &str, #[case] payload: Value) {
    let mut ports = MockPorts::default();
    ports.game.expect_finish_game().never();
    ports.game.expect_draw_gacha().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, uri, payload, false).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn draw_returns_items_in_draw_order() {
    let item = koi();
    let expected_id = item.id().to_string();
    let mut ports = MockPorts::default();
    ports
        .game
        .expect_draw_gacha()
        .withf(|request| request.identity == player() && request.times.value() == 2)
        .times(1)
        .returning(move |_| {
            Ok(DrawGachaOutcome {
                results: vec![
                    GachaResult {
                        collectible: item.clone(),
                        is_new: true,
                    },
                    GachaResult {
                        collectible: item.clone(),
                        is_new: true,
                    },
                ],
                coins: 0,
            })
        });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/gacha/draw", json!({"times": 2}), true).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["coins"], 0);
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    for result in results {
        assert_eq!(result["id"], expected_id.as_str());
        assert_eq!(result["name"], "Golden Koi");
        assert_eq!(result["rarity"], 5);
        assert_eq!(result["isNew"], true);
    }
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({"times": -1}), "out_of_range")]
#[case(json!({"times": 11}), "out_of_range")]
#[actix_web::test]
async fn draw_rejects_bad_counts(#[case] payload: Value, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.game.expect_draw_gacha().never();
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/gacha/draw", payload, true).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["field"], "times");
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn insufficient_coins_is_a_conflict_with_balance_details() {
    let mut ports = MockPorts::default();
    ports.game.expect_draw_gacha().returning(|_| {
        Err(Error::conflict("insufficient coins").with_details(json!({
            "code": "insufficient_coins",
            "balance": 50,
            "required": 100,
        })))
    });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/gacha/draw", json!({"times": 1}), true).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["details"]["code"], "insufficient_coins");
    assert_eq!(body["details"]["balance"], 50);
}

#[actix_web::test]
async fn draw_failures_are_redacted() {
    let mut ports = MockPorts::default();
    ports.game.expect_draw_gacha().returning(|_| {
        Err(Error::internal("catalogue is empty")
            .with_details(json!({"code": "draw_failure"})))
    });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = post_json(&app, "/api/v1/gacha/draw", json!({"times": 1}), true).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Internal server error");
}
