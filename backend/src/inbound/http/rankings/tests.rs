//! Tests for the leaderboard handler.

use super::*;
use crate::inbound::http::test_utils::{MockPorts, json_body};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::json;

async fn get_rankings(ports: MockPorts, uri: &str) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/api/v1").service(list_rankings)),
    )
    .await;
    actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await
}

#[actix_web::test]
async fn returns_ranked_rows() {
    let mut ports = MockPorts::default();
    ports
        .rankings
        .expect_list_rankings()
        .withf(|start| start.value() == 11)
        .times(1)
        .returning(|_| {
            Ok(vec![
                RankingEntry {
                    username: "ada".to_owned(),
                    score: 900,
                    rank: 11,
                },
                RankingEntry {
                    username: "grace".to_owned(),
                    score: 850,
                    rank: 12,
                },
            ])
        });

    let response = get_rankings(ports, "/api/v1/rankings?start=11").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({"rankings": [
            {"name": "ada", "score": 900, "rank": 11},
            {"name": "grace", "score": 850, "rank": 12},
        ]})
    );
}

#[rstest]
#[case("/api/v1/rankings", "missing_field")]
#[case("/api/v1/rankings?start=abc", "invalid_number")]
#[case("/api/v1/rankings?start=0", "out_of_range")]
#[case("/api/v1/rankings?start=-4", "out_of_range")]
#[actix_web::test]
async fn rejects_invalid_start(#[case] uri: &str, #[case] code: &str) {
    let mut ports = MockPorts::default();
    ports.rankings.expect_list_rankings().never();

    let response = get_rankings(ports, uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["details"]["field"], "start");
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn start_beyond_the_board_is_not_found() {
    let mut ports = MockPorts::default();
    ports.rankings.expect_list_rankings().returning(|_| {
        Err(Error::not_found("no rankings at this position")
            .with_details(json!({"code": "empty_range", "start": 5, "total": 3})))
    });

    let response = get_rankings(ports, "/api/v1/rankings?start=5").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["details"]["code"], "empty_range");
    assert_eq!(body["details"]["total"], 3);
}

#[actix_web::test]
async fn unreachable_board_is_unavailable() {
    let mut ports = MockPorts::default();
    ports
        .rankings
        .expect_list_rankings()
        .returning(|_| Err(Error::service_unavailable("redis: connection refused")));

    let response = get_rankings(ports, "/api/v1/rankings?start=1").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Service temporarily unavailable");
}
