//! Game economy HTTP handlers.
//!
//! ```text
//! POST /api/v1/game/finish {"score":1200}
//! POST /api/v1/gacha/draw {"times":10}
//! ```
//!
//! Both endpoints act on the session's player only; the body never names a
//! player.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    DrawGachaOutcome, DrawGachaRequest, FinishGameOutcome, FinishGameRequest, LeaderboardSync,
};
use crate::domain::{DrawCount, Error, GachaResult, Score};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, draw_count_error, missing_field_error, score_error,
};

/// Body for `POST /api/v1/game/finish`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinishGameBody {
    #[schema(example = 1200)]
    pub score: Option<i64>,
}

/// Result of a finished game.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinishGameResponse {
    #[schema(example = 2500)]
    pub coins_awarded: u64,
    #[schema(example = 2900)]
    pub coins: u64,
    #[schema(example = 1200)]
    pub high_score: u32,
    /// `false` when the score was saved but the leaderboard write failed.
    pub leaderboard_updated: bool,
}

impl From<FinishGameOutcome> for FinishGameResponse {
    fn from(value: FinishGameOutcome) -> Self {
        Self {
            coins_awarded: value.coins_awarded,
            coins: value.coins,
            high_score: value.high_score,
            leaderboard_updated: matches!(value.leaderboard, LeaderboardSync::Updated),
        }
    }
}

/// Body for `POST /api/v1/gacha/draw`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawGachaBody {
    #[schema(example = 10)]
    pub times: Option<i64>,
}

/// One drawn collectible.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawnItem {
    #[schema(example = "0b6b9a8e-2f1d-4c55-9d3b-6f0e5f7b8a11")]
    pub id: String,
    #[schema(example = "Golden Koi")]
    pub name: String,
    #[schema(example = 5)]
    pub rarity: u8,
    /// Not owned before this request.
    pub is_new: bool,
}

impl From<GachaResult> for DrawnItem {
    fn from(value: GachaResult) -> Self {
        Self {
            id: value.collectible.id().to_string(),
            name: value.collectible.name().to_owned(),
            rarity: value.collectible.rarity().value(),
            is_new: value.is_new,
        }
    }
}

/// Draw results in draw order plus the balance after the debit.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawGachaResponse {
    pub results: Vec<DrawnItem>,
    #[schema(example = 0)]
    pub coins: u64,
}

impl From<DrawGachaOutcome> for DrawGachaResponse {
    fn from(value: DrawGachaOutcome) -> Self {
        Self {
            results: value.results.into_iter().map(DrawnItem::from).collect(),
            coins: value.coins,
        }
    }
}

fn parse_score(body: FinishGameBody) -> Result<Score, Error> {
    let raw = body
        .score
        .ok_or_else(|| missing_field_error(FieldName::new("score")))?;
    Score::new(raw).map_err(|err| score_error(&err))
}

fn parse_times(body: DrawGachaBody) -> Result<DrawCount, Error> {
    let raw = body
        .times
        .ok_or_else(|| missing_field_error(FieldName::new("times")))?;
    DrawCount::new(raw).map_err(|err| draw_count_error(&err))
}

/// Record a finished game and credit its reward.
#[utoipa::path(
    post,
    path = "/api/v1/game/finish",
    request_body = FinishGameBody,
    responses(
        (status = 200, description = "Score recorded", body = FinishGameResponse),
        (status = 400, description = "Invalid score", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Player not found", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["game"],
    operation_id = "finishGame"
)]
#[post("/game/finish")]
pub async fn finish_game(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FinishGameBody>,
) -> ApiResult<web::Json<FinishGameResponse>> {
    let identity = session.require_identity()?;
    let score = parse_score(payload.into_inner())?;
    let outcome = state
        .game
        .finish_game(FinishGameRequest { identity, score })
        .await?;
    Ok(web::Json(FinishGameResponse::from(outcome)))
}

/// Draw from the gacha pool.
#[utoipa::path(
    post,
    path = "/api/v1/gacha/draw",
    request_body = DrawGachaBody,
    responses(
        (status = 200, description = "Items drawn", body = DrawGachaResponse),
        (status = 400, description = "Invalid draw count", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Player not found", body = Error),
        (status = 409, description = "Insufficient coins", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["game"],
    operation_id = "drawGacha"
)]
#[post("/gacha/draw")]
pub async fn draw_gacha(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DrawGachaBody>,
) -> ApiResult<web::Json<DrawGachaResponse>> {
    let identity = session.require_identity()?;
    let times = parse_times(payload.into_inner())?;
    let outcome = state
        .game
        .draw_gacha(DrawGachaRequest { identity, times })
        .await?;
    Ok(web::Json(DrawGachaResponse::from(outcome)))
}

#[cfg(test)]
mod tests;
