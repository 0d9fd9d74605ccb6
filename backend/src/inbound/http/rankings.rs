//! Leaderboard HTTP handler.
//!
//! ```text
//! GET /api/v1/rankings?start=1
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, RankingEntry, StartRank};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_i64, start_rank_error};

/// Query string for `GET /api/v1/rankings`.
///
/// `start` is kept as text so that a non-numeric value yields the same
/// structured `400` as a missing one.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingsQuery {
    /// 1-based rank of the first row; pages hold up to ten rows.
    #[param(example = "1")]
    pub start: Option<String>,
}

/// One leaderboard row.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    #[schema(example = "ada")]
    pub name: String,
    #[schema(example = 1200)]
    pub score: u32,
    #[schema(example = 1)]
    pub rank: u32,
}

impl From<RankingEntry> for RankingRow {
    fn from(value: RankingEntry) -> Self {
        Self {
            name: value.username,
            score: value.score,
            rank: value.rank,
        }
    }
}

/// A page of the leaderboard.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    pub rankings: Vec<RankingRow>,
}

/// List up to ten leaderboard rows starting at `start`.
#[utoipa::path(
    get,
    path = "/api/v1/rankings",
    params(RankingsQuery),
    responses(
        (status = 200, description = "Leaderboard page", body = RankingsResponse),
        (status = 400, description = "Invalid start rank", body = Error),
        (status = 404, description = "Start rank beyond the board", body = Error),
        (status = 503, description = "Leaderboard unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["rankings"],
    operation_id = "listRankings",
    security([])
)]
#[get("/rankings")]
pub async fn list_rankings(
    state: web::Data<HttpState>,
    query: web::Query<RankingsQuery>,
) -> ApiResult<web::Json<RankingsResponse>> {
    let raw = parse_required_i64(query.start.as_deref(), FieldName::new("start"))?;
    let start = StartRank::new(raw).map_err(|err| start_rank_error(&err))?;
    let entries = state.rankings.list_rankings(start).await?;
    Ok(web::Json(RankingsResponse {
        rankings: entries.into_iter().map(RankingRow::from).collect(),
    }))
}

#[cfg(test)]
mod tests;
