//! Collection HTTP handler.
//!
//! ```text
//! GET /api/v1/collections
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CollectionItem, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Catalogue entry with the caller's ownership flag.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    #[schema(example = "0b6b9a8e-2f1d-4c55-9d3b-6f0e5f7b8a11")]
    pub id: String,
    #[schema(example = "Golden Koi")]
    pub name: String,
    #[schema(example = 5)]
    pub rarity: u8,
    pub owned: bool,
}

impl From<CollectionItem> for CollectionEntry {
    fn from(value: CollectionItem) -> Self {
        Self {
            id: value.collectible.id().to_string(),
            name: value.collectible.name().to_owned(),
            rarity: value.collectible.rarity().value(),
            owned: value.owned,
        }
    }
}

/// Whole catalogue in catalogue order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub collections: Vec<CollectionEntry>,
}

/// List every collectible with the caller's ownership flag.
#[utoipa::path(
    get,
    path = "/api/v1/collections",
    responses(
        (status = 200, description = "Catalogue with ownership flags", body = CollectionResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listCollection"
)]
#[get("/collections")]
pub async fn list_collection(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CollectionResponse>> {
    let identity = session.require_identity()?;
    let items = state.profiles.collection(identity).await?;
    Ok(web::Json(CollectionResponse {
        collections: items.into_iter().map(CollectionEntry::from).collect(),
    }))
}
