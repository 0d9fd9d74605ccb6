//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response DTOs, and the session cookie security scheme. Swagger
//! UI serves it in debug builds; `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::collections::{CollectionEntry, CollectionResponse};
use crate::inbound::http::game::{
    DrawGachaBody, DrawGachaResponse, DrawnItem, FinishGameBody, FinishGameResponse,
};
use crate::inbound::http::rankings::{RankingRow, RankingsResponse};
use crate::inbound::http::users::{
    CredentialsRequest, ProfileResponse, RenameRequest, SessionResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or POST /api/v1/users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Arcade backend API",
        description = "Score submission, coin economy, gacha draws and leaderboard for session-authenticated players."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::rename_current_user,
        crate::inbound::http::collections::list_collection,
        crate::inbound::http::game::finish_game,
        crate::inbound::http::game::draw_gacha,
        crate::inbound::http::rankings::list_rankings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsRequest,
        RenameRequest,
        SessionResponse,
        ProfileResponse,
        CollectionEntry,
        CollectionResponse,
        FinishGameBody,
        FinishGameResponse,
        DrawGachaBody,
        DrawnItem,
        DrawGachaResponse,
        RankingRow,
        RankingsResponse,
    )),
    tags(
        (name = "users", description = "Registration, login and profile"),
        (name = "collections", description = "Catalogue with ownership flags"),
        (name = "game", description = "Score submission and gacha draws"),
        (name = "rankings", description = "Leaderboard pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
