//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/users {"email":"ada@example.com","password":"correct horse"}
//! POST /api/v1/login {"email":"ada@example.com","password":"correct horse"}
//! GET  /api/v1/users/me
//! PUT  /api/v1/users/me {"displayName":"Ada"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Credentials, DisplayName, Error, PlayerProfile, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, user_input_error};

/// Credentials body shared by registration and login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse")]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn into_parts(self) -> Result<(String, String), Error> {
        let email = self
            .email
            .ok_or_else(|| missing_field_error(FieldName::new("email")))?;
        let password = self
            .password
            .ok_or_else(|| missing_field_error(FieldName::new("password")))?;
        Ok((email, password))
    }
}

/// Body for `PUT /api/v1/users/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    #[schema(example = "Ada")]
    pub display_name: Option<String>,
}

/// Session owner returned after registration or login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

impl From<UserId> for SessionResponse {
    fn from(value: UserId) -> Self {
        Self {
            id: value.to_string(),
        }
    }
}

/// Profile of the calling player.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "ada")]
    pub display_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 400)]
    pub coins: u64,
    #[schema(example = 1200)]
    pub high_score: u32,
}

impl From<PlayerProfile> for ProfileResponse {
    fn from(value: PlayerProfile) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name.to_string(),
            email: value.email,
            coins: value.coins,
            high_score: value.high_score,
        }
    }
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let (email, password) = payload.into_inner().into_parts()?;
    let credentials =
        Credentials::for_registration(&email, &password).map_err(|err| user_input_error(&err))?;
    let user_id = state.accounts.register(credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Created().json(SessionResponse::from(user_id)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let (email, password) = payload.into_inner().into_parts()?;
    let credentials =
        Credentials::for_login(&email, &password).map_err(|err| user_input_error(&err))?;
    let user_id = state.accounts.login(credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(user_id)))
}

/// Profile of the logged-in player.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Player not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let profile = state.profiles.profile(identity).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

/// Change the logged-in player's display name.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = RenameRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid display name", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Player not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "renameCurrentUser"
)]
#[put("/users/me")]
pub async fn rename_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RenameRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let raw = payload
        .into_inner()
        .display_name
        .ok_or_else(|| missing_field_error(FieldName::new("displayName")))?;
    let display_name = DisplayName::new(raw).map_err(|err| user_input_error(&err))?;
    let profile = state.accounts.rename(identity, display_name).await?;
    Ok(web::Json(ProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests;
