//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test};
use serde_json::Value;

use crate::domain::ports::{
    MockAccountCommand, MockAccountQuery, MockGameCommand, MockRankingQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Player id stored by [`establish_session`].
pub const TEST_PLAYER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mock ports for handler tests; set expectations, then call [`Self::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub game: MockGameCommand,
    pub rankings: MockRankingQuery,
    pub accounts: MockAccountCommand,
    pub profiles: MockAccountQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.game),
            Arc::new(self.rankings),
            Arc::new(self.accounts),
            Arc::new(self.profiles),
        )
    }
}

/// Fixture handler that logs [`TEST_PLAYER_ID`] in; mount it at `/test/session`.
pub async fn establish_session(session: SessionContext) -> Result<HttpResponse, Error> {
    let id = UserId::new(TEST_PLAYER_ID).map_err(|err| Error::internal(err.to_string()))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Call `/test/session` and return the issued cookie.
pub async fn session_cookie_for<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::get().uri("/test/session").to_request(),
    )
    .await;
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Decode a JSON response body.
pub async fn json_body(response: ServiceResponse) -> Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}
