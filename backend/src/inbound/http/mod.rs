//! HTTP inbound adapter exposing the `/api/v1` REST endpoints.
//!
//! Handlers parse and validate input, resolve the session player, call a
//! driving port from [`state::HttpState`] and map the outcome to JSON.

pub mod collections;
pub mod error;
pub mod game;
pub mod health;
pub mod rankings;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub(crate) mod validation;

pub use error::ApiResult;
