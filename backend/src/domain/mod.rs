//! Domain primitives, aggregates and use-case services.
//!
//! Purpose: define strongly typed game economy entities used by the API and
//! persistence layers, plus the services that implement the driving ports.
//! Types validate on construction; invariants are documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - PlayerAccount, Collectible, Catalog, Score: ledger and catalogue types.
//! - GameEconomyService, RankingService, AccountService, CatalogLoader:
//!   use-case services wired by the server.

pub mod collectible;
pub mod economy;
pub mod error;
pub mod gacha;
pub mod ownership;
pub mod ports;
pub mod ranking;
pub mod score;
pub mod trace_id;
pub mod user;

mod account_service;
mod catalog_service;
mod game_service;
mod ranking_service;

pub use self::account_service::AccountService;
pub use self::catalog_service::CatalogLoader;
pub use self::collectible::{
    Catalog, Collectible, CollectibleId, CollectibleValidationError, RARITY_MAX, Rarity, Weight,
};
pub use self::economy::{
    DEFAULT_BASE_REWARD, DEFAULT_DRAW_COST, DEFAULT_SCORE_MULTIPLIER, DrawCount,
    DrawCountValidationError, EconomyPolicy, MAX_DRAWS_PER_REQUEST,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::gacha::{DrawFailure, GachaResult};
pub use self::game_service::GameEconomyService;
pub use self::ownership::{CollectionItem, Ownership};
pub use self::ranking::{
    LeaderboardEntry, LeaderboardKey, RANKING_PAGE_SIZE, RankingEntry, StartRank,
    StartRankValidationError,
};
pub use self::ranking_service::RankingService;
pub use self::score::{SCORE_MAX, Score, ScoreEvent, ScoreValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{
    CredentialHash, Credentials, DISPLAY_NAME_MAX, DisplayName, EmailAddress, InsufficientCoins,
    PASSWORD_MIN, PlayerAccount, PlayerIdentity, PlayerProfile, UserId, UserValidationError,
};
