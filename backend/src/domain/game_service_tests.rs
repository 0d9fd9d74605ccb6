//! Tests for the game economy service.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::collectible::test_support::item;
use crate::domain::ports::{
    CacheKey, CatalogCache, LeaderboardRepositoryError, MockLeaderboardRepository,
};
use crate::domain::{
    CredentialHash, DisplayName, EmailAddress, ErrorCode, PlayerIdentity, Score, StartRank,
};
use crate::outbound::memory::{MemoryCatalogCache, MemoryLeaderboard, MemoryStore};

struct Harness {
    store: MemoryStore,
    cache: MemoryCatalogCache,
    board: MemoryLeaderboard,
    service: GameEconomyService<MemoryStore>,
    identity: PlayerIdentity,
}

async fn seed_player(store: &MemoryStore, coins: u64, high_score: u32) -> PlayerIdentity {
    let email = EmailAddress::new("player@example.com").expect("email");
    let account = PlayerAccount::new(
        UserId::random(),
        DisplayName::from_email(&email),
        email,
        CredentialHash::new("$argon2id$stub"),
    )
    .with_ledger(coins, high_score);
    let identity = PlayerIdentity::new(account.id().clone());
    PlayerRepository::create(store, &account)
        .await
        .expect("seed player");
    identity
}

async fn harness_with(
    items: Vec<Collectible>,
    coins: u64,
    high_score: u32,
    leaderboard: Option<Arc<dyn LeaderboardRepository>>,
) -> Harness {
    let store = MemoryStore::with_catalog(items);
    let cache = MemoryCatalogCache::new();
    let board = MemoryLeaderboard::new();
    let identity = seed_player(&store, coins, high_score).await;
    let leaderboard = leaderboard.unwrap_or_else(|| Arc::new(board.clone()));
    let service = GameEconomyService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        leaderboard,
        CatalogLoader::new(Arc::new(store.clone()), Arc::new(cache.clone())),
        EconomyPolicy::default(),
    );
    Harness {
        store,
        cache,
        board,
        service,
        identity,
    }
}

async fn balance(harness: &Harness) -> PlayerAccount {
    PlayerRepository::find_by_id(&harness.store, harness.identity.user_id())
        .await
        .expect("read player")
        .expect("player present")
}

fn times(value: i64) -> DrawCount {
    DrawCount::new(value).expect("draw count")
}

#[rstest]
#[case(100, 300, 400, 1000)]
#[case(1200, 2500, 2600, 1200)]
#[case(0, 0, 100, 1000)]
#[tokio::test]
async fn finish_game_credits_reward_and_tracks_high_score(
    #[case] score: u32,
    #[case] awarded: u64,
    #[case] coins: u64,
    #[case] high_score: u32,
) {
    let harness = harness_with(Vec::new(), 100, 1000, None).await;

    let outcome = harness
        .service
        .finish_game(FinishGameRequest {
            identity: harness.identity.clone(),
            score: Score::from(score),
        })
        .await
        .expect("finish game");

    assert_eq!(outcome.coins_awarded, awarded);
    assert_eq!(outcome.coins, coins);
    assert_eq!(outcome.high_score, high_score);
    assert_eq!(outcome.leaderboard, LeaderboardSync::Updated);

    let stored = balance(&harness).await;
    assert_eq!(stored.coins(), coins);
    assert_eq!(stored.high_score(), high_score);
    assert_eq!(harness.store.score_count(harness.identity.user_id()).await, 1);
}

#[tokio::test]
async fn finish_game_posts_submitted_score_to_board() {
    let harness = harness_with(Vec::new(), 0, 5000, None).await;

    harness
        .service
        .finish_game(FinishGameRequest {
            identity: harness.identity.clone(),
            score: Score::from(42),
        })
        .await
        .expect("finish game");

    let page = harness
        .board
        .list(
            &LeaderboardKey::score_board(),
            StartRank::new(1).expect("start"),
        )
        .await
        .expect("board");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].username, "player");
    assert_eq!(page[0].score, 42);
}

#[tokio::test]
async fn finish_game_for_unknown_player_is_not_found() {
    let harness = harness_with(Vec::new(), 0, 0, None).await;
    let stranger = PlayerIdentity::new(UserId::random());

    let err = harness
        .service
        .finish_game(FinishGameRequest {
            identity: stranger.clone(),
            score: Score::from(10),
        })
        .await
        .expect_err("unknown player");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(harness.store.score_count(stranger.user_id()).await, 0);
}

#[tokio::test]
async fn leaderboard_failure_keeps_committed_ledger() {
    let mut leaderboard = MockLeaderboardRepository::new();
    leaderboard
        .expect_create()
        .times(1)
        .return_once(|_, _| Err(LeaderboardRepositoryError::backend("connection reset")));
    let harness = harness_with(Vec::new(), 100, 1000, Some(Arc::new(leaderboard))).await;

    let outcome = harness
        .service
        .finish_game(FinishGameRequest {
            identity: harness.identity.clone(),
            score: Score::from(100),
        })
        .await
        .expect("ledger result still returned");

    assert!(matches!(
        outcome.leaderboard,
        LeaderboardSync::Stale { ref error } if error.contains("connection reset")
    ));
    assert_eq!(outcome.coins, 400);
    assert_eq!(balance(&harness).await.coins(), 400);
}

#[tokio::test]
async fn draw_debits_cost_and_grants_items() {
    let harness = harness_with(vec![item("slime", 1)], 300, 0, None).await;

    let outcome = harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(3),
        })
        .await
        .expect("draw");

    assert_eq!(outcome.coins, 0);
    assert_eq!(outcome.results.len(), 3);
    assert!(
        outcome.results.iter().all(|r| r.is_new),
        "snapshot taken before the call flags every copy as new"
    );
    let rows = harness
        .store
        .list_for_user(harness.identity.user_id())
        .await
        .expect("ownership");
    assert_eq!(rows.len(), 3);
    assert_eq!(balance(&harness).await.coins(), 0);
}

#[tokio::test]
async fn draw_on_fully_owned_catalogue_flags_nothing_new() {
    let owned = item("golem", 4);
    let harness = harness_with(vec![owned.clone()], 1000, 0, None).await;
    let seeded = Ownership::new(harness.identity.user_id().clone(), owned.id());
    OwnershipRepository::create(&harness.store, &seeded)
        .await
        .expect("seed ownership");

    let outcome = harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(10),
        })
        .await
        .expect("draw");

    assert_eq!(outcome.results.len(), 10);
    assert!(outcome.results.iter().all(|r| !r.is_new));
    assert_eq!(outcome.coins, 0);
}

#[tokio::test]
async fn insufficient_coins_rolls_back_the_draw() {
    let harness = harness_with(vec![item("slime", 1)], 150, 0, None).await;

    let err = harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(2),
        })
        .await
        .expect_err("cannot afford two draws");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.details(),
        Some(&json!({ "code": "insufficient_coins", "balance": 150, "required": 200 }))
    );
    assert_eq!(balance(&harness).await.coins(), 150);
    assert!(
        harness
            .store
            .list_for_user(harness.identity.user_id())
            .await
            .expect("ownership")
            .is_empty()
    );
}

#[tokio::test]
async fn zero_draws_change_nothing() {
    let harness = harness_with(vec![item("slime", 1)], 50, 0, None).await;

    let outcome = harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(0),
        })
        .await
        .expect("draw");

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.coins, 50);
}

#[rstest]
#[case::empty(Vec::new())]
#[case::zero_weight(vec![item("ghost", 0), item("shade", 0)])]
#[tokio::test]
async fn undrawable_catalogue_is_a_draw_failure(#[case] items: Vec<Collectible>) {
    let harness = harness_with(items, 1000, 0, None).await;

    let err = harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(1),
        })
        .await
        .expect_err("draw failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.details(), Some(&json!({ "code": "draw_failure" })));
    assert_eq!(balance(&harness).await.coins(), 1000);
}

#[tokio::test]
async fn first_draw_populates_catalogue_cache() {
    let harness = harness_with(vec![item("slime", 1)], 100, 0, None).await;
    assert!(
        harness
            .cache
            .get(&CacheKey::catalog())
            .await
            .expect("cache")
            .is_none()
    );

    harness
        .service
        .draw_gacha(DrawGachaRequest {
            identity: harness.identity.clone(),
            times: times(1),
        })
        .await
        .expect("draw");

    let cached = harness
        .cache
        .get(&CacheKey::catalog())
        .await
        .expect("cache")
        .expect("populated");
    assert_eq!(cached.len(), 1);
}
