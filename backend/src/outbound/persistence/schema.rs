//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Player ledger: identity, credential and balances.
    users (id) {
        id -> Uuid,
        /// Public name, also the leaderboard member (max 32 characters).
        display_name -> Varchar,
        /// Lower-cased login email, unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Coin balance, never negative.
        coins -> Int8,
        high_score -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collectible catalogue. `seq` fixes the draw order.
    collectibles (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Text,
        rarity -> Int2,
        weight -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ownership rows; duplicates allowed.
    user_collectibles (id) {
        id -> Int8,
        user_id -> Uuid,
        collectible_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only score log.
    scores (id) {
        id -> Uuid,
        user_id -> Uuid,
        score -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_collectibles -> users (user_id));
diesel::joinable!(user_collectibles -> collectibles (collectible_id));
diesel::joinable!(scores -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, collectibles, user_collectibles, scores);
