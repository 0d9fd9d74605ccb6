//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence module. Conversions that can fail return
//! a plain message; each adapter wraps it in its own port error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Collectible, CollectibleId, CredentialHash, DisplayName, EmailAddress, Ownership,
    PlayerAccount, Rarity, Score, ScoreEvent, UserId, Weight,
};

use super::schema::{collectibles, scores, user_collectibles, users};

pub(crate) fn coins_to_db(coins: u64) -> Result<i64, String> {
    i64::try_from(coins).map_err(|_| format!("coin balance {coins} exceeds storage range"))
}

pub(crate) fn score_to_db(score: u32) -> Result<i32, String> {
    i32::try_from(score).map_err(|_| format!("score {score} exceeds storage range"))
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlayerRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub coins: i64,
    pub high_score: i32,
}

impl TryFrom<PlayerRow> for PlayerAccount {
    type Error = String;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        let display_name = DisplayName::new(row.display_name).map_err(|err| err.to_string())?;
        let email = EmailAddress::new(&row.email).map_err(|err| err.to_string())?;
        let coins = u64::try_from(row.coins)
            .map_err(|_| format!("negative coin balance {} for {}", row.coins, row.id))?;
        let high_score = u32::try_from(row.high_score)
            .map_err(|_| format!("negative high score {} for {}", row.high_score, row.id))?;
        Ok(PlayerAccount::new(
            UserId::from_uuid(row.id),
            display_name,
            email,
            CredentialHash::new(row.password_hash),
        )
        .with_ledger(coins, high_score))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewPlayerRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub coins: i64,
    pub high_score: i32,
}

impl<'a> NewPlayerRow<'a> {
    pub(crate) fn from_account(account: &'a PlayerAccount) -> Result<Self, String> {
        Ok(Self {
            id: *account.id().as_uuid(),
            display_name: account.display_name().as_ref(),
            email: account.email().as_str(),
            password_hash: account.credential().as_str(),
            coins: coins_to_db(account.coins())?,
            high_score: score_to_db(account.high_score())?,
        })
    }
}

/// Mutable ledger columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct PlayerLedgerUpdate<'a> {
    pub display_name: &'a str,
    pub coins: i64,
    pub high_score: i32,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PlayerLedgerUpdate<'a> {
    pub(crate) fn from_account(account: &'a PlayerAccount) -> Result<Self, String> {
        Ok(Self {
            display_name: account.display_name().as_ref(),
            coins: coins_to_db(account.coins())?,
            high_score: score_to_db(account.high_score())?,
            updated_at: Utc::now(),
        })
    }
}

// ---------------------------------------------------------------------------
// Collectibles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collectibles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectibleRow {
    pub id: Uuid,
    pub name: String,
    pub rarity: i16,
    pub weight: i32,
}

impl TryFrom<CollectibleRow> for Collectible {
    type Error = String;

    fn try_from(row: CollectibleRow) -> Result<Self, Self::Error> {
        let rarity = Rarity::new(i64::from(row.rarity)).map_err(|err| err.to_string())?;
        let weight = Weight::new(i64::from(row.weight)).map_err(|err| err.to_string())?;
        Collectible::new(CollectibleId::from_uuid(row.id), row.name, rarity, weight)
            .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = collectibles)]
pub(crate) struct NewCollectibleRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub rarity: i16,
    pub weight: i32,
}

impl<'a> NewCollectibleRow<'a> {
    pub(crate) fn from_collectible(item: &'a Collectible) -> Result<Self, String> {
        let weight = item.weight().value();
        Ok(Self {
            id: *item.id().as_uuid(),
            name: item.name(),
            rarity: i16::from(item.rarity().value()),
            weight: i32::try_from(weight)
                .map_err(|_| format!("weight {weight} exceeds storage range"))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_collectibles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OwnershipRow {
    pub user_id: Uuid,
    pub collectible_id: Uuid,
}

impl From<OwnershipRow> for Ownership {
    fn from(row: OwnershipRow) -> Self {
        Ownership::new(
            UserId::from_uuid(row.user_id),
            CollectibleId::from_uuid(row.collectible_id),
        )
    }
}

impl From<&Ownership> for OwnershipRow {
    fn from(value: &Ownership) -> Self {
        Self {
            user_id: *value.user_id.as_uuid(),
            collectible_id: *value.collectible_id.as_uuid(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = scores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScoreRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
}

impl TryFrom<ScoreRow> for ScoreEvent {
    type Error = String;

    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        let value = Score::new(i64::from(row.score)).map_err(|err| err.to_string())?;
        Ok(ScoreEvent {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            value,
        })
    }
}

impl TryFrom<&ScoreEvent> for ScoreRow {
    type Error = String;

    fn try_from(event: &ScoreEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: event.id,
            user_id: *event.user_id.as_uuid(),
            score: score_to_db(event.value.value())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn player_row(coins: i64, high_score: i32) -> PlayerRow {
        PlayerRow {
            id: Uuid::new_v4(),
            display_name: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            coins,
            high_score,
        }
    }

    #[rstest]
    fn player_row_rehydrates_ledger() {
        let account = PlayerAccount::try_from(player_row(250, 1200)).expect("valid row");

        assert_eq!(account.coins(), 250);
        assert_eq!(account.high_score(), 1200);
        assert_eq!(account.email().as_str(), "ada@example.com");
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, -5)]
    fn negative_ledger_columns_are_rejected(#[case] coins: i64, #[case] high_score: i32) {
        assert!(PlayerAccount::try_from(player_row(coins, high_score)).is_err());
    }

    #[rstest]
    fn coins_past_i64_cannot_be_stored() {
        assert!(coins_to_db(u64::MAX).is_err());
        assert_eq!(coins_to_db(42), Ok(42));
    }

    #[rstest]
    #[case(6, 1)]
    #[case(2, -1)]
    fn out_of_range_collectible_rows_are_rejected(#[case] rarity: i16, #[case] weight: i32) {
        let row = CollectibleRow {
            id: Uuid::new_v4(),
            name: "slime".to_owned(),
            rarity,
            weight,
        };

        assert!(Collectible::try_from(row).is_err());
    }
}
