//! Collectible catalogue reference data.
//!
//! The catalogue is immutable from the player's point of view. Its order is
//! fixed by the store (insertion sequence) and the gacha walk depends on it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised while building collectibles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectibleValidationError {
    /// Name was blank.
    #[error("collectible name must not be empty")]
    EmptyName,
    /// Rarity fell outside `0..=5`.
    #[error("rarity must be between 0 and {max} (got {value})")]
    RarityOutOfRange { value: i64, max: u8 },
    /// Weight was negative.
    #[error("weight must not be negative (got {value})")]
    NegativeWeight { value: i64 },
    /// Weight does not fit the stored range.
    #[error("weight must be at most {max} (got {value})")]
    WeightTooLarge { value: i64, max: u32 },
}

/// Collectible identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectibleId(Uuid);

impl CollectibleId {
    /// Fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CollectibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest rarity tier.
pub const RARITY_MAX: u8 = 5;

/// Rarity tier, `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rarity(u8);

impl Rarity {
    /// Validate a raw rarity value.
    pub fn new(value: i64) -> Result<Self, CollectibleValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|tier| *tier <= RARITY_MAX)
            .map(Self)
            .ok_or(CollectibleValidationError::RarityOutOfRange {
                value,
                max: RARITY_MAX,
            })
    }

    /// Numeric tier.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rarity {
    type Error = CollectibleValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rarity> for u8 {
    fn from(value: Rarity) -> Self {
        value.0
    }
}

/// Largest accepted weight; the catalogue stores weights as 32-bit signed integers.
pub const WEIGHT_MAX: u32 = i32::MAX as u32;

/// Relative draw weight; zero means "never drawn".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u32);

impl Weight {
    /// Validate a raw weight.
    pub fn new(value: i64) -> Result<Self, CollectibleValidationError> {
        if value < 0 {
            return Err(CollectibleValidationError::NegativeWeight { value });
        }
        u32::try_from(value)
            .ok()
            .filter(|weight| *weight <= WEIGHT_MAX)
            .map(Self)
            .ok_or(CollectibleValidationError::WeightTooLarge {
                value,
                max: WEIGHT_MAX,
            })
    }

    /// Numeric weight.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Weight {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A catalogue item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    id: CollectibleId,
    name: String,
    rarity: Rarity,
    weight: Weight,
}

impl Collectible {
    /// Build a collectible, rejecting blank names.
    pub fn new(
        id: CollectibleId,
        name: impl Into<String>,
        rarity: Rarity,
        weight: Weight,
    ) -> Result<Self, CollectibleValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CollectibleValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            rarity,
            weight,
        })
    }

    /// Identifier.
    pub fn id(&self) -> CollectibleId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Rarity tier.
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Draw weight.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// Snapshot of the whole catalogue in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Collectible>);

impl Catalog {
    /// Wrap items, keeping their order.
    pub fn new(items: Vec<Collectible>) -> Self {
        Self(items)
    }

    /// Sum of all weights. Summed in `u64` so it cannot overflow.
    pub fn total_weight(&self) -> u64 {
        self.0
            .iter()
            .map(|item| u64::from(item.weight.value()))
            .sum()
    }

    /// Whether the catalogue has no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate items in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Collectible> {
        self.0.iter()
    }

    /// Borrow the items.
    pub fn items(&self) -> &[Collectible] {
        &self.0
    }
}

impl FromIterator<Collectible> for Catalog {
    fn from_iter<I: IntoIterator<Item = Collectible>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
