//! Player ownership of collectibles.

use std::collections::HashSet;

use super::{Catalog, Collectible, CollectibleId, UserId};

/// One ownership row. Duplicates are allowed and mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    /// Owner.
    pub user_id: UserId,
    /// Owned collectible.
    pub collectible_id: CollectibleId,
}

impl Ownership {
    /// Pair a player with a collectible.
    pub fn new(user_id: UserId, collectible_id: CollectibleId) -> Self {
        Self {
            user_id,
            collectible_id,
        }
    }
}

/// Collapse ownership rows into the set of owned collectible ids.
pub fn owned_ids<'a>(rows: impl IntoIterator<Item = &'a Ownership>) -> HashSet<CollectibleId> {
    rows.into_iter().map(|row| row.collectible_id).collect()
}

/// Catalogue item annotated with whether the player owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    /// Catalogue item.
    pub collectible: Collectible,
    /// Whether the player has ever drawn it.
    pub owned: bool,
}

/// Annotate every catalogue item with its ownership flag, in catalogue order.
pub fn collection_view(catalog: &Catalog, owned: &HashSet<CollectibleId>) -> Vec<CollectionItem> {
    catalog
        .iter()
        .map(|collectible| CollectionItem {
            owned: owned.contains(&collectible.id()),
            collectible: collectible.clone(),
        })
        .collect()
}
