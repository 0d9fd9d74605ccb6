//! Weighted gacha sampling.
//!
//! Pure functions over a [`Catalog`] snapshot and a caller-supplied random
//! source. Draws are independent and with replacement.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use super::{Catalog, Collectible, CollectibleId};

/// The catalogue cannot produce an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawFailure {
    /// The catalogue has no items.
    #[error("no item could be selected: catalogue is empty")]
    EmptyCatalog,
    /// Every item has weight zero.
    #[error("no item could be selected: total weight is zero")]
    ZeroTotalWeight,
}

/// Draw one item with probability `weight / total_weight`.
///
/// Samples `r` in `[0, total)` and walks the catalogue in order, subtracting
/// each weight; the item that takes `r` below zero is selected.
///
/// # Examples
/// ```
/// use arcade_backend::domain::gacha::draw;
/// use arcade_backend::domain::{Catalog, Collectible, CollectibleId, Rarity, Weight};
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let only = Collectible::new(
///     CollectibleId::random(),
///     "slime",
///     Rarity::new(1).expect("rarity"),
///     Weight::from(3),
/// )
/// .expect("collectible");
/// let catalog = Catalog::new(vec![only.clone()]);
/// let mut rng = SmallRng::seed_from_u64(7);
/// assert_eq!(draw(&catalog, &mut rng).expect("draw"), &only);
/// ```
pub fn draw<'c, R>(catalog: &'c Catalog, rng: &mut R) -> Result<&'c Collectible, DrawFailure>
where
    R: Rng + ?Sized,
{
    if catalog.is_empty() {
        return Err(DrawFailure::EmptyCatalog);
    }
    let total = catalog.total_weight();
    if total == 0 {
        return Err(DrawFailure::ZeroTotalWeight);
    }

    let mut remainder = rng.gen_range(0..total);
    for item in catalog.iter() {
        let weight = u64::from(item.weight().value());
        if remainder < weight {
            return Ok(item);
        }
        remainder -= weight;
    }
    // `remainder < total` guarantees a hit above.
    Err(DrawFailure::ZeroTotalWeight)
}

/// Draw `times` items; the first failure aborts the batch.
pub fn draw_many<R>(catalog: &Catalog, times: u8, rng: &mut R) -> Result<Vec<Collectible>, DrawFailure>
where
    R: Rng + ?Sized,
{
    (0..times)
        .map(|_| draw(catalog, rng).cloned())
        .collect()
}

/// One drawn item with its "new to the player" flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GachaResult {
    /// The drawn collectible.
    pub collectible: Collectible,
    /// Whether the player did not own it before the draw.
    pub is_new: bool,
}

/// Flag draws against the ownership snapshot taken before the call.
///
/// The snapshot is not updated as items are drawn, so the same unowned item
/// drawn twice in one call is reported as new both times.
pub fn flag_against_snapshot(
    drawn: Vec<Collectible>,
    owned: &HashSet<CollectibleId>,
) -> Vec<GachaResult> {
    drawn
        .into_iter()
        .map(|collectible| GachaResult {
            is_new: !owned.contains(&collectible.id()),
            collectible,
        })
        .collect()
}

/// Flag draws so only the first copy of an unowned item counts as new.
///
/// The economy service flags against the snapshot instead; see
/// [`flag_against_snapshot`].
pub fn flag_incrementally(
    drawn: Vec<Collectible>,
    owned: &HashSet<CollectibleId>,
) -> Vec<GachaResult> {
    let mut seen = owned.clone();
    drawn
        .into_iter()
        .map(|collectible| GachaResult {
            is_new: seen.insert(collectible.id()),
            collectible,
        })
        .collect()
}
