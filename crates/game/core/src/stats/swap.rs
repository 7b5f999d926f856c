//! Body swapping between two fighters.

use crate::state::{Entity, SWAPPED_STATS};

/// Exchanges position and the [`SWAPPED_STATS`] of two fighters.
///
/// Kind, inventory, progression and active effects stay with their owner.
/// Returns false when either side cannot fight.
pub fn swap_bodies(a: &mut Entity, b: &mut Entity) -> bool {
    let (Some(left), Some(right)) = (a.fighter.as_mut(), b.fighter.as_mut()) else {
        return false;
    };
    for stat in SWAPPED_STATS {
        left.swap_stat(right, stat);
    }
    std::mem::swap(&mut a.position, &mut b.position);
    true
}
