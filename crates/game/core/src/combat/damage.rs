//! Damage mitigation.

/// Damage left after constitution soaks some of it.
///
/// Zero stays zero; any other amount deals at least 1.
pub fn effective_damage(amount: i32, constitution: i32) -> i32 {
    if amount == 0 {
        0
    } else {
        (amount - constitution).max(1)
    }
}
