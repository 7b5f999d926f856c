//! Stat rules layered on top of [`Fighter`](crate::state::Fighter).
//!
//! - `progression`: experience gain and level-up growth
//! - `equipment`: equip/unequip bonus bookkeeping
//! - `swap`: the body-snatch field exchange

pub mod equipment;
pub mod progression;
pub mod swap;

pub use equipment::apply_bonus;
pub use progression::add_xp;
pub use swap::swap_bodies;
