//! Deterministic randomness.
mod rng;

pub use rng::{Dice, PcgRng, RngOracle, compute_seed};
