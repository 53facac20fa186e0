//! Domain logic: deterministic candidate-block assembly.

mod factory;

pub use factory::{BlockData, BlockFactory};
