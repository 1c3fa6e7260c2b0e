//! Core building blocks: seats, per-player storage, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
