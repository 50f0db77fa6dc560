//! Общие компоненты (используются игроком и врагами)

pub mod health;

pub use health::*;
