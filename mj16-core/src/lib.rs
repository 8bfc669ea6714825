//! Drivers and simulation for the 16-tile mahjong engine.
//!
//! Provides deterministic session seeding, a `GameRunner` that feeds
//! interactive input into `mj16_engine::Game`, and a rayon batch simulator.

pub mod game_loop;
pub mod seeding;
pub mod simulator;
