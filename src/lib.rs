//! mapsketch - editable polygon overlay and game-coordinate readout for tiled game maps

pub mod config;
pub mod control;
pub mod error;
pub mod game;
pub mod geometry;
pub mod host;
pub mod polygon;
pub mod session;
