//! # arena-core
//!
//! Core types shared by bots playing on an arena game server.
//!
//! This crate provides the data the rest of the stack talks about:
//! - Player identity sent during the connection handshake
//! - Teams, goals, game states and message types
//! - Physical constants of the court
//! - Points, vectors and velocities
//! - Orders a player sends during the listening state

pub mod error;
pub mod game;
pub mod orders;
pub mod physics;
pub mod player;
pub mod units;

pub use error::{ArenaError, Result};
pub use game::{
    AWAY_TEAM_GOAL, FIELD_CENTER, GameState, Goal, HOME_TEAM_GOAL, MsgType, TeamPlace,
};
pub use orders::{AskOrderData, Order, VelocityOrderData};
pub use physics::{Point, Vector, Velocity, line_intersection};
pub use player::{GOALKEEPER_NUMBER, PlayerNumber, PlayerSpecifications};
