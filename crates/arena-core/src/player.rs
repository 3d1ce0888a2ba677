//! Player identity

use crate::physics::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shirt number of the goalkeeper
pub const GOALKEEPER_NUMBER: &str = "1";

/// Number of a player in its team
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerNumber(pub String);

impl PlayerNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.0 == GOALKEEPER_NUMBER
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity a player presents when it opens its connection to the game server.
///
/// Serialized to JSON and sent once, as a header of the WebSocket handshake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpecifications {
    /// Number of the player in its team
    pub number: PlayerNumber,
    /// Default initial position of the player
    pub initial_coords: Point,
    /// Token handed to the bot process so the server can tell it opened the connection
    pub token: String,
    /// Communication version the player speaks (e.g. "1.0")
    pub protocol_version: String,
}
