//! Orders a player sends to the game server during the listening state
//!
//! Wire format: `{"order": "MOVE", "data": {...}}`. `CATCH` carries no data.

use crate::error::Result;
use crate::physics::Velocity;
use serde::{Deserialize, Serialize};

/// An order for the player's next turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "order", content = "data", rename_all = "UPPERCASE")]
pub enum Order {
    /// Change direction and speed of the player
    Move(VelocityOrderData),
    /// Release the ball held by the player; the new velocity is summed with the ball's
    Kick(VelocityOrderData),
    /// Try to catch a ball touching the player
    Catch,
    /// Goalkeeper-only burst of extra speed for a short interval
    Jump(VelocityOrderData),
    /// Interrupt the game (dev mode only) and ask the user what the bot should do
    Ask(AskOrderData),
}

/// Payload of `MOVE`, `KICK` and `JUMP` orders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityOrderData {
    pub velocity: Velocity,
}

/// Payload of an `ASK` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskOrderData {
    pub question: String,
    pub alternatives: Vec<String>,
}

impl Order {
    pub fn movement(velocity: Velocity) -> Self {
        Order::Move(VelocityOrderData { velocity })
    }

    pub fn kick(velocity: Velocity) -> Self {
        Order::Kick(VelocityOrderData { velocity })
    }

    pub fn jump(velocity: Velocity) -> Self {
        Order::Jump(VelocityOrderData { velocity })
    }

    pub fn ask(question: impl Into<String>, alternatives: Vec<String>) -> Self {
        Order::Ask(AskOrderData {
            question: question.into(),
            alternatives,
        })
    }

    /// Wire name of the order type
    pub fn order_type(&self) -> &'static str {
        match self {
            Order::Move(_) => "MOVE",
            Order::Kick(_) => "KICK",
            Order::Catch => "CATCH",
            Order::Jump(_) => "JUMP",
            Order::Ask(_) => "ASK",
        }
    }

    /// Velocity carried by the order, if any
    pub fn velocity(&self) -> Option<&Velocity> {
        match self {
            Order::Move(data) | Order::Kick(data) | Order::Jump(data) => Some(&data.velocity),
            Order::Catch | Order::Ask(_) => None,
        }
    }

    /// Serialize the order to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Into::into)
    }

    /// Deserialize an order from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Into::into)
    }
}
