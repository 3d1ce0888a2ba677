//! Teams, goals, game states and message types

use crate::physics::Point;
use crate::units::{COURT_HEIGHT, COURT_WIDTH, GOAL_MAX_Y, GOAL_MIN_Y};
use serde::{Deserialize, Serialize};

/// Side of a team during the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamPlace {
    /// Left side
    Home,
    /// Right side
    Away,
}

impl TeamPlace {
    /// The other side of the court
    pub fn opponent(self) -> Self {
        match self {
            TeamPlace::Home => TeamPlace::Away,
            TeamPlace::Away => TeamPlace::Home,
        }
    }

    /// Goal defended by this team
    pub fn goal(self) -> Goal {
        match self {
            TeamPlace::Home => HOME_TEAM_GOAL,
            TeamPlace::Away => AWAY_TEAM_GOAL,
        }
    }
}

/// Position of a team's goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Goal {
    /// Center of the goal line
    pub center: Point,
    /// Team that defends this goal
    pub place: TeamPlace,
    /// Pole with the higher Y
    pub top_pole: Point,
    /// Pole with the lower Y
    pub bottom_pole: Point,
}

/// Goal defended by the home team
pub const HOME_TEAM_GOAL: Goal = Goal {
    center: Point::new(0, COURT_HEIGHT / 2),
    place: TeamPlace::Home,
    top_pole: Point::new(0, GOAL_MAX_Y),
    bottom_pole: Point::new(0, GOAL_MIN_Y),
};

/// Goal defended by the away team
pub const AWAY_TEAM_GOAL: Goal = Goal {
    center: Point::new(COURT_WIDTH, COURT_HEIGHT / 2),
    place: TeamPlace::Away,
    top_pole: Point::new(COURT_WIDTH, GOAL_MAX_Y),
    bottom_pole: Point::new(COURT_WIDTH, GOAL_MIN_Y),
};

/// Center of the court
pub const FIELD_CENTER: Point = Point::new(COURT_WIDTH / 2, COURT_HEIGHT / 2);

/// State of the game server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Waiting for both teams to connect
    #[serde(rename = "waiting")]
    WaitingTeams,
    /// Ready to start
    Ready,
    /// Listening to the players for orders
    Listening,
    /// Executing the orders received while listening
    Playing,
    /// Paused by a debug command, waiting for the next step
    Pause,
    /// Announcing a score change
    Results,
    /// Announcing the end of the game
    #[serde(rename = "game-over")]
    Over,
}

/// Kind of message exchanged with the game server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MsgType {
    /// Player -> server order
    Order,
    /// Server -> players game state update
    Announcement,
    /// Web client -> server debug command (debug mode only)
    Debug,
    /// Server announcing a score change
    Score,
    /// Server announcing it crashed
    Rip,
    /// Server greeting a freshly accepted connection
    Welcome,
}
