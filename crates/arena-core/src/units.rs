//! Physical constants of the court
//!
//! Positions and sizes are integers scaled by [`BASE_UNIT`] so values coming
//! out of float math keep their precision. Speeds are per frame.

/// Scale applied to every integer distance
pub const BASE_UNIT: i32 = 100;

/// Diameter of a player
pub const PLAYER_SIZE: i32 = 4 * BASE_UNIT;

/// Max distance a player may move in one frame
pub const PLAYER_MAX_SPEED: f64 = 100.0;

/// Court width (horizontal view)
pub const COURT_WIDTH: i32 = 200 * BASE_UNIT;

/// Court height (horizontal view)
pub const COURT_HEIGHT: i32 = 100 * BASE_UNIT;

/// Diameter of the ball
pub const BALL_SIZE: i32 = 2 * BASE_UNIT;

/// Speed the ball loses every frame
pub const BALL_DECELERATION: f64 = 10.0;

/// Max speed of the ball
pub const BALL_MAX_SPEED: f64 = 4.0 * BASE_UNIT as f64;

/// At or below this speed the ball counts as stopped
pub const BALL_MIN_SPEED: f64 = 2.0;

/// Frames the ball may stay in a goal zone before it is kicked back to the center
pub const BALL_TIME_IN_GOAL_ZONE: u32 = 15;

/// Distance between the goal poles
pub const GOAL_WIDTH: i32 = 30 * BASE_UNIT;

/// Y of the lower goal pole
pub const GOAL_MIN_Y: i32 = (COURT_HEIGHT - GOAL_WIDTH) / 2;

/// Y of the upper goal pole
pub const GOAL_MAX_Y: i32 = GOAL_MIN_Y + GOAL_WIDTH;

/// Closest a player may stand to the opponent goal
pub const GOAL_ZONE_RANGE: i32 = 14 * BASE_UNIT;

/// Frames a goalkeeper jump lasts; a jump can not be interrupted
pub const GOALKEEPER_JUMP_DURATION: u32 = 3;

/// Max goalkeeper speed while jumping
pub const GOALKEEPER_JUMP_SPEED: f64 = 3.0 * PLAYER_MAX_SPEED;
