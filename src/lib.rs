//! Grid snake for the terminal.
//!
//! The game itself lives in [`game::GameState`]: a fixed tick calls
//! [`game::GameState::advance`], key presses call
//! [`game::GameState::steer`], and the rest of the crate is the terminal
//! front end that draws the board and runs the dialogs.

pub mod app;
pub mod background;
pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod player;
pub mod snake;
pub mod term;

pub use app::{GameOverEvent, SnakeApp};
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use game::{Advance, GameState};
pub use player::{Gender, PlayerInfo};
pub use snake::{Cell, Direction, Snake, Velocity};
