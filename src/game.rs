use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::snake::{Cell, Direction, Snake, Velocity};

pub const START_HEAD: Cell = Cell { x: 5, y: 5 };

/// What a single call to [`GameState::advance`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The game was already over; nothing changed.
    Halted,
    Moved { ate: bool },
    /// The head ran into the body on this tick. Emitted exactly once per game.
    GameOver { score: usize },
}

/// Everything the game loop mutates: the snake, the food, the velocity and
/// the terminal flag. Owned by the driver and handed to the tick by `&mut`.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    snake: Snake,
    food: Cell,
    velocity: Velocity,
    terminal: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let board = config.board();
        let mut state = GameState::from_parts(board, Snake::new(START_HEAD), START_HEAD, Velocity::STILL, rng);
        state.reset();
        state
    }

    /// Builds a state from explicit pieces, with no random food placement.
    pub fn from_parts(board: Board, snake: Snake, food: Cell, velocity: Velocity, rng: StdRng) -> Self {
        GameState { board, snake, food, velocity, terminal: false, rng }
    }

    /// Throws the current game away and starts over: head at (5, 5), no body,
    /// no motion, food somewhere random.
    pub fn reset(&mut self) {
        self.snake = Snake::new(START_HEAD);
        self.velocity = Velocity::STILL;
        self.terminal = false;
        self.place_food();
        info!(food_x = self.food.x, food_y = self.food.y, "new game");
    }

    /// One tick. Eat, shift the body, move the head, check for a bite, then
    /// wrap the head around the board edges.
    pub fn advance(&mut self) -> Advance {
        if self.terminal {
            return Advance::Halted;
        }

        let ate = self.snake.head() == self.food;
        if ate {
            self.snake.grow_at(self.food);
            self.place_food();
            debug!(score = self.score(), food_x = self.food.x, food_y = self.food.y, "food eaten");
        }

        self.snake.slither(self.velocity);

        if self.snake.bites_itself() {
            self.terminal = true;
            let score = self.score();
            info!(score, "snake bit itself");
            return Advance::GameOver { score };
        }

        let head = self.snake.head();
        if !self.board.contains(head) {
            self.snake.place_head(self.board.wrap(head));
        }

        Advance::Moved { ate }
    }

    /// Points the snake at `direction` unless that would reverse it or the
    /// game is over. Returns false when the turn is refused.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.terminal || self.velocity.reverses(direction) {
            return false;
        }

        self.velocity = direction.velocity();
        true
    }

    /// Moves the food to a uniformly random cell. The snake may already be
    /// sitting there.
    pub fn place_food(&mut self) {
        self.food = self.board.random_cell(&mut self.rng);
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn score(&self) -> usize {
        self.snake.len()
    }
}
