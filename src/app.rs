use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::style::Color;
use tracing::{debug, error, info};

use crate::background::Background;
use crate::config::GameConfig;
use crate::game::{Advance, GameState};
use crate::input::{game_over_choice, is_ctrl_c, key_action, GameOverChoice, KeyAction};
use crate::player::{FormStatus, PlayerForm, PlayerInfo};
use crate::snake::Cell;
use crate::term::{Coords, TermManager};

const POLL_INTERVAL_MS: u64 = 5;

const TILE_CHAR: char = '█';
const FOOD_COLOR: Color = Color::Red;
const HEAD_COLOR: Color = Color::Blue;
const BODY_COLOR: Color = Color::Green;
const BACKGROUND_COLOR: Color = Color::DarkGrey;

/// Handed to the game over dialog when the snake bites itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverEvent {
    pub score: usize,
    pub player: PlayerInfo,
}

impl GameOverEvent {
    pub fn lines(&self) -> Vec<String> {
        vec![
            "Game Over, ".to_string(),
            format!(
                "Name: {} | Gender: {} | Age: {}",
                self.player.name, self.player.gender, self.player.age
            ),
            format!("Your Score is: {}", self.score),
            String::new(),
            "[R] Play Again    [Q] Exit".to_string(),
        ]
    }
}

/// Text under the board: the running score, or the farewell once the game
/// is over.
pub fn status_line(state: &GameState, player: &PlayerInfo) -> String {
    if state.is_terminal() {
        format!("Game Over...Try Next Time, {}! Your Score is: {}", player.name, state.score())
    } else {
        format!("Score: {}", state.score())
    }
}

/// Where each piece of the board goes on screen.
#[derive(Debug, Copy, Clone)]
struct Layout {
    /// Top left corner of the border.
    origin: Coords,
    cell_size: u16,
    cells: u16,
}

impl Layout {
    fn new(config: &GameConfig, term_size: Coords) -> Self {
        let (width, height) = config.required_terminal_size();
        let origin = (
            (term_size.0.saturating_sub(width)) / 2,
            (term_size.1.saturating_sub(height)) / 2,
        );
        Layout { origin, cell_size: config.cell_size, cells: config.board_cells }
    }

    fn border_size(&self) -> (u16, u16) {
        (self.cells * self.cell_size + 2, self.cells + 2)
    }

    fn cell_origin(&self, x: u16, y: u16) -> Coords {
        (self.origin.0 + 1 + x * self.cell_size, self.origin.1 + 1 + y)
    }

    fn status_pos(&self) -> Coords {
        (self.origin.0, self.origin.1 + self.cells + 2)
    }
}

/// The game loop driver: terminal, tick timer, keyboard and dialogs around
/// one [`GameState`].
pub struct SnakeApp {
    config: GameConfig,
    term: TermManager,
    state: GameState,
    player: Option<PlayerInfo>,
    background: Background,
    layout: Layout,
    paused: bool,
}

impl SnakeApp {
    /// `player` skips the player details form when given.
    pub fn new(config: GameConfig, player: Option<PlayerInfo>, background: Background) -> Result<Self> {
        let term = TermManager::new()?;
        let (need_w, need_h) = config.required_terminal_size();
        let (have_w, have_h) = term.size();
        if have_w < need_w || have_h < need_h {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                have_w, have_h, need_w, need_h
            );
        }

        let state = GameState::new(&config);
        let layout = Layout::new(&config, term.size());

        Ok(SnakeApp { config, term, state, player, background, layout, paused: false })
    }

    /// Takes over the terminal until the player quits, and gives it back
    /// even if the game fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.run_games();

        if let Err(err) = self.term.restore() {
            error!(?err, "failed to restore terminal");
        }

        result
    }

    fn run_games(&mut self) -> Result<()> {
        let player = match self.player.take() {
            Some(player) => player,
            None => match self.ask_player_details()? {
                Some(player) => player,
                None => return Ok(()),
            },
        };
        info!(name = %player.name, age = player.age, gender = %player.gender, "player ready");
        self.player = Some(player);

        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            match self.play()? {
                GameOverChoice::Replay => {
                    info!("replaying");
                    self.state.reset();
                }
                GameOverChoice::Quit => break,
            }
        }

        info!("quitting");
        Ok(())
    }

    /// `None` when the player asked to quit from the form.
    fn ask_player_details(&mut self) -> Result<Option<PlayerInfo>> {
        self.term.clear()?;
        let mut form = PlayerForm::new();

        loop {
            self.term.show_message(&form.lines())?;

            match form.handle_key(&self.term.read_key_blocking()?) {
                FormStatus::Editing => {}
                FormStatus::Submitted(info) => return Ok(Some(info)),
                FormStatus::Cancelled => {
                    debug!("player details skipped");
                    return Ok(Some(PlayerInfo::default()));
                }
                FormStatus::Quit => return Ok(None),
            }
        }
    }

    /// `false` when the player quit instead of starting.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(!is_ctrl_c(&key))
    }

    /// Runs one game until the snake bites itself or the player quits.
    fn play(&mut self) -> Result<GameOverChoice> {
        self.paused = false;
        self.term.clear()?;
        let (border_w, border_h) = self.layout.border_size();
        self.term.draw_borders(self.layout.origin, border_w, border_h)?;
        self.draw()?;

        let tick = self.config.tick;
        let mut next_tick = Instant::now() + tick;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key in self.term.read_key_events_queue()? {
                match key_action(&key) {
                    KeyAction::Steer(direction) if !self.paused => {
                        self.state.steer(direction);
                    }
                    KeyAction::TogglePause => self.toggle_pause()?,
                    KeyAction::Quit => return Ok(GameOverChoice::Quit),
                    _ => {}
                }
            }

            let now = Instant::now();
            if self.paused {
                next_tick = now + tick;
                continue;
            }
            if now < next_tick {
                continue;
            }

            next_tick += tick;
            if next_tick < now {
                // Fell behind; don't try to catch up with a burst of ticks.
                next_tick = now + tick;
            }

            match self.state.advance() {
                Advance::Moved { .. } => self.draw()?,
                Advance::GameOver { score } => {
                    self.draw()?;
                    let event = GameOverEvent { score, player: self.player() };
                    return self.game_over(&event);
                }
                Advance::Halted => {
                    let event = GameOverEvent { score: self.state.score(), player: self.player() };
                    return self.game_over(&event);
                }
            }
        }
    }

    fn game_over(&mut self, event: &GameOverEvent) -> Result<GameOverChoice> {
        info!(score = event.score, name = %event.player.name, "game over");
        self.term.show_message(&event.lines())?;

        loop {
            if let Some(choice) = game_over_choice(&self.term.read_key_blocking()?) {
                self.term.hide_message()?;
                return Ok(choice);
            }
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if self.paused {
            self.term.hide_message()?;
        } else {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        }

        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        Ok(())
    }

    fn player(&self) -> PlayerInfo {
        self.player.clone().unwrap_or_default()
    }

    /// Repaints every tile (food, then head, then body on top) and the
    /// status line.
    fn draw(&mut self) -> Result<()> {
        let cells = self.layout.cells;
        let food = self.state.food();
        let snake = self.state.snake();

        for y in 0..cells {
            for x in 0..cells {
                let cell = Cell::new(x as i32, y as i32);
                let color = if snake.body().contains(&cell) {
                    Some(BODY_COLOR)
                } else if snake.head() == cell {
                    Some(HEAD_COLOR)
                } else if food == cell {
                    Some(FOOD_COLOR)
                } else {
                    None
                };

                let (sx, sy) = self.layout.cell_origin(x, y);
                for c in 0..self.layout.cell_size {
                    match color {
                        Some(color) => self.term.print_at((sx + c, sy), TILE_CHAR, Some(color))?,
                        None => {
                            let bx = (x * self.layout.cell_size + c) as usize;
                            let ch = self.background.char_at(bx, y as usize);
                            self.term.print_at((sx + c, sy), ch, Some(BACKGROUND_COLOR))?;
                        }
                    }
                }
            }
        }

        let player = self.player();
        let status = status_line(&self.state, &player);
        let (border_w, _) = self.layout.border_size();
        let color = if self.state.is_terminal() { Color::Red } else { Color::White };
        let padded = format!("{:<width$}", status, width = border_w as usize);
        self.term.print_str_at(self.layout.status_pos(), &padded, Some(color))?;

        self.term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::player::Gender;
    use crate::snake::{Snake, Velocity};
    use rand::{rngs::StdRng, SeedableRng};

    fn player() -> PlayerInfo {
        PlayerInfo { name: "Kim".into(), age: 30, gender: Gender::Other }
    }

    #[test]
    fn game_over_dialog_shows_identity_and_score() {
        let event = GameOverEvent { score: 7, player: player() };
        let lines = event.lines();
        assert_eq!(lines[1], "Name: Kim | Gender: Other | Age: 30");
        assert_eq!(lines[2], "Your Score is: 7");
    }

    #[test]
    fn status_line_switches_on_game_over() {
        let snake = Snake::with_body(Cell::new(5, 5), vec![Cell::new(5, 4), Cell::new(5, 5)]);
        let mut state =
            GameState::from_parts(Board::new(12), snake, Cell::new(0, 0), Velocity::STILL, StdRng::seed_from_u64(0));
        assert_eq!(status_line(&state, &player()), "Score: 2");

        state.advance();
        assert_eq!(status_line(&state, &player()), "Game Over...Try Next Time, Kim! Your Score is: 2");
    }

    #[test]
    fn layout_centers_the_board() {
        let config = GameConfig::new(10, 2, Duration::from_millis(90));
        let layout = Layout::new(&config, (42, 23));
        // Board needs 22x13.
        assert_eq!(layout.origin, (10, 5));
        assert_eq!(layout.cell_origin(0, 0), (11, 6));
        assert_eq!(layout.cell_origin(3, 2), (17, 8));
        assert_eq!(layout.status_pos(), (10, 17));
    }
}
