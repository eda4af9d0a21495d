use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Quit,
    None,
}

/// Answer to the game over dialog.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameOverChoice {
    Replay,
    Quit,
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys while a game is running: arrows or WASD to steer, Esc to pause,
/// Ctrl+C or Q to quit.
pub fn key_action(ev: &KeyEvent) -> KeyAction {
    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Steer(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Steer(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Steer(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Steer(Direction::Right),
        KeyCode::Esc => KeyAction::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

/// `None` for keys the dialog ignores.
pub fn game_over_choice(ev: &KeyEvent) -> Option<GameOverChoice> {
    if is_ctrl_c(ev) {
        return Some(GameOverChoice::Quit);
    }

    match ev.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(GameOverChoice::Replay),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameOverChoice::Quit),
        _ => None,
    }
}
