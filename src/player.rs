use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::input::is_ctrl_c;

pub const DEFAULT_NAME: &str = "Player";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
    NotSpecified,
}

impl Gender {
    /// The choices offered by the player form, in display order.
    pub const CHOICES: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    fn cycle(self, step: isize) -> Gender {
        let len = Gender::CHOICES.len() as isize;
        let pos = Gender::CHOICES.iter().position(|g| *g == self).map_or(-1, |p| p as isize);
        let next = if pos < 0 { 0 } else { (pos + step).rem_euclid(len) };
        Gender::CHOICES[next as usize]
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::NotSpecified => "Not Specified",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            "" | "none" | "not specified" => Ok(Gender::NotSpecified),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Who is playing. Collected once at startup and shown when a game ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

impl Default for PlayerInfo {
    fn default() -> Self {
        PlayerInfo { name: DEFAULT_NAME.to_string(), age: 0, gender: Gender::NotSpecified }
    }
}

impl PlayerInfo {
    /// Applies the fallbacks for free-form input: a blank name becomes
    /// "Player" and an age that is not a non-negative integer becomes 0.
    pub fn normalized(name: &str, age: &str, gender: Gender) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };

        let age = match age.trim().parse::<u32>() {
            Ok(age) => age,
            Err(err) => {
                if !age.trim().is_empty() {
                    warn!(input = age, %err, "unreadable age, using 0");
                }
                0
            }
        };

        PlayerInfo { name, age, gender }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Gender,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Name => Field::Age,
            Field::Age => Field::Gender,
            Field::Gender => Field::Name,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Name => Field::Gender,
            Field::Age => Field::Name,
            Field::Gender => Field::Age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitted(PlayerInfo),
    /// Esc: play with the default identity.
    Cancelled,
    Quit,
}

const MAX_NAME_LEN: usize = 24;
const MAX_AGE_LEN: usize = 3;

/// The "Player Details" dialog shown before the first game, as a plain
/// state machine fed with key events.
#[derive(Debug, Clone)]
pub struct PlayerForm {
    name: String,
    age: String,
    gender: Gender,
    focus: Field,
    /// Set once focus has reached the last field; from then on Enter
    /// submits wherever the focus is.
    all_visited: bool,
}

impl Default for PlayerForm {
    fn default() -> Self {
        PlayerForm::new()
    }
}

impl PlayerForm {
    pub fn new() -> Self {
        PlayerForm {
            name: String::new(),
            age: String::new(),
            gender: Gender::Male,
            focus: Field::Name,
            all_visited: false,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormStatus {
        if is_ctrl_c(key) {
            return FormStatus::Quit;
        }

        match key.code {
            KeyCode::Esc => return FormStatus::Cancelled,
            KeyCode::Enter => {
                if self.focus == Field::Gender || self.all_visited {
                    return FormStatus::Submitted(self.info());
                }
                self.move_focus(self.focus.next());
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(self.focus.next()),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(self.focus.prev()),
            KeyCode::Left if self.focus == Field::Gender => self.gender = self.gender.cycle(-1),
            KeyCode::Right if self.focus == Field::Gender => self.gender = self.gender.cycle(1),
            KeyCode::Backspace => {
                match self.focus {
                    Field::Name => { self.name.pop(); }
                    Field::Age => { self.age.pop(); }
                    Field::Gender => {}
                }
            }
            KeyCode::Char(ch) => self.type_char(ch),
            _ => {}
        }

        FormStatus::Editing
    }

    pub fn info(&self) -> PlayerInfo {
        PlayerInfo::normalized(&self.name, &self.age, self.gender)
    }

    /// Message box contents, with the focused field marked.
    pub fn lines(&self) -> Vec<String> {
        let mark = |field: Field| if self.focus == field { '>' } else { ' ' };

        vec![
            "Player Details".to_string(),
            String::new(),
            format!("{} Enter your name:    {:<width$}", mark(Field::Name), self.name, width = MAX_NAME_LEN),
            format!("{} Enter your age:     {:<width$}", mark(Field::Age), self.age, width = MAX_NAME_LEN),
            format!("{} Select your gender: {:<width$}", mark(Field::Gender), format!("< {} >", self.gender), width = MAX_NAME_LEN),
            String::new(),
            "Tab to move, Enter to confirm, Esc to skip".to_string(),
        ]
    }

    fn move_focus(&mut self, field: Field) {
        self.focus = field;
        self.all_visited |= field == Field::Gender;
    }

    fn type_char(&mut self, ch: char) {
        match self.focus {
            Field::Name if !ch.is_control() && self.name.chars().count() < MAX_NAME_LEN => self.name.push(ch),
            Field::Age if ch.is_ascii_digit() && self.age.len() < MAX_AGE_LEN => self.age.push(ch),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut PlayerForm, s: &str) {
        for ch in s.chars() {
            assert_eq!(form.handle_key(&key(KeyCode::Char(ch))), FormStatus::Editing);
        }
    }

    #[test]
    fn blank_name_and_bad_age_fall_back() {
        let info = PlayerInfo::normalized("   ", "abc", Gender::Other);
        assert_eq!(info.name, "Player");
        assert_eq!(info.age, 0);
        assert_eq!(info.gender, Gender::Other);

        assert_eq!(PlayerInfo::normalized("Ana", "-3", Gender::Female).age, 0);
        assert_eq!(PlayerInfo::normalized(" Ana ", "31", Gender::Female).name, "Ana");
    }

    #[test]
    fn filling_the_form_submits_player_info() {
        let mut form = PlayerForm::new();
        type_str(&mut form, "Robin");
        form.handle_key(&key(KeyCode::Enter));
        assert_eq!(form.focus(), Field::Age);

        type_str(&mut form, "4x2");
        form.handle_key(&key(KeyCode::Tab));
        form.handle_key(&key(KeyCode::Right));

        let status = form.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            status,
            FormStatus::Submitted(PlayerInfo { name: "Robin".into(), age: 42, gender: Gender::Female })
        );
    }

    #[test]
    fn enter_submits_from_any_field_once_all_were_visited() {
        let mut form = PlayerForm::new();
        type_str(&mut form, "A");
        for _ in 0..3 {
            form.handle_key(&key(KeyCode::Tab));
        }
        assert_eq!(form.focus(), Field::Name);

        let status = form.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            status,
            FormStatus::Submitted(PlayerInfo { name: "A".into(), age: 0, gender: Gender::Male })
        );
    }

    #[test]
    fn enter_before_reaching_gender_only_moves_on() {
        let mut form = PlayerForm::new();
        assert_eq!(form.handle_key(&key(KeyCode::Enter)), FormStatus::Editing);
        assert_eq!(form.focus(), Field::Age);
    }

    #[test]
    fn backspace_edits_the_focused_field() {
        let mut form = PlayerForm::new();
        type_str(&mut form, "Sam");
        form.handle_key(&key(KeyCode::Backspace));
        assert_eq!(form.info().name, "Sa");
    }

    #[test]
    fn gender_cycles_through_the_choices() {
        let mut form = PlayerForm::new();
        form.handle_key(&key(KeyCode::Up));
        assert_eq!(form.focus(), Field::Gender);

        form.handle_key(&key(KeyCode::Left));
        assert_eq!(form.info().gender, Gender::Other);
        form.handle_key(&key(KeyCode::Right));
        assert_eq!(form.info().gender, Gender::Male);
    }

    #[test]
    fn escape_and_ctrl_c() {
        let mut form = PlayerForm::new();
        assert_eq!(form.handle_key(&key(KeyCode::Esc)), FormStatus::Cancelled);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(form.handle_key(&ctrl_c), FormStatus::Quit);
    }

    #[test]
    fn gender_parses_from_cli_text() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("not specified".parse::<Gender>(), Ok(Gender::NotSpecified));
        assert!("robot".parse::<Gender>().is_err());
        assert_eq!(Gender::NotSpecified.to_string(), "Not Specified");
    }
}
