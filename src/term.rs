use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

/// Terminal position as (column, row).
pub type Coords = (u16, u16);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Option<Color>,
}

const BLANK: Glyph = Glyph { ch: ' ', color: None };

/// Owns stdout while the game runs. Keeps a copy of everything drawn so a
/// message box can be taken down without redrawing the board.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        let screen = vec![BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("failed to hide cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("failed to show cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("failed to leave alternate screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("failed to read terminal event")? {
                return Ok(ev);
            }
        }
    }

    /// Drains whatever key presses are already waiting.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).context("failed to poll terminal events")? {
            if let Event::Key(ev) = read().context("failed to read terminal event")? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Frame of `width × height` characters whose top left corner is `origin`.
    pub fn draw_borders(&mut self, origin: Coords, width: u16, height: u16) -> Result<()> {
        let (x0, y0) = origin;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x { '+' } else { '-' };
            self.print_at((x, y0), ch, None)?;
            self.print_at((x, end_y), ch, None)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|', None)?;
            self.print_at((end_x, y), '|', None)?;
        }

        self.flush()
    }

    pub fn show_message<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let text_width = lines.iter().map(|l| l.as_ref().chars().count()).max().unwrap_or(0);
        let msg_height = (lines.len() as u16 + 2).min(self.height);
        let msg_width = (text_width as u16 + 2).min(self.width);
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            (self.height / 2).saturating_sub(msg_height / 2),
        );

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_overlay((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate().take(msg_height.saturating_sub(2) as usize) {
            let padded = format!("{line: ^width$}", line = line.as_ref(), width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded.chars().take(msg_width as usize).enumerate() {
                self.print_overlay((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(glyph) = self.glyph_at(pos) {
                    self.emit(pos, glyph)?;
                }
            }
        }

        self.flush()
    }

    /// Queues a character and records it in the screen buffer. Call
    /// [`flush`](Self::flush) to push it out.
    pub fn print_at(&mut self, pos: Coords, ch: char, color: Option<Color>) -> Result<()> {
        let glyph = Glyph { ch, color };
        if let Some(idx) = self.index(pos) {
            if self.screen[idx] == glyph {
                return Ok(());
            }
            self.screen[idx] = glyph;
        }

        // Keep message boxes on top; the buffer brings the glyph back once
        // the box is gone.
        if self.covered_by_message(pos) {
            return Ok(());
        }

        self.emit(pos, glyph)
    }

    pub fn print_str_at(&mut self, pos: Coords, text: &str, color: Option<Color>) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            let x = pos.0 as usize + i;
            if x >= self.width as usize {
                break;
            }
            self.print_at((x as u16, pos.1), ch, color)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All)).context("failed to clear screen")?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("failed to flush stdout")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    // Message box text is not saved, so hiding the box restores what was under it.
    fn print_overlay(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.emit(pos, Glyph { ch, color: None })
    }

    fn emit(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        let queued = match glyph.color {
            Some(color) => queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                SetForegroundColor(color),
                Print(glyph.ch),
                ResetColor
            ),
            None => queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(glyph.ch)),
        };

        queued.context("failed to queue terminal output")
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn glyph_at(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|idx| self.screen[idx])
    }

    fn covered_by_message(&self, pos: Coords) -> bool {
        match &self.current_msg {
            Some(msg) => {
                pos.0 >= msg.top_left.0
                    && pos.0 < msg.top_left.0 + msg.width
                    && pos.1 >= msg.top_left.1
                    && pos.1 < msg.top_left.1 + msg.height
            }
            None => false,
        }
    }
}
