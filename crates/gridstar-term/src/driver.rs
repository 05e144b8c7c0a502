//! Back-end seam ([`Driver`]) and the crossterm implementation.

use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridstar_core::Point;

use crate::frame::{Color, FrameCell};
use crate::msg::{Key, MouseAction, Msg};

/// A display back-end.
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and append any messages to `out`.
    fn poll_msgs(&mut self, timeout: Duration, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>>;

    /// Draw the changed cells.
    fn flush(&mut self, cells: &[FrameCell]) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

fn to_ct_color(c: Color) -> CtColor {
    CtColor::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
            to_key(code).map(Msg::KeyDown)
        }
        Event::Mouse(me) => {
            let pos = Point::new(i32::from(me.row), i32::from(me.column));
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    MouseAction::Main
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse { action, pos })
        }
        Event::Resize(width, height) => Some(Msg::Screen { width, height }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration, out: &mut Vec<Msg>) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = to_msg(event::read()?) {
                out.push(msg);
            }
        }
        Ok(())
    }

    fn flush(&mut self, cells: &[FrameCell]) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();
        for fc in cells {
            let p = fc.pos;
            queue!(
                stdout,
                cursor::MoveTo(p.col as u16, p.row as u16),
                SetForegroundColor(to_ct_color(fc.cell.fg)),
                SetBackgroundColor(to_ct_color(fc.cell.bg)),
                Print(fc.cell.ch)
            )?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_map_to_messages() {
        let ev = |code| {
            Event::Key(KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            })
        };
        assert_eq!(to_msg(ev(KeyCode::Char(' '))), Some(Msg::KeyDown(Key::Space)));
        assert_eq!(to_msg(ev(KeyCode::Char('Q'))), Some(Msg::KeyDown(Key::Char('q'))));
        assert_eq!(to_msg(ev(KeyCode::Enter)), Some(Msg::KeyDown(Key::Enter)));
        assert_eq!(to_msg(ev(KeyCode::Tab)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let ev = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_msg(ev), None);
    }

    #[test]
    fn mouse_drag_paints() {
        let msg = to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 3));
        assert_eq!(
            msg,
            Some(Msg::Mouse {
                action: MouseAction::Main,
                pos: Point::new(3, 7),
            })
        );
        let msg = to_msg(mouse(MouseEventKind::Down(MouseButton::Right), 0, 1));
        assert!(matches!(
            msg,
            Some(Msg::Mouse {
                action: MouseAction::Secondary,
                ..
            })
        ));
        assert_eq!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }
}
