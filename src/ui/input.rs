/// Keyboard input: drains crossterm events each frame and decodes them
/// into session actions.
///
/// Every action here is a one-shot, so only Press (and auto-Repeat)
/// events count. Release events are dropped.
///
/// Key bindings per view:
///   Home:    Enter/P play   C characters   Q/Esc quit
///   Gallery: ←/→ focus      Enter/Space interact   Esc/Backspace back
///   Puzzle:  1-4 digit      ←/→ + Enter pad        R reset   G reward
///            Esc/Backspace back
///   any:     Ctrl+C quit

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::view::View;
use crate::sim::step::Action;

pub struct InputState {
    /// Key presses collected during the most recent `drain_events()`.
    pub presses: Vec<KeyEvent>,
    /// Terminal was resized since the last drain.
    pub resized: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            resized: false,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call this once per frame.
    pub fn drain_events(&mut self) -> std::io::Result<()> {
        self.presses.clear();
        self.resized = false;

        while poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    self.presses.push(key);
                }
                Event::Resize(..) => self.resized = true,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Decode one key press. `None` for keys with no meaning in `view`.
pub fn map_key(view: View, key: &KeyEvent) -> Option<Action> {
    if is_ctrl_c(key) {
        return Some(Action::Quit);
    }

    match view {
        View::Home => match key.code {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                Some(Action::SetView(View::Puzzle))
            }
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::SetView(View::Gallery)),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        View::Gallery => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(Action::GalleryPrev)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(Action::GalleryNext)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::GalleryInteract),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::SetView(View::Home)),
            _ => None,
        },
        View::Puzzle => match key.code {
            KeyCode::Char(c @ '1'..='4') => c.to_digit(10).map(|d| Action::Submit(d as u8)),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::PadPrev),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::PadNext),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PadPress),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::ResetPuzzle),
            KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::ClaimReward),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::SetView(View::Home)),
            _ => None,
        },
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
}
