//! Input mapping
//!
//! Turns raw terminal events (or a typed console line) into commands for
//! the game loop. Anything unrecognised maps to `None` and is dropped.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::consts::MAX_LABEL;
use crate::renderer::Viewport;
use crate::sim::PlayerAction;

/// What the front-end should do with an input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Action(PlayerAction),
    /// Start or restart a session
    Start,
    Quit,
}

/// Parse a typed selection. Only 1-9 are valid; everything else is ignored.
pub fn parse_selection(text: &str) -> Option<u8> {
    text.trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=MAX_LABEL).contains(n))
}

pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('s') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char(c) => c
            .to_digit(10)
            .filter(|d| (1..=MAX_LABEL as u32).contains(d))
            .map(|d| Command::Action(PlayerAction::Select(d as u8))),
        _ => None,
    }
}

/// Left clicks inside the playfield become game-area clicks
pub fn map_mouse(mouse: &MouseEvent, viewport: &Viewport) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => viewport
            .cell_to_area(mouse.column, mouse.row)
            .map(|p| Command::Action(PlayerAction::Click(p))),
        _ => None,
    }
}

pub fn map_event(event: &Event, viewport: &Viewport) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, viewport),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("3"), Some(3));
        assert_eq!(parse_selection(" 9\n"), Some(9));
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("10"), None);
        assert_eq!(parse_selection("frog"), None);
        assert_eq!(parse_selection(""), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            map_key(&key(KeyCode::Char('7'))),
            Some(Command::Action(PlayerAction::Select(7)))
        );
        assert_eq!(map_key(&key(KeyCode::Char('0'))), None);
        for (c, n) in ('1'..='9').zip(1u8..) {
            assert_eq!(
                map_key(&key(KeyCode::Char(c))),
                Some(Command::Action(PlayerAction::Select(n)))
            );
        }
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_mouse_click_maps_to_area() {
        let viewport = Viewport::new(82, 32, Vec2::new(800.0, 600.0));
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 41,
            row: 16,
            modifiers: KeyModifiers::NONE,
        };
        match map_mouse(&down, &viewport) {
            Some(Command::Action(PlayerAction::Click(p))) => {
                assert!(p.x > 350.0 && p.x < 450.0, "{p}");
                assert!(p.y > 250.0 && p.y < 350.0, "{p}");
            }
            other => panic!("unexpected {other:?}"),
        }

        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..down
        };
        assert_eq!(map_mouse(&up, &viewport), None);
    }
}
