//! Input - crossterm event translation
//!
//! Maps crossterm key and mouse events onto [`KeyEvent`] names
//! (`CTRL_C`, `ENTER`, `ESCAPE`, ...) and the five [`MouseKind`] gestures.
//! Events the toolkit has no use for translate to `None`.

use crossterm::event::{
    Event, KeyCode, KeyEvent as CtKeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent as CtMouseEvent, MouseEventKind,
};

use crate::state::{keys, InputEvent, KeyEvent, Modifiers, MouseEvent, MouseKind};

pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::from),
        Event::Mouse(mouse) => translate_mouse(mouse).map(InputEvent::from),
        _ => None,
    }
}

pub fn translate_modifiers(modifiers: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if modifiers.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.intersects(KeyModifiers::META | KeyModifiers::SUPER) {
        out |= Modifiers::META;
    }
    out
}

pub fn translate_key(key: CtKeyEvent) -> Option<KeyEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = translate_modifiers(key.modifiers);

    let event = match key.code {
        KeyCode::Char(c) if modifiers.contains(Modifiers::CTRL) => {
            let upper = c.to_ascii_uppercase();
            KeyEvent::named(format!("CTRL_{upper}")).with_codepoint(upper as u32 & 0x1f)
        }
        KeyCode::Char(c) => KeyEvent::char(c),
        KeyCode::Enter => KeyEvent::named(keys::ENTER)
            .with_aliases([keys::RETURN])
            .with_codepoint(0x0d),
        KeyCode::Esc => KeyEvent::named(keys::ESCAPE).with_codepoint(0x1b),
        KeyCode::Backspace => KeyEvent::named(keys::BACKSPACE).with_codepoint(0x7f),
        KeyCode::Tab => KeyEvent::named(keys::TAB).with_codepoint(0x09),
        KeyCode::Delete => KeyEvent::named(keys::DELETE),
        KeyCode::Up => KeyEvent::named(keys::UP),
        KeyCode::Down => KeyEvent::named(keys::DOWN),
        KeyCode::Left => KeyEvent::named(keys::LEFT),
        KeyCode::Right => KeyEvent::named(keys::RIGHT),
        KeyCode::Home => KeyEvent::named(keys::HOME),
        KeyCode::End => KeyEvent::named(keys::END),
        KeyCode::PageUp => KeyEvent::named(keys::PAGE_UP),
        KeyCode::PageDown => KeyEvent::named(keys::PAGE_DOWN),
        KeyCode::F(n) => KeyEvent::named(format!("F{n}")),
        _ => return None,
    };

    Some(event.with_modifiers(modifiers))
}

pub fn translate_mouse(mouse: CtMouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseKind::LeftDown,
        MouseEventKind::Up(MouseButton::Left) => MouseKind::LeftUp,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseKind::Motion,
        MouseEventKind::ScrollUp => MouseKind::WheelUp,
        MouseEventKind::ScrollDown => MouseKind::WheelDown,
        _ => return None,
    };

    let mut event = MouseEvent::new(kind, mouse.column, mouse.row);
    event.modifiers = translate_modifiers(mouse.modifiers);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(CtKeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(CtMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_ctrl_c() {
        let Some(InputEvent::Key(event)) = translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL))
        else {
            panic!("expected key");
        };
        assert!(event.is(keys::CTRL_C));
        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert_eq!(event.printable(), None);
    }

    #[test]
    fn test_printable_char() {
        let Some(InputEvent::Key(event)) = translate(key(KeyCode::Char('h'), KeyModifiers::NONE))
        else {
            panic!("expected key");
        };
        assert_eq!(event.name, "h");
        assert_eq!(event.printable(), Some('h'));
    }

    #[test]
    fn test_named_keys() {
        let enter = translate_key(CtKeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).unwrap();
        assert!(enter.is(keys::ENTER));
        assert!(enter.is(keys::RETURN));

        let esc = translate_key(CtKeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        assert!(esc.is(keys::ESCAPE));

        let back = translate_key(CtKeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)).unwrap();
        assert!(back.is(keys::BACKSPACE));
        assert_eq!(back.printable(), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = CtKeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert!(translate_key(event).is_none());
    }

    #[test]
    fn test_mouse_gestures() {
        let cases = [
            (MouseEventKind::Down(MouseButton::Left), MouseKind::LeftDown),
            (MouseEventKind::Up(MouseButton::Left), MouseKind::LeftUp),
            (MouseEventKind::Moved, MouseKind::Motion),
            (MouseEventKind::Drag(MouseButton::Left), MouseKind::Motion),
            (MouseEventKind::ScrollUp, MouseKind::WheelUp),
            (MouseEventKind::ScrollDown, MouseKind::WheelDown),
        ];
        for (kind, expected) in cases {
            let Some(InputEvent::Mouse(event)) = translate(mouse(kind, 4, 7)) else {
                panic!("expected mouse event for {kind:?}");
            };
            assert_eq!(event.kind, expected);
            assert_eq!((event.x, event.y), (4, 7));
        }
    }

    #[test]
    fn test_right_button_ignored() {
        assert!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)).is_none());
        assert!(translate(Event::FocusGained).is_none());
    }
}
