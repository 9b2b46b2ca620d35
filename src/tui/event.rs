use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEventKind};

/// TUI-specific input events. The view-dependent mapping onto core actions
/// happens in `tui::mod`; this layer only normalizes terminal input.
pub enum TuiEvent {
    Quit,
    ForceQuit, // Ctrl+C
    Select,
    Back,
    CursorUp,
    CursorDown,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if event::poll(timeout).unwrap() {
        match event::read().unwrap() {
            Event::Key(key_event) => {
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                match (key_event.modifiers, key_event.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                    (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                    (_, KeyCode::Enter | KeyCode::Char('l')) => Some(TuiEvent::Select),
                    (_, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h')) => {
                        Some(TuiEvent::Back)
                    }
                    (_, KeyCode::Up | KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
                    (_, KeyCode::Down | KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
                    (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
                    (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
                    (_, KeyCode::Home) => Some(TuiEvent::Home),
                    (_, KeyCode::End) => Some(TuiEvent::End),
                    _ => None,
                }
            }
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
                MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
                _ => None,
            },
            Event::Resize(_, _) => Some(TuiEvent::Resize),
            _ => None,
        }
    } else {
        None
    }
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
