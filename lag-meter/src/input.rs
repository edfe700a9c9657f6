use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lag_core::{KeySymbol, KeyTransition};

/// What a terminal key event means to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Quit,
    Suspend,
    Key(KeySymbol, KeyTransition),
    Ignored,
}

pub fn translate(key: &KeyEvent) -> KeyInput {
    if key.kind != KeyEventKind::Release && key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => return KeyInput::Quit,
            KeyCode::Char('z') | KeyCode::Char('Z') => return KeyInput::Suspend,
            _ => {}
        }
    }

    let transition = match key.kind {
        KeyEventKind::Press => KeyTransition::Press,
        KeyEventKind::Repeat => KeyTransition::Repeat,
        KeyEventKind::Release => KeyTransition::Release,
    };
    match key_symbol(key.code) {
        Some(symbol) => KeyInput::Key(symbol, transition),
        None => KeyInput::Ignored,
    }
}

pub fn key_symbol(code: KeyCode) -> Option<KeySymbol> {
    let symbol = match code {
        KeyCode::Char(c) => return KeySymbol::from_char(c),
        KeyCode::F(n) => return KeySymbol::function(n),
        KeyCode::Enter => KeySymbol::Return,
        KeyCode::Esc => KeySymbol::Escape,
        KeyCode::Backspace => KeySymbol::Backspace,
        KeyCode::Tab | KeyCode::BackTab => KeySymbol::Tab,
        KeyCode::Up => KeySymbol::UpArrow,
        KeyCode::Down => KeySymbol::DownArrow,
        KeyCode::Left => KeySymbol::LeftArrow,
        KeyCode::Right => KeySymbol::RightArrow,
        KeyCode::Insert => KeySymbol::Insert,
        KeyCode::Delete => KeySymbol::Delete,
        KeyCode::Home => KeySymbol::Home,
        KeyCode::End => KeySymbol::End,
        KeyCode::PageUp => KeySymbol::PageUp,
        KeyCode::PageDown => KeySymbol::PageDown,
        _ => return None,
    };
    Some(symbol)
}
