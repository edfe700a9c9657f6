use std::{fmt, time::Duration};

use strum::{Display, EnumCount, EnumIter};

use crate::clock::Timestamp;

/// Symbolic key identifiers.
///
/// The declaration order is the scan order used when several keys go down in
/// the same tick, so the first variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumCount,
)]
pub enum KeySymbol {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Alpha0,
    Alpha1,
    Alpha2,
    Alpha3,
    Alpha4,
    Alpha5,
    Alpha6,
    Alpha7,
    Alpha8,
    Alpha9,
    Space,
    Return,
    Escape,
    Backspace,
    Tab,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    BackQuote,
    Comma,
    Period,
    Slash,
}

const LETTERS: [KeySymbol; 26] = [
    KeySymbol::A,
    KeySymbol::B,
    KeySymbol::C,
    KeySymbol::D,
    KeySymbol::E,
    KeySymbol::F,
    KeySymbol::G,
    KeySymbol::H,
    KeySymbol::I,
    KeySymbol::J,
    KeySymbol::K,
    KeySymbol::L,
    KeySymbol::M,
    KeySymbol::N,
    KeySymbol::O,
    KeySymbol::P,
    KeySymbol::Q,
    KeySymbol::R,
    KeySymbol::S,
    KeySymbol::T,
    KeySymbol::U,
    KeySymbol::V,
    KeySymbol::W,
    KeySymbol::X,
    KeySymbol::Y,
    KeySymbol::Z,
];

const DIGITS: [KeySymbol; 10] = [
    KeySymbol::Alpha0,
    KeySymbol::Alpha1,
    KeySymbol::Alpha2,
    KeySymbol::Alpha3,
    KeySymbol::Alpha4,
    KeySymbol::Alpha5,
    KeySymbol::Alpha6,
    KeySymbol::Alpha7,
    KeySymbol::Alpha8,
    KeySymbol::Alpha9,
];

const FUNCTION_KEYS: [KeySymbol; 12] = [
    KeySymbol::F1,
    KeySymbol::F2,
    KeySymbol::F3,
    KeySymbol::F4,
    KeySymbol::F5,
    KeySymbol::F6,
    KeySymbol::F7,
    KeySymbol::F8,
    KeySymbol::F9,
    KeySymbol::F10,
    KeySymbol::F11,
    KeySymbol::F12,
];

impl KeySymbol {
    /// The key that produces `c`, ignoring case. Shifted symbols map to
    /// the key they are printed on for a US layout.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            let idx = c.to_ascii_uppercase() as usize - 'A' as usize;
            return Some(LETTERS[idx]);
        }
        if let Some(digit) = c.to_digit(10) {
            return Some(DIGITS[digit as usize]);
        }

        let key = match c {
            ' ' => KeySymbol::Space,
            '!' => KeySymbol::Alpha1,
            '@' => KeySymbol::Alpha2,
            '#' => KeySymbol::Alpha3,
            '$' => KeySymbol::Alpha4,
            '%' => KeySymbol::Alpha5,
            '^' => KeySymbol::Alpha6,
            '&' => KeySymbol::Alpha7,
            '*' => KeySymbol::Alpha8,
            '(' => KeySymbol::Alpha9,
            ')' => KeySymbol::Alpha0,
            '-' | '_' => KeySymbol::Minus,
            '=' | '+' => KeySymbol::Equals,
            '[' | '{' => KeySymbol::LeftBracket,
            ']' | '}' => KeySymbol::RightBracket,
            '\\' | '|' => KeySymbol::Backslash,
            ';' | ':' => KeySymbol::Semicolon,
            '\'' | '"' => KeySymbol::Quote,
            '`' | '~' => KeySymbol::BackQuote,
            ',' | '<' => KeySymbol::Comma,
            '.' | '>' => KeySymbol::Period,
            '/' | '?' => KeySymbol::Slash,
            _ => return None,
        };
        Some(key)
    }

    /// `F1` through `F12`.
    pub fn function(n: u8) -> Option<Self> {
        let idx = (n as usize).checked_sub(1)?;
        FUNCTION_KEYS.get(idx).copied()
    }
}

/// A key that went down, with the time it was noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeySymbol,
    pub captured_at: Timestamp,
}

impl KeyEvent {
    pub fn new(key: KeySymbol, captured_at: Timestamp) -> Self {
        Self { key, captured_at }
    }
}

/// The span from a key being noticed to the start of the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    pub key: KeySymbol,
    pub captured_at: Timestamp,
    pub visible_at: Timestamp,
}

impl LatencySample {
    pub fn new(event: KeyEvent, visible_at: Timestamp) -> Self {
        Self {
            key: event.key,
            captured_at: event.captured_at,
            visible_at,
        }
    }

    pub fn latency(&self) -> Duration {
        self.visible_at.saturating_since(self.captured_at)
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency().as_secs_f64() * 1000.0
    }
}

impl fmt::Display for LatencySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input lag for {}: {:.2} ms", self.key, self.latency_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scan_order_is_declaration_order() {
        let keys: Vec<KeySymbol> = KeySymbol::iter().collect();
        assert_eq!(keys.len(), KeySymbol::COUNT);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys[0], KeySymbol::A);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(KeySymbol::from_char('a'), Some(KeySymbol::A));
        assert_eq!(KeySymbol::from_char('Z'), Some(KeySymbol::Z));
        assert_eq!(KeySymbol::from_char('7'), Some(KeySymbol::Alpha7));
        assert_eq!(KeySymbol::from_char('!'), Some(KeySymbol::Alpha1));
        assert_eq!(KeySymbol::from_char(' '), Some(KeySymbol::Space));
        assert_eq!(KeySymbol::from_char('?'), Some(KeySymbol::Slash));
        assert_eq!(KeySymbol::from_char('é'), None);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(KeySymbol::function(1), Some(KeySymbol::F1));
        assert_eq!(KeySymbol::function(12), Some(KeySymbol::F12));
        assert_eq!(KeySymbol::function(0), None);
        assert_eq!(KeySymbol::function(13), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(KeySymbol::A.to_string(), "A");
        assert_eq!(KeySymbol::Alpha1.to_string(), "Alpha1");
        assert_eq!(KeySymbol::Return.to_string(), "Return");
    }

    #[test]
    fn test_latency_message() {
        let event = KeyEvent::new(KeySymbol::A, Timestamp::from_millis(10_000));
        let sample = LatencySample::new(event, Timestamp::from_millis(10_016));
        assert_eq!(sample.latency(), Duration::from_millis(16));
        assert_eq!(sample.to_string(), "Input lag for A: 16.00 ms");
    }

    #[test]
    fn test_latency_matches_elapsed_time() {
        let pairs = [
            (0.0, 0.0),
            (1.0, 1.0005),
            (10.0, 10.016),
            (10.5, 10.517),
            (123.456, 124.0),
        ];
        for (t0, t1) in pairs {
            let event = KeyEvent::new(KeySymbol::Space, Timestamp::from_secs_f64(t0));
            let sample = LatencySample::new(event, Timestamp::from_secs_f64(t1));
            let expected = (t1 - t0) * 1000.0;
            assert!(sample.latency_ms() >= 0.0);
            assert!((sample.latency_ms() - expected).abs() < 1e-3);
            assert_eq!(
                sample.to_string(),
                format!("Input lag for Space: {expected:.2} ms")
            );
        }
    }

    #[test]
    fn test_latency_never_negative() {
        let event = KeyEvent::new(KeySymbol::B, Timestamp::from_millis(500));
        let sample = LatencySample::new(event, Timestamp::from_millis(400));
        assert_eq!(sample.latency_ms(), 0.0);
        assert_eq!(sample.to_string(), "Input lag for B: 0.00 ms");
    }
}
