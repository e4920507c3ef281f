//! Key values: what a key press means, independent of where the key sits

use std::fmt;

use super::modifier::Modifier;

/// The meaning carried by one key mapping.
///
/// Layouts map (position, modifier state) to a `KeyValue`; compose chains
/// are sequences of them. The derived total order keys the compose trie's
/// child maps, which is what makes trie iteration and pack serialization
/// independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    /// A single literal character.
    Char(char),
    /// A multi-character literal, e.g. a ligature or a spelled-out token.
    Text(String),
    /// A combining accent that starts or continues a compose sequence.
    Dead(DeadKey),
    Modifier(Modifier),
    /// A named editing or navigation action.
    Command(Command),
}

impl KeyValue {
    /// Canonical literal constructor: a one-scalar string becomes `Char`,
    /// anything longer becomes `Text`. Parsers use this so `"e"` and the
    /// escape `U0065` compare equal in chains and mappings.
    pub fn from_text(text: &str) -> KeyValue {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyValue::Char(c),
            _ => KeyValue::Text(text.to_string()),
        }
    }

    /// Literal text produced by this value, if it is a literal.
    pub fn as_literal(&self) -> Option<String> {
        match self {
            KeyValue::Char(c) => Some(c.to_string()),
            KeyValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Char(c) => write!(f, "{:?}", c),
            KeyValue::Text(s) => write!(f, "{:?}", s),
            KeyValue::Dead(d) => f.write_str(d.name()),
            KeyValue::Modifier(m) => f.write_str(m.name()),
            KeyValue::Command(c) => f.write_str(c.name()),
        }
    }
}

/// Dead keys recognized by the vocabulary. Discriminants are the stable
/// codes used in compiled packs; new entries are appended, never renumbered.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeadKey {
    Acute = 0,
    Grave = 1,
    Circumflex = 2,
    Tilde = 3,
    Diaeresis = 4,
    Cedilla = 5,
    Macron = 6,
    Breve = 7,
    Caron = 8,
    Ring = 9,
    Ogonek = 10,
    DotAbove = 11,
    DotBelow = 12,
    Stroke = 13,
    HookAbove = 14,
    Horn = 15,
    DoubleAcute = 16,
}

impl DeadKey {
    pub const ALL: [DeadKey; 17] = [
        DeadKey::Acute,
        DeadKey::Grave,
        DeadKey::Circumflex,
        DeadKey::Tilde,
        DeadKey::Diaeresis,
        DeadKey::Cedilla,
        DeadKey::Macron,
        DeadKey::Breve,
        DeadKey::Caron,
        DeadKey::Ring,
        DeadKey::Ogonek,
        DeadKey::DotAbove,
        DeadKey::DotBelow,
        DeadKey::Stroke,
        DeadKey::HookAbove,
        DeadKey::Horn,
        DeadKey::DoubleAcute,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeadKey::Acute => "acute",
            DeadKey::Grave => "grave",
            DeadKey::Circumflex => "circumflex",
            DeadKey::Tilde => "tilde",
            DeadKey::Diaeresis => "diaeresis",
            DeadKey::Cedilla => "cedilla",
            DeadKey::Macron => "macron",
            DeadKey::Breve => "breve",
            DeadKey::Caron => "caron",
            DeadKey::Ring => "ring",
            DeadKey::Ogonek => "ogonek",
            DeadKey::DotAbove => "dot_above",
            DeadKey::DotBelow => "dot_below",
            DeadKey::Stroke => "stroke",
            DeadKey::HookAbove => "hook_above",
            DeadKey::Horn => "horn",
            DeadKey::DoubleAcute => "double_acute",
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<DeadKey> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for DeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Editing and navigation actions. Same code stability contract as
/// [`DeadKey`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Command {
    Backspace = 0,
    Delete = 1,
    Enter = 2,
    Tab = 3,
    Escape = 4,
    Left = 5,
    Right = 6,
    Up = 7,
    Down = 8,
    Home = 9,
    End = 10,
    PageUp = 11,
    PageDown = 12,
    Copy = 13,
    Cut = 14,
    Paste = 15,
    Undo = 16,
    Redo = 17,
    SelectAll = 18,
    /// Generic compose initiator, the head of multi-key chains that have
    /// no dedicated dead key.
    Compose = 19,
}

impl Command {
    pub const ALL: [Command; 20] = [
        Command::Backspace,
        Command::Delete,
        Command::Enter,
        Command::Tab,
        Command::Escape,
        Command::Left,
        Command::Right,
        Command::Up,
        Command::Down,
        Command::Home,
        Command::End,
        Command::PageUp,
        Command::PageDown,
        Command::Copy,
        Command::Cut,
        Command::Paste,
        Command::Undo,
        Command::Redo,
        Command::SelectAll,
        Command::Compose,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Backspace => "backspace",
            Command::Delete => "delete",
            Command::Enter => "enter",
            Command::Tab => "tab",
            Command::Escape => "escape",
            Command::Left => "left",
            Command::Right => "right",
            Command::Up => "up",
            Command::Down => "down",
            Command::Home => "home",
            Command::End => "end",
            Command::PageUp => "page_up",
            Command::PageDown => "page_down",
            Command::Copy => "copy",
            Command::Cut => "cut",
            Command::Paste => "paste",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::SelectAll => "select_all",
            Command::Compose => "compose",
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Command> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
