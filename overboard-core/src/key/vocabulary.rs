//! The closed, versioned table of symbolic key names

use std::collections::HashMap;

use crate::error::{Error, Result};

use super::modifier::Modifier;
use super::value::{Command, DeadKey, KeyValue};

/// Revision of the name table. Appending names bumps this; compiled packs
/// record the version they were built against and the loader refuses packs
/// newer than the runtime.
pub const VOCABULARY_VERSION: u16 = 1;

/// Maps symbolic names from layout and sequence sources to key values.
///
/// The table is closed: a name either resolves or compilation fails with
/// [`Error::UnknownKeyName`]. Layouts and compose sequences go through the
/// same table, which is what keeps a dead key named in a layout and the
/// same dead key heading a compose chain identical values.
pub struct KeyVocabulary {
    names: HashMap<&'static str, KeyValue>,
}

impl KeyVocabulary {
    pub fn new() -> Self {
        let mut map: HashMap<&'static str, KeyValue> = HashMap::new();

        // Modifiers
        for modifier in Modifier::ALL {
            map.insert(modifier.name(), KeyValue::Modifier(modifier));
        }
        map.insert("control", KeyValue::Modifier(Modifier::Ctrl));

        // Dead keys
        for dead in DeadKey::ALL {
            map.insert(dead.name(), KeyValue::Dead(dead));
        }
        map.insert("umlaut", KeyValue::Dead(DeadKey::Diaeresis));
        map.insert("trema", KeyValue::Dead(DeadKey::Diaeresis));
        map.insert("hacek", KeyValue::Dead(DeadKey::Caron));
        map.insert("slash", KeyValue::Dead(DeadKey::Stroke));

        // Commands
        for command in Command::ALL {
            map.insert(command.name(), KeyValue::Command(command));
        }
        map.insert("bksp", KeyValue::Command(Command::Backspace));
        map.insert("del", KeyValue::Command(Command::Delete));
        map.insert("return", KeyValue::Command(Command::Enter));
        map.insert("esc", KeyValue::Command(Command::Escape));

        // Named characters that are awkward to quote in sources
        map.insert("space", KeyValue::Char(' '));
        map.insert("nbsp", KeyValue::Char('\u{00A0}'));
        map.insert("zwnj", KeyValue::Char('\u{200C}'));
        map.insert("zwj", KeyValue::Char('\u{200D}'));

        KeyVocabulary { names: map }
    }

    /// Look up a symbolic name from source text.
    pub fn resolve(&self, name: &str) -> Result<KeyValue> {
        self.names
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownKeyName(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Render a value the way diagnostics and dump tools print it: the
    /// primary name for named values, quoted literals for `Char`/`Text`.
    pub fn canonical_name(&self, value: &KeyValue) -> String {
        value.to_string()
    }
}

impl Default for KeyVocabulary {
    fn default() -> Self {
        Self::new()
    }
}
