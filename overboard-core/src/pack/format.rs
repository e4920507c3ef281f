//! On-disk structure of compiled keyboard packs

use crate::compose::{ComposeSequence, ComposeTrie};
use crate::error::Result;
use crate::layout::{LayoutDefinition, LayoutRegistry};

pub const MAGIC: &[u8; 4] = b"OBKP";
pub const FORMAT_MAJOR: u8 = 1;
pub const FORMAT_MINOR: u8 = 0;

// Standard info IDs
pub const INFO_NAME: &[u8; 4] = b"name";
pub const INFO_SCRIPT: &[u8; 4] = b"scpt";
pub const INFO_LOCALE: &[u8; 4] = b"locl";
pub const INFO_DESC: &[u8; 4] = b"desc";

// Key value wire tags
pub const VAL_CHAR: u8 = 0x01;
pub const VAL_TEXT: u8 = 0x02;
pub const VAL_DEAD: u8 = 0x03;
pub const VAL_MODIFIER: u8 = 0x04;
pub const VAL_COMMAND: u8 = 0x05;

/// Fixed 16-byte pack header.
#[derive(Debug, Clone, Copy)]
pub struct PackHeader {
    pub magic: [u8; 4],
    pub major_version: u8,
    pub minor_version: u8,
    /// Key vocabulary revision the pack was compiled against.
    pub vocabulary_version: u16,
    pub info_count: u16,
    pub layout_count: u16,
    pub sequence_count: u32,
}

impl PackHeader {
    pub fn new() -> Self {
        PackHeader {
            magic: *MAGIC,
            major_version: FORMAT_MAJOR,
            minor_version: FORMAT_MINOR,
            vocabulary_version: crate::key::VOCABULARY_VERSION,
            info_count: 0,
            layout_count: 0,
            sequence_count: 0,
        }
    }
}

impl Default for PackHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// One metadata entry: a 4-byte id and a UTF-8 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    pub id: [u8; 4],
    pub value: String,
}

/// A decoded pack, structurally valid but not yet re-validated.
///
/// Layouts are stored resolved: inheritance was applied at compile time,
/// so every stored definition is parentless with an explicit state list.
/// [`assemble`](ObkFile::assemble) pushes the contents back through the
/// ordinary registry and trie builders, re-checking every invariant
/// before anything reaches keystroke handling.
#[derive(Debug)]
pub struct ObkFile {
    pub header: PackHeader,
    pub info: Vec<InfoEntry>,
    pub layouts: Vec<LayoutDefinition>,
    pub sequences: Vec<ComposeSequence>,
}

impl ObkFile {
    pub fn info_value(&self, id: &[u8; 4]) -> Option<&str> {
        self.info
            .iter()
            .find(|entry| entry.id == *id)
            .map(|entry| entry.value.as_str())
    }

    /// Build the runtime structures, re-validating the whole pack.
    pub fn assemble(self) -> Result<KeyboardPack> {
        let registry = LayoutRegistry::build(self.layouts)?;
        let compose = ComposeTrie::from_sequences(self.sequences)?;
        Ok(KeyboardPack {
            info: self.info,
            registry,
            compose,
        })
    }
}

/// Everything the host needs at keystroke time: the resolved layouts and
/// the compiled compose trie, both read-only.
#[derive(Debug)]
pub struct KeyboardPack {
    pub info: Vec<InfoEntry>,
    pub registry: LayoutRegistry,
    pub compose: ComposeTrie,
}

impl KeyboardPack {
    pub fn name(&self) -> Option<&str> {
        self.info_value(INFO_NAME)
    }

    pub fn info_value(&self, id: &[u8; 4]) -> Option<&str> {
        self.info
            .iter()
            .find(|entry| entry.id == *id)
            .map(|entry| entry.value.as_str())
    }
}
