use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::compose::ComposeSequence;
use crate::key::{Command, DeadKey, KeyValue, Modifier, ModifierState, VOCABULARY_VERSION};
use crate::layout::{KeyDefinition, LayoutDefinition, RowDefinition};

use super::error::{PackError, Result};
use super::format::{
    InfoEntry, ObkFile, PackHeader, FORMAT_MAJOR, FORMAT_MINOR, MAGIC, VAL_CHAR, VAL_COMMAND,
    VAL_DEAD, VAL_MODIFIER, VAL_TEXT,
};

pub struct PackLoader;

impl PackLoader {
    /// Load a compiled pack from binary data
    pub fn load(data: &[u8]) -> Result<ObkFile> {
        let mut cursor = Cursor::new(data);

        let header = Self::read_header(&mut cursor)?;

        // Validate version: same major, minor no newer than we support
        if header.major_version != FORMAT_MAJOR || header.minor_version > FORMAT_MINOR {
            return Err(PackError::UnsupportedVersion {
                major: header.major_version,
                minor: header.minor_version,
            });
        }

        // A pack compiled against a newer vocabulary may reference codes
        // this runtime cannot decode
        if header.vocabulary_version > VOCABULARY_VERSION {
            return Err(PackError::VocabularyTooNew {
                pack: header.vocabulary_version,
                runtime: VOCABULARY_VERSION,
            });
        }

        let info = Self::read_info(&mut cursor, header.info_count as usize)?;
        let layouts = Self::read_layouts(&mut cursor, header.layout_count as usize)?;
        let sequences = Self::read_sequences(&mut cursor, header.sequence_count as usize)?;

        Ok(ObkFile {
            header,
            info,
            layouts,
            sequences,
        })
    }

    fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<PackHeader> {
        if cursor.get_ref().len() < 16 {
            return Err(PackError::FileTooSmall(cursor.get_ref().len()));
        }

        let mut magic = [0u8; 4];
        cursor.read_exact(&mut magic)?;

        if &magic != MAGIC {
            return Err(PackError::InvalidMagicCode(magic));
        }

        let major_version = cursor.read_u8()?;
        let minor_version = cursor.read_u8()?;
        let vocabulary_version = cursor.read_u16::<LittleEndian>()?;
        let info_count = cursor.read_u16::<LittleEndian>()?;
        let layout_count = cursor.read_u16::<LittleEndian>()?;
        let sequence_count = cursor.read_u32::<LittleEndian>()?;

        Ok(PackHeader {
            magic,
            major_version,
            minor_version,
            vocabulary_version,
            info_count,
            layout_count,
            sequence_count,
        })
    }

    fn read_info(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<InfoEntry>> {
        let mut info = Vec::with_capacity(count);
        for _ in 0..count {
            let mut id = [0u8; 4];
            cursor.read_exact(&mut id)?;
            let value = Self::read_string(cursor)?;
            info.push(InfoEntry { id, value });
        }
        Ok(info)
    }

    fn read_layouts(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<LayoutDefinition>> {
        let mut layouts = Vec::with_capacity(count);
        for _ in 0..count {
            layouts.push(Self::read_layout(cursor)?);
        }
        Ok(layouts)
    }

    fn read_layout(cursor: &mut Cursor<&[u8]>) -> Result<LayoutDefinition> {
        let id = Self::read_string(cursor)?;

        let state_count = cursor.read_u8()? as usize;
        let mut states = Vec::with_capacity(state_count);
        for _ in 0..state_count {
            states.push(Self::read_state(cursor)?);
        }

        let row_count = cursor.read_u16::<LittleEndian>()? as usize;
        let mut rows = Vec::with_capacity(row_count);
        for _ in 0..row_count {
            let key_count = cursor.read_u16::<LittleEndian>()? as usize;
            let mut keys = Vec::with_capacity(key_count);
            for _ in 0..key_count {
                let position = Self::read_string(cursor)?;
                let mapping_count = cursor.read_u8()? as usize;
                let mut mappings = Vec::with_capacity(mapping_count);
                for _ in 0..mapping_count {
                    let state = Self::read_state(cursor)?;
                    let value = Self::read_key_value(cursor)?;
                    mappings.push((state, value));
                }
                keys.push(KeyDefinition { position, mappings });
            }
            rows.push(RowDefinition { keys });
        }

        // Packs store layouts resolved, so no parent survives compilation
        Ok(LayoutDefinition {
            id,
            parent: None,
            states,
            rows,
        })
    }

    fn read_sequences(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<ComposeSequence>> {
        let mut sequences = Vec::with_capacity(count);
        for _ in 0..count {
            let chain_len = cursor.read_u16::<LittleEndian>()? as usize;
            let mut chain = Vec::with_capacity(chain_len);
            for _ in 0..chain_len {
                chain.push(Self::read_key_value(cursor)?);
            }
            let output = Self::read_string(cursor)?;
            sequences.push(ComposeSequence { chain, output });
        }
        Ok(sequences)
    }

    fn read_state(cursor: &mut Cursor<&[u8]>) -> Result<ModifierState> {
        let bits = cursor.read_u8()?;
        ModifierState::from_bits(bits).ok_or(PackError::InvalidModifierBits(bits))
    }

    fn read_key_value(cursor: &mut Cursor<&[u8]>) -> Result<KeyValue> {
        let offset = cursor.position() as usize;
        let tag = cursor.read_u8()?;
        match tag {
            VAL_CHAR => {
                let scalar = cursor.read_u32::<LittleEndian>()?;
                char::from_u32(scalar)
                    .map(KeyValue::Char)
                    .ok_or(PackError::InvalidScalar(scalar))
            }
            VAL_TEXT => Ok(KeyValue::Text(Self::read_string(cursor)?)),
            VAL_DEAD => {
                let code = cursor.read_u8()?;
                DeadKey::from_code(code).map(KeyValue::Dead).ok_or(
                    PackError::InvalidCode {
                        kind: "dead key",
                        code,
                    },
                )
            }
            VAL_MODIFIER => {
                let code = cursor.read_u8()?;
                Modifier::from_code(code).map(KeyValue::Modifier).ok_or(
                    PackError::InvalidCode {
                        kind: "modifier",
                        code,
                    },
                )
            }
            VAL_COMMAND => {
                let code = cursor.read_u8()?;
                Command::from_code(code).map(KeyValue::Command).ok_or(
                    PackError::InvalidCode {
                        kind: "command",
                        code,
                    },
                )
            }
            _ => Err(PackError::InvalidValueTag { tag, offset }),
        }
    }

    fn read_string(cursor: &mut Cursor<&[u8]>) -> Result<String> {
        let length = cursor.read_u16::<LittleEndian>()? as usize;
        let offset = cursor.position() as usize;
        let mut bytes = vec![0u8; length];
        cursor.read_exact(&mut bytes)?;
        String::from_utf8(bytes).map_err(|_| PackError::InvalidUtf8(offset))
    }
}
