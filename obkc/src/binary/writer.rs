use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use overboard_core::pack::{
    InfoEntry, ObkFile, PackHeader, VAL_CHAR, VAL_COMMAND, VAL_DEAD, VAL_MODIFIER, VAL_TEXT,
};
use overboard_core::{ComposeSequence, Error, KeyValue, LayoutDefinition, ModifierState};

/// Serializer for the `.obk` pack format. The byte layout is the exact
/// mirror of [`overboard_core::PackLoader`].
pub struct ObkWriter<W: Write> {
    writer: W,
}

impl<W: Write> ObkWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_pack(mut self, pack: &ObkFile) -> Result<(), Error> {
        self.write_header(&pack.header)?;

        for info in &pack.info {
            self.write_info(info)?;
        }

        for layout in &pack.layouts {
            self.write_layout(layout)?;
        }

        for sequence in &pack.sequences {
            self.write_sequence(sequence)?;
        }

        Ok(())
    }

    fn write_header(&mut self, header: &PackHeader) -> Result<(), Error> {
        self.writer.write_all(&header.magic)?;

        self.writer.write_u8(header.major_version)?;
        self.writer.write_u8(header.minor_version)?;
        self.writer
            .write_u16::<LittleEndian>(header.vocabulary_version)?;

        self.writer.write_u16::<LittleEndian>(header.info_count)?;
        self.writer.write_u16::<LittleEndian>(header.layout_count)?;
        self.writer
            .write_u32::<LittleEndian>(header.sequence_count)?;

        Ok(())
    }

    fn write_info(&mut self, info: &InfoEntry) -> Result<(), Error> {
        self.writer.write_all(&info.id)?;
        self.write_string(&info.value)
    }

    fn write_layout(&mut self, layout: &LayoutDefinition) -> Result<(), Error> {
        self.write_string(&layout.id)?;

        self.writer.write_u8(layout.states.len() as u8)?;
        for state in &layout.states {
            self.write_state(*state)?;
        }

        self.writer.write_u16::<LittleEndian>(layout.rows.len() as u16)?;
        for row in &layout.rows {
            self.writer.write_u16::<LittleEndian>(row.keys.len() as u16)?;
            for key in &row.keys {
                self.write_string(&key.position)?;
                self.writer.write_u8(key.mappings.len() as u8)?;
                for (state, value) in &key.mappings {
                    self.write_state(*state)?;
                    self.write_key_value(value)?;
                }
            }
        }

        Ok(())
    }

    fn write_sequence(&mut self, sequence: &ComposeSequence) -> Result<(), Error> {
        self.writer
            .write_u16::<LittleEndian>(sequence.chain.len() as u16)?;
        for value in &sequence.chain {
            self.write_key_value(value)?;
        }
        self.write_string(&sequence.output)
    }

    fn write_state(&mut self, state: ModifierState) -> Result<(), Error> {
        self.writer.write_u8(state.bits())?;
        Ok(())
    }

    fn write_key_value(&mut self, value: &KeyValue) -> Result<(), Error> {
        match value {
            KeyValue::Char(c) => {
                self.writer.write_u8(VAL_CHAR)?;
                self.writer.write_u32::<LittleEndian>(*c as u32)?;
            }
            KeyValue::Text(s) => {
                self.writer.write_u8(VAL_TEXT)?;
                self.write_string(s)?;
            }
            KeyValue::Dead(dead) => {
                self.writer.write_u8(VAL_DEAD)?;
                self.writer.write_u8(dead.code())?;
            }
            KeyValue::Modifier(modifier) => {
                self.writer.write_u8(VAL_MODIFIER)?;
                self.writer.write_u8(modifier.code())?;
            }
            KeyValue::Command(command) => {
                self.writer.write_u8(VAL_COMMAND)?;
                self.writer.write_u8(command.code())?;
            }
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), Error> {
        // Length is in UTF-8 bytes
        self.writer.write_u16::<LittleEndian>(s.len() as u16)?;
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }
}
